use PDEtoODE::BoundaryConditions::pretty_print_catalog;
use PDEtoODE::DifferentialSystem::DifferentialSystem;
use PDEtoODE::PDE::PdeModelNames;
use PDEtoODE::errors::PdeError;
use PDEtoODE::task_config::ProblemConfig;
use log::{LevelFilter, error, info};
use prettytable::{Cell, Row, Table, row};
use simplelog::{Config, SimpleLogger};
use std::process::ExitCode;

/// Usage: `PDEtoODE [task.json]`. Without a task file the default heat problem is solved.
fn solve(path: Option<String>) -> Result<(), PdeError> {
    let config = match path {
        Some(path) => ProblemConfig::from_file(path)?,
        None => {
            info!("No task file given, solving the default task");
            ProblemConfig::default()
        }
    };
    PdeModelNames::pretty_print();
    let mut system = DifferentialSystem::from_config(&config)?;
    pretty_print_catalog("LEFT BOUNDARY CONDITIONS", system.left_boundary_catalog()?);
    pretty_print_catalog("RIGHT BOUNDARY CONDITIONS", system.right_boundary_catalog()?);
    system.pretty_print_task();

    let solution = system.run()?.clone();
    info!(
        "{} output times, {} rhs evaluations, {} Jacobians: {}",
        solution.t.len(),
        solution.nfev,
        solution.njev,
        solution.message
    );
    let grid = system
        .spatial_grid()
        .ok_or(PdeError::NotConfigured("spatial grid"))?;
    let initial = system
        .initial_state()
        .ok_or(PdeError::NotConfigured("initial state"))?;
    let last = solution
        .final_state()
        .ok_or(PdeError::NotConfigured("solution"))?;

    let mut table = Table::new();
    table.add_row(row!["x", "y(t0)", "y(t_end)"]);
    for (i, x) in grid.points().iter().enumerate() {
        table.add_row(Row::new(vec![
            Cell::new(&format!("{:.4}", x)),
            Cell::new(&format!("{:.6}", initial[i])),
            Cell::new(&format!("{:.6}", last[i])),
        ]));
    }
    table.printstd();
    Ok(())
}

fn main() -> ExitCode {
    let _ = SimpleLogger::init(LevelFilter::Info, Config::default());
    match solve(std::env::args().nth(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
