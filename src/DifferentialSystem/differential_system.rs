use super::discretization::Discretization;
use super::grid::{SpatialGrid, TimeGrid};
use crate::BoundaryConditions::{
    BoundaryCondition, BoundaryConditionTrait, BoundaryParameters, Side,
};
use crate::InitialConditions::InitialCondition;
use crate::Integrators::BDF::BdfIntegrator;
use crate::Integrators::{IvpSolution, StiffIntegrator};
use crate::PDE::{PdeConfig, PdeModel, PdeModelTrait, create_pde_model};
use crate::errors::PdeError;
use crate::task_config::{ProblemConfig, SolverSettings};
use log::info;
use nalgebra::{DMatrix, DVector};
use std::rc::Rc;

/// Method-of-lines problem: grids, PDE model, boundary conditions, initial state and the
/// result of the last integration run.
///
/// Configuration runs in two phases. Construction of the grids and the PDE model does no
/// parameter capture; boundary conditions are then selected by catalog index and initialized
/// with explicit [`BoundaryParameters`].
#[derive(Debug, Clone, Default)]
pub struct DifferentialSystem {
    pub name: Option<String>,
    spatial_grid: Option<SpatialGrid>,
    time_grid: Option<TimeGrid>,
    pde_config: Option<PdeConfig>,
    pde: Option<PdeModel>,
    left_index: Option<usize>,
    left_boundary: Option<BoundaryCondition>,
    right_boundary: Option<BoundaryCondition>,
    initial_condition: Option<InitialCondition>,
    initial_state: Option<DVector<f64>>,
    pub solver: SolverSettings,
    solution: Option<IvpSolution>,
}

impl DifferentialSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a fully configured system from a task description.
    ///
    /// # Arguments
    /// * `config` - Validated or unvalidated task; it is validated again here
    ///
    /// # Returns
    /// A system with grids, model, both boundary conditions and the initial state in place,
    /// ready for [`DifferentialSystem::run`]
    pub fn from_config(config: &ProblemConfig) -> Result<Self, PdeError> {
        config.validate()?;
        let mut system = Self::new();
        system.name = config.name.clone();
        system.solver = config.solver.clone();
        system.configure_space(config.point_count)?;
        system.configure_time(config.time.start, config.time.end, config.time.step)?;
        system.set_pde(&config.pde)?;
        system.select_left_boundary(config.left_boundary.index, &config.left_boundary.parameters)?;
        system.select_right_boundary(
            config.right_boundary.index,
            &config.right_boundary.parameters,
        )?;
        system.set_initial_condition(config.initial_condition.clone())?;
        system.build_initial_state()?;
        Ok(system)
    }

    ////////////////////////////////////////////////////////////////////////////////////
    //                           GRIDS
    ////////////////////////////////////////////////////////////////////////////////////

    /// Uniform grid of `point_count` points on [0, 1]. A new grid drops the PDE model, the
    /// boundary selections and the initial state built for the previous one.
    pub fn configure_space(&mut self, point_count: usize) -> Result<(), PdeError> {
        let grid = SpatialGrid::new(point_count)?;
        info!(
            "Spatial grid: {} points, delta_x = {}",
            grid.len(),
            grid.delta_x()
        );
        self.spatial_grid = Some(grid);
        self.pde = None;
        self.pde_config = None;
        self.clear_boundaries();
        self.initial_state = None;
        self.solution = None;
        Ok(())
    }

    /// Output time grid. Returns the adjusted step when the requested one did not divide
    /// `[start, end]` evenly.
    pub fn configure_time(
        &mut self,
        start: f64,
        end: f64,
        requested_delta_t: f64,
    ) -> Result<Option<f64>, PdeError> {
        let grid = TimeGrid::new(start, end, requested_delta_t)?;
        info!(
            "Time grid: {} points on [{}, {}], delta_t = {}",
            grid.len(),
            start,
            end,
            grid.delta_t()
        );
        let adjusted = grid.adjusted_delta_t();
        self.time_grid = Some(grid);
        self.solution = None;
        Ok(adjusted)
    }

    pub fn spatial_grid(&self) -> Option<&SpatialGrid> {
        self.spatial_grid.as_ref()
    }

    pub fn time_grid(&self) -> Option<&TimeGrid> {
        self.time_grid.as_ref()
    }

    ////////////////////////////////////////////////////////////////////////////////////
    //                           MODEL SELECTION
    ////////////////////////////////////////////////////////////////////////////////////

    /// Builds the PDE model for the current spatial grid and clears boundary selections.
    pub fn set_pde(&mut self, config: &PdeConfig) -> Result<(), PdeError> {
        let grid = self
            .spatial_grid
            .as_ref()
            .ok_or(PdeError::NotConfigured("spatial grid"))?;
        let model = create_pde_model(config, grid.delta_x())?;
        info!("PDE model: {}", model.name());
        self.pde = Some(model);
        self.pde_config = Some(config.clone());
        self.clear_boundaries();
        self.solution = None;
        Ok(())
    }

    pub fn pde(&self) -> Option<&PdeModel> {
        self.pde.as_ref()
    }

    pub fn left_boundary_catalog(&self) -> Result<&[BoundaryCondition], PdeError> {
        Ok(self.pde_model()?.left_boundary_catalog())
    }

    /// Right catalog allowed by the current left selection.
    pub fn right_boundary_catalog(&self) -> Result<&[BoundaryCondition], PdeError> {
        let left_index = self
            .left_index
            .ok_or(PdeError::NotConfigured("left boundary condition"))?;
        Ok(self.pde_model()?.right_boundary_catalog(left_index))
    }

    /// Clones entry `index` of the left catalog and initializes it with `parameters`.
    /// A new left selection clears the right one, whose catalog depends on it.
    pub fn select_left_boundary(
        &mut self,
        index: usize,
        parameters: &BoundaryParameters,
    ) -> Result<(), PdeError> {
        let catalog = self.left_boundary_catalog()?;
        let condition = pick(catalog, Side::Left, index, parameters)?;
        info!("Left boundary: {}", condition.describe());
        self.left_boundary = Some(condition);
        self.left_index = Some(index);
        self.right_boundary = None;
        self.solution = None;
        Ok(())
    }

    pub fn select_right_boundary(
        &mut self,
        index: usize,
        parameters: &BoundaryParameters,
    ) -> Result<(), PdeError> {
        let catalog = self.right_boundary_catalog()?;
        let condition = pick(catalog, Side::Right, index, parameters)?;
        info!("Right boundary: {}", condition.describe());
        self.right_boundary = Some(condition);
        self.solution = None;
        Ok(())
    }

    pub fn left_boundary(&self) -> Option<&BoundaryCondition> {
        self.left_boundary.as_ref()
    }

    pub fn right_boundary(&self) -> Option<&BoundaryCondition> {
        self.right_boundary.as_ref()
    }

    pub fn set_initial_condition(&mut self, initial: InitialCondition) -> Result<(), PdeError> {
        initial.validate()?;
        self.initial_condition = Some(initial);
        self.initial_state = None;
        self.solution = None;
        Ok(())
    }

    /// Evaluates the initial condition at every grid point: the state at `t0`.
    pub fn build_initial_state(&mut self) -> Result<&DVector<f64>, PdeError> {
        let grid = self
            .spatial_grid
            .as_ref()
            .ok_or(PdeError::NotConfigured("spatial grid"))?;
        let initial = self
            .initial_condition
            .as_ref()
            .ok_or(PdeError::NotConfigured("initial condition"))?;
        let state = initial.generate(grid.points());
        Ok(&*self.initial_state.insert(state))
    }

    pub fn initial_state(&self) -> Option<&DVector<f64>> {
        self.initial_state.as_ref()
    }

    ////////////////////////////////////////////////////////////////////////////////////
    //                           EVALUATION
    ////////////////////////////////////////////////////////////////////////////////////

    /// Right-hand side and Jacobian of the current selections, as an owned value.
    pub fn discretization(&self) -> Result<Discretization, PdeError> {
        let pde = self.pde_model()?;
        let left = self
            .left_boundary
            .as_ref()
            .ok_or(PdeError::NotConfigured("left boundary condition"))?;
        let right = self
            .right_boundary
            .as_ref()
            .ok_or(PdeError::NotConfigured("right boundary condition"))?;
        for condition in [left, right] {
            if !condition.is_initialized() {
                return Err(PdeError::BoundaryNotInitialized {
                    side: condition.side(),
                    name: condition.name(),
                });
            }
        }
        Ok(Discretization::new(pde.clone(), left.clone(), right.clone()))
    }

    /// dy/dt at `(t, state)`.
    pub fn evaluate_derivative(
        &self,
        _t: f64,
        state: &DVector<f64>,
    ) -> Result<DVector<f64>, PdeError> {
        self.check_state(state)?;
        Ok(self.discretization()?.derivative(state))
    }

    /// n x n Jacobian of dy/dt at `(t, state)`, rebuilt from zero on every call.
    pub fn evaluate_jacobian(
        &self,
        _t: f64,
        state: &DVector<f64>,
    ) -> Result<DMatrix<f64>, PdeError> {
        self.check_state(state)?;
        Ok(self.discretization()?.jacobian(state))
    }

    ////////////////////////////////////////////////////////////////////////////////////
    //                           INTEGRATION
    ////////////////////////////////////////////////////////////////////////////////////

    /// Integrates with [`BdfIntegrator`] using the configured tolerances, reporting the state
    /// exactly at the time grid points.
    pub fn run(&mut self) -> Result<&IvpSolution, PdeError> {
        self.solver.validate()?;
        let mut bdf = BdfIntegrator::new(self.solver.rtol, self.solver.atol);
        if let Some(max_step) = self.solver.max_step {
            bdf.set_max_step(max_step);
        }
        bdf.set_first_step(self.solver.first_step);
        self.run_with(&mut bdf)
    }

    /// Integrates with any [`StiffIntegrator`]. Integrator failures are returned unchanged.
    pub fn run_with(
        &mut self,
        integrator: &mut dyn StiffIntegrator,
    ) -> Result<&IvpSolution, PdeError> {
        if self.initial_state.is_none() {
            self.build_initial_state()?;
        }
        let solution = {
            let time_grid = self
                .time_grid
                .as_ref()
                .ok_or(PdeError::NotConfigured("time grid"))?;
            let y0 = self
                .initial_state
                .as_ref()
                .ok_or(PdeError::NotConfigured("initial state"))?;
            self.check_state(y0)?;
            let system = self.discretization()?;
            info!(
                "Solving {} ODEs on [{}, {}] ...",
                y0.len(),
                time_grid.start(),
                time_grid.end()
            );
            integrator.solve(
                Rc::new(system),
                (time_grid.start(), time_grid.end()),
                y0,
                Some(time_grid.points()),
            )?
        };
        info!("Solution computed: {}", solution.message);
        Ok(&*self.solution.insert(solution))
    }

    pub fn solution(&self) -> Option<&IvpSolution> {
        self.solution.as_ref()
    }

    /// Drops every configuration step and the last solution.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    ////////////////////////////////////////////////////////////////////////////////////
    //                           SUMMARY
    ////////////////////////////////////////////////////////////////////////////////////

    pub fn pretty_print_task(&self) {
        use prettytable::{Cell, Row, Table, row};
        let not_set = || "not set".to_string();
        let mut table = Table::new();
        table.add_row(row!["Parameter", "Value"]);
        let mut add = |key: &str, value: String| {
            table.add_row(Row::new(vec![Cell::new(key), Cell::new(&value)]));
        };
        add("Task", self.name.clone().unwrap_or_else(|| "unnamed".to_string()));
        add(
            "Spatial grid",
            self.spatial_grid.as_ref().map_or_else(not_set, |g| {
                format!("{} points, dx = {}", g.len(), g.delta_x())
            }),
        );
        add(
            "Time grid",
            self.time_grid.as_ref().map_or_else(not_set, |g| {
                format!(
                    "[{}, {}], {} points, dt = {}",
                    g.start(),
                    g.end(),
                    g.len(),
                    g.delta_t()
                )
            }),
        );
        add(
            "PDE",
            self.pde_config
                .as_ref()
                .map_or_else(not_set, |config| format!("{:?}", config)),
        );
        add(
            "Left boundary",
            self.left_boundary
                .as_ref()
                .map_or_else(not_set, |bc| bc.describe()),
        );
        add(
            "Right boundary",
            self.right_boundary
                .as_ref()
                .map_or_else(not_set, |bc| bc.describe()),
        );
        add(
            "Initial condition",
            self.initial_condition
                .as_ref()
                .map_or_else(not_set, |ic| format!("{:?}", ic)),
        );
        add(
            "Tolerances",
            format!("rtol = {}, atol = {}", self.solver.rtol, self.solver.atol),
        );
        table.printstd();
    }

    fn pde_model(&self) -> Result<&PdeModel, PdeError> {
        self.pde.as_ref().ok_or(PdeError::NotConfigured("PDE model"))
    }

    fn clear_boundaries(&mut self) {
        self.left_index = None;
        self.left_boundary = None;
        self.right_boundary = None;
    }

    fn check_state(&self, state: &DVector<f64>) -> Result<(), PdeError> {
        let grid = self
            .spatial_grid
            .as_ref()
            .ok_or(PdeError::NotConfigured("spatial grid"))?;
        if state.len() != grid.len() {
            return Err(PdeError::StateDimension {
                expected: grid.len(),
                got: state.len(),
            });
        }
        Ok(())
    }
}

fn pick(
    catalog: &[BoundaryCondition],
    side: Side,
    index: usize,
    parameters: &BoundaryParameters,
) -> Result<BoundaryCondition, PdeError> {
    let mut condition = catalog
        .get(index)
        .cloned()
        .ok_or(PdeError::CatalogSelection {
            side,
            index,
            available: catalog.len(),
        })?;
    condition.initialize(parameters)?;
    Ok(condition)
}
