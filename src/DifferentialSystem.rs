//! # Differential system
//!
//! Turns a 1D PDE on `[0, 1]` into a system of ODEs in time (method of lines) and drives a
//! stiff integrator over it.
//!
//! ## Workflow
//! 1. `configure_space(n)`: uniform grid, `dx = 1/(n-1)`
//! 2. `configure_time(start, end, dt)`: output times, `dt` adjusted if it does not divide
//!    the interval
//! 3. `set_pde(...)`: Heat or Bateman-Burgers model
//! 4. `select_left_boundary(i, ...)` then `select_right_boundary(j, ...)`: catalog entries
//!    initialized with their parameters
//! 5. `set_initial_condition(...)`, `build_initial_state()`
//! 6. `run()`: BDF integration, state reported at every output time
//!
//! [`DifferentialSystem::from_config`] performs steps 1-5 from a
//! [`ProblemConfig`](crate::task_config::ProblemConfig).
//!
//! ## Example
//! ```rust, ignore
//! use PDEtoODE::DifferentialSystem::DifferentialSystem;
//! use PDEtoODE::BoundaryConditions::BoundaryParameters;
//! use PDEtoODE::InitialConditions::InitialCondition;
//! use PDEtoODE::PDE::PdeConfig;
//!
//! let mut system = DifferentialSystem::new();
//! system.configure_space(21)?;
//! system.configure_time(0.0, 0.5, 0.05)?;
//! system.set_pde(&PdeConfig::Heat { alpha: 1.0, lateral_cooling: 0.0, lateral_ambient: 5.0 })?;
//! system.select_left_boundary(0, &BoundaryParameters::FixedValue)?;
//! system.select_right_boundary(1, &BoundaryParameters::HeatFlux { flux: 0.0 })?;
//! system.set_initial_condition(InitialCondition::Linear { left: 5.0, right: 30.0 })?;
//! system.build_initial_state()?;
//! let solution = system.run()?;
//! ```
pub mod differential_system;
pub mod discretization;
pub mod grid;

pub use differential_system::DifferentialSystem;
pub use discretization::Discretization;
pub use grid::{SpatialGrid, TimeGrid};
