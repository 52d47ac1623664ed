#[allow(non_snake_case)]
pub mod BoundaryConditions;
#[allow(non_snake_case)]
pub mod DifferentialSystem;
#[allow(non_snake_case)]
pub mod InitialConditions;
#[allow(non_snake_case)]
pub mod Integrators;
#[allow(non_snake_case)]
pub mod PDE;
pub mod errors;
pub mod task_config;
