//! # PDE models
//!
//! Each model supplies the interior finite-difference stencil of a 1D PDE on `[0, 1]`
//! (derivative and analytic Jacobian row) and curates the catalogs of boundary conditions it
//! accepts.
//!
//! | Model | Interior dy_i/dt |
//! |-------|------------------|
//! | `Heat` | `(alpha/dx²)(y[i-1] - 2y[i] + y[i+1]) + k(y∞ - y[i])` |
//! | `BatemanBurgers` | `(y[i+1]² - y[i-1]²)/(4dx) + (alpha/dx²)(y[i-1] - 2y[i] + y[i+1])` |
//!
//! ## Catalog rule
//! The left catalog is always offered in full. The right catalog is offered in full only when
//! the chosen left condition is the fixed-value entry (index 0); any other left choice restricts
//! the right side to fixed value. The restriction runs in this direction only.
//!
//! ## Utilities
//! - [`PdeModelNames`] lists the available models with their formulas
//! - [`PdeConfig`] carries the physical coefficients of a model
//! - [`create_pde_model`] builds a model for a given grid spacing
use crate::BoundaryConditions::BoundaryCondition;
use crate::errors::{PdeError, check_positive};
use RustedSciThe::symbolic::symbolic_engine::Expr;
use enum_dispatch::enum_dispatch;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

pub mod BatemanBurgersPDE;
pub mod HeatPDE;
pub mod symbolic_stencils;

pub use BatemanBurgersPDE::BatemanBurgers;
pub use HeatPDE::Heat;

/// Diffusion coefficients shared by a model with its boundary conditions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffusionStencil {
    pub alpha: f64,
    pub delta_x: f64,
}

impl DiffusionStencil {
    pub fn new(alpha: f64, delta_x: f64) -> Self {
        Self { alpha, delta_x }
    }
    /// `c = alpha/dx²`
    pub fn alpha_over_dx2(&self) -> f64 {
        self.alpha / (self.delta_x * self.delta_x)
    }
    pub fn two_over_dx(&self) -> f64 {
        2.0 / self.delta_x
    }
}

#[enum_dispatch]
pub trait PdeModelTrait {
    fn name(&self) -> &'static str;
    fn stencil(&self) -> &DiffusionStencil;
    /// dy_i/dt for `1 <= i <= n-2`; reads only `state[i-1..=i+1]`.
    fn interior_derivative(&self, state: &DVector<f64>, i: usize) -> f64;
    /// Writes columns `i-1, i, i+1` of row `i`.
    fn interior_jacobian_row(&self, jacobian: &mut DMatrix<f64>, state: &DVector<f64>, i: usize);
    fn left_boundary_catalog(&self) -> &[BoundaryCondition];
    fn right_boundary_catalog(&self, chosen_left_index: usize) -> &[BoundaryCondition];
    /// Interior stencil in the neighbour variables `y_l`, `y_c`, `y_r`.
    fn symbolic_stencil(&self) -> Expr;
}

#[derive(Debug, Clone, PartialEq)]
#[enum_dispatch(PdeModelTrait)]
pub enum PdeModel {
    Heat(Heat),
    BatemanBurgers(BatemanBurgers),
}

/// Physical coefficients of a PDE model, independent of the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PdeConfig {
    Heat {
        alpha: f64,
        lateral_cooling: f64,
        lateral_ambient: f64,
    },
    BatemanBurgers {
        alpha: f64,
    },
}

impl Default for PdeConfig {
    fn default() -> Self {
        PdeConfig::Heat {
            alpha: 1.0,
            lateral_cooling: 0.0,
            lateral_ambient: 5.0,
        }
    }
}

impl PdeConfig {
    pub fn model_name(&self) -> PdeModelNames {
        match self {
            PdeConfig::Heat { .. } => PdeModelNames::Heat,
            PdeConfig::BatemanBurgers { .. } => PdeModelNames::BatemanBurgers,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum PdeModelNames {
    Heat,
    BatemanBurgers,
}

impl PdeModelNames {
    pub fn formula(&self) -> &'static str {
        match self {
            PdeModelNames::Heat => "dy/dt = alpha*d2y/dx2 + k*(y_inf - y)",
            PdeModelNames::BatemanBurgers => "dy/dt = d(y^2/2)/dx + alpha*d2y/dx2",
        }
    }

    pub fn parameters(&self) -> &'static str {
        match self {
            PdeModelNames::Heat => "alpha, lateral_cooling (k), lateral_ambient (y_inf)",
            PdeModelNames::BatemanBurgers => "alpha",
        }
    }

    pub fn pretty_print() {
        use prettytable::{Cell, Row, Table, row};
        let mut table = Table::new();
        table.add_row(row!["Model", "Equation", "Parameters"]);
        for model in PdeModelNames::iter() {
            table.add_row(Row::new(vec![
                Cell::new(&format!("{:?}", model)),
                Cell::new(model.formula()),
                Cell::new(model.parameters()),
            ]));
        }
        table.printstd();
    }
}

/// Builds a PDE model for a grid with spacing `delta_x`.
pub fn create_pde_model(config: &PdeConfig, delta_x: f64) -> Result<PdeModel, PdeError> {
    check_positive("delta_x", delta_x)?;
    let model = match config {
        PdeConfig::Heat {
            alpha,
            lateral_cooling,
            lateral_ambient,
        } => Heat::new(delta_x, *alpha, *lateral_cooling, *lateral_ambient)?.into(),
        PdeConfig::BatemanBurgers { alpha } => BatemanBurgers::new(delta_x, *alpha)?.into(),
    };
    Ok(model)
}
