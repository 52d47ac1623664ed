//! # Boundary Conditions
//!
//! Boundary conditions replace the state derivative and the Jacobian row at one end of the
//! spatial grid. Six variants exist: {Left, Right} × {Fixed value, Heat flux, Cooling}.
//!
//! ## Discrete form
//!
//! With `c = alpha/dx²` (taken from the owning PDE's [`DiffusionStencil`]):
//!
//! | Variant | dy/dt at boundary | Jacobian row |
//! |---------|-------------------|--------------|
//! | Fixed value (Dirichlet) | `0` | all zero |
//! | Heat flux (Neumann), left | `2c(y1 - y0) - (2/dx)·q` | `[0][0] = -2c`, `[0][1] = 2c` |
//! | Heat flux (Neumann), right | `-2c(y[n-1] - y[n-2]) - (2/dx)·q` | `[n-1][n-2] = 2c`, `[n-1][n-1] = -2c` |
//! | Cooling (Robin), left | `2c(y1 - y0) - (2/dx)·h·(y0 - y∞)` | `[0][0] = -2c - 2h/dx`, `[0][1] = 2c` |
//! | Cooling (Robin), right | `-2c(y[n-1] - y[n-2]) - (2/dx)·h·(y[n-1] - y∞)` | `[n-1][n-2] = 2c`, `[n-1][n-1] = -2c - 2h/dx` |
//!
//! The factor 2 comes from eliminating the ghost node mirrored about the boundary.
//!
//! ## Lifecycle
//!
//! 1. Every PDE model builds its catalogs of uninitialized conditions when it is constructed.
//! 2. The selected entry is cloned out of the catalog and `initialize()`d exactly once with
//!    [`BoundaryParameters`] supplied by the caller.
//! 3. It is then evaluated on every derivative/Jacobian call for the rest of the run.
//!
//! Conditions never hold a pointer to their PDE model; the model's stencil coefficients are
//! lent to each call instead.
use crate::PDE::DiffusionStencil;
use crate::errors::PdeError;
use enum_dispatch::enum_dispatch;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod Cooling;
pub mod FixedValue;
pub mod HeatFlux;

pub use Cooling::{LeftCooling, RightCooling};
pub use FixedValue::{LeftFixedValue, RightFixedValue};
pub use HeatFlux::{LeftHeatFlux, RightHeatFlux};

/// End of the spatial domain a condition acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Side::Left => write!(f, "Left"),
            Side::Right => write!(f, "Right"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryKind {
    FixedValue,
    HeatFlux,
    Cooling,
}

/// Side-specific scalars captured by `initialize()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BoundaryParameters {
    FixedValue,
    HeatFlux { flux: f64 },
    Cooling { coefficient: f64, ambient: f64 },
}

impl fmt::Display for BoundaryParameters {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoundaryParameters::FixedValue => write!(f, "fixed value"),
            BoundaryParameters::HeatFlux { flux } => write!(f, "heat flux (q = {})", flux),
            BoundaryParameters::Cooling {
                coefficient,
                ambient,
            } => write!(f, "cooling (h = {}, y∞ = {})", coefficient, ambient),
        }
    }
}

#[enum_dispatch]
pub trait BoundaryConditionTrait {
    /// Human readable name shown in selection catalogs.
    fn name(&self) -> &'static str;
    fn side(&self) -> Side;
    fn kind(&self) -> BoundaryKind;
    /// Captures the side-specific parameters. Must be called once before evaluation.
    fn initialize(&mut self, parameters: &BoundaryParameters) -> Result<(), PdeError>;
    fn is_initialized(&self) -> bool;
    /// Value replacing dy/dt at the boundary index.
    fn contribution(&self, stencil: &DiffusionStencil, state: &DVector<f64>) -> f64;
    /// Overwrites the boundary row of the Jacobian. Runs after the interior rows are filled.
    fn jacobian_contribution(&self, stencil: &DiffusionStencil, jacobian: &mut DMatrix<f64>);
}

#[derive(Debug, Clone, PartialEq)]
#[enum_dispatch(BoundaryConditionTrait)]
pub enum BoundaryCondition {
    LeftFixedValue(LeftFixedValue),
    RightFixedValue(RightFixedValue),
    LeftHeatFlux(LeftHeatFlux),
    RightHeatFlux(RightHeatFlux),
    LeftCooling(LeftCooling),
    RightCooling(RightCooling),
}

impl BoundaryCondition {
    /// Builds an uninitialized condition of the given kind for one side.
    pub fn new(side: Side, kind: BoundaryKind) -> Self {
        match (side, kind) {
            (Side::Left, BoundaryKind::FixedValue) => LeftFixedValue::new().into(),
            (Side::Right, BoundaryKind::FixedValue) => RightFixedValue::new().into(),
            (Side::Left, BoundaryKind::HeatFlux) => LeftHeatFlux::new().into(),
            (Side::Right, BoundaryKind::HeatFlux) => RightHeatFlux::new().into(),
            (Side::Left, BoundaryKind::Cooling) => LeftCooling::new().into(),
            (Side::Right, BoundaryKind::Cooling) => RightCooling::new().into(),
        }
    }

    /// Short description including captured parameters, used in task summaries.
    pub fn describe(&self) -> String {
        match self {
            BoundaryCondition::LeftFixedValue(_) | BoundaryCondition::RightFixedValue(_) => {
                self.name().to_string()
            }
            BoundaryCondition::LeftHeatFlux(bc) => describe_optional(self.name(), bc.flux()),
            BoundaryCondition::RightHeatFlux(bc) => describe_optional(self.name(), bc.flux()),
            BoundaryCondition::LeftCooling(bc) => match bc.parameters() {
                Some((h, y_inf)) => format!("{} (h = {}, y∞ = {})", self.name(), h, y_inf),
                None => format!("{} (uninitialized)", self.name()),
            },
            BoundaryCondition::RightCooling(bc) => match bc.parameters() {
                Some((h, y_inf)) => format!("{} (h = {}, y∞ = {})", self.name(), h, y_inf),
                None => format!("{} (uninitialized)", self.name()),
            },
        }
    }
}

fn describe_optional(name: &str, flux: Option<f64>) -> String {
    match flux {
        Some(q) => format!("{} (q = {})", name, q),
        None => format!("{} (uninitialized)", name),
    }
}

pub(crate) fn mismatch(side: Side, name: &'static str, got: &BoundaryParameters) -> PdeError {
    PdeError::BoundaryParameterMismatch {
        side,
        name,
        got: got.to_string(),
    }
}

/// Fixed value, heat flux, cooling - fixed value always first.
pub fn full_catalog(side: Side) -> Vec<BoundaryCondition> {
    vec![
        BoundaryCondition::new(side, BoundaryKind::FixedValue),
        BoundaryCondition::new(side, BoundaryKind::HeatFlux),
        BoundaryCondition::new(side, BoundaryKind::Cooling),
    ]
}

/// Full right catalog when the left end is fixed value (index 0), otherwise only the
/// fixed-value entry, so at least one end anchors the solution value.
pub fn restrict_right_catalog(
    right_catalog: &[BoundaryCondition],
    chosen_left_index: usize,
) -> &[BoundaryCondition] {
    if chosen_left_index == 0 {
        right_catalog
    } else {
        &right_catalog[..right_catalog.len().min(1)]
    }
}

/// Selection table of a catalog. Indices are the ones the selection calls accept.
pub fn catalog_table(catalog: &[BoundaryCondition]) -> prettytable::Table {
    use prettytable::{Cell, Row, Table, row};
    let mut table = Table::new();
    table.add_row(row!["#", "Boundary condition"]);
    for (i, bc) in catalog.iter().enumerate() {
        table.add_row(Row::new(vec![
            Cell::new(&i.to_string()),
            Cell::new(bc.name()),
        ]));
    }
    table
}

pub fn pretty_print_catalog(title: &str, catalog: &[BoundaryCondition]) {
    println!("____________________{}_________________________", title);
    catalog_table(catalog).printstd();
}
