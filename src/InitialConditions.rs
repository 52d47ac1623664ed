//! # Initial conditions
//!
//! Profiles `y(x, t0)` on the unit interval. After construction a profile is a stateless
//! function of position; [`InitialCondition::generate`] evaluates it on a spatial grid to build
//! the state vector at the first time point.
//!
//! `Linear` is the default profile. The others are templates for problems whose starting field
//! is not a straight line between the two end values.
use crate::errors::{PdeError, check_finite};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InitialCondition {
    /// left + (right - left)*x
    Linear { left: f64, right: f64 },
    /// value everywhere
    Constant { value: f64 },
    /// start*exp(-decay*x)
    DecreasingExp { start: f64, decay: f64 },
    /// end*(1 - exp(-growth*x))
    IncreasingExp { end: f64, growth: f64 },
    /// left + (right - left)/(1 + exp(-steepness*(x - center)))
    Sigmoid {
        left: f64,
        right: f64,
        steepness: f64,
        center: f64,
    },
}

impl Default for InitialCondition {
    fn default() -> Self {
        InitialCondition::Linear {
            left: 5.0,
            right: 30.0,
        }
    }
}

impl InitialCondition {
    /// Value at `x`, `x` in `[0, 1]`.
    pub fn get_value(&self, x: f64) -> f64 {
        match self {
            InitialCondition::Linear { left, right } => left + (right - left) * x,
            InitialCondition::Constant { value } => *value,
            InitialCondition::DecreasingExp { start, decay } => start * (-decay * x).exp(),
            InitialCondition::IncreasingExp { end, growth } => end * (1.0 - (-growth * x).exp()),
            InitialCondition::Sigmoid {
                left,
                right,
                steepness,
                center,
            } => left + (right - left) / (1.0 + (-steepness * (x - center)).exp()),
        }
    }

    /// Evaluates the profile at every grid coordinate.
    pub fn generate(&self, grid: &[f64]) -> DVector<f64> {
        DVector::from_iterator(grid.len(), grid.iter().map(|x| self.get_value(*x)))
    }

    pub fn validate(&self) -> Result<(), PdeError> {
        match self {
            InitialCondition::Linear { left, right } => {
                check_finite("left", *left)?;
                check_finite("right", *right)
            }
            InitialCondition::Constant { value } => check_finite("value", *value),
            InitialCondition::DecreasingExp { start, decay } => {
                check_finite("start", *start)?;
                check_finite("decay", *decay)
            }
            InitialCondition::IncreasingExp { end, growth } => {
                check_finite("end", *end)?;
                check_finite("growth", *growth)
            }
            InitialCondition::Sigmoid {
                left,
                right,
                steepness,
                center,
            } => {
                check_finite("left", *left)?;
                check_finite("right", *right)?;
                check_finite("steepness", *steepness)?;
                check_finite("center", *center)
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            InitialCondition::Linear { .. } => "Linear",
            InitialCondition::Constant { .. } => "Constant",
            InitialCondition::DecreasingExp { .. } => "Decreasing exponential",
            InitialCondition::IncreasingExp { .. } => "Increasing exponential",
            InitialCondition::Sigmoid { .. } => "Sigmoid",
        }
    }
}
