//! # Task configuration
//!
//! A complete method-of-lines problem described as one serde structure. The structure is
//! built (or read from JSON) up front and handed to
//! [`DifferentialSystem::from_config`](crate::DifferentialSystem::DifferentialSystem::from_config);
//! no component falls back to shared mutable defaults.
//!
//! ## JSON layout
//! ```json
//! {
//!   "name": "rod cooling",
//!   "point_count": 11,
//!   "time": { "start": 0.0, "end": 1.0, "step": 0.1 },
//!   "pde": { "Heat": { "alpha": 1.0, "lateral_cooling": 0.0, "lateral_ambient": 5.0 } },
//!   "left_boundary": { "index": 0, "parameters": "FixedValue" },
//!   "right_boundary": { "index": 2, "parameters": { "Cooling": { "coefficient": 0.5, "ambient": 20.0 } } },
//!   "initial_condition": { "Linear": { "left": 5.0, "right": 30.0 } },
//!   "solver": { "rtol": 1e-9, "atol": 1e-9 }
//! }
//! ```
//! Catalog indices are 0-based; index 0 is always the fixed-value condition.
use crate::BoundaryConditions::BoundaryParameters;
use crate::InitialConditions::InitialCondition;
use crate::PDE::PdeConfig;
use crate::errors::{PdeError, check_finite, check_positive};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSettings {
    pub start: f64,
    pub end: f64,
    /// requested step between output times
    pub step: f64,
}

/// Catalog entry chosen for one side and the parameters it is initialized with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundarySelection {
    pub index: usize,
    pub parameters: BoundaryParameters,
}

impl BoundarySelection {
    pub fn fixed_value() -> Self {
        Self {
            index: 0,
            parameters: BoundaryParameters::FixedValue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    pub rtol: f64,
    pub atol: f64,
    #[serde(default)]
    pub max_step: Option<f64>,
    #[serde(default)]
    pub first_step: Option<f64>,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            rtol: 1e-9,
            atol: 1e-9,
            max_step: None,
            first_step: None,
        }
    }
}

impl SolverSettings {
    pub fn validate(&self) -> Result<(), PdeError> {
        check_positive("rtol", self.rtol)?;
        check_finite("atol", self.atol)?;
        if self.atol < 0.0 {
            return Err(PdeError::invalid_parameter(
                "atol",
                self.atol,
                "must not be negative",
            ));
        }
        if let Some(max_step) = self.max_step {
            check_positive("max_step", max_step)?;
        }
        if let Some(first_step) = self.first_step {
            check_positive("first_step", first_step)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub point_count: usize,
    pub time: TimeSettings,
    pub pde: PdeConfig,
    pub left_boundary: BoundarySelection,
    pub right_boundary: BoundarySelection,
    #[serde(default)]
    pub initial_condition: InitialCondition,
    #[serde(default)]
    pub solver: SolverSettings,
}

impl Default for ProblemConfig {
    /// 11 points, t in [0, 1] by 0.1, Heat with alpha = 1 and no lateral cooling,
    /// both ends fixed, linear start 5 -> 30.
    fn default() -> Self {
        Self {
            name: None,
            point_count: 11,
            time: TimeSettings {
                start: 0.0,
                end: 1.0,
                step: 0.1,
            },
            pde: PdeConfig::default(),
            left_boundary: BoundarySelection::fixed_value(),
            right_boundary: BoundarySelection::fixed_value(),
            initial_condition: InitialCondition::default(),
            solver: SolverSettings::default(),
        }
    }
}

impl ProblemConfig {
    /// Checks the scalar preconditions. Catalog indices are checked against the chosen PDE
    /// model when the boundary conditions are selected.
    pub fn validate(&self) -> Result<(), PdeError> {
        if self.point_count < 2 {
            return Err(PdeError::InvalidPointCount(self.point_count));
        }
        let TimeSettings { start, end, step } = self.time;
        if !start.is_finite() || !end.is_finite() || end <= start {
            return Err(PdeError::InvalidTimeSpan { start, end });
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(PdeError::InvalidTimeStep(step));
        }
        self.initial_condition.validate()?;
        self.solver.validate()
    }

    /// Parses and validates a JSON task description.
    pub fn from_json_str(content: &str) -> Result<Self, PdeError> {
        let config: ProblemConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON task file.
    ///
    /// # Arguments
    /// * `path` - Path of the task file
    ///
    /// # Returns
    /// The validated configuration, or an I/O, parsing or validation error
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PdeError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&content)?;
        info!("Task loaded from {}", path.as_ref().display());
        Ok(config)
    }

    /// Writes the configuration as pretty printed JSON.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PdeError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), content)?;
        Ok(())
    }
}
