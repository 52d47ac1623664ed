//! # Error types
//!
//! Every configuration entry point of the crate returns `Result<_, PdeError>`. Configuration
//! errors are reported at the point where the bad value enters; numerical failures of the
//! integrator are passed up unchanged as [`PdeError::IntegrationFailed`].
use crate::BoundaryConditions::Side;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdeError {
    #[error("Invalid point count {0}: at least 2 grid points are required")]
    InvalidPointCount(usize),
    #[error("Invalid time span: end time {end} must be greater than start time {start}")]
    InvalidTimeSpan { start: f64, end: f64 },
    #[error("Invalid time step {0}: must be positive and finite")]
    InvalidTimeStep(f64),
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: String,
        value: f64,
        reason: String,
    },
    #[error("{side} boundary selection {index} is out of range: catalog holds {available} entries")]
    CatalogSelection {
        side: Side,
        index: usize,
        available: usize,
    },
    #[error("{side} {name} boundary condition cannot be initialized with {got} parameters")]
    BoundaryParameterMismatch {
        side: Side,
        name: &'static str,
        got: String,
    },
    #[error("{side} {name} boundary condition used before initialize()")]
    BoundaryNotInitialized { side: Side, name: &'static str },
    #[error("Missing configuration: {0}")]
    NotConfigured(&'static str),
    #[error("State vector has {got} entries, spatial grid has {expected} points")]
    StateDimension { expected: usize, got: usize },
    #[error("Integration failed at t = {t}: {message}")]
    IntegrationFailed { t: f64, message: String },
    #[error("Task file I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task file parsing error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl PdeError {
    pub(crate) fn invalid_parameter(name: &str, value: f64, reason: &str) -> Self {
        PdeError::InvalidParameter {
            name: name.to_string(),
            value,
            reason: reason.to_string(),
        }
    }
}

/// Rejects NaN and infinite physical coefficients.
pub(crate) fn check_finite(name: &str, value: f64) -> Result<(), PdeError> {
    if !value.is_finite() {
        return Err(PdeError::invalid_parameter(name, value, "must be finite"));
    }
    Ok(())
}

/// Rejects zero, negative and non-finite coefficients.
pub(crate) fn check_positive(name: &str, value: f64) -> Result<(), PdeError> {
    check_finite(name, value)?;
    if value <= 0.0 {
        return Err(PdeError::invalid_parameter(name, value, "must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_checks() {
        assert!(check_positive("alpha", 1.0).is_ok());
        assert!(check_positive("alpha", 0.0).is_err());
        assert!(check_positive("alpha", -2.0).is_err());
        assert!(check_finite("flux", f64::NAN).is_err());
        assert!(check_finite("flux", -5.0).is_ok());
    }

    #[test]
    fn test_error_messages() {
        let err = PdeError::InvalidPointCount(1);
        assert!(err.to_string().contains("at least 2"));
        let err = PdeError::CatalogSelection {
            side: Side::Right,
            index: 2,
            available: 1,
        };
        assert_eq!(
            err.to_string(),
            "Right boundary selection 2 is out of range: catalog holds 1 entries"
        );
    }
}
