//! # Stiff integrators
//!
//! The discretized PDE is handed to an integrator through two seams:
//!
//! - [`OdeSystem`]: the right-hand side `f(t, y)` and its analytic Jacobian `df/dy`. Both
//!   calls must be free of side effects; integrators call them many times per step in any order.
//! - [`StiffIntegrator`]: integrates an `OdeSystem` over `[t0, tf]` and returns an
//!   [`IvpSolution`], or `PdeError::IntegrationFailed` if step control cannot converge.
//!
//! [`BDF::BdfIntegrator`] is the bundled implementation. It drives the variable order BDF
//! solver of RustedSciThe with the analytic Jacobian and reports the state at the requested
//! output times.
use crate::errors::PdeError;
use nalgebra::{DMatrix, DVector};
use std::rc::Rc;

pub mod BDF;

pub trait OdeSystem {
    fn derivative(&self, t: f64, y: &DVector<f64>) -> DVector<f64>;
    fn jacobian(&self, t: f64, y: &DVector<f64>) -> DMatrix<f64>;
}

pub trait StiffIntegrator {
    /// Integrates from `t_span.0` to `t_span.1`. With `t_eval` the solution is reported exactly
    /// at those times, otherwise at every accepted step.
    ///
    /// The system is shared: backends that box the right-hand side and the Jacobian as
    /// separate `'static` closures keep a handle each.
    fn solve(
        &mut self,
        system: Rc<dyn OdeSystem>,
        t_span: (f64, f64),
        y0: &DVector<f64>,
        t_eval: Option<&[f64]>,
    ) -> Result<IvpSolution, PdeError>;
}

/// Result of a completed integration run. A failed run is an error, never a partial solution.
#[derive(Debug, Clone)]
pub struct IvpSolution {
    /// output times
    pub t: DVector<f64>,
    /// one row per output time, one column per state component
    pub y: DMatrix<f64>,
    pub message: String,
    /// right-hand side evaluations
    pub nfev: usize,
    /// Jacobian evaluations
    pub njev: usize,
}

impl IvpSolution {
    /// State at the last output time.
    pub fn final_state(&self) -> Option<DVector<f64>> {
        if self.y.nrows() == 0 {
            return None;
        }
        Some(self.y.row(self.y.nrows() - 1).transpose())
    }
}
