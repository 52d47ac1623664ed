//! # BDF backend
//!
//! Runs an [`OdeSystem`] through the variable order, variable step BDF solver of RustedSciThe
//! (`numerical::BDF::BDF_solver::BDF`). The solver takes the right-hand side and the analytic
//! Jacobian as boxed `'static` closures; each closure keeps its own handle on the shared system.
//!
//! The solver advances on the shifted time `tau = t - t0`, always starting from zero, and may
//! step past the end of the interval. Output at requested times is taken from the cubic Hermite
//! polynomial through the two ends of the accepted step that contains them:
//!
//! ```text
//! y(x) = h00(x)·y_a + h10(x)·h·f_a + h01(x)·y_b + h11(x)·h·f_b,   x = (t - t_a)/h
//! ```
use super::{IvpSolution, OdeSystem, StiffIntegrator};
use crate::errors::PdeError;
use RustedSciThe::numerical::BDF::BDF_solver::BDF;
use RustedSciThe::numerical::BDF::common::NumberOrVec;
use log::{info, warn};
use nalgebra::{DMatrix, DVector};
use std::cell::Cell;
use std::rc::Rc;

const SUCCESS: &str = "The solver successfully reached the end of the integration interval.";
const NON_FINITE: &str = "Right-hand side is not finite.";
const STALLED: &str = "Step size underflow, time does not advance.";

/// BDF integrator settings.
#[derive(Debug, Clone, PartialEq)]
pub struct BdfIntegrator {
    pub rtol: f64,
    pub atol: f64,
    pub max_step: f64,
    pub first_step: Option<f64>,
}

impl Default for BdfIntegrator {
    fn default() -> Self {
        Self {
            rtol: 1e-3,
            atol: 1e-6,
            max_step: f64::INFINITY,
            first_step: None,
        }
    }
}

impl BdfIntegrator {
    pub fn new(rtol: f64, atol: f64) -> Self {
        Self {
            rtol,
            atol,
            ..Self::default()
        }
    }

    pub fn set_max_step(&mut self, max_step: f64) {
        self.max_step = max_step;
    }

    pub fn set_first_step(&mut self, first_step: Option<f64>) {
        self.first_step = first_step;
    }

    fn validate(&self) -> Result<(), PdeError> {
        if !self.rtol.is_finite() || self.rtol <= 0.0 {
            return Err(PdeError::invalid_parameter("rtol", self.rtol, "must be positive"));
        }
        if !self.atol.is_finite() || self.atol < 0.0 {
            return Err(PdeError::invalid_parameter("atol", self.atol, "must not be negative"));
        }
        if self.max_step.is_nan() || self.max_step <= 0.0 {
            return Err(PdeError::invalid_parameter("max_step", self.max_step, "must be positive"));
        }
        if let Some(h) = self.first_step {
            if !h.is_finite() || h <= 0.0 {
                return Err(PdeError::invalid_parameter("first_step", h, "must be positive"));
            }
        }
        Ok(())
    }
}

fn check_t_eval(t_eval: Option<&[f64]>, t0: f64, tf: f64) -> Result<Option<Vec<f64>>, PdeError> {
    let Some(points) = t_eval else {
        return Ok(None);
    };
    for (k, t) in points.iter().enumerate() {
        if !t.is_finite() || *t < t0 || *t > tf {
            return Err(PdeError::invalid_parameter(
                "t_eval",
                *t,
                "must lie within the integration interval",
            ));
        }
        if k > 0 && *t < points[k - 1] {
            return Err(PdeError::invalid_parameter("t_eval", *t, "must be sorted"));
        }
    }
    Ok(Some(points.to_vec()))
}

/// State and slope at one end of an accepted step, on the shifted time axis.
#[derive(Debug, Clone)]
struct StepEnd {
    tau: f64,
    y: DVector<f64>,
    f: DVector<f64>,
}

/// Cubic Hermite interpolation between two step ends.
fn hermite(a: &StepEnd, b: &StepEnd, tau: f64) -> DVector<f64> {
    let h = b.tau - a.tau;
    let x = (tau - a.tau) / h;
    let x2 = x * x;
    let x3 = x2 * x;
    let h00 = 2.0 * x3 - 3.0 * x2 + 1.0;
    let h10 = x3 - 2.0 * x2 + x;
    let h01 = -2.0 * x3 + 3.0 * x2;
    let h11 = x3 - x2;
    &a.y * h00 + &a.f * (h10 * h) + &b.y * h01 + &b.f * (h11 * h)
}

fn failed(t: f64, message: &str) -> PdeError {
    PdeError::IntegrationFailed {
        t,
        message: message.to_string(),
    }
}

impl StiffIntegrator for BdfIntegrator {
    fn solve(
        &mut self,
        system: Rc<dyn OdeSystem>,
        t_span: (f64, f64),
        y0: &DVector<f64>,
        t_eval: Option<&[f64]>,
    ) -> Result<IvpSolution, PdeError> {
        let (t0, tf) = t_span;
        if !t0.is_finite() || !tf.is_finite() || tf <= t0 {
            return Err(PdeError::InvalidTimeSpan { start: t0, end: tf });
        }
        if y0.is_empty() {
            return Err(PdeError::NotConfigured("non-empty initial state"));
        }
        self.validate()?;
        let t_eval = check_t_eval(t_eval, t0, tf)?;

        let nfev = Rc::new(Cell::new(0usize));
        let njev = Rc::new(Cell::new(0usize));
        let f0 = system.derivative(t0, y0);
        nfev.set(1);
        // the solver would keep halving the step on a non-finite right-hand side
        if !f0.iter().all(|v| v.is_finite()) {
            return Err(failed(t0, NON_FINITE));
        }

        let fun: Box<dyn Fn(f64, &DVector<f64>) -> DVector<f64>> = {
            let system = Rc::clone(&system);
            let nfev = Rc::clone(&nfev);
            Box::new(move |tau: f64, y: &DVector<f64>| {
                nfev.set(nfev.get() + 1);
                system.derivative(t0 + tau, y)
            })
        };
        let jac: Box<dyn Fn(f64, &DVector<f64>) -> DMatrix<f64>> = {
            let system = Rc::clone(&system);
            let njev = Rc::clone(&njev);
            Box::new(move |tau: f64, y: &DVector<f64>| {
                njev.set(njev.get() + 1);
                system.jacobian(t0 + tau, y)
            })
        };

        info!(
            "BDF: integrating {} equations on [{}, {}], rtol = {}, atol = {}",
            y0.len(),
            t0,
            tf,
            self.rtol,
            self.atol
        );
        let span = tf - t0;
        let mut solver = BDF::new();
        solver.set_initial(
            fun,
            0.0,
            y0.clone(),
            span,
            self.max_step,
            NumberOrVec::Number(self.rtol),
            NumberOrVec::Number(self.atol),
            Some(jac),
            None,
            false,
            self.first_step,
        );

        let mut ts: Vec<f64> = Vec::new();
        let mut ys: Vec<DVector<f64>> = Vec::new();
        if t_eval.is_none() {
            ts.push(t0);
            ys.push(y0.clone());
        }
        let mut next_output = 0;
        let mut previous = StepEnd {
            tau: 0.0,
            y: y0.clone(),
            f: f0,
        };

        while previous.tau < span {
            let (success, message) = solver._step_impl();
            if !success {
                let message = message.unwrap_or("step rejected");
                warn!("BDF: failed at t = {}: {}", t0 + previous.tau, message);
                return Err(failed(t0 + previous.tau, message));
            }
            if solver.t <= previous.tau {
                return Err(failed(t0 + previous.tau, STALLED));
            }
            let y = solver.y.clone();
            let f = system.derivative(t0 + solver.t, &y);
            nfev.set(nfev.get() + 1);
            if !y.iter().chain(f.iter()).all(|v| v.is_finite()) {
                warn!("BDF: non-finite state at t = {}", t0 + solver.t);
                return Err(failed(t0 + solver.t, NON_FINITE));
            }
            let current = StepEnd {
                tau: solver.t,
                y,
                f,
            };

            match &t_eval {
                None if current.tau <= span => {
                    ts.push(t0 + current.tau);
                    ys.push(current.y.clone());
                }
                None => {
                    ts.push(tf);
                    ys.push(hermite(&previous, &current, span));
                }
                Some(points) => {
                    while next_output < points.len() && points[next_output] - t0 <= current.tau {
                        let t = points[next_output];
                        ts.push(t);
                        ys.push(hermite(&previous, &current, t - t0));
                        next_output += 1;
                    }
                }
            }
            previous = current;
        }

        info!(
            "BDF: finished, {} output points, nfev = {}, njev = {}",
            ts.len(),
            nfev.get(),
            njev.get()
        );
        let n = y0.len();
        Ok(IvpSolution {
            t: DVector::from_vec(ts),
            y: DMatrix::from_fn(ys.len(), n, |i, j| ys[i][j]),
            message: SUCCESS.to_string(),
            nfev: nfev.get(),
            njev: njev.get(),
        })
    }
}
