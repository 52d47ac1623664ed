//! Uniform spatial grid on [0, 1] and the output time grid.
use crate::errors::PdeError;
use log::warn;

/// Relative difference below which a recomputed time step is treated as the requested one.
const STEP_TOLERANCE: f64 = 1e-9;
/// Largest time grid accepted.
const MAX_TIME_POINTS: f64 = 1e7;

#[derive(Debug, Clone, PartialEq)]
pub struct SpatialGrid {
    points: Vec<f64>,
    delta_x: f64,
}

impl SpatialGrid {
    /// `point_count` evenly spaced points, `x_0 = 0` and `x_{n-1} = 1` exactly.
    pub fn new(point_count: usize) -> Result<Self, PdeError> {
        if point_count < 2 {
            return Err(PdeError::InvalidPointCount(point_count));
        }
        let delta_x = 1.0 / (point_count as f64 - 1.0);
        let mut points: Vec<f64> = (0..point_count).map(|i| i as f64 * delta_x).collect();
        points[point_count - 1] = 1.0;
        Ok(Self { points, delta_x })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn delta_x(&self) -> f64 {
        self.delta_x
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    points: Vec<f64>,
    delta_t: f64,
    adjusted_delta_t: Option<f64>,
}

impl TimeGrid {
    /// Builds the output times covering `[start, end]`.
    ///
    /// The step count `(end - start)/dt + 1` is truncated to 3 decimals and rounded up. When
    /// rounding changes it, `dt` is recomputed so the steps divide the interval evenly and the
    /// new value is reported through [`TimeGrid::adjusted_delta_t`]. A recomputed value within
    /// floating point noise of the requested one is discarded, so the step in use and the
    /// reported step always agree.
    pub fn new(start: f64, end: f64, requested_delta_t: f64) -> Result<Self, PdeError> {
        if !start.is_finite() || !end.is_finite() || end <= start {
            return Err(PdeError::InvalidTimeSpan { start, end });
        }
        if !requested_delta_t.is_finite() || requested_delta_t <= 0.0 {
            return Err(PdeError::InvalidTimeStep(requested_delta_t));
        }
        let span = end - start;
        let steps = span / requested_delta_t + 1.0;
        let truncated = (steps * 1000.0).trunc() / 1000.0;
        // a step longer than the interval still yields both end points
        let rounded = truncated.ceil().max(2.0);
        if rounded > MAX_TIME_POINTS {
            return Err(PdeError::InvalidTimeStep(requested_delta_t));
        }

        let mut delta_t = requested_delta_t;
        let mut adjusted_delta_t = None;
        if rounded > truncated {
            let recomputed = span / (rounded - 1.0);
            if ((recomputed - requested_delta_t) / requested_delta_t).abs() > STEP_TOLERANCE {
                warn!(
                    "Time step size does not divide time interval evenly, and has been adjusted to: {}",
                    recomputed
                );
                delta_t = recomputed;
                adjusted_delta_t = Some(recomputed);
            }
        }

        let count = rounded as usize;
        let mut points: Vec<f64> = (0..count).map(|j| start + j as f64 * delta_t).collect();
        // only rounding noise is removed; a truncated remainder of the interval stays uncovered
        if ((points[count - 1] - end) / span).abs() <= STEP_TOLERANCE {
            points[count - 1] = end;
        }
        Ok(Self {
            points,
            delta_t,
            adjusted_delta_t,
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn delta_t(&self) -> f64 {
        self.delta_t
    }

    /// Step actually used when the requested one did not divide the interval.
    pub fn adjusted_delta_t(&self) -> Option<f64> {
        self.adjusted_delta_t
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn start(&self) -> f64 {
        self.points[0]
    }

    pub fn end(&self) -> f64 {
        self.points[self.points.len() - 1]
    }
}
