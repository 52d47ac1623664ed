//! Method-of-lines right-hand side and Jacobian of a configured problem.
use crate::BoundaryConditions::{BoundaryCondition, BoundaryConditionTrait};
use crate::Integrators::OdeSystem;
use crate::PDE::{PdeModel, PdeModelTrait};
use nalgebra::{DMatrix, DVector};

/// A PDE model together with the two selected boundary conditions.
///
/// Interior indices `1..n-1` come from the model stencil, index `0` from the left condition
/// and index `n-1` from the right one. Evaluation allocates fresh output buffers on every call
/// and never mutates the model or the conditions. The value owns its parts so that it can be
/// moved into the `'static` closures of an integrator backend.
#[derive(Debug, Clone)]
pub struct Discretization {
    pde: PdeModel,
    left: BoundaryCondition,
    right: BoundaryCondition,
}

impl Discretization {
    pub fn new(pde: PdeModel, left: BoundaryCondition, right: BoundaryCondition) -> Self {
        Self { pde, left, right }
    }

    pub fn derivative(&self, state: &DVector<f64>) -> DVector<f64> {
        let n = state.len();
        let stencil = self.pde.stencil();
        let mut derivative = DVector::zeros(n);
        for i in 1..n.saturating_sub(1) {
            derivative[i] = self.pde.interior_derivative(state, i);
        }
        derivative[0] = self.left.contribution(stencil, state);
        derivative[n - 1] = self.right.contribution(stencil, state);
        derivative
    }

    /// Interior rows first, then the boundary rows are overwritten.
    pub fn jacobian(&self, state: &DVector<f64>) -> DMatrix<f64> {
        let n = state.len();
        let stencil = self.pde.stencil();
        let mut jacobian = DMatrix::zeros(n, n);
        for i in 1..n.saturating_sub(1) {
            self.pde.interior_jacobian_row(&mut jacobian, state, i);
        }
        self.left.jacobian_contribution(stencil, &mut jacobian);
        self.right.jacobian_contribution(stencil, &mut jacobian);
        jacobian
    }
}

impl OdeSystem for Discretization {
    fn derivative(&self, _t: f64, y: &DVector<f64>) -> DVector<f64> {
        Discretization::derivative(self, y)
    }

    fn jacobian(&self, _t: f64, y: &DVector<f64>) -> DMatrix<f64> {
        Discretization::jacobian(self, y)
    }
}
