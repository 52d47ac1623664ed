//! Viscous Bateman-Burgers equation, central-differenced convective term.
use super::{DiffusionStencil, PdeModelTrait, symbolic_stencils};
use crate::BoundaryConditions::{
    BoundaryCondition, Side, full_catalog, restrict_right_catalog,
};
use crate::errors::{PdeError, check_positive};
use RustedSciThe::symbolic::symbolic_engine::Expr;
use nalgebra::{DMatrix, DVector};

/// `dy/dt = (y[i+1]² - y[i-1]²)/(4dx) + (alpha/dx²)(y[i-1] - 2y[i] + y[i+1])`
///
/// The off-diagonal Jacobian entries carry the convective coefficients with the sign
/// convention `+y[i-1]/(2dx)` (sub) and `-y[i+1]/(2dx)` (super); the rows depend on the state
/// and are rebuilt on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct BatemanBurgers {
    stencil: DiffusionStencil,
    left_catalog: Vec<BoundaryCondition>,
    right_catalog: Vec<BoundaryCondition>,
}

impl BatemanBurgers {
    pub fn new(delta_x: f64, alpha: f64) -> Result<Self, PdeError> {
        check_positive("delta_x", delta_x)?;
        check_positive("alpha", alpha)?;
        Ok(Self {
            stencil: DiffusionStencil::new(alpha, delta_x),
            left_catalog: full_catalog(Side::Left),
            right_catalog: full_catalog(Side::Right),
        })
    }
}

impl PdeModelTrait for BatemanBurgers {
    fn name(&self) -> &'static str {
        "Bateman-Burgers"
    }

    fn stencil(&self) -> &DiffusionStencil {
        &self.stencil
    }

    fn interior_derivative(&self, state: &DVector<f64>, i: usize) -> f64 {
        let c = self.stencil.alpha_over_dx2();
        let dx = self.stencil.delta_x;
        (state[i + 1].powi(2) - state[i - 1].powi(2)) / (4.0 * dx)
            + c * (state[i - 1] - 2.0 * state[i] + state[i + 1])
    }

    fn interior_jacobian_row(&self, jacobian: &mut DMatrix<f64>, state: &DVector<f64>, i: usize) {
        let c = self.stencil.alpha_over_dx2();
        let dx = self.stencil.delta_x;
        jacobian[(i, i - 1)] = state[i - 1] / (2.0 * dx) + c;
        jacobian[(i, i)] = -2.0 * c;
        jacobian[(i, i + 1)] = -state[i + 1] / (2.0 * dx) + c;
    }

    fn left_boundary_catalog(&self) -> &[BoundaryCondition] {
        &self.left_catalog
    }

    fn right_boundary_catalog(&self, chosen_left_index: usize) -> &[BoundaryCondition] {
        restrict_right_catalog(&self.right_catalog, chosen_left_index)
    }

    fn symbolic_stencil(&self) -> Expr {
        symbolic_stencils::burgers_stencil(self.stencil.alpha_over_dx2(), self.stencil.delta_x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_burgers_interior_derivative() {
        let burgers = BatemanBurgers::new(0.5, 0.25).unwrap();
        // c = 1, 4dx = 2
        let state = DVector::from_vec(vec![1.0, 3.0, 2.0]);
        assert_relative_eq!(
            burgers.interior_derivative(&state, 1),
            (4.0 - 1.0) / 2.0 + (1.0 - 6.0 + 2.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_burgers_jacobian_row() {
        let burgers = BatemanBurgers::new(0.1, 1.0).unwrap();
        let state = DVector::from_vec(vec![0.0, 2.0, -1.0, 4.0, 0.0]);
        let mut jacobian = DMatrix::zeros(5, 5);
        burgers.interior_jacobian_row(&mut jacobian, &state, 2);
        assert_relative_eq!(jacobian[(2, 1)], 2.0 / 0.2 + 100.0, epsilon = 1e-9);
        assert_relative_eq!(jacobian[(2, 2)], -200.0, epsilon = 1e-9);
        assert_relative_eq!(jacobian[(2, 3)], -4.0 / 0.2 + 100.0, epsilon = 1e-9);
        assert_eq!(jacobian[(2, 0)], 0.0);
        assert_eq!(jacobian[(2, 4)], 0.0);
    }

    #[test]
    fn test_row_depends_on_state() {
        let burgers = BatemanBurgers::new(0.1, 1.0).unwrap();
        let mut first = DMatrix::zeros(3, 3);
        let mut second = DMatrix::zeros(3, 3);
        burgers.interior_jacobian_row(&mut first, &DVector::from_vec(vec![1.0, 1.0, 1.0]), 1);
        burgers.interior_jacobian_row(&mut second, &DVector::from_vec(vec![3.0, 1.0, 1.0]), 1);
        assert!(first[(1, 0)] != second[(1, 0)]);
        assert_eq!(first[(1, 1)], second[(1, 1)]);
    }

    #[test]
    fn test_symbolic_stencil_value_and_diffusive_part() {
        let burgers = BatemanBurgers::new(0.2, 0.3).unwrap();
        let expr = burgers.symbolic_stencil();
        let neighbours = vec![0.7, 1.1, -0.5];
        let state = DVector::from_vec(neighbours.clone());
        let value = expr.clone().lambdify_owned(vec!["y_l", "y_c", "y_r"])(neighbours.clone());
        assert_relative_eq!(value, burgers.interior_derivative(&state, 1), epsilon = 1e-9);

        // the diagonal carries no convective part
        let mut jacobian = DMatrix::zeros(3, 3);
        burgers.interior_jacobian_row(&mut jacobian, &state, 1);
        let d_center = expr.diff("y_c").simplify_();
        let d_center_value = d_center.lambdify_owned(vec!["y_l", "y_c", "y_r"])(neighbours);
        assert_relative_eq!(d_center_value, jacobian[(1, 1)], epsilon = 1e-9);
    }
}
