//! Heat equation with lateral (Newtonian) cooling along the rod.
use super::{DiffusionStencil, PdeModelTrait, symbolic_stencils};
use crate::BoundaryConditions::{
    BoundaryCondition, Side, full_catalog, restrict_right_catalog,
};
use crate::errors::{PdeError, check_finite, check_positive};
use RustedSciThe::symbolic::symbolic_engine::Expr;
use nalgebra::{DMatrix, DVector};

/// `dy/dt = alpha*d2y/dx2 + k*(y∞ - y)`
///
/// The interior Jacobian rows do not depend on the state.
#[derive(Debug, Clone, PartialEq)]
pub struct Heat {
    stencil: DiffusionStencil,
    /// lateral cooling rate `k`
    pub lateral_cooling: f64,
    /// ambient value `y∞` far from the rod
    pub lateral_ambient: f64,
    left_catalog: Vec<BoundaryCondition>,
    right_catalog: Vec<BoundaryCondition>,
}

impl Heat {
    pub fn new(
        delta_x: f64,
        alpha: f64,
        lateral_cooling: f64,
        lateral_ambient: f64,
    ) -> Result<Self, PdeError> {
        check_positive("delta_x", delta_x)?;
        check_positive("alpha", alpha)?;
        check_finite("lateral_cooling", lateral_cooling)?;
        check_finite("lateral_ambient", lateral_ambient)?;
        if lateral_cooling < 0.0 {
            return Err(PdeError::invalid_parameter(
                "lateral_cooling",
                lateral_cooling,
                "must not be negative",
            ));
        }
        Ok(Self {
            stencil: DiffusionStencil::new(alpha, delta_x),
            lateral_cooling,
            lateral_ambient,
            left_catalog: full_catalog(Side::Left),
            right_catalog: full_catalog(Side::Right),
        })
    }
}

impl PdeModelTrait for Heat {
    fn name(&self) -> &'static str {
        "Heat"
    }

    fn stencil(&self) -> &DiffusionStencil {
        &self.stencil
    }

    fn interior_derivative(&self, state: &DVector<f64>, i: usize) -> f64 {
        let c = self.stencil.alpha_over_dx2();
        c * (state[i - 1] - 2.0 * state[i] + state[i + 1])
            + self.lateral_cooling * (self.lateral_ambient - state[i])
    }

    fn interior_jacobian_row(&self, jacobian: &mut DMatrix<f64>, _state: &DVector<f64>, i: usize) {
        let c = self.stencil.alpha_over_dx2();
        jacobian[(i, i - 1)] = c;
        jacobian[(i, i)] = -2.0 * c - self.lateral_cooling;
        jacobian[(i, i + 1)] = c;
    }

    fn left_boundary_catalog(&self) -> &[BoundaryCondition] {
        &self.left_catalog
    }

    fn right_boundary_catalog(&self, chosen_left_index: usize) -> &[BoundaryCondition] {
        restrict_right_catalog(&self.right_catalog, chosen_left_index)
    }

    fn symbolic_stencil(&self) -> Expr {
        symbolic_stencils::heat_stencil(
            self.stencil.alpha_over_dx2(),
            self.lateral_cooling,
            self.lateral_ambient,
        )
    }
}
