//! Neumann ends with a prescribed flux `q`, discretized with a mirrored ghost node.
use super::{BoundaryConditionTrait, BoundaryKind, BoundaryParameters, Side, mismatch};
use crate::PDE::DiffusionStencil;
use crate::errors::{PdeError, check_finite};
use nalgebra::{DMatrix, DVector};

const NAME: &str = "Heat flux";

fn read_flux(side: Side, parameters: &BoundaryParameters) -> Result<f64, PdeError> {
    match parameters {
        BoundaryParameters::HeatFlux { flux } => {
            check_finite("flux", *flux)?;
            Ok(*flux)
        }
        other => Err(mismatch(side, NAME, other)),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeftHeatFlux {
    flux: Option<f64>,
}

impl LeftHeatFlux {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn flux(&self) -> Option<f64> {
        self.flux
    }
}

impl BoundaryConditionTrait for LeftHeatFlux {
    fn name(&self) -> &'static str {
        NAME
    }
    fn side(&self) -> Side {
        Side::Left
    }
    fn kind(&self) -> BoundaryKind {
        BoundaryKind::HeatFlux
    }
    fn initialize(&mut self, parameters: &BoundaryParameters) -> Result<(), PdeError> {
        self.flux = Some(read_flux(Side::Left, parameters)?);
        Ok(())
    }
    fn is_initialized(&self) -> bool {
        self.flux.is_some()
    }
    fn contribution(&self, stencil: &DiffusionStencil, state: &DVector<f64>) -> f64 {
        let c = stencil.alpha_over_dx2();
        let q = self.flux.unwrap_or_default();
        2.0 * c * (state[1] - state[0]) - stencil.two_over_dx() * q
    }
    fn jacobian_contribution(&self, stencil: &DiffusionStencil, jacobian: &mut DMatrix<f64>) {
        let c = stencil.alpha_over_dx2();
        jacobian.row_mut(0).fill(0.0);
        jacobian[(0, 0)] = -2.0 * c;
        jacobian[(0, 1)] = 2.0 * c;
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RightHeatFlux {
    flux: Option<f64>,
}

impl RightHeatFlux {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn flux(&self) -> Option<f64> {
        self.flux
    }
}

impl BoundaryConditionTrait for RightHeatFlux {
    fn name(&self) -> &'static str {
        NAME
    }
    fn side(&self) -> Side {
        Side::Right
    }
    fn kind(&self) -> BoundaryKind {
        BoundaryKind::HeatFlux
    }
    fn initialize(&mut self, parameters: &BoundaryParameters) -> Result<(), PdeError> {
        self.flux = Some(read_flux(Side::Right, parameters)?);
        Ok(())
    }
    fn is_initialized(&self) -> bool {
        self.flux.is_some()
    }
    fn contribution(&self, stencil: &DiffusionStencil, state: &DVector<f64>) -> f64 {
        let n = state.len();
        let c = stencil.alpha_over_dx2();
        let q = self.flux.unwrap_or_default();
        -2.0 * c * (state[n - 1] - state[n - 2]) - stencil.two_over_dx() * q
    }
    fn jacobian_contribution(&self, stencil: &DiffusionStencil, jacobian: &mut DMatrix<f64>) {
        let n = jacobian.nrows();
        let c = stencil.alpha_over_dx2();
        jacobian.row_mut(n - 1).fill(0.0);
        jacobian[(n - 1, n - 2)] = 2.0 * c;
        jacobian[(n - 1, n - 1)] = -2.0 * c;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_left_heat_flux() {
        // alpha = 1, dx = 0.1 -> c = 100, 2/dx = 20
        let stencil = DiffusionStencil::new(1.0, 0.1);
        let mut bc = LeftHeatFlux::new();
        bc.initialize(&BoundaryParameters::HeatFlux { flux: 5.0 })
            .unwrap();
        let state = DVector::from_vec(vec![1.0, 1.5, 4.0, 2.0, 0.0]);
        assert_relative_eq!(
            bc.contribution(&stencil, &state),
            2.0 * 100.0 * (1.5 - 1.0) - 20.0 * 5.0,
            epsilon = 1e-10
        );

        let mut jacobian = DMatrix::zeros(5, 5);
        bc.jacobian_contribution(&stencil, &mut jacobian);
        let expected = [-200.0, 200.0, 0.0, 0.0, 0.0];
        for (j, value) in expected.iter().enumerate() {
            assert_relative_eq!(jacobian[(0, j)], *value, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_right_heat_flux() {
        let stencil = DiffusionStencil::new(2.0, 0.25);
        let mut bc = RightHeatFlux::new();
        bc.initialize(&BoundaryParameters::HeatFlux { flux: -1.0 })
            .unwrap();
        let state = DVector::from_vec(vec![0.0, 1.0, 2.0, 3.0, 5.0]);
        // c = 32, 2/dx = 8
        assert_relative_eq!(
            bc.contribution(&stencil, &state),
            -2.0 * 32.0 * (5.0 - 3.0) + 8.0,
            epsilon = 1e-10
        );

        let mut jacobian = DMatrix::from_element(5, 5, 9.0);
        bc.jacobian_contribution(&stencil, &mut jacobian);
        assert_relative_eq!(jacobian[(4, 3)], 64.0, epsilon = 1e-10);
        assert_relative_eq!(jacobian[(4, 4)], -64.0, epsilon = 1e-10);
        assert_eq!(jacobian[(4, 0)], 0.0);
        assert_eq!(jacobian[(3, 3)], 9.0);
    }

    #[test]
    fn test_flux_must_be_finite() {
        let mut bc = LeftHeatFlux::new();
        assert!(
            bc.initialize(&BoundaryParameters::HeatFlux { flux: f64::NAN })
                .is_err()
        );
        assert_eq!(bc.flux(), None);
    }
}
