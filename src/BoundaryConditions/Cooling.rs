//! Robin ends: heat exchange with an ambient value through a transfer coefficient `h`.
use super::{BoundaryConditionTrait, BoundaryKind, BoundaryParameters, Side, mismatch};
use crate::PDE::DiffusionStencil;
use crate::errors::{PdeError, check_finite};
use nalgebra::{DMatrix, DVector};

const NAME: &str = "Cooling";

fn read_cooling(side: Side, parameters: &BoundaryParameters) -> Result<(f64, f64), PdeError> {
    match parameters {
        BoundaryParameters::Cooling {
            coefficient,
            ambient,
        } => {
            check_finite("coefficient", *coefficient)?;
            check_finite("ambient", *ambient)?;
            Ok((*coefficient, *ambient))
        }
        other => Err(mismatch(side, NAME, other)),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeftCooling {
    coefficient: Option<f64>,
    ambient: Option<f64>,
}

impl LeftCooling {
    pub fn new() -> Self {
        Self::default()
    }
    /// `(coefficient, ambient)` once initialized.
    pub fn parameters(&self) -> Option<(f64, f64)> {
        self.coefficient.zip(self.ambient)
    }
}

impl BoundaryConditionTrait for LeftCooling {
    fn name(&self) -> &'static str {
        NAME
    }
    fn side(&self) -> Side {
        Side::Left
    }
    fn kind(&self) -> BoundaryKind {
        BoundaryKind::Cooling
    }
    fn initialize(&mut self, parameters: &BoundaryParameters) -> Result<(), PdeError> {
        let (h, y_inf) = read_cooling(Side::Left, parameters)?;
        self.coefficient = Some(h);
        self.ambient = Some(y_inf);
        Ok(())
    }
    fn is_initialized(&self) -> bool {
        self.parameters().is_some()
    }
    fn contribution(&self, stencil: &DiffusionStencil, state: &DVector<f64>) -> f64 {
        let c = stencil.alpha_over_dx2();
        let (h, y_inf) = self.parameters().unwrap_or_default();
        2.0 * c * (state[1] - state[0]) - stencil.two_over_dx() * h * (state[0] - y_inf)
    }
    fn jacobian_contribution(&self, stencil: &DiffusionStencil, jacobian: &mut DMatrix<f64>) {
        let c = stencil.alpha_over_dx2();
        let h = self.coefficient.unwrap_or_default();
        jacobian.row_mut(0).fill(0.0);
        jacobian[(0, 0)] = -2.0 * c - stencil.two_over_dx() * h;
        jacobian[(0, 1)] = 2.0 * c;
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RightCooling {
    coefficient: Option<f64>,
    ambient: Option<f64>,
}

impl RightCooling {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn parameters(&self) -> Option<(f64, f64)> {
        self.coefficient.zip(self.ambient)
    }
}

impl BoundaryConditionTrait for RightCooling {
    fn name(&self) -> &'static str {
        NAME
    }
    fn side(&self) -> Side {
        Side::Right
    }
    fn kind(&self) -> BoundaryKind {
        BoundaryKind::Cooling
    }
    fn initialize(&mut self, parameters: &BoundaryParameters) -> Result<(), PdeError> {
        let (h, y_inf) = read_cooling(Side::Right, parameters)?;
        self.coefficient = Some(h);
        self.ambient = Some(y_inf);
        Ok(())
    }
    fn is_initialized(&self) -> bool {
        self.parameters().is_some()
    }
    fn contribution(&self, stencil: &DiffusionStencil, state: &DVector<f64>) -> f64 {
        let n = state.len();
        let c = stencil.alpha_over_dx2();
        let (h, y_inf) = self.parameters().unwrap_or_default();
        -2.0 * c * (state[n - 1] - state[n - 2]) - stencil.two_over_dx() * h * (state[n - 1] - y_inf)
    }
    fn jacobian_contribution(&self, stencil: &DiffusionStencil, jacobian: &mut DMatrix<f64>) {
        let n = jacobian.nrows();
        let c = stencil.alpha_over_dx2();
        let h = self.coefficient.unwrap_or_default();
        jacobian.row_mut(n - 1).fill(0.0);
        jacobian[(n - 1, n - 2)] = 2.0 * c;
        jacobian[(n - 1, n - 1)] = -2.0 * c - stencil.two_over_dx() * h;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cooling(h: f64, y_inf: f64) -> BoundaryParameters {
        BoundaryParameters::Cooling {
            coefficient: h,
            ambient: y_inf,
        }
    }

    #[test]
    fn test_left_cooling() {
        let stencil = DiffusionStencil::new(1.0, 0.1);
        let mut bc = LeftCooling::new();
        bc.initialize(&cooling(0.5, 20.0)).unwrap();
        let state = DVector::from_vec(vec![10.0, 12.0, 14.0, 16.0]);
        // 2*100*(12-10) - 20*0.5*(10-20)
        assert_relative_eq!(bc.contribution(&stencil, &state), 500.0, epsilon = 1e-10);

        let mut jacobian = DMatrix::zeros(4, 4);
        bc.jacobian_contribution(&stencil, &mut jacobian);
        assert_relative_eq!(jacobian[(0, 0)], -210.0, epsilon = 1e-10);
        assert_relative_eq!(jacobian[(0, 1)], 200.0, epsilon = 1e-10);
        assert_eq!(jacobian[(0, 2)], 0.0);
    }

    #[test]
    fn test_right_cooling() {
        let stencil = DiffusionStencil::new(1.0, 0.1);
        let mut bc = RightCooling::new();
        bc.initialize(&cooling(2.0, 0.0)).unwrap();
        let state = DVector::from_vec(vec![0.0, 1.0, 3.0, 4.0]);
        // -2*100*(4-3) - 20*2*(4-0)
        assert_relative_eq!(bc.contribution(&stencil, &state), -360.0, epsilon = 1e-10);

        let mut jacobian = DMatrix::zeros(4, 4);
        bc.jacobian_contribution(&stencil, &mut jacobian);
        assert_relative_eq!(jacobian[(3, 2)], 200.0, epsilon = 1e-10);
        assert_relative_eq!(jacobian[(3, 3)], -240.0, epsilon = 1e-10);
    }

    #[test]
    fn test_zero_coefficient_matches_insulated_flux() {
        let stencil = DiffusionStencil::new(0.3, 0.2);
        let state = DVector::from_vec(vec![4.0, 2.0, 1.0]);
        let mut cooling_bc = LeftCooling::new();
        cooling_bc.initialize(&cooling(0.0, 100.0)).unwrap();
        let mut flux_bc = crate::BoundaryConditions::LeftHeatFlux::new();
        flux_bc
            .initialize(&BoundaryParameters::HeatFlux { flux: 0.0 })
            .unwrap();
        assert_relative_eq!(
            cooling_bc.contribution(&stencil, &state),
            flux_bc.contribution(&stencil, &state),
            epsilon = 1e-12
        );
    }
}
