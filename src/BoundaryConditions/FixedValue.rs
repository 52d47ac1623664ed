//! Dirichlet ends: the boundary value is held at its initial value.
use super::{BoundaryConditionTrait, BoundaryKind, BoundaryParameters, Side, mismatch};
use crate::PDE::DiffusionStencil;
use crate::errors::PdeError;
use nalgebra::{DMatrix, DVector};

const NAME: &str = "Fixed value";

fn check_parameters(side: Side, parameters: &BoundaryParameters) -> Result<(), PdeError> {
    match parameters {
        BoundaryParameters::FixedValue => Ok(()),
        other => Err(mismatch(side, NAME, other)),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeftFixedValue {
    initialized: bool,
}

impl LeftFixedValue {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BoundaryConditionTrait for LeftFixedValue {
    fn name(&self) -> &'static str {
        NAME
    }
    fn side(&self) -> Side {
        Side::Left
    }
    fn kind(&self) -> BoundaryKind {
        BoundaryKind::FixedValue
    }
    fn initialize(&mut self, parameters: &BoundaryParameters) -> Result<(), PdeError> {
        check_parameters(Side::Left, parameters)?;
        self.initialized = true;
        Ok(())
    }
    fn is_initialized(&self) -> bool {
        self.initialized
    }
    fn contribution(&self, _stencil: &DiffusionStencil, _state: &DVector<f64>) -> f64 {
        0.0
    }
    fn jacobian_contribution(&self, _stencil: &DiffusionStencil, jacobian: &mut DMatrix<f64>) {
        jacobian.row_mut(0).fill(0.0);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RightFixedValue {
    initialized: bool,
}

impl RightFixedValue {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BoundaryConditionTrait for RightFixedValue {
    fn name(&self) -> &'static str {
        NAME
    }
    fn side(&self) -> Side {
        Side::Right
    }
    fn kind(&self) -> BoundaryKind {
        BoundaryKind::FixedValue
    }
    fn initialize(&mut self, parameters: &BoundaryParameters) -> Result<(), PdeError> {
        check_parameters(Side::Right, parameters)?;
        self.initialized = true;
        Ok(())
    }
    fn is_initialized(&self) -> bool {
        self.initialized
    }
    fn contribution(&self, _stencil: &DiffusionStencil, _state: &DVector<f64>) -> f64 {
        0.0
    }
    fn jacobian_contribution(&self, _stencil: &DiffusionStencil, jacobian: &mut DMatrix<f64>) {
        let last = jacobian.nrows() - 1;
        jacobian.row_mut(last).fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_value_rows_are_zero() {
        let stencil = DiffusionStencil::new(1.0, 0.1);
        let state = DVector::from_vec(vec![3.0, -1.0, 7.5, 2.0]);
        let mut jacobian = DMatrix::from_element(4, 4, 1.0);

        let mut left = LeftFixedValue::new();
        left.initialize(&BoundaryParameters::FixedValue).unwrap();
        let mut right = RightFixedValue::new();
        right.initialize(&BoundaryParameters::FixedValue).unwrap();

        assert_eq!(left.contribution(&stencil, &state), 0.0);
        assert_eq!(right.contribution(&stencil, &state), 0.0);
        left.jacobian_contribution(&stencil, &mut jacobian);
        right.jacobian_contribution(&stencil, &mut jacobian);
        for j in 0..4 {
            assert_eq!(jacobian[(0, j)], 0.0);
            assert_eq!(jacobian[(3, j)], 0.0);
            assert_eq!(jacobian[(1, j)], 1.0);
            assert_eq!(jacobian[(2, j)], 1.0);
        }
    }

    #[test]
    fn test_fixed_value_rejects_flux_parameters() {
        let mut right = RightFixedValue::new();
        assert!(
            right
                .initialize(&BoundaryParameters::HeatFlux { flux: 1.0 })
                .is_err()
        );
        assert!(!right.is_initialized());
    }
}
