//! # L-Shaped Snap-Fit Calculation
//!
//! Reserved slot for the L-shaped hook. The reference workbook computes its
//! outputs in-sheet; no closed-form engine exists here yet, so
//! [`calculate`] reports [`CalcError::ShapeNotImplemented`]. Use
//! [`crate::report::reference_rows`] to show the sheet's own values.

use crate::calculations::input::{SnapFitInput, SnapFitResult};
use crate::calculations::SnapShape;
use crate::errors::CalcError;

/// Calculate an L-shaped snap-fit.
pub fn calculate(_input: &SnapFitInput) -> SnapFitResult {
    Err(CalcError::shape_not_implemented(SnapShape::LShaped.label()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_implemented() {
        let err = calculate(&SnapFitInput::default()).unwrap_err();
        assert_eq!(err, CalcError::shape_not_implemented("L Shaped Snap"));
    }
}
