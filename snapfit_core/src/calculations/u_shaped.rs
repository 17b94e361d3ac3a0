//! # U-Shaped Snap-Fit Calculation
//!
//! Reserved slot for the U-shaped hook (both workbook cases). Like the
//! L-shaped variant, [`calculate`] reports
//! [`CalcError::ShapeNotImplemented`] until closed-form formulas are added.

use crate::calculations::input::{SnapFitInput, SnapFitResult};
use crate::calculations::SnapShape;
use crate::errors::CalcError;

/// Calculate a U-shaped snap-fit.
pub fn calculate(_input: &SnapFitInput) -> SnapFitResult {
    Err(CalcError::shape_not_implemented(SnapShape::UShaped.label()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_implemented() {
        let err = calculate(&SnapFitInput::default()).unwrap_err();
        assert_eq!(err.error_code(), "SHAPE_NOT_IMPLEMENTED");
    }
}
