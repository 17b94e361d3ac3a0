//! # Snap-Fit Calculations
//!
//! Each snap-fit shape has its own module following the pattern:
//!
//! - shared [`SnapFitInput`] - input parameters (JSON-serializable)
//! - shared [`SnapFitOutputs`] - calculation outputs (JSON-serializable)
//! - `calculate(&input) -> SnapFitResult` - pure calculation function
//!
//! [`SnapShape`] is the shape key; [`SnapShape::engine`] picks the
//! [`SnapFitCalculation`] implementation for it so callers never branch on
//! the shape themselves.
//!
//! ## Available Calculations
//!
//! - [`cantilever`] - straight cantilever hook
//! - [`l_shaped`] - L-shaped hook (not implemented)
//! - [`u_shaped`] - U-shaped hook (not implemented)
//!
//! ## Example
//!
//! ```rust
//! use snapfit_core::calculations::{calculate, SnapFitInput, SnapShape};
//!
//! let input = SnapFitInput {
//!     flexural_modulus_gpa: 2.5,
//!     thickness_mm: 2.0,
//!     length_mm: 20.0,
//!     width_mm: 10.0,
//!     deflection_mm: 3.0,
//!     q_factor: 1.0,
//!     ..Default::default()
//! };
//!
//! let shape: SnapShape = "cantilever".parse().unwrap();
//! let outputs = calculate(shape, &input).unwrap();
//! assert!(outputs.deflection_force_n > 0.0);
//! ```

pub mod cantilever;
pub mod input;
pub mod l_shaped;
pub mod u_shaped;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

// Re-export commonly used types
pub use input::{InputLabel, SnapFitInput, SnapFitOutputs, SnapFitResult};

/// The snap-fit geometries the calculator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SnapShape {
    /// Straight cantilever hook
    #[default]
    Cantilever,
    /// L-shaped hook
    LShaped,
    /// U-shaped hook
    UShaped,
}

impl SnapShape {
    /// All shapes in selector order
    pub const ALL: [SnapShape; 3] = [SnapShape::Cantilever, SnapShape::LShaped, SnapShape::UShaped];

    /// Short key used on the command line and in settings files
    pub fn key(self) -> &'static str {
        match self {
            SnapShape::Cantilever => "cantilever",
            SnapShape::LShaped => "l-shaped",
            SnapShape::UShaped => "u-shaped",
        }
    }

    /// Display name
    pub fn label(self) -> &'static str {
        match self {
            SnapShape::Cantilever => "Cantilever Snap",
            SnapShape::LShaped => "L Shaped Snap",
            SnapShape::UShaped => "U Shaped Snap",
        }
    }

    /// Name of the workbook sheet holding this shape's reference values
    pub fn sheet_name(self) -> &'static str {
        match self {
            SnapShape::Cantilever => "Cantilever Snap",
            SnapShape::LShaped => "\"L\" Shaped",
            SnapShape::UShaped => "\"U\" Shaped",
        }
    }

    /// CSV export of the sheet inside a reference directory
    pub fn file_name(self) -> &'static str {
        match self {
            SnapShape::Cantilever => "cantilever_snap.csv",
            SnapShape::LShaped => "l_shaped.csv",
            SnapShape::UShaped => "u_shaped.csv",
        }
    }

    /// Calculation engine for this shape
    pub fn engine(self) -> &'static dyn SnapFitCalculation {
        match self {
            SnapShape::Cantilever => &Cantilever,
            SnapShape::LShaped => &LShaped,
            SnapShape::UShaped => &UShaped,
        }
    }
}

impl fmt::Display for SnapShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SnapShape {
    type Err = CalcError;

    /// Accepts the key, the display name, the sheet name or a bare letter
    /// ("l", "u"), ignoring case.
    fn from_str(s: &str) -> CalcResult<Self> {
        let wanted = s.trim();
        let by_letter = match wanted.to_ascii_lowercase().as_str() {
            "c" => Some(SnapShape::Cantilever),
            "l" => Some(SnapShape::LShaped),
            "u" => Some(SnapShape::UShaped),
            _ => None,
        };
        by_letter
            .or_else(|| {
                SnapShape::ALL.into_iter().find(|shape| {
                    wanted.eq_ignore_ascii_case(shape.key())
                        || wanted.eq_ignore_ascii_case(shape.label())
                        || wanted.eq_ignore_ascii_case(shape.sheet_name())
                })
            })
            .ok_or_else(|| CalcError::unknown_shape(wanted))
    }
}

/// A snap-fit calculation engine: one implementation per shape.
pub trait SnapFitCalculation {
    /// Shape this engine computes
    fn shape(&self) -> SnapShape;

    /// Compute outputs for one input record
    fn compute(&self, input: &SnapFitInput) -> SnapFitResult;
}

/// Engine for [`SnapShape::Cantilever`]
#[derive(Debug, Clone, Copy)]
pub struct Cantilever;

/// Engine for [`SnapShape::LShaped`]
#[derive(Debug, Clone, Copy)]
pub struct LShaped;

/// Engine for [`SnapShape::UShaped`]
#[derive(Debug, Clone, Copy)]
pub struct UShaped;

impl SnapFitCalculation for Cantilever {
    fn shape(&self) -> SnapShape {
        SnapShape::Cantilever
    }

    fn compute(&self, input: &SnapFitInput) -> SnapFitResult {
        cantilever::calculate(input)
    }
}

impl SnapFitCalculation for LShaped {
    fn shape(&self) -> SnapShape {
        SnapShape::LShaped
    }

    fn compute(&self, input: &SnapFitInput) -> SnapFitResult {
        l_shaped::calculate(input)
    }
}

impl SnapFitCalculation for UShaped {
    fn shape(&self) -> SnapShape {
        SnapShape::UShaped
    }

    fn compute(&self, input: &SnapFitInput) -> SnapFitResult {
        u_shaped::calculate(input)
    }
}

/// Run the engine registered for `shape`.
pub fn calculate(shape: SnapShape, input: &SnapFitInput) -> SnapFitResult {
    shape.engine().compute(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_parsing() {
        assert_eq!("cantilever".parse::<SnapShape>().unwrap(), SnapShape::Cantilever);
        assert_eq!("L".parse::<SnapShape>().unwrap(), SnapShape::LShaped);
        assert_eq!("U Shaped Snap".parse::<SnapShape>().unwrap(), SnapShape::UShaped);
        assert_eq!("\"L\" Shaped".parse::<SnapShape>().unwrap(), SnapShape::LShaped);
        assert_eq!(
            "torsion".parse::<SnapShape>().unwrap_err(),
            CalcError::unknown_shape("torsion")
        );
    }

    #[test]
    fn test_engine_matches_shape() {
        for shape in SnapShape::ALL {
            assert_eq!(shape.engine().shape(), shape);
        }
    }

    #[test]
    fn test_dispatch() {
        let input = SnapFitInput {
            flexural_modulus_gpa: 2.5,
            thickness_mm: 2.0,
            length_mm: 20.0,
            width_mm: 10.0,
            deflection_mm: 3.0,
            q_factor: 1.0,
            ..Default::default()
        };
        assert_eq!(
            calculate(SnapShape::Cantilever, &input),
            cantilever::calculate(&input)
        );
        assert_eq!(
            calculate(SnapShape::LShaped, &input).unwrap_err().error_code(),
            "SHAPE_NOT_IMPLEMENTED"
        );
        assert!(calculate(SnapShape::UShaped, &input).is_err());
    }

    #[test]
    fn test_shape_serialization() {
        let json = serde_json::to_string(&SnapShape::LShaped).unwrap();
        assert_eq!(json, "\"l-shaped\"");
        let roundtrip: SnapShape = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, SnapShape::LShaped);
    }
}
