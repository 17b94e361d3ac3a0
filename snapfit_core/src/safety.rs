//! # Safety Evaluation
//!
//! Compares the strain a design produces against the material's
//! permissible strain. The comparison is strict: a design sitting exactly on
//! the limit is unsafe.
//!
//! ## Example
//!
//! ```rust
//! use snapfit_core::safety::evaluate;
//!
//! let verdict = evaluate(2.25, 2.5);
//! assert!(verdict.is_safe);
//! assert!((verdict.margin_percent - 0.25).abs() < 1e-12);
//! assert_eq!(verdict.label(), "SAFE");
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::{SnapFitInput, SnapFitOutputs};
use crate::units::extended_float;

/// Pass/fail verdict for one calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafetyVerdict {
    /// `max_strain_percent < permissible_strain_percent`
    pub is_safe: bool,

    /// Computed maximum strain (%)
    #[serde(with = "extended_float")]
    pub max_strain_percent: f64,

    /// Permissible strain ε0 (%)
    #[serde(with = "extended_float")]
    pub permissible_strain_percent: f64,

    /// `permissible − computed` (%); negative when unsafe
    #[serde(with = "extended_float")]
    pub margin_percent: f64,
}

impl SafetyVerdict {
    /// Verdict for a calculation's outputs against its input threshold
    pub fn for_outputs(input: &SnapFitInput, outputs: &SnapFitOutputs) -> Self {
        evaluate(outputs.max_strain_percent, input.permissible_strain_percent)
    }

    /// "SAFE" or "UNSAFE"
    pub fn label(&self) -> &'static str {
        if self.is_safe {
            "SAFE"
        } else {
            "UNSAFE"
        }
    }
}

/// Compare a computed strain with the permissible strain.
pub fn evaluate(max_strain_percent: f64, permissible_strain_percent: f64) -> SafetyVerdict {
    SafetyVerdict {
        is_safe: max_strain_percent < permissible_strain_percent,
        max_strain_percent,
        permissible_strain_percent,
        margin_percent: permissible_strain_percent - max_strain_percent,
    }
}
