//! # Cantilever Snap-Fit Calculation
//!
//! Closed-form small-deflection formulas for a straight cantilever hook.
//!
//! ## Formulas
//!
//! With E in MPa, lengths in mm and angles in radians:
//!
//! - Max strain: `ε = 100 · 3·Y·t / (2·L²) · Q` (%)
//! - Deflection force: `P = (E·b·Y / Q) · (t/L)³ / 4` (N)
//! - Push-on force: `W = P · (μ + tan α) / (1 − μ·tan α)` (N)
//! - Pull-off force: `W′ = P · (tan α′ − μ) / (1 + μ·tan α′)` (N)
//!
//! A ramp formula whose denominator is exactly zero yields `+∞`: the hook
//! self-locks and no finite force will move it.
//!
//! ## Example
//!
//! ```rust
//! use snapfit_core::calculations::cantilever::calculate;
//! use snapfit_core::calculations::SnapFitInput;
//!
//! let input = SnapFitInput {
//!     flexural_modulus_gpa: 2.5,
//!     permissible_strain_percent: 2.5,
//!     friction_coefficient: 0.3,
//!     thickness_mm: 2.0,
//!     length_mm: 20.0,
//!     width_mm: 10.0,
//!     lead_angle_deg: 30.0,
//!     return_angle_deg: 20.0,
//!     deflection_mm: 3.0,
//!     q_factor: 1.0,
//! };
//!
//! let outputs = calculate(&input).unwrap();
//! assert!((outputs.max_strain_percent - 2.25).abs() < 1e-12);
//! assert!((outputs.deflection_force_n - 18.75).abs() < 1e-9);
//! ```

use tracing::debug;

use crate::calculations::input::{SnapFitInput, SnapFitOutputs, SnapFitResult};
use crate::units::{Degrees, Gigapascals, Megapascals, Radians};

/// Maximum strain at the beam root in percent.
pub fn max_strain_percent(deflection_mm: f64, thickness_mm: f64, length_mm: f64, q_factor: f64) -> f64 {
    100.0 * (3.0 * deflection_mm * thickness_mm) / (2.0 * length_mm.powi(2)) * q_factor
}

/// Force needed to deflect the hook by `deflection_mm`, in newtons.
pub fn deflection_force(
    modulus: Megapascals,
    width_mm: f64,
    deflection_mm: f64,
    q_factor: f64,
    thickness_mm: f64,
    length_mm: f64,
) -> f64 {
    (modulus.0 * width_mm * deflection_mm / q_factor) * (thickness_mm / length_mm).powi(3) / 4.0
}

/// Force to push the hook over its lead ramp.
///
/// Returns `+∞` when `μ·tan α` is exactly 1.
pub fn push_on_force(deflection_force: f64, friction: f64, tan_lead: f64) -> f64 {
    let denominator = 1.0 - friction * tan_lead;
    if denominator == 0.0 {
        return f64::INFINITY;
    }
    deflection_force * (friction + tan_lead) / denominator
}

/// Force to pull the hook back over its return ramp.
///
/// Returns `+∞` when `μ·tan α′` is exactly −1, which needs a negative
/// friction coefficient or a return angle past 90°.
pub fn pull_off_force(deflection_force: f64, friction: f64, tan_return: f64) -> f64 {
    let denominator = 1.0 + friction * tan_return;
    if denominator == 0.0 {
        return f64::INFINITY;
    }
    deflection_force * (tan_return - friction) / denominator
}

/// Calculate strain and assembly forces for a cantilever snap-fit.
///
/// This is a pure function: the same input always gives bit-identical
/// outputs.
///
/// # Returns
///
/// * `Ok(SnapFitOutputs)` - strain and the three forces
/// * `Err(CalcError::InvalidGeometry)` - length, thickness or width is zero
pub fn calculate(input: &SnapFitInput) -> SnapFitResult {
    input.validate_geometry()?;

    let modulus: Megapascals = Gigapascals(input.flexural_modulus_gpa).into();
    let lead: Radians = Degrees(input.lead_angle_deg).into();
    let ret: Radians = Degrees(input.return_angle_deg).into();

    let max_strain = max_strain_percent(
        input.deflection_mm,
        input.thickness_mm,
        input.length_mm,
        input.q_factor,
    );
    let p = deflection_force(
        modulus,
        input.width_mm,
        input.deflection_mm,
        input.q_factor,
        input.thickness_mm,
        input.length_mm,
    );
    let w = push_on_force(p, input.friction_coefficient, lead.tan());
    let w_prime = pull_off_force(p, input.friction_coefficient, ret.tan());

    debug!(
        strain_percent = max_strain,
        deflection_force_n = p,
        push_on_force_n = w,
        pull_off_force_n = w_prime,
        "cantilever snap-fit calculated"
    );

    Ok(SnapFitOutputs {
        max_strain_percent: max_strain,
        deflection_force_n: p,
        push_on_force_n: w,
        pull_off_force_n: w_prime,
    })
}
