//! # Unit Types
//!
//! Type-safe wrappers for the units a snap-fit calculation touches. They
//! are plain f64 newtypes so JSON stays clean (just numbers).
//!
//! ## Unit System
//!
//! The engine works in the mm-MPa-N system: lengths in millimetres, stresses
//! and moduli in megapascals, forces in newtons. Reference sheets quote the
//! flexural modulus in gigapascals and the ramp angles in degrees, so both
//! are normalized before use.
//!
//! ## Example
//!
//! ```rust
//! use snapfit_core::units::{Degrees, Gigapascals, Megapascals, Radians};
//!
//! let modulus: Megapascals = Gigapascals(2.5).into();
//! assert_eq!(modulus.0, 2500.0);
//!
//! let lead: Radians = Degrees(180.0).into();
//! assert!((lead.0 - std::f64::consts::PI).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// Newtons per pound-force
pub const NEWTONS_PER_POUND_FORCE: f64 = 4.448_221_615_260_5;

// ============================================================================
// Modulus Units
// ============================================================================

/// Modulus or stress in gigapascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gigapascals(pub f64);

/// Modulus or stress in megapascals (N/mm²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Megapascals(pub f64);

impl From<Gigapascals> for Megapascals {
    fn from(gpa: Gigapascals) -> Self {
        Megapascals(gpa.0 * 1000.0)
    }
}

impl From<Megapascals> for Gigapascals {
    fn from(mpa: Megapascals) -> Self {
        Gigapascals(mpa.0 / 1000.0)
    }
}

// ============================================================================
// Angle Units
// ============================================================================

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Radians(pub f64);

impl From<Degrees> for Radians {
    fn from(deg: Degrees) -> Self {
        Radians(deg.0.to_radians())
    }
}

impl From<Radians> for Degrees {
    fn from(rad: Radians) -> Self {
        Degrees(rad.0.to_degrees())
    }
}

impl Radians {
    /// Tangent of the angle
    pub fn tan(self) -> f64 {
        self.0.tan()
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Force in pounds-force
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoundsForce(pub f64);

impl From<Newtons> for PoundsForce {
    fn from(n: Newtons) -> Self {
        PoundsForce(n.0 / NEWTONS_PER_POUND_FORCE)
    }
}

impl From<PoundsForce> for Newtons {
    fn from(lbf: PoundsForce) -> Self {
        Newtons(lbf.0 * NEWTONS_PER_POUND_FORCE)
    }
}

/// Display unit for forces in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ForceUnit {
    /// Newtons (engine native)
    #[default]
    #[serde(rename = "N")]
    Newtons,
    /// Pounds-force
    #[serde(rename = "Lbf")]
    PoundsForce,
}

impl ForceUnit {
    /// Unit symbol as shown in output tables
    pub fn symbol(self) -> &'static str {
        match self {
            ForceUnit::Newtons => "N",
            ForceUnit::PoundsForce => "Lbf",
        }
    }

    /// Express a force given in newtons in this unit
    pub fn from_newtons(self, force: Newtons) -> f64 {
        match self {
            ForceUnit::Newtons => force.0,
            ForceUnit::PoundsForce => PoundsForce::from(force).0,
        }
    }
}

impl fmt::Display for ForceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Gigapascals);
impl_arithmetic!(Megapascals);
impl_arithmetic!(Degrees);
impl_arithmetic!(Radians);
impl_arithmetic!(Newtons);
impl_arithmetic!(PoundsForce);

// ============================================================================
// Non-finite floats in JSON
// ============================================================================

/// Serde adapter for f64 fields that may hold `±∞` or NaN.
///
/// serde_json writes non-finite floats as `null`, which would make an
/// infinite push-on force indistinguishable from a missing value. This
/// module writes them as the strings `"Infinity"`, `"-Infinity"` and `"NaN"`
/// and reads those strings back.
pub mod extended_float {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if value.is_sign_positive() {
            serializer.serialize_str("Infinity")
        } else {
            serializer.serialize_str("-Infinity")
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(v) => Ok(v),
            Repr::Text(text) => match text.as_str() {
                "Infinity" => Ok(f64::INFINITY),
                "-Infinity" => Ok(f64::NEG_INFINITY),
                "NaN" => Ok(f64::NAN),
                other => Err(D::Error::custom(format!("invalid float literal '{}'", other))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gigapascals_to_megapascals() {
        let e = Gigapascals(2.5);
        let mpa: Megapascals = e.into();
        assert_eq!(mpa.0, 2500.0);
    }

    #[test]
    fn test_degrees_to_radians() {
        let rad: Radians = Degrees(90.0).into();
        assert!((rad.0 - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((Radians::from(Degrees(45.0)).tan() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_newtons_to_pounds_force() {
        let lbf: PoundsForce = Newtons(NEWTONS_PER_POUND_FORCE * 2.0).into();
        assert!((lbf.0 - 2.0).abs() < 1e-12);
        assert_eq!(ForceUnit::PoundsForce.symbol(), "Lbf");
        assert_eq!(ForceUnit::Newtons.from_newtons(Newtons(18.75)), 18.75);
    }

    #[test]
    fn test_arithmetic() {
        let a = Newtons(10.0);
        let b = Newtons(5.0);
        assert_eq!((a + b).0, 15.0);
        assert_eq!((a - b).0, 5.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).value(), 5.0);
    }

    #[test]
    fn test_serialization() {
        let e = Gigapascals(2.3);
        let json = serde_json::to_string(&e).unwrap();
        assert_eq!(json, "2.3");

        let roundtrip: Gigapascals = serde_json::from_str(&json).unwrap();
        assert_eq!(e, roundtrip);

        assert_eq!(serde_json::to_string(&ForceUnit::PoundsForce).unwrap(), "\"Lbf\"");
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct Holder {
        #[serde(with = "extended_float")]
        force: f64,
    }

    #[test]
    fn test_extended_float_keeps_infinity() {
        let json = serde_json::to_string(&Holder { force: f64::INFINITY }).unwrap();
        assert_eq!(json, r#"{"force":"Infinity"}"#);
        let back: Holder = serde_json::from_str(&json).unwrap();
        assert_eq!(back.force, f64::INFINITY);

        let finite: Holder = serde_json::from_str(r#"{"force":18.75}"#).unwrap();
        assert_eq!(finite.force, 18.75);

        assert!(serde_json::from_str::<Holder>(r#"{"force":"lots"}"#).is_err());
    }
}
