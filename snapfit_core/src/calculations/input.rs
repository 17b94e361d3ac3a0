//! # Snap-Fit Input and Output Records
//!
//! The input record is shared by every shape engine so that a form (or the
//! CLI) can be filled once and handed to whichever engine the selected shape
//! maps to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::extended_float;

/// One of the ten labelled inputs a reference sheet provides.
///
/// The sheet label is the text found in the label column of the workbook;
/// the caption is what a form shows next to the input box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputLabel {
    FlexuralModulus,
    PermissibleStrain,
    CoefficientOfFriction,
    BeamThickness,
    BeamLength,
    BeamWidth,
    LeadAngle,
    ReturnAngle,
    Deflection,
    QFactor,
}

impl InputLabel {
    /// All labels in form order
    pub const ALL: [InputLabel; 10] = [
        InputLabel::FlexuralModulus,
        InputLabel::PermissibleStrain,
        InputLabel::CoefficientOfFriction,
        InputLabel::BeamThickness,
        InputLabel::BeamLength,
        InputLabel::BeamWidth,
        InputLabel::LeadAngle,
        InputLabel::ReturnAngle,
        InputLabel::Deflection,
        InputLabel::QFactor,
    ];

    /// Label text as it appears in the reference sheet
    pub fn sheet_label(self) -> &'static str {
        match self {
            InputLabel::FlexuralModulus => "Flexural Modulus",
            InputLabel::PermissibleStrain => "Permissible Strain",
            InputLabel::CoefficientOfFriction => "Coefficient of Friction",
            InputLabel::BeamThickness => "Beam Thickness",
            InputLabel::BeamLength => "Beam Length",
            InputLabel::BeamWidth => "Beam Width",
            InputLabel::LeadAngle => "Lead Angle",
            InputLabel::ReturnAngle => "Return Angle",
            InputLabel::Deflection => "Deflection",
            InputLabel::QFactor => "Q Factor",
        }
    }

    /// Form caption with symbol and unit
    pub fn caption(self) -> &'static str {
        match self {
            InputLabel::FlexuralModulus => "Flexural Modulus E (GPa)",
            InputLabel::PermissibleStrain => "Permissible Strain ε0 (%)",
            InputLabel::CoefficientOfFriction => "Coefficient of Friction μ",
            InputLabel::BeamThickness => "Beam Thickness t (mm)",
            InputLabel::BeamLength => "Beam Length L (mm)",
            InputLabel::BeamWidth => "Beam Width b (mm)",
            InputLabel::LeadAngle => "Lead Angle α (°)",
            InputLabel::ReturnAngle => "Return Angle α′ (°)",
            InputLabel::Deflection => "Deflection Y (mm)",
            InputLabel::QFactor => "Q Factor",
        }
    }

    /// Short key for command-line overrides (`--set length=25`)
    pub fn key(self) -> &'static str {
        match self {
            InputLabel::FlexuralModulus => "modulus",
            InputLabel::PermissibleStrain => "strain",
            InputLabel::CoefficientOfFriction => "friction",
            InputLabel::BeamThickness => "thickness",
            InputLabel::BeamLength => "length",
            InputLabel::BeamWidth => "width",
            InputLabel::LeadAngle => "lead",
            InputLabel::ReturnAngle => "return",
            InputLabel::Deflection => "deflection",
            InputLabel::QFactor => "q",
        }
    }
}

impl fmt::Display for InputLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sheet_label())
    }
}

impl FromStr for InputLabel {
    type Err = CalcError;

    /// Accepts the short key, the sheet label or the caption, ignoring case.
    fn from_str(s: &str) -> CalcResult<Self> {
        let wanted = s.trim();
        InputLabel::ALL
            .into_iter()
            .find(|label| {
                wanted.eq_ignore_ascii_case(label.key())
                    || wanted.eq_ignore_ascii_case(label.sheet_label())
                    || wanted.eq_ignore_ascii_case(label.caption())
            })
            .ok_or_else(|| {
                CalcError::invalid_input(
                    "label",
                    wanted,
                    "Expected one of: modulus, strain, friction, thickness, length, width, lead, return, deflection, q",
                )
            })
    }
}

/// Input parameters for one snap-fit calculation.
///
/// Units follow the reference workbook: modulus in GPa, strain in percent,
/// lengths in millimetres, angles in degrees.
///
/// ## JSON Example
///
/// ```json
/// {
///   "flexural_modulus_gpa": 2.5,
///   "permissible_strain_percent": 2.5,
///   "friction_coefficient": 0.3,
///   "thickness_mm": 2.0,
///   "length_mm": 20.0,
///   "width_mm": 10.0,
///   "lead_angle_deg": 30.0,
///   "return_angle_deg": 20.0,
///   "deflection_mm": 3.0,
///   "q_factor": 1.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SnapFitInput {
    /// Flexural modulus E (GPa)
    pub flexural_modulus_gpa: f64,

    /// Permissible strain ε0 (%), the safety threshold
    pub permissible_strain_percent: f64,

    /// Coefficient of friction μ between the hook and the mating part
    pub friction_coefficient: f64,

    /// Beam thickness t at the root (mm)
    pub thickness_mm: f64,

    /// Beam length L (mm)
    pub length_mm: f64,

    /// Beam width b (mm)
    pub width_mm: f64,

    /// Lead (insertion) angle α (degrees)
    pub lead_angle_deg: f64,

    /// Return (retention) angle α′ (degrees)
    pub return_angle_deg: f64,

    /// Deflection Y at the hook (mm)
    pub deflection_mm: f64,

    /// Geometry correction factor Q, read from the Q-factor chart
    pub q_factor: f64,
}

impl SnapFitInput {
    /// Read one field by its label
    pub fn get(&self, label: InputLabel) -> f64 {
        match label {
            InputLabel::FlexuralModulus => self.flexural_modulus_gpa,
            InputLabel::PermissibleStrain => self.permissible_strain_percent,
            InputLabel::CoefficientOfFriction => self.friction_coefficient,
            InputLabel::BeamThickness => self.thickness_mm,
            InputLabel::BeamLength => self.length_mm,
            InputLabel::BeamWidth => self.width_mm,
            InputLabel::LeadAngle => self.lead_angle_deg,
            InputLabel::ReturnAngle => self.return_angle_deg,
            InputLabel::Deflection => self.deflection_mm,
            InputLabel::QFactor => self.q_factor,
        }
    }

    /// Overwrite one field by its label
    pub fn set(&mut self, label: InputLabel, value: f64) {
        let slot = match label {
            InputLabel::FlexuralModulus => &mut self.flexural_modulus_gpa,
            InputLabel::PermissibleStrain => &mut self.permissible_strain_percent,
            InputLabel::CoefficientOfFriction => &mut self.friction_coefficient,
            InputLabel::BeamThickness => &mut self.thickness_mm,
            InputLabel::BeamLength => &mut self.length_mm,
            InputLabel::BeamWidth => &mut self.width_mm,
            InputLabel::LeadAngle => &mut self.lead_angle_deg,
            InputLabel::ReturnAngle => &mut self.return_angle_deg,
            InputLabel::Deflection => &mut self.deflection_mm,
            InputLabel::QFactor => &mut self.q_factor,
        };
        *slot = value;
    }

    /// Apply a `key=value` override, as typed on the command line.
    pub fn apply_override(&mut self, assignment: &str) -> CalcResult<InputLabel> {
        let (key, raw) = assignment.split_once('=').ok_or_else(|| {
            CalcError::invalid_input("override", assignment, "Expected key=value")
        })?;
        let label: InputLabel = key.parse()?;
        let value: f64 = raw.trim().parse().map_err(|_| {
            CalcError::invalid_input(label.key(), raw.trim(), "Not a number")
        })?;
        self.set(label, value);
        Ok(label)
    }

    /// Check the divisors of the beam formulas.
    ///
    /// Length, thickness and width must all be non-zero; every zero field is
    /// named in the error.
    pub fn validate_geometry(&self) -> CalcResult<()> {
        let zero_fields: Vec<String> = [
            ("length_mm", self.length_mm),
            ("thickness_mm", self.thickness_mm),
            ("width_mm", self.width_mm),
        ]
        .iter()
        .filter(|(_, value)| *value == 0.0)
        .map(|(name, _)| name.to_string())
        .collect();

        if zero_fields.is_empty() {
            Ok(())
        } else {
            Err(CalcError::invalid_geometry(zero_fields))
        }
    }
}

/// Outputs of a successful snap-fit calculation.
///
/// Forces may be `+∞` when a ramp formula hits its friction lock
/// singularity; JSON keeps that as the string `"Infinity"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapFitOutputs {
    /// Maximum strain at the beam root (%)
    #[serde(with = "extended_float")]
    pub max_strain_percent: f64,

    /// Force P needed to deflect the beam by Y (N)
    #[serde(with = "extended_float")]
    pub deflection_force_n: f64,

    /// Push-on (assembly) force W (N)
    #[serde(with = "extended_float")]
    pub push_on_force_n: f64,

    /// Pull-off (separation) force W′ (N)
    #[serde(with = "extended_float")]
    pub pull_off_force_n: f64,
}

/// Outcome of a shape engine: outputs, or the error that replaced them.
pub type SnapFitResult = CalcResult<SnapFitOutputs>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_parsing() {
        assert_eq!("length".parse::<InputLabel>().unwrap(), InputLabel::BeamLength);
        assert_eq!("Beam Width".parse::<InputLabel>().unwrap(), InputLabel::BeamWidth);
        assert_eq!("q factor".parse::<InputLabel>().unwrap(), InputLabel::QFactor);
        assert!("span".parse::<InputLabel>().is_err());
    }

    #[test]
    fn test_get_set_cover_every_label() {
        let mut input = SnapFitInput::default();
        for (i, label) in InputLabel::ALL.into_iter().enumerate() {
            input.set(label, i as f64 + 1.0);
        }
        for (i, label) in InputLabel::ALL.into_iter().enumerate() {
            assert_eq!(input.get(label), i as f64 + 1.0);
        }
        assert_eq!(input.flexural_modulus_gpa, 1.0);
        assert_eq!(input.q_factor, 10.0);
    }

    #[test]
    fn test_apply_override() {
        let mut input = SnapFitInput::default();
        let label = input.apply_override("length = 25.5").unwrap();
        assert_eq!(label, InputLabel::BeamLength);
        assert_eq!(input.length_mm, 25.5);

        assert!(input.apply_override("length").is_err());
        assert!(input.apply_override("length=abc").is_err());
        assert!(input.apply_override("span=3").is_err());
    }

    #[test]
    fn test_validate_geometry_names_all_zero_fields() {
        let input = SnapFitInput {
            length_mm: 0.0,
            thickness_mm: 2.0,
            width_mm: 0.0,
            ..Default::default()
        };
        match input.validate_geometry() {
            Err(CalcError::InvalidGeometry { fields }) => {
                assert_eq!(fields, vec!["length_mm".to_string(), "width_mm".to_string()]);
            }
            other => panic!("expected InvalidGeometry, got {:?}", other),
        }
    }

    #[test]
    fn test_input_serialization_roundtrip() {
        let input = SnapFitInput {
            flexural_modulus_gpa: 2.5,
            length_mm: 20.0,
            ..Default::default()
        };
        let json = serde_json::to_string_pretty(&input).unwrap();
        assert!(json.contains("flexural_modulus_gpa"));
        let roundtrip: SnapFitInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, roundtrip);
    }
}
