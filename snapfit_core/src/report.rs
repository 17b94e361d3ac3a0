//! # Calculation Reports
//!
//! Turns an engine outcome into something a display can render without
//! knowing any formulas: either an error with a message, or the computed
//! metrics, the safety verdict and a list of labelled output rows.
//!
//! ## Example
//!
//! ```rust
//! use snapfit_core::calculations::SnapShape;
//! use snapfit_core::reference::ParameterSource;
//! use snapfit_core::report::{build_report, ReportOutcome};
//! use snapfit_core::units::ForceUnit;
//!
//! let source = ParameterSource::bundled();
//! let defaults = source.defaults(SnapShape::Cantilever).unwrap();
//! let report = build_report(SnapShape::Cantilever, &defaults.input, ForceUnit::Newtons);
//!
//! match &report.outcome {
//!     ReportOutcome::Computed { verdict, rows, .. } => {
//!         assert!(verdict.is_safe);
//!         assert_eq!(rows.len(), 5);
//!     }
//!     ReportOutcome::Failed { message, .. } => panic!("{}", message),
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::{calculate, SnapFitInput, SnapFitOutputs, SnapShape};
use crate::reference::ReferenceSheet;
use crate::safety::SafetyVerdict;
use crate::units::{extended_float, ForceUnit, Newtons};

/// Text shown for a value the sheet leaves to its own input cells
const INPUT_STRAIN: &str = "Input Strain";

/// Text shown for the U-shaped second case
const INPUT_THICKNESS: &str = "Input Thickness";

/// Format a number with fixed decimals, keeping non-finite values readable.
pub fn format_value(value: f64, precision: usize) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "∞".to_string()
    } else if value == f64::NEG_INFINITY {
        "-∞".to_string()
    } else {
        format!("{:.*}", precision, value)
    }
}

/// Value cell of an output row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Computed or parsed number
    Number(#[serde(with = "extended_float")] f64),
    /// Free text from the sheet
    Text(String),
    /// Nothing found
    Missing,
}

impl CellValue {
    /// Interpret a sheet cell: numbers stay numbers, anything else is text
    pub fn from_sheet(cell: Option<&str>) -> Self {
        match cell {
            Some(text) => match text.parse::<f64>() {
                Ok(v) => CellValue::Number(v),
                Err(_) => CellValue::Text(text.to_string()),
            },
            None => CellValue::Missing,
        }
    }

    /// Render for a table
    pub fn display(&self, precision: usize) -> String {
        match self {
            CellValue::Number(v) => format_value(*v, precision),
            CellValue::Text(text) => text.clone(),
            CellValue::Missing => "-".to_string(),
        }
    }
}

/// One line of an output table: label, symbol, unit, value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRow {
    pub label: String,
    pub symbol: String,
    pub unit: String,
    pub value: CellValue,

    /// Second-case column (U-shaped reference table only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl OutputRow {
    fn new(label: &str, symbol: &str, unit: &str, value: CellValue) -> Self {
        OutputRow {
            label: label.to_string(),
            symbol: symbol.to_string(),
            unit: unit.to_string(),
            value,
            note: None,
        }
    }

    fn with_note(mut self, note: &str) -> Self {
        self.note = Some(note.to_string());
        self
    }
}

/// What a calculation produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReportOutcome {
    /// The engine rejected the input; no numbers are shown
    Failed { code: String, message: String },

    /// Metrics, verdict and display rows
    Computed {
        outputs: SnapFitOutputs,
        verdict: SafetyVerdict,
        rows: Vec<OutputRow>,
    },
}

/// Complete result of one submission, ready for display or JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapFitReport {
    pub shape: SnapShape,
    pub generated_at: DateTime<Utc>,
    pub input: SnapFitInput,
    #[serde(flatten)]
    pub outcome: ReportOutcome,
}

impl SnapFitReport {
    /// Whether the calculation failed
    pub fn is_error(&self) -> bool {
        matches!(self.outcome, ReportOutcome::Failed { .. })
    }

    /// Verdict, when computed
    pub fn verdict(&self) -> Option<&SafetyVerdict> {
        match &self.outcome {
            ReportOutcome::Computed { verdict, .. } => Some(verdict),
            ReportOutcome::Failed { .. } => None,
        }
    }
}

/// Output rows for computed metrics.
///
/// Max deflection echoes the input deflection Y; forces are converted to
/// `force_unit`.
pub fn output_rows(input: &SnapFitInput, outputs: &SnapFitOutputs, force_unit: ForceUnit) -> Vec<OutputRow> {
    let unit = force_unit.symbol();
    let force = |n: f64| CellValue::Number(force_unit.from_newtons(Newtons(n)));

    vec![
        OutputRow::new("Max Strain", "ε", "%", CellValue::Number(outputs.max_strain_percent)),
        OutputRow::new("Max Deflection", "Y", "mm", CellValue::Number(input.deflection_mm)),
        OutputRow::new("Deflection Force", "P", unit, force(outputs.deflection_force_n)),
        OutputRow::new("Push-on Force", "W", unit, force(outputs.push_on_force_n)),
        OutputRow::new("Pull-off Force", "W'", unit, force(outputs.pull_off_force_n)),
    ]
}

/// Output rows as precomputed in a shape's reference sheet.
pub fn reference_rows(shape: SnapShape, sheet: &ReferenceSheet) -> Vec<OutputRow> {
    let get = |keyword: &str| CellValue::from_sheet(sheet.reference_output(keyword));
    let text = |t: &str| CellValue::Text(t.to_string());

    match shape {
        SnapShape::Cantilever => vec![
            OutputRow::new("Max Strain", "ε", "%", get("Max Strain")),
            OutputRow::new("Max Deflection", "Y", "mm", get("Max Deflection")),
            OutputRow::new("Deflection Force", "P", "N", get("Deflection Force")),
            OutputRow::new("Push-on Force", "W", "N", get("Push-on Force")),
            OutputRow::new("Pull-off Force", "W'", "N", get("Pull-off Force")),
        ],
        SnapShape::LShaped => vec![
            OutputRow::new("Max Strain", "ε", "%", get("Max Strain")),
            OutputRow::new("Minimum Leg Length", "L2", "mm", text(INPUT_STRAIN)),
            OutputRow::new("Max Deflection", "Y", "mm", text(INPUT_STRAIN)),
            OutputRow::new("Deflection Force", "P", "N", get("Deflection Force")),
            OutputRow::new("Deflection Force", "P", "Lbf", get("Deflection Force Lbf")),
        ],
        SnapShape::UShaped => vec![
            OutputRow::new("Max Strain", "ε", "%", get("Max Strain")).with_note(INPUT_THICKNESS),
            OutputRow::new("Max Deflection", "Y", "mm", get("Max Deflection")).with_note(INPUT_THICKNESS),
            OutputRow::new("Deflection Force", "P", "N", get("Deflection Force")).with_note(INPUT_THICKNESS),
            OutputRow::new("Deflection Force", "P", "Lbf", get("Deflection Force Lbf")).with_note("-"),
        ],
    }
}

/// Run the shape's engine and package the outcome for display.
pub fn build_report(shape: SnapShape, input: &SnapFitInput, force_unit: ForceUnit) -> SnapFitReport {
    let outcome = match calculate(shape, input) {
        Ok(outputs) => {
            let verdict = SafetyVerdict::for_outputs(input, &outputs);
            ReportOutcome::Computed {
                rows: output_rows(input, &outputs, force_unit),
                outputs,
                verdict,
            }
        }
        Err(e) => {
            debug!(shape = shape.key(), error = %e, "calculation failed");
            ReportOutcome::Failed {
                code: e.error_code().to_string(),
                message: e.to_string(),
            }
        }
    };

    SnapFitReport {
        shape,
        generated_at: Utc::now(),
        input: *input,
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ParameterSource;

    fn test_snap() -> SnapFitInput {
        SnapFitInput {
            flexural_modulus_gpa: 2.5,
            permissible_strain_percent: 2.5,
            friction_coefficient: 0.3,
            thickness_mm: 2.0,
            length_mm: 20.0,
            width_mm: 10.0,
            lead_angle_deg: 30.0,
            return_angle_deg: 20.0,
            deflection_mm: 3.0,
            q_factor: 1.0,
        }
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(18.750000000000004, 2), "18.75");
        assert_eq!(format_value(1.0814, 3), "1.081");
        assert_eq!(format_value(f64::INFINITY, 3), "∞");
        assert_eq!(format_value(f64::NAN, 3), "NaN");
    }

    #[test]
    fn test_computed_report() {
        let report = build_report(SnapShape::Cantilever, &test_snap(), ForceUnit::Newtons);
        assert!(!report.is_error());
        let verdict = report.verdict().unwrap();
        assert!(verdict.is_safe);
        assert!((verdict.margin_percent - 0.25).abs() < 1e-12);

        match &report.outcome {
            ReportOutcome::Computed { rows, .. } => {
                assert_eq!(rows[0].label, "Max Strain");
                assert_eq!(rows[0].value.display(2), "2.25");
                assert_eq!(rows[1].value, CellValue::Number(3.0));
                assert_eq!(rows[2].unit, "N");
                assert_eq!(rows[2].value.display(2), "18.75");
            }
            other => panic!("expected computed report, got {:?}", other),
        }
    }

    #[test]
    fn test_force_rows_in_pounds_force() {
        let report = build_report(SnapShape::Cantilever, &test_snap(), ForceUnit::PoundsForce);
        match &report.outcome {
            ReportOutcome::Computed { rows, outputs, .. } => {
                assert_eq!(rows[2].unit, "Lbf");
                assert_eq!(rows[2].value.display(2), "4.22");
                // outputs stay in newtons
                assert!((outputs.deflection_force_n - 18.75).abs() < 1e-9);
            }
            other => panic!("expected computed report, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_geometry_report_has_no_numbers() {
        let mut input = test_snap();
        input.width_mm = 0.0;
        let report = build_report(SnapShape::Cantilever, &input, ForceUnit::Newtons);
        assert!(report.is_error());
        assert!(report.verdict().is_none());
        match &report.outcome {
            ReportOutcome::Failed { code, message } => {
                assert_eq!(code, "INVALID_GEOMETRY");
                assert!(message.contains("width_mm"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_infinite_force_survives_json() {
        let input = test_snap();
        let outputs = SnapFitOutputs {
            max_strain_percent: 2.25,
            deflection_force_n: 18.75,
            push_on_force_n: f64::INFINITY,
            pull_off_force_n: 1.08,
        };
        let rows = output_rows(&input, &outputs, ForceUnit::Newtons);
        assert_eq!(rows[3].value.display(2), "∞");

        let json = serde_json::to_string(&rows[3]).unwrap();
        assert!(json.contains("\"Infinity\""));
        let back: OutputRow = serde_json::from_str(&json).unwrap();
        assert_eq!(back.value, CellValue::Number(f64::INFINITY));
    }

    #[test]
    fn test_report_json_roundtrip() {
        let report = build_report(SnapShape::Cantilever, &test_snap(), ForceUnit::Newtons);
        let json = serde_json::to_string_pretty(&report).unwrap();
        assert!(json.contains("\"status\": \"computed\""));
        assert!(json.contains("\"shape\": \"cantilever\""));
        let back: SnapFitReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.shape, report.shape);
        assert_eq!(back.generated_at, report.generated_at);
        assert_eq!(back.input, report.input);
        assert!(back.verdict().unwrap().is_safe);
    }

    #[test]
    fn test_unimplemented_shape_report() {
        let report = build_report(SnapShape::UShaped, &test_snap(), ForceUnit::Newtons);
        match &report.outcome {
            ReportOutcome::Failed { code, .. } => assert_eq!(code, "SHAPE_NOT_IMPLEMENTED"),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_reference_rows_from_bundled_sheets() {
        let source = ParameterSource::bundled();

        let cantilever = reference_rows(SnapShape::Cantilever, source.sheet(SnapShape::Cantilever).unwrap());
        assert_eq!(cantilever.len(), 5);
        assert_eq!(cantilever[0].value, CellValue::Number(2.25));

        let l = reference_rows(SnapShape::LShaped, source.sheet(SnapShape::LShaped).unwrap());
        assert_eq!(l[1].value, CellValue::Text("Input Strain".to_string()));
        assert_eq!(l[4].unit, "Lbf");
        assert!(matches!(l[4].value, CellValue::Number(_)));

        let u = reference_rows(SnapShape::UShaped, source.sheet(SnapShape::UShaped).unwrap());
        assert_eq!(u.len(), 4);
        assert_eq!(u[0].note.as_deref(), Some("Input Thickness"));
        assert_eq!(u[3].note.as_deref(), Some("-"));
    }

    #[test]
    fn test_missing_reference_output() {
        let sheet = ReferenceSheet::new("Empty", vec![]);
        let rows = reference_rows(SnapShape::Cantilever, &sheet);
        assert!(rows.iter().all(|row| row.value == CellValue::Missing));
        assert_eq!(rows[0].value.display(3), "-");
    }
}
