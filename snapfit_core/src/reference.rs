//! # Reference Data
//!
//! The snap-fit workbook stores one sheet per shape plus a material
//! property table. Each sheet is read from a CSV export of that sheet; the
//! grid layout is kept as-is:
//!
//! - input labels sit in column 1, their default values in column 4
//! - precomputed outputs sit anywhere in a row, value in the last filled cell
//! - a diagram link is any cell containing `http`
//!
//! [`ParameterSource`] is built once at start-up and reads each sheet at
//! most once, either from a directory of CSV files or from the copies
//! bundled into the binary.
//!
//! ## Lenient defaults
//!
//! A missing label, or a value cell that does not parse, yields `0.0`. The
//! fallback is flagged in [`ParameterValue::defaulted`] so callers can tell
//! it apart from a genuine zero.
//!
//! ## Example
//!
//! ```rust
//! use snapfit_core::calculations::SnapShape;
//! use snapfit_core::reference::ParameterSource;
//!
//! let source = ParameterSource::bundled();
//! let defaults = source.defaults(SnapShape::Cantilever).unwrap();
//! assert!(defaults.defaulted.is_empty());
//! assert_eq!(defaults.input.length_mm, 20.0);
//! ```

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use once_cell::unsync::OnceCell;
use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::{InputLabel, SnapFitInput, SnapShape};
use crate::errors::{CalcError, CalcResult};
use crate::materials::MaterialTable;

/// Column holding input labels
pub const LABEL_COLUMN: usize = 1;

/// Column holding default input values
pub const VALUE_COLUMN: usize = 4;

/// Sheet name of the material property table
pub const MATERIAL_SHEET: &str = "Material Prop Ref.";

/// CSV export of the material property table
pub const MATERIAL_FILE: &str = "material_prop_ref.csv";

#[derive(RustEmbed)]
#[folder = "reference/"]
struct BundledReference;

/// Parse a headerless, possibly ragged CSV grid into trimmed string cells.
pub(crate) fn read_grid<R: Read>(sheet: &str, reader: R) -> CalcResult<Vec<Vec<String>>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (row_idx, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| {
            CalcError::reference_data(sheet, format!("CSV parse error at row {}: {}", row_idx + 1, e))
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Result of a lenient label lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterValue {
    /// Value found in the sheet, or 0.0 when defaulted
    pub value: f64,

    /// True when the label was missing or its value cell did not parse
    pub defaulted: bool,
}

/// One workbook sheet as a grid of string cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReferenceSheet {
    /// Sheet name, for messages
    pub name: String,

    /// Rows of trimmed cells; rows may differ in length
    pub rows: Vec<Vec<String>>,
}

impl ReferenceSheet {
    /// Build a sheet from rows already in memory
    pub fn new(name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        ReferenceSheet {
            name: name.into(),
            rows,
        }
    }

    /// Parse a sheet from CSV text
    pub fn from_csv<R: Read>(name: &str, reader: R) -> CalcResult<Self> {
        let rows = read_grid(name, reader)?;
        Ok(ReferenceSheet::new(name, rows))
    }

    /// Look up the default value for a label.
    ///
    /// Only the first row whose label cell matches is considered; if its
    /// value cell is empty or not a number the lookup is defaulted.
    pub fn lookup(&self, label: &str) -> ParameterValue {
        let parsed = self
            .rows
            .iter()
            .find(|row| row.get(LABEL_COLUMN).is_some_and(|cell| cell == label))
            .and_then(|row| row.get(VALUE_COLUMN))
            .and_then(|cell| cell.parse::<f64>().ok());

        match parsed {
            Some(value) => ParameterValue {
                value,
                defaulted: false,
            },
            None => ParameterValue {
                value: 0.0,
                defaulted: true,
            },
        }
    }

    /// Default value for a label, `0.0` when missing or unparseable
    pub fn default_value(&self, label: &str) -> f64 {
        self.lookup(label).value
    }

    /// Precomputed output for a keyword.
    ///
    /// Finds the first row where any cell contains `keyword` (ignoring case)
    /// and returns that row's last non-empty cell.
    pub fn reference_output(&self, keyword: &str) -> Option<&str> {
        let needle = keyword.to_lowercase();
        self.rows
            .iter()
            .find(|row| row.iter().any(|cell| cell.to_lowercase().contains(&needle)))
            .and_then(|row| row.iter().rev().find(|cell| !cell.is_empty()))
            .map(String::as_str)
    }

    /// First cell containing a web link, scanning column by column
    pub fn diagram_link(&self) -> Option<&str> {
        let width = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        (0..width)
            .flat_map(|col| self.rows.iter().filter_map(move |row| row.get(col)))
            .find(|cell| cell.contains("http"))
            .map(String::as_str)
    }
}

/// Defaults for one shape, with the labels that fell back to 0.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputDefaults {
    /// Input record filled from the sheet
    pub input: SnapFitInput,

    /// Labels that were missing or unparseable
    pub defaulted: Vec<InputLabel>,
}

impl InputDefaults {
    /// Assemble an input record from a shape sheet
    pub fn from_sheet(sheet: &ReferenceSheet) -> Self {
        let mut input = SnapFitInput::default();
        let mut defaulted = Vec::new();

        for label in InputLabel::ALL {
            let found = sheet.lookup(label.sheet_label());
            if found.defaulted {
                warn!(sheet = %sheet.name, label = %label, "reference value missing, defaulting to 0.0");
                defaulted.push(label);
            }
            input.set(label, found.value);
        }

        InputDefaults { input, defaulted }
    }

    /// Whether a label fell back to the lenient default
    pub fn is_defaulted(&self, label: InputLabel) -> bool {
        self.defaulted.contains(&label)
    }
}

/// Where reference sheets are read from.
#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceStore {
    /// Directory of CSV sheet exports
    Directory(PathBuf),
    /// Sheets compiled into the binary
    Bundled,
}

impl ReferenceStore {
    fn read(&self, sheet: &str, file_name: &str) -> CalcResult<Vec<u8>> {
        match self {
            ReferenceStore::Directory(dir) => {
                let path = dir.join(file_name);
                fs::read(&path).map_err(|e| {
                    CalcError::reference_data(sheet, format!("cannot read {}: {}", path.display(), e))
                })
            }
            ReferenceStore::Bundled => BundledReference::get(file_name)
                .map(|file| file.data.into_owned())
                .ok_or_else(|| CalcError::reference_data(sheet, format!("no bundled copy of {}", file_name))),
        }
    }
}

/// Memoizing access to the reference workbook.
///
/// Construct once and pass by reference to whatever assembles inputs. Each
/// sheet is parsed on first use and kept for the life of the source. Not
/// `Sync`; give each thread its own source.
#[derive(Debug)]
pub struct ParameterSource {
    store: ReferenceStore,
    cantilever: OnceCell<ReferenceSheet>,
    l_shaped: OnceCell<ReferenceSheet>,
    u_shaped: OnceCell<ReferenceSheet>,
    materials: OnceCell<MaterialTable>,
}

impl ParameterSource {
    /// Source backed by the given store
    pub fn new(store: ReferenceStore) -> Self {
        ParameterSource {
            store,
            cantilever: OnceCell::new(),
            l_shaped: OnceCell::new(),
            u_shaped: OnceCell::new(),
            materials: OnceCell::new(),
        }
    }

    /// Source reading CSV exports from `dir`
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        ParameterSource::new(ReferenceStore::Directory(dir.as_ref().to_path_buf()))
    }

    /// Source using the bundled reference sheets
    pub fn bundled() -> Self {
        ParameterSource::new(ReferenceStore::Bundled)
    }

    /// Where this source reads from
    pub fn store(&self) -> &ReferenceStore {
        &self.store
    }

    fn slot(&self, shape: SnapShape) -> &OnceCell<ReferenceSheet> {
        match shape {
            SnapShape::Cantilever => &self.cantilever,
            SnapShape::LShaped => &self.l_shaped,
            SnapShape::UShaped => &self.u_shaped,
        }
    }

    /// Sheet for a shape, loaded on first use
    pub fn sheet(&self, shape: SnapShape) -> CalcResult<&ReferenceSheet> {
        self.slot(shape).get_or_try_init(|| {
            let bytes = self.store.read(shape.sheet_name(), shape.file_name())?;
            let sheet = ReferenceSheet::from_csv(shape.sheet_name(), bytes.as_slice())?;
            debug!(sheet = shape.sheet_name(), rows = sheet.rows.len(), "reference sheet loaded");
            Ok(sheet)
        })
    }

    /// Material property table, loaded on first use
    pub fn materials(&self) -> CalcResult<&MaterialTable> {
        self.materials.get_or_try_init(|| {
            let bytes = self.store.read(MATERIAL_SHEET, MATERIAL_FILE)?;
            let table = MaterialTable::from_csv(bytes.as_slice())?;
            debug!(materials = table.rows.len(), "material reference loaded");
            Ok(table)
        })
    }

    /// Default value of one label for a shape (lenient, 0.0 fallback)
    pub fn default_value(&self, shape: SnapShape, label: InputLabel) -> CalcResult<f64> {
        Ok(self.sheet(shape)?.default_value(label.sheet_label()))
    }

    /// All ten defaults for a shape
    pub fn defaults(&self, shape: SnapShape) -> CalcResult<InputDefaults> {
        Ok(InputDefaults::from_sheet(self.sheet(shape)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
,Inputs,,,
,Flexural Modulus,E,GPa,2.1
,Beam Length,L,mm,not a number
,Beam Length,L,mm,99
,Outputs,,,
,Max Strain,ε,%,1.75,
,Deflection Force,P,N,12.5
,Deflection Force Lbf,P,Lbf,2.81
,Diagram,https://example.com/snap.png
";

    fn sample_sheet() -> ReferenceSheet {
        ReferenceSheet::from_csv("Sample", SAMPLE.as_bytes()).unwrap()
    }

    #[test]
    fn test_lookup_found() {
        let sheet = sample_sheet();
        let found = sheet.lookup("Flexural Modulus");
        assert_eq!(found.value, 2.1);
        assert!(!found.defaulted);
    }

    #[test]
    fn test_lookup_missing_label_defaults_to_zero() {
        let sheet = sample_sheet();
        let missing = sheet.lookup("Q Factor");
        assert_eq!(missing, ParameterValue { value: 0.0, defaulted: true });
        assert_eq!(sheet.default_value("Q Factor"), 0.0);
    }

    #[test]
    fn test_lookup_uses_first_matching_row_only() {
        // first "Beam Length" row is unparseable; the later 99 is not consulted
        let sheet = sample_sheet();
        let found = sheet.lookup("Beam Length");
        assert!(found.defaulted);
        assert_eq!(found.value, 0.0);
    }

    #[test]
    fn test_reference_output() {
        let sheet = sample_sheet();
        assert_eq!(sheet.reference_output("max strain"), Some("1.75"));
        assert_eq!(sheet.reference_output("Deflection Force"), Some("12.5"));
        assert_eq!(sheet.reference_output("Deflection Force Lbf"), Some("2.81"));
        assert_eq!(sheet.reference_output("Pull-off Force"), None);
    }

    #[test]
    fn test_diagram_link() {
        let sheet = sample_sheet();
        assert_eq!(sheet.diagram_link(), Some("https://example.com/snap.png"));
        assert_eq!(ReferenceSheet::default().diagram_link(), None);
    }

    #[test]
    fn test_input_defaults_flags_missing_labels() {
        let defaults = InputDefaults::from_sheet(&sample_sheet());
        assert_eq!(defaults.input.flexural_modulus_gpa, 2.1);
        assert!(defaults.is_defaulted(InputLabel::BeamLength));
        assert!(defaults.is_defaulted(InputLabel::QFactor));
        assert!(!defaults.is_defaulted(InputLabel::FlexuralModulus));
        assert_eq!(defaults.defaulted.len(), 9);
    }

    #[test]
    fn test_bundled_cantilever_defaults() {
        let source = ParameterSource::bundled();
        let defaults = source.defaults(SnapShape::Cantilever).unwrap();
        assert!(defaults.defaulted.is_empty());
        assert_eq!(defaults.input.flexural_modulus_gpa, 2.5);
        assert_eq!(defaults.input.permissible_strain_percent, 2.5);
        assert_eq!(defaults.input.friction_coefficient, 0.3);
        assert_eq!(defaults.input.thickness_mm, 2.0);
        assert_eq!(defaults.input.length_mm, 20.0);
        assert_eq!(defaults.input.width_mm, 10.0);
        assert_eq!(defaults.input.lead_angle_deg, 30.0);
        assert_eq!(defaults.input.return_angle_deg, 20.0);
        assert_eq!(defaults.input.deflection_mm, 3.0);
        assert_eq!(defaults.input.q_factor, 1.0);
        assert_eq!(source.default_value(SnapShape::Cantilever, InputLabel::BeamWidth).unwrap(), 10.0);
    }

    #[test]
    fn test_bundled_sheets_all_load() {
        let source = ParameterSource::bundled();
        for shape in SnapShape::ALL {
            assert!(source.sheet(shape).is_ok(), "{} should load", shape);
        }
        assert!(source.materials().is_ok());
    }

    #[test]
    fn test_sheet_is_cached() {
        let source = ParameterSource::bundled();
        let first = source.sheet(SnapShape::Cantilever).unwrap() as *const ReferenceSheet;
        let second = source.sheet(SnapShape::Cantilever).unwrap() as *const ReferenceSheet;
        assert_eq!(first, second);
    }

    #[test]
    fn test_directory_source() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = fs::File::create(dir.path().join(SnapShape::Cantilever.file_name())).unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let source = ParameterSource::from_dir(dir.path());
        let defaults = source.defaults(SnapShape::Cantilever).unwrap();
        assert_eq!(defaults.input.flexural_modulus_gpa, 2.1);

        let err = source.sheet(SnapShape::UShaped).unwrap_err();
        assert_eq!(err.error_code(), "REFERENCE_DATA");
    }
}
