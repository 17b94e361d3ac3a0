//! # Material Reference Table
//!
//! The workbook's "Material Prop Ref." sheet lists typical snap-fit plastics
//! with their permissible strain, flexural modulus and friction coefficient.
//! The sheet is free-form: blank rows and blank columns are dropped, the
//! first remaining row is the header.
//!
//! ## Example
//!
//! ```rust
//! use snapfit_core::calculations::SnapFitInput;
//! use snapfit_core::reference::ParameterSource;
//!
//! let source = ParameterSource::bundled();
//! let table = source.materials().unwrap();
//! let abs = table.find("abs").unwrap();
//!
//! let mut input = SnapFitInput::default();
//! abs.apply_to(&mut input);
//! assert!(input.flexural_modulus_gpa > 0.0);
//! ```

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::calculations::{InputLabel, SnapFitInput};
use crate::errors::{CalcError, CalcResult};
use crate::reference::{read_grid, MATERIAL_SHEET};

/// Header of the permissible strain column (%)
pub const PERMISSIBLE_STRAIN_COLUMN: &str = "Permissible Strain";

/// Header of the flexural modulus column (GPa)
pub const FLEXURAL_MODULUS_COLUMN: &str = "Flexural Modulus";

/// Header of the friction coefficient column
pub const FRICTION_COLUMN: &str = "Coefficient of Friction";

/// Material property table with string cells.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialTable {
    /// Trimmed header cells
    pub columns: Vec<String>,

    /// Data rows, padded to the header width
    pub rows: Vec<Vec<String>>,
}

impl MaterialTable {
    /// Parse the material sheet from CSV text
    pub fn from_csv<R: Read>(reader: R) -> CalcResult<Self> {
        Self::from_grid(read_grid(MATERIAL_SHEET, reader)?)
    }

    /// Build the table from a raw grid: drop blank rows and columns, take
    /// the first row as the header.
    pub fn from_grid(grid: Vec<Vec<String>>) -> CalcResult<Self> {
        let rows: Vec<Vec<String>> = grid
            .into_iter()
            .filter(|row| row.iter().any(|cell| !cell.is_empty()))
            .collect();

        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let kept: Vec<usize> = (0..width)
            .filter(|&col| rows.iter().any(|row| row.get(col).is_some_and(|cell| !cell.is_empty())))
            .collect();

        let mut rows = rows.into_iter().map(|row| {
            kept.iter()
                .map(|&col| row.get(col).cloned().unwrap_or_default())
                .collect::<Vec<String>>()
        });

        let columns = rows
            .next()
            .ok_or_else(|| CalcError::reference_data(MATERIAL_SHEET, "sheet is empty"))?;

        Ok(MaterialTable {
            columns,
            rows: rows.collect(),
        })
    }

    /// Index of a column by header name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Find a material by the first column, ignoring case
    pub fn find(&self, name: &str) -> Option<MaterialRecord<'_>> {
        let wanted = name.trim();
        self.rows
            .iter()
            .find(|row| row.first().is_some_and(|cell| cell.eq_ignore_ascii_case(wanted)))
            .map(|cells| MaterialRecord { table: self, cells })
    }

    /// Like [`find`](Self::find) but a miss is an error
    pub fn require(&self, name: &str) -> CalcResult<MaterialRecord<'_>> {
        self.find(name)
            .ok_or_else(|| CalcError::material_not_found(name.trim()))
    }

    /// Material names in table order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().filter_map(|row| row.first()).map(String::as_str)
    }
}

/// One row of the material table.
#[derive(Debug, Clone, Copy)]
pub struct MaterialRecord<'a> {
    table: &'a MaterialTable,
    cells: &'a [String],
}

impl<'a> MaterialRecord<'a> {
    /// Material name (first column)
    pub fn name(&self) -> &'a str {
        self.cells.first().map(String::as_str).unwrap_or("")
    }

    /// Raw cell under a header
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let idx = self.table.column_index(column)?;
        self.cells.get(idx).map(String::as_str)
    }

    /// Cell under a header parsed as a number
    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column)?.parse().ok()
    }

    /// Flexural modulus (GPa)
    pub fn flexural_modulus_gpa(&self) -> Option<f64> {
        self.number(FLEXURAL_MODULUS_COLUMN)
    }

    /// Permissible strain (%)
    pub fn permissible_strain_percent(&self) -> Option<f64> {
        self.number(PERMISSIBLE_STRAIN_COLUMN)
    }

    /// Coefficient of friction
    pub fn friction_coefficient(&self) -> Option<f64> {
        self.number(FRICTION_COLUMN)
    }

    /// Copy the material's numeric properties into an input record.
    ///
    /// Only cells that parse are applied; returns the labels overwritten.
    pub fn apply_to(&self, input: &mut SnapFitInput) -> Vec<InputLabel> {
        let properties = [
            (InputLabel::FlexuralModulus, self.flexural_modulus_gpa()),
            (InputLabel::PermissibleStrain, self.permissible_strain_percent()),
            (InputLabel::CoefficientOfFriction, self.friction_coefficient()),
        ];

        properties
            .into_iter()
            .filter_map(|(label, value)| {
                let value = value?;
                input.set(label, value);
                Some(label)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
,,,,,
,Material,Permissible Strain,,Flexural Modulus,Coefficient of Friction
,,,,,
,ABS,2.5,,2.3,0.55
,PC,4.0,,2.4,n/a
";

    fn sample_table() -> MaterialTable {
        MaterialTable::from_csv(SAMPLE.as_bytes()).unwrap()
    }

    #[test]
    fn test_blank_rows_and_columns_dropped() {
        let table = sample_table();
        assert_eq!(
            table.columns,
            vec!["Material", "Permissible Strain", "Flexural Modulus", "Coefficient of Friction"]
        );
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["ABS", "2.5", "2.3", "0.55"]);
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let table = sample_table();
        let abs = table.find("abs").unwrap();
        assert_eq!(abs.name(), "ABS");
        assert_eq!(abs.flexural_modulus_gpa(), Some(2.3));
        assert_eq!(abs.permissible_strain_percent(), Some(2.5));
        assert_eq!(abs.friction_coefficient(), Some(0.55));
        assert!(table.find("PEEK").is_none());
        assert_eq!(table.require("PEEK").unwrap_err().error_code(), "MATERIAL_NOT_FOUND");
    }

    #[test]
    fn test_apply_skips_unparseable_cells() {
        let table = sample_table();
        let mut input = SnapFitInput {
            friction_coefficient: 0.3,
            ..Default::default()
        };
        let applied = table.find("PC").unwrap().apply_to(&mut input);
        assert_eq!(applied, vec![InputLabel::FlexuralModulus, InputLabel::PermissibleStrain]);
        assert_eq!(input.flexural_modulus_gpa, 2.4);
        assert_eq!(input.permissible_strain_percent, 4.0);
        assert_eq!(input.friction_coefficient, 0.3);
    }

    #[test]
    fn test_empty_sheet_is_an_error() {
        let err = MaterialTable::from_csv(",,\n,,\n".as_bytes()).unwrap_err();
        assert_eq!(err.error_code(), "REFERENCE_DATA");
    }

    #[test]
    fn test_names() {
        let table = sample_table();
        let names: Vec<&str> = table.names().collect();
        assert_eq!(names, vec!["ABS", "PC"]);
    }
}
