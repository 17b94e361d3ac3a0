//! Table rendering for the terminal

use snapfit_core::materials::MaterialTable;
use snapfit_core::report::{format_value, OutputRow, ReportOutcome, SnapFitReport};
use snapfit_core::{InputDefaults, InputLabel, SnapFitInput, SnapShape};
use tabled::{builder::Builder, settings::Style};

/// Output rows as a table; adds the second-case column when any row has one.
pub fn rows_table(rows: &[OutputRow], precision: usize) -> String {
    let with_notes = rows.iter().any(|row| row.note.is_some());

    let mut table = Builder::default();
    if with_notes {
        table.push_record(["Label", "Symbol", "Unit", "Case 1", "Case 2"]);
    } else {
        table.push_record(["Label", "Symbol", "Unit", "Value"]);
    }

    for row in rows {
        let mut record = vec![
            row.label.clone(),
            row.symbol.clone(),
            row.unit.clone(),
            row.value.display(precision),
        ];
        if with_notes {
            record.push(row.note.clone().unwrap_or_default());
        }
        table.push_record(record);
    }

    table.build().with(Style::rounded()).to_string()
}

/// Input values with their captions
pub fn input_table(input: &SnapFitInput, defaults: Option<&InputDefaults>, precision: usize) -> String {
    let mut table = Builder::default();
    table.push_record(["Input", "Key", "Value", "Source"]);

    for label in InputLabel::ALL {
        let source = match defaults {
            Some(d) if d.is_defaulted(label) => "defaulted (0.0)",
            Some(_) => "sheet",
            None => "",
        };
        table.push_record([
            label.caption().to_string(),
            label.key().to_string(),
            format_value(input.get(label), precision),
            source.to_string(),
        ]);
    }

    table.build().with(Style::rounded()).to_string()
}

/// Material reference table
pub fn materials_table(materials: &MaterialTable) -> String {
    let mut table = Builder::default();
    table.push_record(materials.columns.clone());
    for row in &materials.rows {
        table.push_record(row.clone());
    }
    table.build().with(Style::rounded()).to_string()
}

/// Shape keys and their sheets
pub fn shapes_table() -> String {
    let mut table = Builder::default();
    table.push_record(["Key", "Shape", "Sheet", "File"]);
    for shape in SnapShape::ALL {
        table.push_record([shape.key(), shape.label(), shape.sheet_name(), shape.file_name()]);
    }
    table.build().with(Style::rounded()).to_string()
}

/// Print a report the way an engineer reads it: inputs, outputs, verdict.
pub fn print_report(report: &SnapFitReport, precision: usize) {
    println!("═══════════════════════════════════════");
    println!("  {} RESULTS", report.shape.label().to_uppercase());
    println!("═══════════════════════════════════════");
    println!();
    println!("{}", input_table(&report.input, None, precision));
    println!();

    match &report.outcome {
        ReportOutcome::Computed { rows, verdict, .. } => {
            println!("{}", rows_table(rows, precision));
            println!();
            println!("═══════════════════════════════════════");
            println!(
                "  RESULT: {} (strain {}% vs permissible {}%, margin {}%)",
                verdict.label(),
                format_value(verdict.max_strain_percent, precision),
                format_value(verdict.permissible_strain_percent, precision),
                format_value(verdict.margin_percent, precision),
            );
            println!("═══════════════════════════════════════");
        }
        ReportOutcome::Failed { code, message } => {
            println!("  No results: {} [{}]", message, code);
        }
    }
}
