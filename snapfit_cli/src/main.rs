//! `snapfit` - command-line front end for the snap-fit calculator

mod args;
mod output;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use snapfit_core::report::{format_value, reference_rows};
use snapfit_core::units::ForceUnit;
use snapfit_core::{
    build_report, CalcError, CalcResult, InputLabel, ParameterSource, SnapFitInput, SnapShape,
    Settings,
};
use tracing::{debug, Level};

use args::{CalcArgs, Cli, Commands};

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            print_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CalcResult<ExitCode> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(dir) = cli.reference_dir {
        settings.reference_dir = Some(dir);
    }
    debug!(?settings, "settings resolved");

    let source = settings.parameter_source();

    match cli.command {
        Commands::Shapes => {
            println!("{}", output::shapes_table());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Materials => {
            println!("{}", output::materials_table(source.materials()?));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Defaults(args) => {
            let shape = args.shape.unwrap_or(settings.default_shape);
            let defaults = source.defaults(shape)?;
            println!("{} ({})", shape.label(), shape.sheet_name());
            println!(
                "{}",
                output::input_table(&defaults.input, Some(&defaults), settings.precision)
            );
            if !defaults.defaulted.is_empty() {
                println!();
                println!("{} input(s) missing from the sheet were set to 0.0", defaults.defaulted.len());
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Calc(args) => run_calc(args, &settings, &source),
    }
}

fn run_calc(args: CalcArgs, settings: &Settings, source: &ParameterSource) -> CalcResult<ExitCode> {
    let shape = args.shape.shape.unwrap_or(settings.default_shape);
    let precision = args.precision.unwrap_or(settings.precision);
    let force_unit = if args.lbf { ForceUnit::PoundsForce } else { settings.force_unit };

    let mut input = source.defaults(shape)?.input;

    if let Some(name) = &args.material {
        let materials = source.materials()?;
        let record = materials.require(name)?;
        let applied = record.apply_to(&mut input);
        debug!(material = record.name(), ?applied, "material properties applied");
    }

    for raw in &args.overrides {
        let label = input.apply_override(raw)?;
        debug!(input = label.key(), value = input.get(label), "override applied");
    }

    if args.interactive {
        prompt_inputs(&mut input, precision);
    }

    let report = build_report(shape, &input, force_unit);

    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })?;
        println!("{}", json);
    } else {
        output::print_report(&report, precision);
        if matches!(shape, SnapShape::LShaped | SnapShape::UShaped) {
            print_reference(shape, source, precision)?;
        }
    }

    Ok(if report.is_error() { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

fn prompt_inputs(input: &mut SnapFitInput, precision: usize) {
    println!("Press Enter to keep the value in brackets.");
    for label in InputLabel::ALL {
        let current = input.get(label);
        let prompt = format!("{} [{}]: ", label.caption(), format_value(current, precision));
        input.set(label, prompt_f64(&prompt, current));
    }
    println!();
}

/// Reference outputs precomputed in the shape's sheet
fn print_reference(shape: SnapShape, source: &ParameterSource, precision: usize) -> CalcResult<()> {
    let sheet = source.sheet(shape)?;
    println!();
    println!("Reference values from \"{}\":", shape.sheet_name());
    println!("{}", output::rows_table(&reference_rows(shape, sheet), precision));
    if let Some(link) = sheet.diagram_link() {
        println!("Diagram: {}", link);
    }
    Ok(())
}

fn print_error(e: &CalcError) {
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}
