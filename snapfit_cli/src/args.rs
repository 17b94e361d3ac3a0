//! CLI argument definitions using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use snapfit_core::SnapShape;

#[derive(Parser)]
#[command(name = "snapfit")]
#[command(version, about = "Snap-fit joint design calculator")]
#[command(long_about = "Computes strain, deflection force and push-on/pull-off forces for plastic snap-fit hooks, and checks the strain against the material's permissible strain.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// JSON settings file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory of reference sheet CSV exports (default: bundled sheets)
    #[arg(long, global = true)]
    pub reference_dir: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Calculate a snap-fit and print the results
    Calc(CalcArgs),

    /// Show the reference defaults for a shape
    Defaults(ShapeArgs),

    /// Print the material reference table
    Materials,

    /// List the available snap-fit shapes
    Shapes,
}

#[derive(Args)]
pub struct ShapeArgs {
    /// Snap-fit shape: cantilever, l-shaped or u-shaped
    #[arg(long, short = 's')]
    pub shape: Option<SnapShape>,
}

#[derive(Args)]
pub struct CalcArgs {
    #[command(flatten)]
    pub shape: ShapeArgs,

    /// Override an input, e.g. `--set length=25` (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,

    /// Take modulus, permissible strain and friction from the material table
    #[arg(long, short = 'm')]
    pub material: Option<String>,

    /// Prompt for every input, showing the current value as default
    #[arg(long, short = 'i')]
    pub interactive: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Show forces in pounds-force
    #[arg(long)]
    pub lbf: bool,

    /// Decimal places in the output table
    #[arg(long)]
    pub precision: Option<usize>,
}
