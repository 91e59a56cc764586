//! # Wood Moisture CLI
//!
//! Command-line front end for `wood_core`: density and weight of a wood
//! element at a moisture content, and moisture × specific gravity sweeps
//! exported as JSON or CSV for an external plotting tool.
//!
//! Numeric options are read as text and converted by `wood_core`, so a value
//! like `--mc wet` is reported the same way the library reports any other
//! non-numeric input.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod commands;
mod error;

use error::CliError;

#[derive(Parser)]
#[command(name = "wood_cli")]
#[command(version, about = "Wood density and weight at moisture content")]
struct Cli {
    /// Settings file (TOML) with default model, ranges and resolution.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print results (and errors) as JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Density at a moisture content.
    Density {
        #[command(flatten)]
        material: MaterialArgs,

        #[command(flatten)]
        point: PointArgs,
    },

    /// Element weight at a moisture content.
    Weight {
        #[command(flatten)]
        material: MaterialArgs,

        #[command(flatten)]
        element: ElementArgs,

        #[command(flatten)]
        point: PointArgs,
    },

    /// Density or weight over a moisture content × specific gravity grid.
    Sweep {
        #[command(flatten)]
        material: MaterialArgs,

        #[command(flatten)]
        element: ElementArgs,

        #[command(flatten)]
        point: PointArgs,

        /// Quantity to evaluate at each grid point.
        #[arg(long, value_enum, default_value_t = MetricArg::Density)]
        metric: MetricArg,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = FormatArg::Json)]
        format: FormatArg,

        /// Points per axis (overrides the settings file).
        #[arg(long)]
        points: Option<usize>,

        /// Output file path (stdout if omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run a calculation described by a JSON document.
    Run {
        /// Path to a JSON document with a "type" of Density, Weight or Sweep.
        input: PathBuf,
    },

    /// List species presets.
    Species,

    /// Print the active settings as TOML.
    Settings,
}

/// Wood material options.
#[derive(Args, Debug, Clone, Default)]
pub struct MaterialArgs {
    /// Species preset code (DF-L, SP, HF, SPF, DF-S).
    #[arg(long)]
    pub species: Option<String>,

    /// Material name.
    #[arg(long)]
    pub name: Option<String>,

    /// Oven-dry specific gravity [default: 0.55, or the species value].
    #[arg(long)]
    pub sg: Option<String>,

    /// Fibre saturation point in percent [default: 30, or the species value].
    #[arg(long)]
    pub fsp: Option<String>,

    /// Density model: ratio_form or shrinkage_factor_form (overrides the settings file).
    #[arg(long)]
    pub model: Option<String>,
}

/// Element dimension options.
#[derive(Args, Debug, Clone)]
pub struct ElementArgs {
    /// Element name.
    #[arg(long, default_value = "Pieza 1")]
    pub element_name: String,

    /// Width in metres.
    #[arg(long, default_value = "0.05")]
    pub width: String,

    /// Depth in metres.
    #[arg(long, default_value = "0.15")]
    pub depth: String,

    /// Length in metres.
    #[arg(long, default_value = "2.5")]
    pub length: String,
}

/// Moisture content of the point of interest.
#[derive(Args, Debug, Clone)]
pub struct PointArgs {
    /// Moisture content in percent.
    #[arg(long, default_value = "18")]
    pub mc: String,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricArg {
    Density,
    Weight,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Json,
    Csv,
}

/// Default log level for a `-v` count.
fn log_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level(verbosity)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = commands::load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Density { material, point } => commands::density(&material, &point, &settings, cli.json),
        Commands::Weight { material, element, point } => {
            commands::weight(&material, &element, &point, &settings, cli.json)
        }
        Commands::Sweep {
            material,
            element,
            point,
            metric,
            format,
            points,
            output,
        } => commands::sweep(
            &commands::SweepRequest {
                material,
                element,
                point,
                metric,
                format,
                points,
            },
            &settings,
            output.as_deref(),
        ),
        Commands::Run { input } => commands::run_document(&input, cli.json),
        Commands::Species => commands::species(cli.json),
        Commands::Settings => commands::print_settings(&settings),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json = cli.json;

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        if json {
            if let CliError::Calc(calc) = &e {
                if let Ok(text) = serde_json::to_string_pretty(calc) {
                    eprintln!("{text}");
                }
            }
        }
        std::process::exit(1);
    }
}
