use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use topasgen::config::{EXPERIMENT_GEOMETRY_PATH, EXPERIMENT_PARAMETERS_PATH, EXPERIMENTS_ROOT};

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "TOPAS wrapper CLI - Expands a declarative experiment configuration into parameterized TOPAS simulation scripts.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate one TOPAS script per (beam energy, history count) combination.
    Generate(GenerateArgs),
}

/// Arguments for the `generate` subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to the experiment parameters file in TOML format.
    #[arg(short, long, value_name = "PATH", default_value = EXPERIMENT_PARAMETERS_PATH)]
    pub parameters: PathBuf,

    /// Path to the experiment geometry file included verbatim in every script.
    #[arg(short, long, value_name = "PATH", default_value = EXPERIMENT_GEOMETRY_PATH)]
    pub geometry: PathBuf,

    /// Root directory under which the experiment workspace is created.
    #[arg(short, long, value_name = "PATH", default_value = EXPERIMENTS_ROOT)]
    pub experiments_root: PathBuf,
}
