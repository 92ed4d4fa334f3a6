//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{AnalyzeArgs, AssumptionsArgs, ColumnsArgs};

/// APOD - Cap rate, cash flow, and cash-on-cash return for listing exports
#[derive(Parser)]
#[command(name = "apod")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate every listing in a CSV export
    Analyze(AnalyzeArgs),

    /// List the columns of a CSV export and suggest a tax column
    Columns(ColumnsArgs),

    /// Show the effective assumptions and check them
    Assumptions(AssumptionsArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (one line per item)
    Minimal,
}
