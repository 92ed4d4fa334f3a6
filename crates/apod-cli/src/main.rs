//! APOD CLI - Investment metrics for real-estate listing exports.
//!
//! # Usage
//!
//! ```bash
//! # Inspect an export's columns
//! apod columns listings.csv
//!
//! # Evaluate every listing with default assumptions
//! apod analyze listings.csv --address-col "Street Address" --price-col "List Price"
//!
//! # Adjust assumptions and write the CSV export plus an HTML report
//! apod analyze listings.csv --rent 1450 --vacancy 6 --down-payment 25 \
//!     --output results.csv --report report.html
//!
//! # Show the effective assumptions from a config file
//! apod assumptions --config apod.toml
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    let format = cli.format;
    let quiet = cli.quiet;

    match cli.command {
        Commands::Analyze(args) => commands::analyze::execute(args, format, quiet)?,
        Commands::Columns(args) => commands::columns::execute(args, format)?,
        Commands::Assumptions(args) => commands::assumptions::execute(args, format)?,
    }

    Ok(())
}

/// Logs go to stderr so stdout stays clean for piped output.
fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
