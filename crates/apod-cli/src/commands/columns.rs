//! Columns command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use apod_io::ListingTable;

use crate::cli::OutputFormat;
use crate::output::{print_info, print_output};

/// Arguments for the columns command.
#[derive(Args, Debug)]
pub struct ColumnsArgs {
    /// Listing export (CSV with a header row)
    pub input: PathBuf,
}

/// One column of the export.
#[derive(Debug, Clone, Serialize, Tabled)]
struct ColumnLine {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Column")]
    name: String,
    #[tabled(rename = "Tax Candidate")]
    tax_candidate: bool,
}

/// Executes the columns command.
pub fn execute(args: ColumnsArgs, format: OutputFormat) -> Result<()> {
    let table = ListingTable::from_path(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;

    let suggested = table.suggest_tax_columns();
    let lines: Vec<ColumnLine> = table
        .headers()
        .iter()
        .enumerate()
        .map(|(i, name)| ColumnLine {
            index: i + 1,
            name: name.clone(),
            tax_candidate: suggested.contains(&name.as_str()),
        })
        .collect();

    print_output(&lines, format)?;

    if format == OutputFormat::Table {
        match suggested.first() {
            Some(col) => print_info(&format!(
                "{} rows; suggested tax column: {col}",
                table.len()
            )),
            None => print_info(&format!("{} rows; no tax column found", table.len())),
        }
    }

    Ok(())
}
