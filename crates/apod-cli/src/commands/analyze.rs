//! Analyze command implementation.
//!
//! Loads a listing export, evaluates every row, and prints the summary
//! table. Rows that cannot be evaluated are reported and skipped.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use apod_core::batch::{evaluate_batch, BatchConfig, BatchReport, PortfolioSummary};
use apod_core::format::{format_currency, format_percent};
use apod_core::types::{PropertyRecord, ResultRow};
use apod_io::{
    enrich_all, render_html_report, write_results_csv, write_results_csv_file, ColumnMapping,
    Enrichment, ListingTable, NominatimGeocoder,
};

use crate::cli::OutputFormat;
use crate::commands::AssumptionArgs;
use crate::error::CliError;
use crate::output::{
    print_header, print_json, print_success, print_table, print_warning, KeyValue,
};

/// Arguments for the analyze command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Listing export (CSV with a header row)
    pub input: PathBuf,

    /// Column holding the street address
    #[arg(long, default_value = "Address")]
    pub address_col: String,

    /// Column holding the list price
    #[arg(long, default_value = "Price")]
    pub price_col: String,

    /// Column holding the annual property tax. Defaults to the first column
    /// whose name mentions tax.
    #[arg(long)]
    pub tax_col: Option<String>,

    /// Column holding a photo URL
    #[arg(long)]
    pub photo_col: Option<String>,

    #[command(flatten)]
    pub assumptions: AssumptionArgs,

    /// Write the results as CSV to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write an HTML report to this file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Report title
    #[arg(long, default_value = "Property Analysis Report")]
    pub title: String,

    /// Look up map locations for evaluated listings (OpenStreetMap Nominatim)
    #[arg(long)]
    pub geocode: bool,

    /// User agent sent to the geocoding service
    #[arg(long, env = "APOD_USER_AGENT", default_value = concat!("apod/", env!("CARGO_PKG_VERSION")))]
    pub user_agent: String,

    /// Evaluate rows on a single thread
    #[arg(long)]
    pub sequential: bool,
}

/// One row of the summary table.
#[derive(Debug, Clone, Tabled)]
struct ResultLine {
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Rent")]
    rent: String,
    #[tabled(rename = "NOI")]
    noi: String,
    #[tabled(rename = "Cap Rate")]
    cap_rate: String,
    #[tabled(rename = "Cash Flow")]
    cash_flow: String,
    #[tabled(rename = "CoC Return")]
    coc_return: String,
}

impl From<&ResultRow> for ResultLine {
    fn from(row: &ResultRow) -> Self {
        Self {
            address: row.address.clone(),
            price: format_currency(row.price),
            rent: format_currency(row.rent),
            noi: format_currency(row.noi),
            cap_rate: format_percent(row.cap_rate),
            cash_flow: format_currency(row.cash_flow),
            coc_return: format_percent(row.coc_return),
        }
    }
}

/// A row that could not be evaluated.
#[derive(Debug, Clone, Serialize)]
struct RowError {
    row: usize,
    address: String,
    kind: String,
    error: String,
}

/// Map and photo links for one listing.
#[derive(Debug, Clone, Tabled)]
struct MapLine {
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Map")]
    map: String,
    #[tabled(rename = "Photo")]
    photo: String,
}

/// Full result for JSON output.
#[derive(Debug, Serialize)]
struct AnalysisOutput<'a> {
    results: Vec<ResultRow>,
    errors: Vec<RowError>,
    summary: PortfolioSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    enrichment: Option<&'a [Enrichment]>,
}

/// Executes the analyze command.
pub fn execute(args: AnalyzeArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let table = ListingTable::from_path(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;

    let tax_col = match &args.tax_col {
        Some(col) => col.clone(),
        None => {
            let suggested = table
                .suggest_tax_columns()
                .first()
                .map(|c| c.to_string())
                .ok_or_else(|| CliError::NoTaxColumn(table.headers().join(", ")))?;
            tracing::info!(column = %suggested, "using suggested tax column");
            suggested
        }
    };

    let mut mapping = ColumnMapping::new(&args.address_col, &args.price_col, tax_col);
    if let Some(photo) = &args.photo_col {
        mapping = mapping.with_photo_url(photo);
    }

    let rows = table.records(&mapping)?;
    let set = args.assumptions.load()?;

    let config = if args.sequential {
        BatchConfig::sequential()
    } else {
        BatchConfig::default()
    };
    let report = evaluate_batch(&rows, &set, &config);

    if !quiet {
        for failure in report.failures() {
            if let Some(err) = failure.error() {
                print_warning(&format!(
                    "row {} ({}): {}",
                    failure.row_index + 1,
                    display_address(&failure.address),
                    err
                ));
            }
        }
    }

    let enrichment = if args.geocode {
        Some(geocode(&report, &args.user_agent)?)
    } else {
        None
    };

    print_results(&report, enrichment.as_deref(), format)?;

    // Status lines share stdout with the results, so only tables get them.
    let announce = !quiet && format == OutputFormat::Table;

    if let Some(path) = &args.output {
        write_results_csv_file(path, &report.result_rows())
            .with_context(|| format!("writing {}", path.display()))?;
        if announce {
            print_success(&format!("Results written to {}", path.display()));
        }
    }

    if let Some(path) = &args.report {
        std::fs::write(path, render_html_report(&args.title, &report))
            .with_context(|| format!("writing {}", path.display()))?;
        if announce {
            print_success(&format!("Report written to {}", path.display()));
        }
    }

    Ok(())
}

fn print_results(
    report: &BatchReport,
    enrichment: Option<&[Enrichment]>,
    format: OutputFormat,
) -> Result<()> {
    let rows = report.result_rows();

    match format {
        OutputFormat::Table => {
            print_header("Investment Metrics");
            let lines: Vec<ResultLine> = rows.iter().map(ResultLine::from).collect();
            print_table(&lines)?;

            print_header("Portfolio");
            print_table(&summary_lines(&report.summary()))?;

            if let Some(enriched) = enrichment {
                print_header("Maps");
                print_table(&map_lines(enriched))?;
            }
        }
        OutputFormat::Json => {
            let output = AnalysisOutput {
                results: rows,
                errors: row_errors(report),
                summary: report.summary(),
                enrichment,
            };
            print_json(&output)?;
        }
        OutputFormat::Csv => {
            write_results_csv(std::io::stdout().lock(), &rows)?;
        }
        OutputFormat::Minimal => {
            for row in &rows {
                println!(
                    "{}\t{:.2}\t{:.2}\t{:.2}",
                    row.address, row.cap_rate, row.cash_flow, row.coc_return
                );
            }
        }
    }

    Ok(())
}

fn summary_lines(summary: &PortfolioSummary) -> Vec<KeyValue> {
    let money = |value: Option<Decimal>| value.map_or_else(|| "n/a".to_string(), format_currency);
    let pct = |value: Option<Decimal>| value.map_or_else(|| "n/a".to_string(), format_percent);
    vec![
        KeyValue::new("Properties", summary.properties.to_string()),
        KeyValue::new("Failed rows", summary.failed.to_string()),
        KeyValue::new("Total price", money(summary.total_price)),
        KeyValue::new("Total NOI", money(summary.total_noi)),
        KeyValue::new("Total cash flow", money(summary.total_cash_flow)),
        KeyValue::new("Average cap rate", pct(summary.average_cap_rate_pct)),
        KeyValue::new("Portfolio cap rate", pct(summary.portfolio_cap_rate_pct)),
    ]
}

fn row_errors(report: &BatchReport) -> Vec<RowError> {
    report
        .failures()
        .filter_map(|failure| {
            failure.error().map(|err| RowError {
                row: failure.row_index + 1,
                address: failure.address.clone(),
                kind: err.kind().to_string(),
                error: err.to_string(),
            })
        })
        .collect()
}

fn map_lines(enriched: &[Enrichment]) -> Vec<MapLine> {
    enriched
        .iter()
        .map(|e| MapLine {
            address: e.address.clone(),
            map: e.map_url().unwrap_or_else(|| "-".to_string()),
            photo: e.photo_url.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}

fn geocode(report: &BatchReport, user_agent: &str) -> Result<Vec<Enrichment>> {
    let records: Vec<PropertyRecord> = report.successes().map(|e| e.record.clone()).collect();
    if records.is_empty() {
        return Ok(Vec::new());
    }

    tracing::info!(count = records.len(), "looking up addresses");
    let geocoder = NominatimGeocoder::new(user_agent)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let enriched = runtime.block_on(enrich_all(&geocoder, &records));

    let located = enriched.iter().filter(|e| e.show_map).count();
    tracing::info!(located, total = enriched.len(), "geocoding finished");
    Ok(enriched)
}

fn display_address(address: &str) -> &str {
    if address.is_empty() {
        "no address"
    } else {
        address
    }
}
