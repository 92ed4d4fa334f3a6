//! Assumptions command implementation.
//!
//! Shows the defaults every row starts from after the config file and
//! flags are applied, plus any scoped overrides.

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use apod_config::{AssumptionOverride, AssumptionSet, OverrideScope};
use apod_core::types::Assumptions;

use crate::cli::OutputFormat;
use crate::commands::AssumptionArgs;
use crate::output::{print_header, print_json, print_success, print_table, KeyValue};

/// Arguments for the assumptions command.
#[derive(Args, Debug)]
pub struct AssumptionsArgs {
    #[command(flatten)]
    pub assumptions: AssumptionArgs,

    /// Print the effective set as a TOML config file
    #[arg(long)]
    pub toml: bool,
}

/// One override, flattened for display.
#[derive(Debug, Clone, Tabled)]
struct OverrideLine {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Scope")]
    scope: String,
    #[tabled(rename = "Changes")]
    changes: String,
    #[tabled(rename = "Reason")]
    reason: String,
}

#[derive(Debug, Serialize)]
struct AssumptionsOutput<'a> {
    valid: bool,
    defaults: &'a Assumptions,
    overrides: &'a [AssumptionOverride],
}

/// Executes the assumptions command.
pub fn execute(args: AssumptionsArgs, format: OutputFormat) -> Result<()> {
    let set = args.assumptions.load()?;

    if args.toml {
        print!("{}", set.to_toml_string()?);
        return Ok(());
    }

    match format {
        OutputFormat::Json | OutputFormat::Csv | OutputFormat::Minimal => {
            print_json(&AssumptionsOutput {
                valid: true,
                defaults: &set.defaults,
                overrides: &set.overrides,
            })?;
        }
        OutputFormat::Table => {
            print_header("Default Assumptions");
            print_table(&default_lines(&set.defaults))?;

            if !set.overrides.is_empty() {
                print_header("Overrides");
                print_table(&override_lines(&set))?;
            }

            print_success("Assumptions are valid");
        }
    }

    Ok(())
}

fn default_lines(a: &Assumptions) -> Vec<KeyValue> {
    vec![
        KeyValue::new("Monthly rent per unit", format!("${}", a.monthly_rent_per_unit)),
        KeyValue::new("Units", a.units.to_string()),
        KeyValue::new("Vacancy rate", as_percent(a.vacancy_rate)),
        KeyValue::new("Insurance (of price)", as_percent(a.insurance_rate)),
        KeyValue::new(
            "Maintenance per unit (monthly)",
            format!("${}", a.maintenance_per_unit_monthly),
        ),
        KeyValue::new("Property management", as_percent(a.property_management_rate)),
        KeyValue::new("Down payment", as_percent(a.down_payment_pct)),
        KeyValue::new("Interest rate", as_percent(a.interest_rate_annual)),
        KeyValue::new("Loan term", format!("{} years", a.loan_term_years)),
    ]
}

fn override_lines(set: &AssumptionSet) -> Vec<OverrideLine> {
    set.overrides
        .iter()
        .enumerate()
        .map(|(i, o)| OverrideLine {
            index: i + 1,
            scope: match o.scope() {
                Some(OverrideScope::Global) => "all rows".to_string(),
                Some(OverrideScope::Row(row)) => format!("row {}", row + 1),
                Some(OverrideScope::Address(address)) => address,
                None => "invalid".to_string(),
            },
            changes: serde_json::to_string(&o.assumptions).unwrap_or_default(),
            reason: o.reason.clone().unwrap_or_default(),
        })
        .collect()
}

fn as_percent(fraction: Decimal) -> String {
    format!("{}%", (fraction * Decimal::ONE_HUNDRED).normalize())
}
