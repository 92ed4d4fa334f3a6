//! CLI command implementations.

pub mod analyze;
pub mod assumptions;
pub mod columns;

// Re-export submodules for convenience
pub use analyze::AnalyzeArgs;
pub use assumptions::AssumptionsArgs;
pub use columns::ColumnsArgs;

use std::path::PathBuf;

use anyhow::Result;
use apod_config::{AssumptionPatch, AssumptionSet, Validate};
use clap::Args;
use rust_decimal::Decimal;

use crate::error::{CliError, CliResult};

/// Assumption flags shared by commands that evaluate listings.
///
/// Rates are entered as percentages (`--vacancy 5` means 5%). Flags patch
/// the defaults of the loaded set, so row and address overrides from the
/// config file still take precedence.
#[derive(Args, Debug, Default)]
pub struct AssumptionArgs {
    /// Assumptions file (TOML)
    #[arg(short, long, env = "APOD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Monthly rent per unit
    #[arg(long)]
    pub rent: Option<Decimal>,

    /// Number of rentable units
    #[arg(long)]
    pub units: Option<u32>,

    /// Vacancy rate (percent)
    #[arg(long)]
    pub vacancy: Option<Decimal>,

    /// Annual insurance (percent of list price)
    #[arg(long)]
    pub insurance: Option<Decimal>,

    /// Monthly maintenance per unit
    #[arg(long)]
    pub maintenance: Option<Decimal>,

    /// Property management fee (percent of effective rent)
    #[arg(long)]
    pub management: Option<Decimal>,

    /// Down payment (percent of list price)
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Annual mortgage interest rate (percent)
    #[arg(long)]
    pub interest_rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub term: Option<u32>,
}

impl AssumptionArgs {
    /// Converts the flags to a patch, turning percentages into fractions.
    pub fn to_patch(&self) -> CliResult<AssumptionPatch> {
        Ok(AssumptionPatch {
            monthly_rent_per_unit: self.rent,
            units: self.units,
            vacancy_rate: percent("vacancy", self.vacancy)?,
            insurance_rate: percent("insurance", self.insurance)?,
            maintenance_per_unit_monthly: self.maintenance,
            property_management_rate: percent("management", self.management)?,
            down_payment_pct: percent("down-payment", self.down_payment)?,
            interest_rate_annual: percent("interest-rate", self.interest_rate)?,
            loan_term_years: self.term,
        })
    }

    /// Loads the config file (if any), applies the flags, and validates.
    pub fn load(&self) -> Result<AssumptionSet> {
        let mut set = match &self.config {
            Some(path) => AssumptionSet::from_file(path)?,
            None => AssumptionSet::default(),
        };

        let patch = self.to_patch()?;
        if !patch.is_empty() {
            tracing::debug!(?patch, "applying assumption flags");
            set.patch_defaults(&patch);
        }

        set.validate_or_error()
            .map_err(|e| CliError::Assumptions(e.to_string()))?;
        Ok(set)
    }
}

/// Converts a percentage flag to a fraction.
pub fn percent(flag: &'static str, value: Option<Decimal>) -> CliResult<Option<Decimal>> {
    value
        .map(|v| {
            if v.is_sign_negative() || v > Decimal::ONE_HUNDRED {
                Err(CliError::InvalidPercent {
                    flag,
                    value: v.to_string(),
                })
            } else {
                Ok(v / Decimal::ONE_HUNDRED)
            }
        })
        .transpose()
}
