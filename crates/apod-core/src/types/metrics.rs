//! Calculator outputs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Headline investment metrics for one property.
///
/// Values are unrounded; see [`crate::types::ResultRow`] for the
/// presentation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentMetrics {
    /// Annual net operating income.
    pub noi: Decimal,
    /// NOI over list price, as a percentage.
    pub cap_rate_pct: Decimal,
    /// Annual cash flow after debt service.
    pub cash_flow: Decimal,
    /// Cash flow over equity invested, as a percentage.
    pub cash_on_cash_pct: Decimal,
}

/// Every intermediate value of the metrics calculation, in evaluation order.
///
/// Annual unless the field name says otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsBreakdown {
    /// Insurance premium.
    pub insurance: Decimal,
    /// Maintenance reserve.
    pub maintenance_annual: Decimal,
    /// Rent at full occupancy.
    pub gross_annual_income: Decimal,
    /// Rent after vacancy loss.
    pub effective_annual_income: Decimal,
    /// Property management fee.
    pub property_management_cost: Decimal,
    /// Tax + insurance + maintenance + management.
    pub operating_expenses: Decimal,
    /// Net operating income.
    pub noi: Decimal,
    /// Capitalization rate, percent.
    pub cap_rate_pct: Decimal,
    /// Financed principal.
    pub loan_amount: Decimal,
    /// Monthly interest rate.
    pub monthly_rate: Decimal,
    /// Number of monthly payments.
    pub payment_count: u32,
    /// Level monthly mortgage payment.
    pub monthly_payment: Decimal,
    /// Twelve monthly payments.
    pub annual_debt_service: Decimal,
    /// NOI less debt service.
    pub cash_flow: Decimal,
    /// Down payment.
    pub equity_invested: Decimal,
    /// Cash-on-cash return, percent.
    pub cash_on_cash_pct: Decimal,
}

impl MetricsBreakdown {
    /// Projects the headline metrics.
    #[must_use]
    pub fn metrics(&self) -> InvestmentMetrics {
        InvestmentMetrics {
            noi: self.noi,
            cap_rate_pct: self.cap_rate_pct,
            cash_flow: self.cash_flow,
            cash_on_cash_pct: self.cash_on_cash_pct,
        }
    }
}

impl From<MetricsBreakdown> for InvestmentMetrics {
    fn from(breakdown: MetricsBreakdown) -> Self {
        breakdown.metrics()
    }
}
