//! Export-ready summary row.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::amount::round_money;
use super::{Assumptions, InvestmentMetrics, PropertyRecord};

/// One line of the summary table and the CSV export.
///
/// Field names serialize as `Address, Price, Rent, NOI, CapRate, CashFlow,
/// CoCReturn`. Numeric fields are rounded to 2 decimal places when the row
/// is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    /// Street address.
    #[serde(rename = "Address")]
    pub address: String,
    /// List price.
    #[serde(rename = "Price")]
    pub price: Decimal,
    /// Monthly rent per unit used for the row.
    #[serde(rename = "Rent")]
    pub rent: Decimal,
    /// Annual net operating income.
    #[serde(rename = "NOI")]
    pub noi: Decimal,
    /// Cap rate, percent.
    #[serde(rename = "CapRate")]
    pub cap_rate: Decimal,
    /// Annual cash flow after debt service.
    #[serde(rename = "CashFlow")]
    pub cash_flow: Decimal,
    /// Cash-on-cash return, percent.
    #[serde(rename = "CoCReturn")]
    pub coc_return: Decimal,
}

impl ResultRow {
    /// Header names in column order.
    pub const HEADERS: [&'static str; 7] = [
        "Address", "Price", "Rent", "NOI", "CapRate", "CashFlow", "CoCReturn",
    ];

    /// Builds a rounded row from a record, its assumptions, and its metrics.
    #[must_use]
    pub fn new(
        record: &PropertyRecord,
        assumptions: &Assumptions,
        metrics: &InvestmentMetrics,
    ) -> Self {
        Self {
            address: record.address.clone(),
            price: round_money(record.list_price),
            rent: round_money(assumptions.monthly_rent_per_unit),
            noi: round_money(metrics.noi),
            cap_rate: round_money(metrics.cap_rate_pct),
            cash_flow: round_money(metrics.cash_flow),
            coc_return: round_money(metrics.cash_on_cash_pct),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_row_rounds_metrics() {
        let record = PropertyRecord::new("5 Oak Ave", dec!(300000));
        let metrics = InvestmentMetrics {
            noi: dec!(20068.8),
            cap_rate_pct: dec!(6.6896),
            cash_flow: dec!(908.088138),
            cash_on_cash_pct: dec!(1.51348),
        };

        let row = ResultRow::new(&record, &Assumptions::default(), &metrics);
        assert_eq!(row.address, "5 Oak Ave");
        assert_eq!(row.rent, dec!(1300));
        assert_eq!(row.noi, dec!(20068.80));
        assert_eq!(row.cap_rate, dec!(6.69));
        assert_eq!(row.cash_flow, dec!(908.09));
        assert_eq!(row.coc_return, dec!(1.51));
    }

    #[test]
    fn test_serialized_field_names() {
        let row = ResultRow {
            address: "A".into(),
            price: dec!(1),
            rent: dec!(2),
            noi: dec!(3),
            cap_rate: dec!(4),
            cash_flow: dec!(5),
            coc_return: dec!(6),
        };
        let json = serde_json::to_value(&row).unwrap();
        for header in ResultRow::HEADERS {
            assert!(json.get(header).is_some(), "missing {header}");
        }
    }
}
