//! Batch evaluation with per-row error isolation.
//!
//! Each row is evaluated independently. A row that fails (at parse time or
//! in the calculator) is kept in the report as a classified error and has
//! no effect on its siblings.

mod parallel;
mod provider;

pub use parallel::BatchConfig;
pub use provider::AssumptionsProvider;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::calculator::calculate;
use crate::error::{ApodError, ApodResult};
use crate::types::{Assumptions, InvestmentMetrics, PropertyRecord, ResultRow};

use parallel::maybe_parallel_map;

/// One row handed to the batch by a row source.
///
/// `record` is an error when the source could not build a record
/// (unparseable price, for example); the address is kept for reporting.
#[derive(Debug, Clone)]
pub struct SourceRow {
    /// Address cell, possibly empty.
    pub address: String,
    /// Parsed record or the reason parsing failed.
    pub record: ApodResult<PropertyRecord>,
}

impl SourceRow {
    /// Creates a row from a parse result.
    pub fn new(address: impl Into<String>, record: ApodResult<PropertyRecord>) -> Self {
        Self {
            address: address.into(),
            record,
        }
    }
}

impl From<PropertyRecord> for SourceRow {
    fn from(record: PropertyRecord) -> Self {
        Self {
            address: record.address.clone(),
            record: Ok(record),
        }
    }
}

/// A successfully evaluated row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluatedRow {
    /// The input record.
    pub record: PropertyRecord,
    /// Assumptions the provider chose for this row.
    pub assumptions: Assumptions,
    /// Unrounded metrics.
    pub metrics: InvestmentMetrics,
    /// Rounded presentation row.
    pub row: ResultRow,
}

/// Result of evaluating one row.
#[derive(Debug, Clone)]
pub struct RowOutcome {
    /// Zero-based position in the input.
    pub row_index: usize,
    /// Address as given by the source.
    pub address: String,
    /// Evaluated row or the row-scoped error.
    pub outcome: ApodResult<EvaluatedRow>,
}

impl RowOutcome {
    /// Returns true if the row evaluated successfully.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Returns the error, if the row failed.
    #[must_use]
    pub fn error(&self) -> Option<&ApodError> {
        self.outcome.as_ref().err()
    }
}

/// Ordered collection of row outcomes from one evaluation pass.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    rows: Vec<RowOutcome>,
}

/// Totals over the successful rows of a batch.
///
/// Amounts are unrounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioSummary {
    /// Rows that evaluated successfully.
    pub properties: usize,
    /// Rows that failed.
    pub failed: usize,
    /// Sum of list prices, `None` on overflow.
    pub total_price: Option<Decimal>,
    /// Sum of annual NOI, `None` on overflow.
    pub total_noi: Option<Decimal>,
    /// Sum of annual cash flow, `None` on overflow.
    pub total_cash_flow: Option<Decimal>,
    /// Unweighted mean cap rate, percent.
    pub average_cap_rate_pct: Option<Decimal>,
    /// Total NOI over total price, percent.
    pub portfolio_cap_rate_pct: Option<Decimal>,
}

impl BatchReport {
    /// Wraps a list of outcomes.
    #[must_use]
    pub fn new(rows: Vec<RowOutcome>) -> Self {
        Self { rows }
    }

    /// All outcomes in input order.
    #[must_use]
    pub fn rows(&self) -> &[RowOutcome] {
        &self.rows
    }

    /// Number of rows in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the batch had no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Successful rows in input order.
    pub fn successes(&self) -> impl Iterator<Item = &EvaluatedRow> {
        self.rows.iter().filter_map(|r| r.outcome.as_ref().ok())
    }

    /// Failed rows in input order.
    pub fn failures(&self) -> impl Iterator<Item = &RowOutcome> {
        self.rows.iter().filter(|r| r.outcome.is_err())
    }

    /// Rounded result rows of the successful evaluations.
    #[must_use]
    pub fn result_rows(&self) -> Vec<ResultRow> {
        self.successes().map(|e| e.row.clone()).collect()
    }

    /// Number of successful rows.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.successes().count()
    }

    /// Number of failed rows.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// Portfolio totals over the successful rows.
    ///
    /// A total that leaves the decimal range is `None`, as is every figure
    /// derived from it.
    #[must_use]
    pub fn summary(&self) -> PortfolioSummary {
        let properties = self.success_count();
        let total_price = checked_sum(self.successes().map(|e| e.record.list_price));
        let total_noi = checked_sum(self.successes().map(|e| e.metrics.noi));
        let total_cash_flow = checked_sum(self.successes().map(|e| e.metrics.cash_flow));

        let average_cap_rate_pct = checked_sum(self.successes().map(|e| e.metrics.cap_rate_pct))
            .filter(|_| properties > 0)
            .and_then(|sum| sum.checked_div(Decimal::from(properties)));
        let portfolio_cap_rate_pct = match (total_noi, total_price) {
            (Some(noi), Some(price)) if price > Decimal::ZERO => noi
                .checked_div(price)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED)),
            _ => None,
        };

        if properties > 0 && (total_price.is_none() || total_noi.is_none()) {
            log::warn!("portfolio totals overflowed over {} properties", properties);
        }

        PortfolioSummary {
            properties,
            failed: self.len() - properties,
            total_price,
            total_noi,
            total_cash_flow,
            average_cap_rate_pct,
            portfolio_cap_rate_pct,
        }
    }
}

/// Evaluates one row with the given assumptions.
///
/// # Errors
///
/// Returns the row-scoped error from the source or the calculator.
pub fn evaluate_row(record: &PropertyRecord, assumptions: Assumptions) -> ApodResult<EvaluatedRow> {
    if record.address.trim().is_empty() {
        return Err(ApodError::InvalidAddress);
    }
    let metrics = calculate(record, &assumptions)?;
    let row = ResultRow::new(record, &assumptions, &metrics);
    Ok(EvaluatedRow {
        record: record.clone(),
        assumptions,
        metrics,
        row,
    })
}

/// Evaluates every row of a batch.
///
/// Never fails as a whole: each row carries its own outcome, and the
/// report preserves input order.
///
/// # Example
///
/// ```rust
/// use apod_core::batch::{evaluate_batch, BatchConfig, SourceRow};
/// use apod_core::types::{Assumptions, PropertyRecord};
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
///
/// let rows: Vec<SourceRow> = vec![
///     PropertyRecord::new("1 A St", dec!(250000)).into(),
///     PropertyRecord::new("2 B St", Decimal::ZERO).into(),
/// ];
/// let report = evaluate_batch(&rows, &Assumptions::default(), &BatchConfig::default());
/// assert_eq!(report.success_count(), 1);
/// assert_eq!(report.failure_count(), 1);
/// ```
pub fn evaluate_batch<P>(rows: &[SourceRow], provider: &P, config: &BatchConfig) -> BatchReport
where
    P: AssumptionsProvider + Sync + ?Sized,
{
    let outcomes = maybe_parallel_map(rows, config, |row_index, source| {
        let outcome = match &source.record {
            Ok(record) => evaluate_row(record, provider.assumptions_for(row_index, record)),
            Err(err) => Err(err.clone()),
        };
        if let Err(ref err) = outcome {
            log::debug!("row {} ({}) failed: {}", row_index + 1, source.address, err);
        }
        RowOutcome {
            row_index,
            address: source.address.clone(),
            outcome,
        }
    });

    let report = BatchReport::new(outcomes);
    log::info!(
        "evaluated {} rows: {} ok, {} failed",
        report.len(),
        report.success_count(),
        report.failure_count()
    );
    report
}

fn checked_sum(values: impl Iterator<Item = Decimal>) -> Option<Decimal> {
    values.fold(Some(Decimal::ZERO), |total, v| total?.checked_add(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rows() -> Vec<SourceRow> {
        vec![
            PropertyRecord::new("1 A St", dec!(300000))
                .with_property_tax(dec!(3600))
                .into(),
            SourceRow::new("2 B St", Err(ApodError::invalid_list_price("TBD"))),
            PropertyRecord::new("3 C St", dec!(450000)).into(),
        ]
    }

    #[test]
    fn test_upstream_parse_errors_are_carried() {
        let report = evaluate_batch(&rows(), &Assumptions::default(), &BatchConfig::sequential());
        assert_eq!(report.len(), 3);
        assert_eq!(report.success_count(), 2);

        let failed: Vec<_> = report.failures().collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].row_index, 1);
        assert_eq!(failed[0].address, "2 B St");
        assert_eq!(
            failed[0].error(),
            Some(&ApodError::invalid_list_price("TBD"))
        );
    }

    #[test]
    fn test_empty_address_is_invalid() {
        let rows: Vec<SourceRow> = vec![PropertyRecord::new("  ", dec!(100000)).into()];
        let report = evaluate_batch(&rows, &Assumptions::default(), &BatchConfig::sequential());
        assert_eq!(report.rows()[0].error(), Some(&ApodError::InvalidAddress));
    }

    #[test]
    fn test_summary_totals() {
        let report = evaluate_batch(&rows(), &Assumptions::default(), &BatchConfig::sequential());
        let summary = report.summary();
        assert_eq!(summary.properties, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total_price, Some(dec!(750000)));

        let noi_sum: Decimal = report.successes().map(|e| e.metrics.noi).sum();
        assert_eq!(summary.total_noi, Some(noi_sum));
        assert!(summary.average_cap_rate_pct.is_some());
        assert_eq!(
            summary.portfolio_cap_rate_pct,
            Some(noi_sum / dec!(750000) * dec!(100))
        );
    }

    #[test]
    fn test_empty_batch_summary() {
        let report = evaluate_batch(&[], &Assumptions::default(), &BatchConfig::default());
        assert!(report.is_empty());
        let summary = report.summary();
        assert_eq!(summary.properties, 0);
        assert_eq!(summary.total_price, Some(Decimal::ZERO));
        assert_eq!(summary.average_cap_rate_pct, None);
        assert_eq!(summary.portfolio_cap_rate_pct, None);
    }

    #[test]
    fn test_summary_total_overflow_is_none() {
        let huge = Decimal::MAX / dec!(2);
        let rows: Vec<SourceRow> = vec![
            PropertyRecord::new("1 A St", huge).into(),
            PropertyRecord::new("2 B St", huge).into(),
            PropertyRecord::new("3 C St", huge).into(),
        ];
        let assumptions = Assumptions::default().with_down_payment_pct(Decimal::ONE);
        let report = evaluate_batch(&rows, &assumptions, &BatchConfig::sequential());
        assert_eq!(report.success_count(), 3);

        let summary = report.summary();
        assert_eq!(summary.properties, 3);
        assert_eq!(summary.total_price, None);
        assert_eq!(summary.portfolio_cap_rate_pct, None);
        assert!(summary.average_cap_rate_pct.is_some());
    }
}
