//! Domain types for property investment analysis.
//!
//! - [`PropertyRecord`]: One listing row (address, price, tax, photo)
//! - [`Assumptions`]: Income, expense, and financing parameters
//! - [`InvestmentMetrics`]: NOI, cap rate, cash flow, cash-on-cash return
//! - [`MetricsBreakdown`]: Every intermediate value behind the metrics
//! - [`ResultRow`]: Rounded, export-ready summary row

mod amount;
mod assumptions;
mod metrics;
mod property;
mod result_row;

pub use amount::{parse_amount, round_money};
pub use assumptions::Assumptions;
pub use metrics::{InvestmentMetrics, MetricsBreakdown};
pub use property::PropertyRecord;
pub use result_row::ResultRow;
