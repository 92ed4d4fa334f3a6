//! # APOD Core
//!
//! Property model and investment metrics for rental real-estate listings.
//!
//! This crate provides the pieces every APOD front end composes:
//!
//! - **Types**: `PropertyRecord`, `Assumptions`, `InvestmentMetrics`, `ResultRow`
//! - **Calculator**: NOI, cap rate, cash flow, and cash-on-cash return
//! - **Batch**: Row-isolated evaluation of a whole listing export
//! - **Format**: Currency and percentage display helpers
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: The calculator has no hidden state; identical inputs
//!   give identical outputs
//! - **Explicit assumptions**: Every rate and fee is passed in, never read
//!   from globals
//! - **Row isolation**: One bad row never stops a batch
//!
//! ## Example
//!
//! ```rust
//! use apod_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let record = PropertyRecord::new("123 Main St", dec!(300000))
//!     .with_property_tax(dec!(3600));
//! let metrics = calculate(&record, &Assumptions::default()).unwrap();
//! assert_eq!(format_percent(metrics.cap_rate_pct), "6.69%");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod batch;
pub mod calculator;
pub mod error;
pub mod format;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::batch::{
        evaluate_batch, AssumptionsProvider, BatchConfig, BatchReport, EvaluatedRow,
        PortfolioSummary, RowOutcome, SourceRow,
    };
    pub use crate::calculator::{calculate, calculate_breakdown, monthly_payment};
    pub use crate::error::{ApodError, ApodResult, ErrorKind};
    pub use crate::format::{format_currency, format_percent};
    pub use crate::types::{
        parse_amount, Assumptions, InvestmentMetrics, MetricsBreakdown, PropertyRecord, ResultRow,
    };
}

// Re-export commonly used types at crate root
pub use error::{ApodError, ApodResult, ErrorKind};
pub use types::{Assumptions, InvestmentMetrics, PropertyRecord, ResultRow};
