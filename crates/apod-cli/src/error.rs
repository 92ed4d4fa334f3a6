//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// No tax column was given and none could be suggested.
    #[error("No tax column found (columns: {0}). Pass --tax-col.")]
    NoTaxColumn(String),

    /// A percentage flag is outside 0..=100.
    #[error("Invalid percentage for --{flag}: {value}. Must be between 0 and 100.")]
    InvalidPercent {
        /// Flag name without dashes.
        flag: &'static str,
        /// The value given.
        value: String,
    },

    /// Assumptions failed validation after applying flags.
    #[error("Invalid assumptions: {0}")]
    Assumptions(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
