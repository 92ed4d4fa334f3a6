//! Errors for file-level data handling.
//!
//! These are whole-file failures (unreadable file, unknown column). Problems
//! inside a single row are reported as row-scoped [`apod_core::ApodError`]s.

use thiserror::Error;

/// Result type for data source and export operations.
pub type DataResult<T> = Result<T, DataError>;

/// Errors raised while reading listings or writing results.
#[derive(Debug, Error)]
pub enum DataError {
    /// File could not be opened, read, or written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV.
    #[error("CSV error: {0}")]
    Csv(String),

    /// The file has no header row.
    #[error("CSV has no header row")]
    MissingHeaders,

    /// A mapped column does not exist in the file.
    #[error("Unknown column '{column}' (available: {})", available.join(", "))]
    UnknownColumn {
        /// The requested column name.
        column: String,
        /// Columns present in the file.
        available: Vec<String>,
    },

    /// HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            match err.into_kind() {
                csv::ErrorKind::Io(io) => DataError::Io(io),
                other => DataError::Csv(format!("{other:?}")),
            }
        } else {
            DataError::Csv(err.to_string())
        }
    }
}
