//! Error types for APOD.
//!
//! Every failure of the calculator is row-scoped: a row either produces
//! metrics or one of the errors below, and never aborts its siblings.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// A specialized Result type for APOD operations.
pub type ApodResult<T> = Result<T, ApodError>;

/// Broad classification of an [`ApodError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// Bad or out-of-range price, tax, unit, or address values.
    InvalidInput,
    /// Degenerate equity or amortization inputs.
    DivisionByZero,
    /// An optional enrichment collaborator (geocoding, photos) failed.
    UpstreamFailure,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::InvalidInput => "invalid input",
            Self::DivisionByZero => "division by zero",
            Self::UpstreamFailure => "upstream failure",
        };
        f.write_str(name)
    }
}

/// The main error type for APOD operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApodError {
    /// List price is zero, negative, or not a number.
    #[error("Invalid list price: {value}")]
    InvalidListPrice {
        /// The raw value as it appeared in the input.
        value: String,
    },

    /// Property tax is negative.
    #[error("Invalid property tax: {value}")]
    InvalidPropertyTax {
        /// The offending amount.
        value: Decimal,
    },

    /// Unit count is not a positive integer.
    #[error("Invalid unit count: {units}")]
    InvalidUnits {
        /// The offending unit count.
        units: u32,
    },

    /// Address cell is empty.
    #[error("Missing address")]
    InvalidAddress,

    /// Interest rate compounds past the representable range.
    #[error("Invalid interest rate: {rate}")]
    InvalidInterestRate {
        /// The annual rate that was supplied.
        rate: Decimal,
    },

    /// An intermediate value left the representable decimal range.
    #[error("Arithmetic overflow in {operation}")]
    Overflow {
        /// The step that overflowed.
        operation: String,
    },

    /// A denominator in the calculation was zero.
    #[error("Division by zero in {operation}")]
    DivisionByZero {
        /// The step that would have divided by zero.
        operation: String,
    },

    /// An enrichment service failed.
    #[error("{service} failed: {reason}")]
    UpstreamFailure {
        /// Name of the failing service.
        service: String,
        /// Description of the failure.
        reason: String,
    },
}

impl ApodError {
    /// Creates an invalid list price error from any displayable value.
    #[must_use]
    pub fn invalid_list_price(value: impl std::fmt::Display) -> Self {
        Self::InvalidListPrice {
            value: value.to_string(),
        }
    }

    /// Creates a division by zero error.
    #[must_use]
    pub fn division_by_zero(operation: impl Into<String>) -> Self {
        Self::DivisionByZero {
            operation: operation.into(),
        }
    }

    /// Creates an overflow error.
    #[must_use]
    pub fn overflow(operation: impl Into<String>) -> Self {
        Self::Overflow {
            operation: operation.into(),
        }
    }

    /// Creates an upstream failure error.
    #[must_use]
    pub fn upstream(service: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UpstreamFailure {
            service: service.into(),
            reason: reason.into(),
        }
    }

    /// Returns the taxonomy bucket of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidListPrice { .. }
            | Self::InvalidPropertyTax { .. }
            | Self::InvalidUnits { .. }
            | Self::InvalidAddress
            | Self::InvalidInterestRate { .. }
            | Self::Overflow { .. } => ErrorKind::InvalidInput,
            Self::DivisionByZero { .. } => ErrorKind::DivisionByZero,
            Self::UpstreamFailure { .. } => ErrorKind::UpstreamFailure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_display() {
        let err = ApodError::invalid_list_price("abc");
        assert_eq!(err.to_string(), "Invalid list price: abc");

        let err = ApodError::division_by_zero("cash-on-cash return");
        assert!(err.to_string().contains("cash-on-cash"));
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(
            ApodError::invalid_list_price(0).kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            ApodError::InvalidPropertyTax { value: dec!(-1) }.kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            ApodError::division_by_zero("x").kind(),
            ErrorKind::DivisionByZero
        );
        assert_eq!(
            ApodError::overflow("cap rate").kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            ApodError::upstream("geocoder", "timeout").kind(),
            ErrorKind::UpstreamFailure
        );
    }
}
