//! Amount parsing and rounding helpers.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Cell values spreadsheet exports use for "no value".
const MISSING_MARKERS: [&str; 5] = ["nan", "null", "none", "n/a", "-"];

/// Parses a numeric spreadsheet cell into a decimal amount.
///
/// Accepts plain numbers, scientific notation, and currency-formatted cells
/// such as `"$1,250,000"` or `" 3600.50 "`. Returns `None` for empty cells,
/// common missing-value markers, and anything else that is not a number.
///
/// # Example
///
/// ```rust
/// use apod_core::types::parse_amount;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(parse_amount("$300,000"), Some(dec!(300000)));
/// assert_eq!(parse_amount("3600.5"), Some(dec!(3600.5)));
/// assert_eq!(parse_amount("NaN"), None);
/// assert_eq!(parse_amount(""), None);
/// ```
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty()
        || MISSING_MARKERS
            .iter()
            .any(|marker| trimmed.eq_ignore_ascii_case(marker))
    {
        return None;
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '_' | ' '))
        .collect();

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}

/// Rounds an amount to 2 decimal places, midpoints away from zero.
///
/// Used only when a result leaves the calculator; intermediate values
/// keep full precision.
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_amount("300000"), Some(dec!(300000)));
        assert_eq!(parse_amount("  42.75 "), Some(dec!(42.75)));
        assert_eq!(parse_amount("-12"), Some(dec!(-12)));
    }

    #[test]
    fn test_parse_currency_formatted() {
        assert_eq!(parse_amount("$1,250,000"), Some(dec!(1250000)));
        assert_eq!(parse_amount("$ 3,600.00"), Some(dec!(3600.00)));
    }

    #[test]
    fn test_parse_scientific() {
        assert_eq!(parse_amount("3e5"), Some(dec!(300000)));
    }

    #[test]
    fn test_parse_missing() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("   "), None);
        assert_eq!(parse_amount("NaN"), None);
        assert_eq!(parse_amount("null"), None);
        assert_eq!(parse_amount("N/A"), None);
        assert_eq!(parse_amount("call agent"), None);
    }

    #[test]
    fn test_round_money() {
        assert_eq!(round_money(dec!(6.6896)), dec!(6.69));
        assert_eq!(round_money(dec!(2.345)), dec!(2.35));
        assert_eq!(round_money(dec!(-2.345)), dec!(-2.35));
        assert_eq!(round_money(dec!(100)), dec!(100));
    }
}
