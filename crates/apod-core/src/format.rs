//! Display formatting for reports and tables.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::round_money;

/// Formats an amount as whole dollars with thousands separators.
///
/// ```rust
/// use apod_core::format::format_currency;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_currency(dec!(1234567.5)), "$1,234,568");
/// assert_eq!(format_currency(dec!(-908.09)), "-$908");
/// ```
#[must_use]
pub fn format_currency(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();
    let digits = digits.split('.').next().unwrap_or_default();

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${}", group_thousands(digits))
}

/// Formats a percentage value with 2 decimals.
///
/// ```rust
/// use apod_core::format::format_percent;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_percent(dec!(6.6896)), "6.69%");
/// assert_eq!(format_percent(dec!(5)), "5.00%");
/// ```
#[must_use]
pub fn format_percent(value: Decimal) -> String {
    let mut rounded = round_money(value);
    rounded.rescale(2);
    format!("{rounded}%")
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
