//! Shared arithmetic and formatting helpers for the settlement calculations.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a won amount to a whole won using half-up rounding.
///
/// Midpoints round away from zero, so `0.5` becomes `1` and `-0.5`
/// becomes `-1`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use settlement_core::calculations::common::round_won;
///
/// assert_eq!(round_won(dec!(1234.4)), dec!(1234));
/// assert_eq!(round_won(dec!(1234.5)), dec!(1235));
/// assert_eq!(round_won(dec!(-1234.5)), dec!(-1235));
/// ```
pub fn round_won(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps negative values to zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use settlement_core::calculations::common::non_negative;
///
/// assert_eq!(non_negative(dec!(-10)), dec!(0));
/// assert_eq!(non_negative(dec!(10)), dec!(10));
/// ```
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Formats an amount as whole won with comma thousands separators.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use settlement_core::calculations::common::format_won;
///
/// assert_eq!(format_won(dec!(12500000)), "12,500,000");
/// assert_eq!(format_won(dec!(-1847500.4)), "-1,847,500");
/// ```
pub fn format_won(amount: Decimal) -> String {
    let rounded = round_won(amount);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < Decimal::ZERO {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats a fractional rate as a percentage, e.g. `0.035` as `3.5%`.
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}
