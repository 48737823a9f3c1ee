use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a won amount.
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseAmountError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Trims whitespace, comma thousands separators and a trailing `won` or `원`.
fn normalize_amount_input(s: &str) -> String {
    let trimmed = s.trim();
    let trimmed = trimmed
        .strip_suffix("won")
        .or_else(|| trimmed.strip_suffix('원'))
        .unwrap_or(trimmed);
    trimmed.trim().replace(',', "")
}

/// Parses a won amount such as `"50,000,000"`.
///
/// Empty or whitespace-only input is treated as 0.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid amount: {}", e);
        ParseAmountError {
            input: s.to_string(),
            source: e,
        }
    })
}
