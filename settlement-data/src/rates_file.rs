//! TOML rate table files.
//!
//! A rate file holds a complete [`RateTable`]. Amounts and rates may be
//! written as TOML numbers or as quoted decimals (`"0.035"`); quoted values
//! avoid any float rounding. The top bracket omits `max_income`.
//!
//! ```toml
//! standard_tax_credit = 130000
//!
//! [[brackets]]
//! min_income = 0
//! max_income = 14000000
//! tax_rate = "0.06"
//! progressive_deduction = 0
//! ```

use std::path::Path;

use settlement_core::{RateTable, RateTableError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RatesFileError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid rate file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("rate table failed validation: {0}")]
    Invalid(#[from] RateTableError),
}

/// Parses and validates a rate table from TOML text.
pub fn load_from_str(input: &str) -> Result<RateTable, RatesFileError> {
    let table: RateTable = toml::from_str(input)?;
    table.validate()?;
    Ok(table)
}

/// Reads a rate file from disk and delegates to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<RateTable, RatesFileError> {
    let contents = std::fs::read_to_string(path).map_err(|source| RatesFileError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let table = load_from_str(&contents)?;
    tracing::info!(
        path = %path.display(),
        brackets = table.brackets.len(),
        "Loaded rate table"
    );
    Ok(table)
}
