use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use settlement_core::{RateTable, RateTableError, TaxBracket};
use thiserror::Error;

/// Errors that can occur when loading a bracket schedule.
#[derive(Debug, Error)]
pub enum BracketLoadError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("bracket file has no rows")]
    Empty,

    #[error("invalid bracket schedule: {0}")]
    InvalidSchedule(#[from] RateTableError),
}

impl From<csv::Error> for BracketLoadError {
    fn from(err: csv::Error) -> Self {
        BracketLoadError::CsvParse(err.to_string())
    }
}

/// A single record from the tax brackets CSV file.
///
/// - `min_income`: exclusive lower bound of the tax base
/// - `max_income`: inclusive upper bound (empty for the top bracket)
/// - `rate`: marginal rate as a decimal (e.g., 0.15 for 15%)
/// - `progressive_deduction`: amount subtracted from `base * rate`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
    pub progressive_deduction: Decimal,
}

impl From<BracketRecord> for TaxBracket {
    fn from(record: BracketRecord) -> Self {
        TaxBracket {
            min_income: record.min_income,
            max_income: record.max_income,
            tax_rate: record.rate,
            progressive_deduction: record.progressive_deduction,
        }
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for progressive bracket schedules kept in CSV files.
pub struct BracketLoader;

impl BracketLoader {
    /// Parse bracket records from a CSV reader, in file order.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, BracketLoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        if records.is_empty() {
            return Err(BracketLoadError::Empty);
        }
        Ok(records)
    }

    /// Replace the brackets of `rates` with `records` and re-validate the
    /// table. `rates` is left untouched on error.
    pub fn apply(
        rates: &mut RateTable,
        records: Vec<BracketRecord>,
    ) -> Result<usize, BracketLoadError> {
        let brackets: Vec<TaxBracket> = records.into_iter().map(TaxBracket::from).collect();
        let count = brackets.len();

        let candidate = RateTable {
            brackets,
            ..rates.clone()
        };
        candidate.validate()?;

        *rates = candidate;
        tracing::info!(count, "Replaced tax brackets");
        Ok(count)
    }
}
