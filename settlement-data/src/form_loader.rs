//! CSV loader for taxpayer settlement records.
//!
//! ## CSV Format
//!
//! One taxpayer per row. Column order does **not** matter (headers are matched
//! by name). Header names are case-sensitive. Every column except
//! `total_salary` may be omitted or left empty; missing values take the
//! defaults shown.
//!
//! | Column | Required | Type | Default |
//! |------------------------------|----------|---------|---------|
//! | `total_salary` | yes | decimal | |
//! | `work_months` | no | integer | `12` |
//! | `credit_card` | no | decimal | `0` |
//! | `debit_card` | no | decimal | `0` |
//! | `traditional_market` | no | decimal | `0` |
//! | `public_transport` | no | decimal | `0` |
//! | `medical` | no | decimal | `0` |
//! | `education` | no | decimal | `0` |
//! | `donation` | no | decimal | `0` |
//! | `housing_fund` | no | decimal | `0` |
//! | `pension_savings` | no | decimal | `0` |
//! | `personal_pension` | no | decimal | `0` |
//! | `has_spouse` | no | boolean | `false` |
//! | `number_of_children` | no | integer | `0` |
//! | `number_of_other_dependents` | no | integer | `0` |
//!
//! Booleans accept `true`/`false`, `yes`/`no`, `y`/`n` and `1`/`0`
//! (case-insensitive).
//!
//! ### Example
//!
//! ```csv
//! total_salary,credit_card,debit_card,has_spouse,number_of_children
//! 50000000,,,,
//! 60000000,20000000,5000000,true,2
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use settlement_core::{DeductionItems, DependentInfo, IncomeInfo, TaxFormData};

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    total_salary: Decimal,
    work_months: Option<u8>,
    credit_card: Option<Decimal>,
    debit_card: Option<Decimal>,
    traditional_market: Option<Decimal>,
    public_transport: Option<Decimal>,
    medical: Option<Decimal>,
    education: Option<Decimal>,
    donation: Option<Decimal>,
    housing_fund: Option<Decimal>,
    pension_savings: Option<Decimal>,
    personal_pension: Option<Decimal>,
    has_spouse: Option<String>,
    number_of_children: Option<u32>,
    number_of_other_dependents: Option<u32>,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading taxpayer records.
#[derive(Debug, thiserror::Error)]
pub enum FormLoadError {
    /// The file could not be read.
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The underlying CSV deserialisation failed (bad structure, missing
    /// `total_salary` column, type mismatch, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A `has_spouse` cell held something other than a recognised boolean.
    /// `row` is the 1-based data row (header = row 0).
    #[error("unrecognised boolean '{value}' on row {row}")]
    InvalidBoolean { value: String, row: usize },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "" | "false" | "no" | "n" | "0" => Some(false),
        "true" | "yes" | "y" | "1" => Some(true),
        _ => None,
    }
}

/// Convert a single CSV row into a [`TaxFormData`].
///
/// `row_number` is 1-based (for error messages).
fn convert_row(row: CsvRow, row_number: usize) -> Result<TaxFormData, FormLoadError> {
    let has_spouse = match row.has_spouse {
        Some(value) => parse_bool(&value).ok_or(FormLoadError::InvalidBoolean {
            value,
            row: row_number,
        })?,
        None => false,
    };

    Ok(TaxFormData {
        income: IncomeInfo {
            total_salary: row.total_salary,
            work_months: row.work_months.unwrap_or(12),
        },
        deductions: DeductionItems {
            credit_card: row.credit_card.unwrap_or_default(),
            debit_card: row.debit_card.unwrap_or_default(),
            traditional_market: row.traditional_market.unwrap_or_default(),
            public_transport: row.public_transport.unwrap_or_default(),
            medical: row.medical.unwrap_or_default(),
            education: row.education.unwrap_or_default(),
            donation: row.donation.unwrap_or_default(),
            housing_fund: row.housing_fund.unwrap_or_default(),
            pension_savings: row.pension_savings.unwrap_or_default(),
            personal_pension: row.personal_pension.unwrap_or_default(),
        },
        dependents: DependentInfo {
            has_spouse,
            number_of_children: row.number_of_children.unwrap_or_default(),
            number_of_other_dependents: row.number_of_other_dependents.unwrap_or_default(),
        },
    })
}

/// Parse CSV text and return one [`TaxFormData`] per row, in file order.
///
/// Records are not range-checked; run
/// [`validate_form`](settlement_core::validate_form) on each before
/// calculating.
///
/// # Errors
///
/// * [`FormLoadError::Parse`] if the CSV is structurally invalid or a field
///   cannot be deserialised.
/// * [`FormLoadError::InvalidBoolean`] if a `has_spouse` cell is not a
///   recognised boolean.
pub fn load_from_str(input: &str) -> Result<Vec<TaxFormData>, FormLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

/// Read a file from disk and delegate to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<TaxFormData>, FormLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| FormLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let forms = load_from_str(&contents)?;
    tracing::info!(path = %path.display(), count = forms.len(), "Loaded taxpayer records");
    Ok(forms)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const MINIMAL_CSV: &str = "\
total_salary
50000000
";

    const FULL_CSV: &str = "\
total_salary,work_months,credit_card,debit_card,traditional_market,public_transport,medical,education,donation,housing_fund,pension_savings,personal_pension,has_spouse,number_of_children,number_of_other_dependents
60000000,10,20000000,5000000,1500000,600000,3000000,2000000,500000,3000000,4000000,1000000,true,2,1
";

    // -----------------------------------------------------------------------
    // 1. Minimal CSV: defaults fill every optional column
    // -----------------------------------------------------------------------
    #[test]
    fn test_minimal_csv_uses_defaults() {
        let forms = load_from_str(MINIMAL_CSV).expect("should parse minimal CSV");

        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0].income.total_salary, dec!(50000000));
        assert_eq!(forms[0].income.work_months, 12);
        assert_eq!(forms[0].deductions, DeductionItems::default());
        assert_eq!(forms[0].dependents, DependentInfo::default());
    }

    // -----------------------------------------------------------------------
    // 2. Full CSV: every column populated
    // -----------------------------------------------------------------------
    #[test]
    fn test_full_csv_all_fields_populated() {
        let forms = load_from_str(FULL_CSV).expect("should parse full CSV");
        let f = &forms[0];

        assert_eq!(f.income.work_months, 10);
        assert_eq!(f.deductions.credit_card, dec!(20000000));
        assert_eq!(f.deductions.debit_card, dec!(5000000));
        assert_eq!(f.deductions.traditional_market, dec!(1500000));
        assert_eq!(f.deductions.public_transport, dec!(600000));
        assert_eq!(f.deductions.medical, dec!(3000000));
        assert_eq!(f.deductions.education, dec!(2000000));
        assert_eq!(f.deductions.donation, dec!(500000));
        assert_eq!(f.deductions.housing_fund, dec!(3000000));
        assert_eq!(f.deductions.pension_savings, dec!(4000000));
        assert_eq!(f.deductions.personal_pension, dec!(1000000));
        assert_eq!(
            f.dependents,
            DependentInfo {
                has_spouse: true,
                number_of_children: 2,
                number_of_other_dependents: 1,
            }
        );
    }

    // -----------------------------------------------------------------------
    // 3. Column order and empty cells
    // -----------------------------------------------------------------------
    #[test]
    fn test_columns_in_any_order_with_empty_cells() {
        let csv = "\
medical, total_salary ,has_spouse
, 40000000 ,
2500000,30000000,no
";
        let forms = load_from_str(csv).expect("should parse");

        assert_eq!(forms.len(), 2);
        assert_eq!(forms[0].deductions.medical, Decimal::ZERO);
        assert!(!forms[0].dependents.has_spouse);
        assert_eq!(forms[1].income.total_salary, dec!(30000000));
        assert_eq!(forms[1].deductions.medical, dec!(2500000));
    }

    #[test]
    fn test_boolean_spellings() {
        let test_cases = [
            ("true", true),
            ("TRUE", true),
            ("yes", true),
            ("Y", true),
            ("1", true),
            ("false", false),
            ("No", false),
            ("0", false),
        ];

        for (value, expected) in test_cases {
            let csv = format!("total_salary,has_spouse\n1000000,{value}\n");
            let forms = load_from_str(&csv)
                .unwrap_or_else(|e| panic!("failed to parse has_spouse '{value}': {e}"));

            assert_eq!(
                forms[0].dependents.has_spouse, expected,
                "has_spouse '{value}' should be {expected}"
            );
        }
    }

    // -----------------------------------------------------------------------
    // 4. Errors
    // -----------------------------------------------------------------------
    #[test]
    fn test_invalid_boolean_reports_row() {
        let csv = "\
total_salary,has_spouse
1000000,true
2000000,maybe
";
        match load_from_str(csv).unwrap_err() {
            FormLoadError::InvalidBoolean { value, row } => {
                assert_eq!(value, "maybe");
                assert_eq!(row, 2);
            }
            other => panic!("expected InvalidBoolean, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_salary_column_returns_parse_error() {
        let csv = "credit_card\n1000000\n";

        match load_from_str(csv).unwrap_err() {
            FormLoadError::Parse(_) => {}
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_amount_returns_parse_error() {
        let csv = "total_salary,medical\n50000000,lots\n";

        assert!(matches!(load_from_str(csv), Err(FormLoadError::Parse(_))));
    }

    #[test]
    fn test_ragged_row_returns_parse_error() {
        let csv = "total_salary,medical\n50000000\n";

        assert!(matches!(load_from_str(csv), Err(FormLoadError::Parse(_))));
    }

    #[test]
    fn test_header_only_returns_empty_vec() {
        let forms = load_from_str("total_salary\n").expect("header-only CSV is valid");

        assert!(forms.is_empty());
    }

    #[test]
    fn test_missing_file_returns_io_error() {
        let result = load_from_file(Path::new("does/not/exist.csv"));

        assert!(matches!(result, Err(FormLoadError::Io { .. })));
    }
}
