//! Korean year-end income tax settlement engine.
//!
//! Given a wage earner's salary, dependents and deductible spending, the
//! engine computes the settlement ledger (deductions, tax base, tax, credits,
//! refund or balance due) and a prioritized list of ways to lower the final
//! tax. All rules and thresholds come from a [`RateTable`]; the computation
//! itself is pure and performs no I/O.

pub mod calculations;
pub mod models;
pub mod rates;
pub mod recommendations;
pub mod validation;

pub use calculations::{YearEndTaxCalculator, calculate_year_end_tax, estimate_tax};
pub use models::*;
pub use rates::{RateTable, RateTableError, TaxBracket};
pub use recommendations::generate_recommendations;
pub use validation::{
    FieldViolation, MAX_DEDUCTION_AMOUNT, MAX_TOTAL_SALARY, ValidationErrors, validate_form,
    validate_salary,
};
