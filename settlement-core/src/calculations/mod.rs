//! Year-end settlement calculations.
//!
//! [`deductions`] holds the per-category formulas and [`calculator`] composes
//! them into the full settlement ledger.

pub mod calculator;
pub mod common;
pub mod deductions;

pub use calculator::{YearEndTaxCalculator, calculate_year_end_tax, estimate_tax};
pub use deductions::{CardDeductionOutcome, DeductionOutcome};
