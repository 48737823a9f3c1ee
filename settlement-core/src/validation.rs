//! Range checks for a [`TaxFormData`] record.
//!
//! The calculator trusts its input. Callers that accept records from users or
//! files run [`validate_form`] first; it reports every violation at once.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

use crate::models::TaxFormData;

pub const MAX_TOTAL_SALARY: Decimal = dec!(10000000000);
/// Ceiling for every amount in `deductions`. Keeps the calculator's sums and
/// products well inside `Decimal` range.
pub const MAX_DEDUCTION_AMOUNT: Decimal = MAX_TOTAL_SALARY;
pub const MIN_WORK_MONTHS: u8 = 1;
pub const MAX_WORK_MONTHS: u8 = 12;
pub const MAX_DEPENDENT_COUNT: u32 = 20;

/// A single field that failed validation. `field` is the camelCase path of
/// the field in the serialized record, e.g. `deductions.creditCard`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldViolation {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: Decimal,
        min: Decimal,
        max: Decimal,
    },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: Decimal },
}

impl FieldViolation {
    pub fn field(&self) -> &'static str {
        match self {
            Self::OutOfRange { field, .. } | Self::Negative { field, .. } => field,
        }
    }
}

/// Every violation found in one record, in field order.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{} invalid field(s): {}", .violations.len(), summarize(.violations))]
pub struct ValidationErrors {
    pub violations: Vec<FieldViolation>,
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Checks `salary` against `[0, MAX_TOTAL_SALARY]`.
///
/// # Errors
///
/// Returns [`FieldViolation::OutOfRange`] for `income.totalSalary`.
pub fn validate_salary(salary: Decimal) -> Result<(), FieldViolation> {
    let mut violations = Vec::with_capacity(1);
    check_range(
        &mut violations,
        "income.totalSalary",
        salary,
        Decimal::ZERO,
        MAX_TOTAL_SALARY,
    );
    match violations.pop() {
        Some(violation) => Err(violation),
        None => Ok(()),
    }
}

/// Checks salary, work months, amounts and dependent counts against their
/// allowed ranges.
///
/// # Errors
///
/// Returns [`ValidationErrors`] listing every field out of range.
pub fn validate_form(form: &TaxFormData) -> Result<(), ValidationErrors> {
    let mut violations = Vec::new();

    if let Err(violation) = validate_salary(form.income.total_salary) {
        violations.push(violation);
    }
    check_range(
        &mut violations,
        "income.workMonths",
        Decimal::from(form.income.work_months),
        Decimal::from(MIN_WORK_MONTHS),
        Decimal::from(MAX_WORK_MONTHS),
    );

    let d = &form.deductions;
    let amounts = [
        ("deductions.creditCard", d.credit_card),
        ("deductions.debitCard", d.debit_card),
        ("deductions.traditionalMarket", d.traditional_market),
        ("deductions.publicTransport", d.public_transport),
        ("deductions.medical", d.medical),
        ("deductions.education", d.education),
        ("deductions.donation", d.donation),
        ("deductions.housingFund", d.housing_fund),
        ("deductions.pensionSavings", d.pension_savings),
        ("deductions.personalPension", d.personal_pension),
    ];
    for (field, value) in amounts {
        if value < Decimal::ZERO {
            violations.push(FieldViolation::Negative { field, value });
        } else {
            check_range(
                &mut violations,
                field,
                value,
                Decimal::ZERO,
                MAX_DEDUCTION_AMOUNT,
            );
        }
    }

    for (field, count) in [
        (
            "dependents.numberOfChildren",
            form.dependents.number_of_children,
        ),
        (
            "dependents.numberOfOtherDependents",
            form.dependents.number_of_other_dependents,
        ),
    ] {
        check_range(
            &mut violations,
            field,
            Decimal::from(count),
            Decimal::ZERO,
            Decimal::from(MAX_DEPENDENT_COUNT),
        );
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors { violations })
    }
}

fn check_range(
    violations: &mut Vec<FieldViolation>,
    field: &'static str,
    value: Decimal,
    min: Decimal,
    max: Decimal,
) {
    if value < min || value > max {
        violations.push(FieldViolation::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
}
