//! Rate tables for the year-end settlement.
//!
//! Every bracket, rate, floor and cap the engine uses lives here as plain
//! data. The algorithms in [`crate::calculations`] and
//! [`crate::recommendations`] read a [`RateTable`] and never embed a
//! constant of their own, so a new settlement year only needs a new table.
//!
//! [`RateTable::default`] returns the 2024 table built from the `const`
//! items in this module. A table loaded from elsewhere should go through
//! [`RateTable::validate`] before use.

mod brackets;
mod earned_income;
mod table_2024;

pub use brackets::{TaxBracket, find_bracket};
pub use earned_income::EarnedIncomeSegment;
pub use table_2024::*;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Errors reported by [`RateTable::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateTableError {
    #[error("{table} table is empty")]
    Empty { table: &'static str },

    #[error("{table} table must start at 0, starts at {found}")]
    NotAnchored { table: &'static str, found: Decimal },

    #[error("{table} row {index} starts at {found}, expected {expected}")]
    Gap {
        table: &'static str,
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    #[error("{table} row {index} is unbounded but is not the last row")]
    UnboundedNotLast { table: &'static str, index: usize },

    #[error("last row of the {table} table must be unbounded")]
    LastBounded { table: &'static str },

    #[error("{field} must be between 0 and 1, got {rate}")]
    RateOutOfRange { field: &'static str, rate: Decimal },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalDeductionRates {
    /// Exemption per head: the filer, a spouse, each child and each other dependent.
    pub basic: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDeductionRates {
    /// Share of total salary that card spending must exceed before anything is deductible.
    pub min_usage_rate: Decimal,
    pub credit_card_rate: Decimal,
    pub debit_card_rate: Decimal,
    pub traditional_market_rate: Decimal,
    pub public_transport_rate: Decimal,

    /// Separate cap for the traditional market and public transport bucket.
    pub additional_limit: Decimal,
}

/// Cap on the credit + debit card deduction for salaries up to `max_salary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardLimitTier {
    #[serde(default)]
    pub max_salary: Option<Decimal>,
    pub limit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalDeductionRates {
    pub min_expense_rate: Decimal,
    pub rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationDeductionRates {
    pub rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationDeductionRates {
    /// Deductible donations are capped at this share of earned income.
    pub income_limit_rate: Decimal,
    pub rate: Decimal,
    pub high_amount_rate: Decimal,
    pub high_amount_threshold: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HousingDeductionRates {
    pub rental_loan_rate: Decimal,
    pub rental_loan_limit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PensionCreditRates {
    pub contribution_limit: Decimal,

    /// Salaries at or below this get `high_rate`, above it `low_rate`.
    pub high_rate_salary_limit: Decimal,
    pub high_rate: Decimal,
    pub low_rate: Decimal,
}

/// Flat ratios standing in for inputs the settlement does not collect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementAssumptions {
    /// Insurance premiums, as a share of total salary.
    pub special_deduction_rate: Decimal,

    /// Tax withheld during the year, as a share of total salary.
    pub prepaid_tax_rate: Decimal,

    /// Single basic exemption used by the quick estimate.
    pub quick_estimate_exemption: Decimal,
}

/// Thresholds for the tax-saving suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRules {
    /// Marginal rate assumed when turning an extra deduction into saved tax.
    pub assumed_marginal_rate: Decimal,
    pub card_switch_cap: Decimal,
    pub card_switch_min_benefit: Decimal,
    pub traditional_market_target: Decimal,
    pub public_transport_target: Decimal,

    /// Width of the band above the medical floor in which front-loading is suggested.
    pub medical_window: Decimal,
    pub medical_front_load: Decimal,
    pub pension_top_up_cap: Decimal,
}

/// Complete rule set for one settlement year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    /// Floor on the tax credit when itemized credits come in lower.
    pub standard_tax_credit: Decimal,
    pub brackets: Vec<TaxBracket>,
    pub earned_income: Vec<EarnedIncomeSegment>,
    pub card_limits: Vec<CardLimitTier>,
    pub personal: PersonalDeductionRates,
    pub card: CardDeductionRates,
    pub medical: MedicalDeductionRates,
    pub education: EducationDeductionRates,
    pub donation: DonationDeductionRates,
    pub housing: HousingDeductionRates,
    pub pension: PensionCreditRates,
    pub assumptions: SettlementAssumptions,
    pub recommendations: RecommendationRules,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            standard_tax_credit: STANDARD_TAX_CREDIT_2024,
            brackets: TAX_BRACKETS_2024.to_vec(),
            earned_income: EARNED_INCOME_SEGMENTS_2024.to_vec(),
            card_limits: CARD_LIMIT_TIERS_2024.to_vec(),
            personal: PERSONAL_DEDUCTION_2024,
            card: CARD_DEDUCTION_2024,
            medical: MEDICAL_DEDUCTION_2024,
            education: EDUCATION_DEDUCTION_2024,
            donation: DONATION_DEDUCTION_2024,
            housing: HOUSING_DEDUCTION_2024,
            pension: PENSION_CREDIT_2024,
            assumptions: SETTLEMENT_ASSUMPTIONS_2024,
            recommendations: RECOMMENDATION_RULES_2024,
        }
    }
}

impl RateTable {
    /// Progressive income tax on `tax_base`.
    ///
    /// Zero or negative bases are untaxed and skip the lookup.
    pub fn tax_for_base(&self, tax_base: Decimal) -> Decimal {
        if tax_base <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        match find_bracket(&self.brackets, tax_base) {
            Some(bracket) => bracket.tax_for(tax_base),
            None => {
                warn!(%tax_base, "no tax bracket covers the tax base");
                Decimal::ZERO
            }
        }
    }

    /// Earned-income deduction for a gross annual salary.
    pub fn earned_income_deduction(&self, total_salary: Decimal) -> Decimal {
        match self.earned_income.iter().find(|s| s.covers(total_salary)) {
            Some(segment) => segment.deduction_for(total_salary),
            None => {
                warn!(%total_salary, "no earned-income segment covers the salary");
                Decimal::ZERO
            }
        }
    }

    /// Cap on the credit + debit card deduction for this salary.
    pub fn card_limit(&self, total_salary: Decimal) -> Decimal {
        self.card_limits
            .iter()
            .find(|tier| tier.max_salary.is_none_or(|max| total_salary <= max))
            .map_or(Decimal::ZERO, |tier| tier.limit)
    }

    /// Pension savings credit rate for this salary.
    pub fn pension_credit_rate(&self, total_salary: Decimal) -> Decimal {
        if total_salary <= self.pension.high_rate_salary_limit {
            self.pension.high_rate
        } else {
            self.pension.low_rate
        }
    }

    /// Checks that every schedule is contiguous from zero and ends unbounded,
    /// and that every rate lies in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns the first [`RateTableError`] found.
    pub fn validate(&self) -> Result<(), RateTableError> {
        check_schedule(
            "tax bracket",
            self.brackets.iter().map(|b| (b.min_income, b.max_income)),
        )?;
        check_schedule(
            "earned income",
            self.earned_income.iter().map(|s| (s.floor, s.max_salary)),
        )?;
        check_open_ended("card limit", self.card_limits.iter().map(|t| t.max_salary))?;

        for bracket in &self.brackets {
            check_rate("brackets.tax_rate", bracket.tax_rate)?;
        }
        for segment in &self.earned_income {
            check_rate("earned_income.rate", segment.rate)?;
        }

        let rates = [
            ("card.min_usage_rate", self.card.min_usage_rate),
            ("card.credit_card_rate", self.card.credit_card_rate),
            ("card.debit_card_rate", self.card.debit_card_rate),
            ("card.traditional_market_rate", self.card.traditional_market_rate),
            ("card.public_transport_rate", self.card.public_transport_rate),
            ("medical.min_expense_rate", self.medical.min_expense_rate),
            ("medical.rate", self.medical.rate),
            ("education.rate", self.education.rate),
            ("donation.income_limit_rate", self.donation.income_limit_rate),
            ("donation.rate", self.donation.rate),
            ("donation.high_amount_rate", self.donation.high_amount_rate),
            ("housing.rental_loan_rate", self.housing.rental_loan_rate),
            ("pension.high_rate", self.pension.high_rate),
            ("pension.low_rate", self.pension.low_rate),
            ("assumptions.special_deduction_rate", self.assumptions.special_deduction_rate),
            ("assumptions.prepaid_tax_rate", self.assumptions.prepaid_tax_rate),
            (
                "recommendations.assumed_marginal_rate",
                self.recommendations.assumed_marginal_rate,
            ),
        ];
        for (field, rate) in rates {
            check_rate(field, rate)?;
        }

        Ok(())
    }
}

fn check_rate(field: &'static str, rate: Decimal) -> Result<(), RateTableError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(RateTableError::RateOutOfRange { field, rate });
    }
    Ok(())
}

/// Rows given as `(lower, upper)` must start at zero, each row must start
/// where the previous one ended, and only the last row may be unbounded.
fn check_schedule(
    table: &'static str,
    rows: impl ExactSizeIterator<Item = (Decimal, Option<Decimal>)> + Clone,
) -> Result<(), RateTableError> {
    check_open_ended(table, rows.clone().map(|(_, upper)| upper))?;

    let mut expected = Decimal::ZERO;
    for (index, (lower, upper)) in rows.enumerate() {
        if index == 0 && lower != Decimal::ZERO {
            return Err(RateTableError::NotAnchored {
                table,
                found: lower,
            });
        }
        if lower != expected {
            return Err(RateTableError::Gap {
                table,
                index,
                expected,
                found: lower,
            });
        }
        if let Some(upper) = upper {
            expected = upper;
        }
    }

    Ok(())
}

fn check_open_ended(
    table: &'static str,
    uppers: impl ExactSizeIterator<Item = Option<Decimal>>,
) -> Result<(), RateTableError> {
    let len = uppers.len();
    if len == 0 {
        return Err(RateTableError::Empty { table });
    }

    for (index, upper) in uppers.enumerate() {
        let is_last = index + 1 == len;
        match (upper, is_last) {
            (None, false) => return Err(RateTableError::UnboundedNotLast { table, index }),
            (Some(_), true) => return Err(RateTableError::LastBounded { table }),
            _ => {}
        }
    }

    Ok(())
}
