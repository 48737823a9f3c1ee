//! Year-end income tax settlement for a single wage earner.
//!
//! The calculator walks a fixed ledger, each line feeding the next:
//!
//! | Line | Description |
//! |------|-------------|
//! | 1    | Total salary |
//! | 2    | Earned-income deduction (piecewise on salary) |
//! | 3    | Earned income (Line 1 - Line 2) |
//! | 4    | Personal deduction (per head) |
//! | 5    | Special income deduction (share of salary) |
//! | 6    | Other deductions (card + medical + education + donation + housing) |
//! | 7    | Total deductions (Line 4 + Line 5 + Line 6) |
//! | 8    | Tax base (Line 3 - Line 7, minimum 0) |
//! | 9    | Calculated tax (progressive brackets) |
//! | 10   | Tax credit (pension credit, at least the standard credit) |
//! | 11   | Final tax (Line 9 - Line 10, minimum 0) |
//! | 12   | Prepaid tax (share of salary) |
//! | 13   | Refund (Line 12 - Line 11, negative when tax is owed) |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use settlement_core::{IncomeInfo, RateTable, TaxFormData, YearEndTaxCalculator};
//!
//! let rates = RateTable::default();
//! let calculator = YearEndTaxCalculator::new(&rates).unwrap();
//!
//! let form = TaxFormData {
//!     income: IncomeInfo {
//!         total_salary: dec!(50000000),
//!         work_months: 12,
//!     },
//!     ..TaxFormData::default()
//! };
//!
//! let result = calculator.calculate(&form);
//!
//! assert_eq!(result.tax_result.tax_base, dec!(33750000));
//! assert_eq!(result.tax_result.final_tax, dec!(3672500));
//! assert!(!result.tax_result.is_refund());
//! ```

use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::calculations::common::non_negative;
use crate::calculations::deductions::{
    apply_standard_credit, card_deduction, donation_deduction, education_deduction,
    housing_deduction, medical_deduction, pension_tax_credit, personal_deduction,
};
use crate::models::{ConsultingResult, TaxCalculationResult, TaxFormData};
use crate::rates::{RateTable, RateTableError};
use crate::recommendations::generate_recommendations;

/// Runs the settlement ledger against a validated [`RateTable`].
#[derive(Debug, Clone, Copy)]
pub struct YearEndTaxCalculator<'a> {
    rates: &'a RateTable,
}

impl<'a> YearEndTaxCalculator<'a> {
    /// Creates a calculator after checking the table is well formed.
    ///
    /// # Errors
    ///
    /// Returns the first [`RateTableError`] found by [`RateTable::validate`].
    pub fn new(rates: &'a RateTable) -> Result<Self, RateTableError> {
        rates.validate()?;
        Ok(Self { rates })
    }

    pub fn rates(&self) -> &'a RateTable {
        self.rates
    }

    /// Computes the full settlement, deduction breakdown and recommendations.
    ///
    /// Assumes the form has passed [`crate::validate_form`]; out-of-range
    /// input is not rejected here.
    pub fn calculate(&self, form: &TaxFormData) -> ConsultingResult {
        let rates = self.rates;
        let total_salary = form.income.total_salary;

        let earned_income_deduction = self.line_2_earned_income_deduction(total_salary);
        let earned_income = total_salary - earned_income_deduction;
        debug!(
            %total_salary,
            %earned_income_deduction,
            %earned_income,
            "Computed earned income"
        );

        let personal = personal_deduction(rates, &form.dependents);
        let special = self.line_5_special_deduction(total_salary);

        let card = card_deduction(rates, total_salary, &form.deductions);
        let medical = medical_deduction(rates, total_salary, form.deductions.medical);
        let education = education_deduction(rates, form.deductions.education);
        let donation = donation_deduction(rates, earned_income, form.deductions.donation);
        let housing = housing_deduction(rates, form.deductions.housing_fund);

        let other_deductions =
            card.amount + medical.amount + education.amount + donation.amount + housing.amount;
        debug!(
            card = %card.amount,
            medical = %medical.amount,
            education = %education.amount,
            donation = %donation.amount,
            housing = %housing.amount,
            %other_deductions,
            "Computed category deductions"
        );

        let total_deductions = personal + special + other_deductions;
        let tax_base = non_negative(earned_income - total_deductions);
        let calculated_tax = rates.tax_for_base(tax_base);
        debug!(
            personal_deduction = %personal,
            special_deduction = %special,
            %total_deductions,
            %tax_base,
            %calculated_tax,
            "Computed tax base"
        );

        let pension = pension_tax_credit(rates, total_salary, form.deductions.pension_savings);
        let tax_credit = apply_standard_credit(rates, pension.amount);
        let final_tax = non_negative(calculated_tax - tax_credit);
        let prepaid_tax = self.line_12_prepaid_tax(total_salary);
        let refund_amount = prepaid_tax - final_tax;
        debug!(
            pension_credit = %pension.amount,
            %tax_credit,
            %final_tax,
            %prepaid_tax,
            %refund_amount,
            "Computed final tax"
        );

        let tax_result = TaxCalculationResult {
            total_salary,
            earned_income_deduction,
            earned_income,
            personal_deduction: personal,
            special_deduction: special,
            other_deductions,
            total_deductions,
            tax_base,
            calculated_tax,
            tax_credit,
            final_tax,
            prepaid_tax,
            refund_amount,
        };
        trace!(?tax_result, "Settlement ledger");

        let mut deduction_details = card.details;
        deduction_details.extend([
            medical.detail,
            education.detail,
            donation.detail,
            housing.detail,
            pension.detail,
        ]);

        let recommendations = generate_recommendations(rates, form);
        let total_potential_saving = recommendations
            .iter()
            .map(|r| r.expected_saving)
            .sum::<Decimal>();
        debug!(
            count = recommendations.len(),
            %total_potential_saving,
            "Generated recommendations"
        );

        ConsultingResult {
            tax_result,
            deduction_details,
            recommendations,
            total_potential_saving,
        }
    }

    /// Quick final-tax estimate from salary alone.
    ///
    /// Applies only the earned-income deduction, the filer's basic exemption
    /// and the standard tax credit.
    pub fn estimate(&self, total_salary: Decimal) -> Decimal {
        let rates = self.rates;
        let earned_income = total_salary - self.line_2_earned_income_deduction(total_salary);
        let tax_base = non_negative(earned_income - rates.assumptions.quick_estimate_exemption);
        let calculated_tax = rates.tax_for_base(tax_base);
        let estimate = non_negative(calculated_tax - rates.standard_tax_credit);
        debug!(%total_salary, %tax_base, %estimate, "Estimated final tax");
        estimate
    }

    fn line_2_earned_income_deduction(&self, total_salary: Decimal) -> Decimal {
        self.rates.earned_income_deduction(total_salary)
    }

    fn line_5_special_deduction(&self, total_salary: Decimal) -> Decimal {
        total_salary * self.rates.assumptions.special_deduction_rate
    }

    fn line_12_prepaid_tax(&self, total_salary: Decimal) -> Decimal {
        total_salary * self.rates.assumptions.prepaid_tax_rate
    }
}

/// Computes a settlement with the built-in 2024 rate table.
pub fn calculate_year_end_tax(form: &TaxFormData) -> ConsultingResult {
    let rates = RateTable::default();
    YearEndTaxCalculator { rates: &rates }.calculate(form)
}

/// Quick final-tax estimate with the built-in 2024 rate table.
pub fn estimate_tax(total_salary: Decimal) -> Decimal {
    let rates = RateTable::default();
    YearEndTaxCalculator { rates: &rates }.estimate(total_salary)
}
