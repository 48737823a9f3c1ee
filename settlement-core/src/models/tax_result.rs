use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Numeric ledger of one settlement, in pipeline order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxCalculationResult {
    pub total_salary: Decimal,
    pub earned_income_deduction: Decimal,
    pub earned_income: Decimal,
    pub personal_deduction: Decimal,

    /// Flat stand-in for health and employment insurance premiums.
    pub special_deduction: Decimal,

    /// Card, medical, education, donation and housing deductions combined.
    pub other_deductions: Decimal,

    pub total_deductions: Decimal,
    pub tax_base: Decimal,
    pub calculated_tax: Decimal,
    pub tax_credit: Decimal,
    pub final_tax: Decimal,

    /// Flat stand-in for tax withheld during the year.
    pub prepaid_tax: Decimal,

    /// `prepaid_tax - final_tax`. Positive is a refund, negative is owed.
    pub refund_amount: Decimal,
}

impl TaxCalculationResult {
    pub fn is_refund(&self) -> bool {
        self.refund_amount >= Decimal::ZERO
    }
}
