use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Category a [`DeductionDetail`] line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionCategory {
    CreditCard,
    DebitCard,
    TraditionalMarket,
    PublicTransport,
    Medical,
    Education,
    Donation,
    Housing,
    PensionSavings,
}

impl DeductionCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::CreditCard => "Credit card",
            Self::DebitCard => "Debit card / cash receipts",
            Self::TraditionalMarket => "Traditional market",
            Self::PublicTransport => "Public transport",
            Self::Medical => "Medical expenses",
            Self::Education => "Education expenses",
            Self::Donation => "Donations",
            Self::Housing => "Housing fund",
            Self::PensionSavings => "Pension savings",
        }
    }
}

impl fmt::Display for DeductionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One line of the deduction breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeductionDetail {
    pub category: DeductionCategory,

    /// Amount the rate was applied against (the raw reported spend).
    pub amount: Decimal,

    pub rate: Decimal,

    /// Resulting deduction or credit for this line, before any shared cap.
    pub deduction: Decimal,

    pub description: String,
}
