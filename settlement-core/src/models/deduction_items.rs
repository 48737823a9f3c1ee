use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Deductible spending reported for the year. Every field defaults to zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeductionItems {
    pub credit_card: Decimal,

    /// Debit card and cash receipt spending.
    pub debit_card: Decimal,

    pub traditional_market: Decimal,
    pub public_transport: Decimal,
    pub medical: Decimal,
    pub education: Decimal,
    pub donation: Decimal,

    /// Principal and interest repaid on a rental housing loan.
    pub housing_fund: Decimal,

    pub pension_savings: Decimal,

    /// Personal pension savings opened before 2001. Accepted for
    /// completeness of the record; no formula consumes it.
    pub personal_pension: Decimal,
}

impl DeductionItems {
    /// Combined spend across the four card-like categories.
    pub fn total_card_usage(&self) -> Decimal {
        self.credit_card + self.debit_card + self.traditional_market + self.public_transport
    }
}
