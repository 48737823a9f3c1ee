use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeInfo {
    /// Gross annual wage before any deduction.
    pub total_salary: Decimal,

    /// Months worked during the year (1-12). Carried for the caller; the
    /// settlement itself does not depend on it.
    #[serde(default = "full_year")]
    pub work_months: u8,
}

fn full_year() -> u8 {
    12
}

impl Default for IncomeInfo {
    fn default() -> Self {
        Self {
            total_salary: Decimal::ZERO,
            work_months: full_year(),
        }
    }
}
