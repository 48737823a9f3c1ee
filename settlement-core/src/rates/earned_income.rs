use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One linear piece of the earned-income deduction schedule.
///
/// For a salary in `(floor, max_salary]` the deduction is
/// `base_amount + (salary - floor) * rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarnedIncomeSegment {
    pub floor: Decimal,
    #[serde(default)]
    pub max_salary: Option<Decimal>,
    pub base_amount: Decimal,
    pub rate: Decimal,
}

impl EarnedIncomeSegment {
    pub fn covers(&self, salary: Decimal) -> bool {
        self.max_salary.is_none_or(|max| salary <= max)
    }

    pub fn deduction_for(&self, salary: Decimal) -> Decimal {
        self.base_amount + (salary - self.floor) * self.rate
    }
}
