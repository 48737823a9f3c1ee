use serde::{Deserialize, Serialize};

use super::{DeductionItems, DependentInfo, IncomeInfo};

/// Complete input to a year-end settlement.
///
/// The calculator assumes every amount is non-negative and every count is
/// within the documented bounds; use [`crate::validate_form`] to check a
/// record before handing it over.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxFormData {
    pub income: IncomeInfo,
    #[serde(default)]
    pub deductions: DeductionItems,
    #[serde(default)]
    pub dependents: DependentInfo,
}
