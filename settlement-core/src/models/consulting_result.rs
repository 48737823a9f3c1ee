use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{DeductionDetail, TaxCalculationResult, TaxSavingRecommendation};

/// Everything returned to the caller for one settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultingResult {
    pub tax_result: TaxCalculationResult,

    /// Card (x4), medical, education, donation, housing, pension, in that order.
    pub deduction_details: Vec<DeductionDetail>,

    /// Sorted by ascending priority.
    pub recommendations: Vec<TaxSavingRecommendation>,

    /// Sum of every recommendation's `expected_saving`.
    pub total_potential_saving: Decimal,
}
