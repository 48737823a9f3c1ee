mod consulting_result;
mod deduction_detail;
mod deduction_items;
mod dependents;
mod income;
mod recommendation;
mod tax_form;
mod tax_result;

pub use consulting_result::ConsultingResult;
pub use deduction_detail::{DeductionCategory, DeductionDetail};
pub use deduction_items::DeductionItems;
pub use dependents::DependentInfo;
pub use income::IncomeInfo;
pub use recommendation::{RecommendationCategory, TaxSavingRecommendation};
pub use tax_form::TaxFormData;
pub use tax_result::TaxCalculationResult;
