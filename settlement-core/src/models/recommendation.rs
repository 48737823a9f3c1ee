use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    CardUsage,
    CardSwitch,
    TraditionalMarket,
    PublicTransport,
    MedicalFrontLoad,
    PensionSavings,
}

impl RecommendationCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::CardUsage => "Card usage",
            Self::CardSwitch => "Switch to debit card",
            Self::TraditionalMarket => "Traditional market",
            Self::PublicTransport => "Public transport",
            Self::MedicalFrontLoad => "Front-load medical spending",
            Self::PensionSavings => "Pension savings",
        }
    }
}

impl fmt::Display for RecommendationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A "spend or save more here" suggestion with its estimated effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxSavingRecommendation {
    pub category: RecommendationCategory,
    pub current_amount: Decimal,
    pub recommended_amount: Decimal,

    /// Estimated tax saved, rounded to whole won.
    pub expected_saving: Decimal,

    pub description: String,

    /// 1 is the most urgent.
    pub priority: u8,
}
