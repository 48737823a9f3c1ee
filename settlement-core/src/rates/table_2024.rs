//! Rates and limits for the 2024 settlement year.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{
    CardDeductionRates, CardLimitTier, DonationDeductionRates, EarnedIncomeSegment,
    EducationDeductionRates, HousingDeductionRates, MedicalDeductionRates, PensionCreditRates,
    PersonalDeductionRates, RecommendationRules, SettlementAssumptions, TaxBracket,
};

pub const TAX_BRACKETS_2024: [TaxBracket; 8] = [
    TaxBracket {
        min_income: dec!(0),
        max_income: Some(dec!(14000000)),
        tax_rate: dec!(0.06),
        progressive_deduction: dec!(0),
    },
    TaxBracket {
        min_income: dec!(14000000),
        max_income: Some(dec!(50000000)),
        tax_rate: dec!(0.15),
        progressive_deduction: dec!(1260000),
    },
    TaxBracket {
        min_income: dec!(50000000),
        max_income: Some(dec!(88000000)),
        tax_rate: dec!(0.24),
        progressive_deduction: dec!(5760000),
    },
    TaxBracket {
        min_income: dec!(88000000),
        max_income: Some(dec!(150000000)),
        tax_rate: dec!(0.35),
        progressive_deduction: dec!(15440000),
    },
    TaxBracket {
        min_income: dec!(150000000),
        max_income: Some(dec!(300000000)),
        tax_rate: dec!(0.38),
        progressive_deduction: dec!(19940000),
    },
    TaxBracket {
        min_income: dec!(300000000),
        max_income: Some(dec!(500000000)),
        tax_rate: dec!(0.40),
        progressive_deduction: dec!(25940000),
    },
    TaxBracket {
        min_income: dec!(500000000),
        max_income: Some(dec!(1000000000)),
        tax_rate: dec!(0.42),
        progressive_deduction: dec!(35940000),
    },
    TaxBracket {
        min_income: dec!(1000000000),
        max_income: None,
        tax_rate: dec!(0.45),
        progressive_deduction: dec!(65940000),
    },
];

pub const EARNED_INCOME_SEGMENTS_2024: [EarnedIncomeSegment; 5] = [
    EarnedIncomeSegment {
        floor: dec!(0),
        max_salary: Some(dec!(5000000)),
        base_amount: dec!(0),
        rate: dec!(0.70),
    },
    EarnedIncomeSegment {
        floor: dec!(5000000),
        max_salary: Some(dec!(15000000)),
        base_amount: dec!(3500000),
        rate: dec!(0.40),
    },
    EarnedIncomeSegment {
        floor: dec!(15000000),
        max_salary: Some(dec!(45000000)),
        base_amount: dec!(7500000),
        rate: dec!(0.15),
    },
    EarnedIncomeSegment {
        floor: dec!(45000000),
        max_salary: Some(dec!(100000000)),
        base_amount: dec!(12000000),
        rate: dec!(0.05),
    },
    EarnedIncomeSegment {
        floor: dec!(100000000),
        max_salary: None,
        base_amount: dec!(14750000),
        rate: dec!(0.02),
    },
];

pub const PERSONAL_DEDUCTION_2024: PersonalDeductionRates = PersonalDeductionRates {
    basic: dec!(1500000),
};

pub const CARD_DEDUCTION_2024: CardDeductionRates = CardDeductionRates {
    min_usage_rate: dec!(0.25),
    credit_card_rate: dec!(0.15),
    debit_card_rate: dec!(0.30),
    traditional_market_rate: dec!(0.40),
    public_transport_rate: dec!(0.40),
    additional_limit: dec!(3000000),
};

pub const CARD_LIMIT_TIERS_2024: [CardLimitTier; 3] = [
    CardLimitTier {
        max_salary: Some(dec!(70000000)),
        limit: dec!(3000000),
    },
    CardLimitTier {
        max_salary: Some(dec!(120000000)),
        limit: dec!(2500000),
    },
    CardLimitTier {
        max_salary: None,
        limit: dec!(2000000),
    },
];

pub const MEDICAL_DEDUCTION_2024: MedicalDeductionRates = MedicalDeductionRates {
    min_expense_rate: dec!(0.03),
    rate: dec!(0.15),
};

pub const EDUCATION_DEDUCTION_2024: EducationDeductionRates = EducationDeductionRates {
    rate: dec!(0.15),
};

pub const DONATION_DEDUCTION_2024: DonationDeductionRates = DonationDeductionRates {
    income_limit_rate: dec!(0.30),
    rate: dec!(0.15),
    high_amount_rate: dec!(0.30),
    high_amount_threshold: dec!(10000000),
};

pub const HOUSING_DEDUCTION_2024: HousingDeductionRates = HousingDeductionRates {
    rental_loan_rate: dec!(0.40),
    rental_loan_limit: dec!(4000000),
};

pub const PENSION_CREDIT_2024: PensionCreditRates = PensionCreditRates {
    contribution_limit: dec!(6000000),
    high_rate_salary_limit: dec!(55000000),
    high_rate: dec!(0.15),
    low_rate: dec!(0.12),
};

pub const STANDARD_TAX_CREDIT_2024: Decimal = dec!(130000);

pub const SETTLEMENT_ASSUMPTIONS_2024: SettlementAssumptions = SettlementAssumptions {
    special_deduction_rate: dec!(0.05),
    prepaid_tax_rate: dec!(0.035),
    quick_estimate_exemption: dec!(1500000),
};

pub const RECOMMENDATION_RULES_2024: RecommendationRules = RecommendationRules {
    assumed_marginal_rate: dec!(0.15),
    card_switch_cap: dec!(10000000),
    card_switch_min_benefit: dec!(50000),
    traditional_market_target: dec!(1000000),
    public_transport_target: dec!(500000),
    medical_window: dec!(5000000),
    medical_front_load: dec!(2000000),
    pension_top_up_cap: dec!(3000000),
};
