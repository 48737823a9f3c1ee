use pretty_assertions::assert_eq;
use proptest::prelude::{any, prop_assert, prop_assert_eq, proptest};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use settlement_core::calculations::deductions::{card_deduction, donation_deduction};
use settlement_core::{
    DeductionItems, DependentInfo, IncomeInfo, MAX_DEDUCTION_AMOUNT, MAX_TOTAL_SALARY, RateTable,
    RecommendationCategory, TaxFormData, YearEndTaxCalculator, calculate_year_end_tax,
    estimate_tax, validate_form,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("settlement_core=trace")
        .with_test_writer()
        .try_init();
}

fn won(amount: u64) -> Decimal {
    Decimal::from(amount)
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn fifty_million_salary_owes_additional_payment() {
    init_tracing();
    let form = TaxFormData {
        income: IncomeInfo {
            total_salary: dec!(50000000),
            work_months: 12,
        },
        ..TaxFormData::default()
    };

    let result = calculate_year_end_tax(&form);
    let tax = &result.tax_result;

    assert_eq!(tax.earned_income, dec!(37750000));
    assert_eq!(tax.tax_base, dec!(33750000));
    assert_eq!(tax.calculated_tax, dec!(3802500));
    assert_eq!(tax.tax_credit, dec!(130000));
    assert_eq!(tax.final_tax, dec!(3672500));
    assert_eq!(tax.prepaid_tax, dec!(1750000));
    assert_eq!(tax.refund_amount, dec!(-1922500));
}

#[test]
fn thirty_million_salary_with_full_pension() {
    init_tracing();
    let form = TaxFormData {
        income: IncomeInfo {
            total_salary: dec!(30000000),
            work_months: 12,
        },
        deductions: DeductionItems {
            pension_savings: dec!(6000000),
            ..DeductionItems::default()
        },
        ..TaxFormData::default()
    };

    let result = calculate_year_end_tax(&form);

    assert_eq!(result.tax_result.tax_credit, dec!(900000));
    assert!(
        result
            .recommendations
            .iter()
            .all(|r| r.category != RecommendationCategory::PensionSavings)
    );
}

#[test]
fn family_with_mixed_spending() {
    init_tracing();
    let form = TaxFormData {
        income: IncomeInfo {
            total_salary: dec!(60000000),
            work_months: 12,
        },
        deductions: DeductionItems {
            credit_card: dec!(20000000),
            debit_card: dec!(5000000),
            traditional_market: dec!(1500000),
            public_transport: dec!(600000),
            medical: dec!(3000000),
            education: dec!(2000000),
            donation: dec!(500000),
            housing_fund: dec!(3000000),
            pension_savings: dec!(4000000),
            personal_pension: dec!(0),
        },
        dependents: DependentInfo {
            has_spouse: true,
            number_of_children: 2,
            number_of_other_dependents: 0,
        },
    };
    assert_eq!(validate_form(&form), Ok(()));

    let result = calculate_year_end_tax(&form);
    let tax = &result.tax_result;

    // 12,000,000 + 15,000,000 * 5%
    assert_eq!(tax.earned_income_deduction, dec!(12750000));
    assert_eq!(tax.personal_deduction, dec!(6000000));
    assert_eq!(tax.special_deduction, dec!(3000000));
    // card: floor 15,000,000; credit 5,000,000 * 15% + debit 1,500,000 = 2,250,000
    //       market 600,000 + transport 240,000 = 840,000
    // medical: (3,000,000 - 1,800,000) * 15% = 180,000
    // education 300,000, donation 75,000, housing 1,200,000
    assert_eq!(tax.other_deductions, dec!(4845000));
    // pension: 4,000,000 * 12%
    assert_eq!(tax.tax_credit, dec!(480000));

    let categories: Vec<_> = result.recommendations.iter().map(|r| r.category).collect();
    assert_eq!(
        categories,
        vec![
            RecommendationCategory::PensionSavings,
            RecommendationCategory::CardSwitch,
            RecommendationCategory::MedicalFrontLoad,
        ]
    );
    assert_eq!(result.total_potential_saving, dec!(765000));
}

#[test]
fn estimate_tax_of_zero_is_zero() {
    assert_eq!(estimate_tax(Decimal::ZERO), Decimal::ZERO);
}

#[test]
fn calculator_with_loaded_table_matches_default() {
    let rates = RateTable::default();
    let calculator = YearEndTaxCalculator::new(&rates).unwrap();
    let form = TaxFormData {
        income: IncomeInfo {
            total_salary: dec!(85000000),
            work_months: 9,
        },
        ..TaxFormData::default()
    };

    assert_eq!(calculator.calculate(&form), calculate_year_end_tax(&form));
}

#[test]
fn largest_valid_record_settles() {
    let form = TaxFormData {
        income: IncomeInfo {
            total_salary: MAX_TOTAL_SALARY,
            work_months: 12,
        },
        deductions: DeductionItems {
            credit_card: MAX_DEDUCTION_AMOUNT,
            debit_card: MAX_DEDUCTION_AMOUNT,
            traditional_market: MAX_DEDUCTION_AMOUNT,
            public_transport: MAX_DEDUCTION_AMOUNT,
            medical: MAX_DEDUCTION_AMOUNT,
            education: MAX_DEDUCTION_AMOUNT,
            donation: MAX_DEDUCTION_AMOUNT,
            housing_fund: MAX_DEDUCTION_AMOUNT,
            pension_savings: MAX_DEDUCTION_AMOUNT,
            personal_pension: MAX_DEDUCTION_AMOUNT,
        },
        dependents: DependentInfo {
            has_spouse: true,
            number_of_children: 20,
            number_of_other_dependents: 20,
        },
    };
    assert_eq!(validate_form(&form), Ok(()));

    let result = calculate_year_end_tax(&form);

    assert!(result.tax_result.final_tax >= Decimal::ZERO);
    assert!(result.tax_result.tax_base >= Decimal::ZERO);
}

#[test]
fn unbounded_amount_fails_validation() {
    let form = TaxFormData {
        income: IncomeInfo {
            total_salary: dec!(50000000),
            work_months: 12,
        },
        deductions: DeductionItems {
            credit_card: Decimal::MAX,
            debit_card: dec!(1),
            ..DeductionItems::default()
        },
        ..TaxFormData::default()
    };

    let err = validate_form(&form).unwrap_err();

    assert_eq!(err.violations.len(), 1);
    assert_eq!(err.violations[0].field(), "deductions.creditCard");
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(64))]

    #[test]
    fn prop_bracket_tax_never_drops(base in 0u64..2_000_000_000) {
        let rates = RateTable::default();

        let lower = rates.tax_for_base(won(base));
        let upper = rates.tax_for_base(won(base + 1));

        prop_assert!(upper >= lower);
    }

    #[test]
    fn prop_low_salary_deduction_is_seventy_percent(salary in 0u64..=5_000_000) {
        let rates = RateTable::default();

        prop_assert_eq!(
            rates.earned_income_deduction(won(salary)),
            won(salary) * dec!(0.70)
        );
    }

    #[test]
    fn prop_card_deduction_zero_at_or_below_floor(
        salary in 0u64..500_000_000,
        credit_pct in 0u64..=25,
        debit_pct in 0u64..=25,
        market_pct in 0u64..=25,
    ) {
        let rates = RateTable::default();
        let salary = won(salary);
        let floor = salary * dec!(0.25);
        let credit = floor * won(credit_pct) / dec!(100);
        let debit = floor * won(debit_pct) / dec!(100);
        let market = floor * won(market_pct) / dec!(100);
        let transport = floor - credit - debit - market;
        let items = DeductionItems {
            credit_card: credit,
            debit_card: debit,
            traditional_market: market,
            public_transport: transport.max(Decimal::ZERO),
            ..DeductionItems::default()
        };

        let outcome = card_deduction(&rates, salary, &items);

        prop_assert_eq!(outcome.amount, Decimal::ZERO);
        prop_assert_eq!(outcome.details.len(), 4);
    }

    #[test]
    fn prop_donation_uses_capped_base(
        earned_income in 0u64..300_000_000,
        donation in 0u64..300_000_000,
    ) {
        let rates = RateTable::default();
        let earned_income = won(earned_income);
        let cap = earned_income * dec!(0.30);

        let raw = donation_deduction(&rates, earned_income, won(donation));
        let capped = donation_deduction(&rates, earned_income, won(donation).min(cap));

        prop_assert_eq!(raw.amount, capped.amount);
        prop_assert_eq!(
            donation_deduction(&rates, earned_income, Decimal::ZERO).amount,
            Decimal::ZERO
        );
    }

    #[test]
    fn prop_settlement_invariants(
        salary in 0u64..1_000_000_000,
        credit in 0u64..100_000_000,
        debit in 0u64..50_000_000,
        market in 0u64..5_000_000,
        transport in 0u64..2_000_000,
        medical in 0u64..20_000_000,
        donation in 0u64..20_000_000,
        pension in 0u64..10_000_000,
        has_spouse in any::<bool>(),
        children in 0u32..=20,
    ) {
        let form = TaxFormData {
            income: IncomeInfo {
                total_salary: won(salary),
                work_months: 12,
            },
            deductions: DeductionItems {
                credit_card: won(credit),
                debit_card: won(debit),
                traditional_market: won(market),
                public_transport: won(transport),
                medical: won(medical),
                donation: won(donation),
                pension_savings: won(pension),
                ..DeductionItems::default()
            },
            dependents: DependentInfo {
                has_spouse,
                number_of_children: children,
                number_of_other_dependents: 0,
            },
        };

        let first = calculate_year_end_tax(&form);
        let second = calculate_year_end_tax(&form);
        prop_assert_eq!(&first, &second);

        let priorities: Vec<_> = first.recommendations.iter().map(|r| r.priority).collect();
        prop_assert!(priorities.windows(2).all(|w| w[0] <= w[1]));

        let sum: Decimal = first.recommendations.iter().map(|r| r.expected_saving).sum();
        prop_assert_eq!(first.total_potential_saving, sum);

        let tax = &first.tax_result;
        prop_assert!(tax.tax_base >= Decimal::ZERO);
        prop_assert!(tax.final_tax >= Decimal::ZERO);
        prop_assert!(tax.tax_credit >= dec!(130000));
        prop_assert_eq!(tax.refund_amount, tax.prepaid_tax - tax.final_tax);
        prop_assert!(first.deduction_details.iter().all(|d| d.deduction >= Decimal::ZERO));
    }
}
