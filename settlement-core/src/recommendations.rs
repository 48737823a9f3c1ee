//! Rule-based suggestions for lowering the final tax.
//!
//! Each rule compares one input against a target from
//! [`RecommendationRules`](crate::rates::RecommendationRules) and emits at most
//! one [`TaxSavingRecommendation`]. Savings are estimates: most rules apply
//! the table's assumed marginal rate instead of the taxpayer's real bracket.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{format_rate, format_won, round_won};
use crate::models::{RecommendationCategory, TaxFormData, TaxSavingRecommendation};
use crate::rates::RateTable;

const PRIORITY_CARD_USAGE: u8 = 1;
const PRIORITY_PENSION: u8 = 1;
const PRIORITY_CARD_SWITCH: u8 = 2;
const PRIORITY_MARKET: u8 = 3;
const PRIORITY_TRANSPORT: u8 = 4;
const PRIORITY_MEDICAL: u8 = 5;

/// Evaluates every rule and returns the hits sorted by ascending priority.
///
/// Rules read only the input record, so they can run before or without a
/// full settlement. Rules with equal priority keep their evaluation order:
/// card, traditional market, public transport, medical, pension.
pub fn generate_recommendations(
    rates: &RateTable,
    form: &TaxFormData,
) -> Vec<TaxSavingRecommendation> {
    let salary = form.income.total_salary;
    let items = &form.deductions;

    let mut recommendations: Vec<_> = [
        card_usage(rates, salary, items.credit_card, items.debit_card),
        traditional_market(rates, items.traditional_market),
        public_transport(rates, items.public_transport),
        medical_front_load(rates, salary, items.medical),
        pension_savings(rates, salary, items.pension_savings),
    ]
    .into_iter()
    .flatten()
    .collect();

    recommendations.sort_by_key(|r| r.priority);

    debug!(
        salary = %salary,
        hits = recommendations.len(),
        "Evaluated recommendation rules"
    );
    recommendations
}

/// Card spending below the minimum usage floor, or a credit card balance
/// worth moving to debit. The switch is only considered once the floor is met.
fn card_usage(
    rates: &RateTable,
    salary: Decimal,
    credit_card: Decimal,
    debit_card: Decimal,
) -> Option<TaxSavingRecommendation> {
    let card = &rates.card;
    let rules = &rates.recommendations;
    let min_usage = salary * card.min_usage_rate;
    let total_usage = credit_card + debit_card;

    if total_usage < min_usage {
        let additional = min_usage - total_usage;
        let saving = round_won(additional * card.debit_card_rate * rules.assumed_marginal_rate);
        return Some(TaxSavingRecommendation {
            category: RecommendationCategory::CardUsage,
            current_amount: total_usage,
            recommended_amount: min_usage,
            expected_saving: saving,
            description: format!(
                "Card spending is below the minimum of {} of total salary. \
                 Spending another {} won by debit card saves about {} won.",
                format_rate(card.min_usage_rate),
                format_won(additional),
                format_won(saving)
            ),
            priority: PRIORITY_CARD_USAGE,
        });
    }

    if credit_card <= Decimal::ZERO {
        return None;
    }

    let switch_amount = credit_card.min(rules.card_switch_cap);
    let benefit = switch_amount
        * (card.debit_card_rate - card.credit_card_rate)
        * rules.assumed_marginal_rate;
    if benefit <= rules.card_switch_min_benefit {
        return None;
    }

    let saving = round_won(benefit);
    Some(TaxSavingRecommendation {
        category: RecommendationCategory::CardSwitch,
        current_amount: credit_card,
        recommended_amount: credit_card - switch_amount,
        expected_saving: saving,
        description: format!(
            "Debit cards earn {} instead of {} for credit cards. \
             Moving {} won of spending to debit saves about {} won.",
            format_rate(card.debit_card_rate),
            format_rate(card.credit_card_rate),
            format_won(switch_amount),
            format_won(saving)
        ),
        priority: PRIORITY_CARD_SWITCH,
    })
}

fn traditional_market(rates: &RateTable, spent: Decimal) -> Option<TaxSavingRecommendation> {
    top_up(
        RecommendationCategory::TraditionalMarket,
        spent,
        rates.recommendations.traditional_market_target,
        rates.card.traditional_market_rate,
        rates.recommendations.assumed_marginal_rate,
        "traditional market",
        PRIORITY_MARKET,
    )
}

fn public_transport(rates: &RateTable, spent: Decimal) -> Option<TaxSavingRecommendation> {
    top_up(
        RecommendationCategory::PublicTransport,
        spent,
        rates.recommendations.public_transport_target,
        rates.card.public_transport_rate,
        rates.recommendations.assumed_marginal_rate,
        "public transport",
        PRIORITY_TRANSPORT,
    )
}

fn top_up(
    category: RecommendationCategory,
    spent: Decimal,
    target: Decimal,
    deduction_rate: Decimal,
    marginal_rate: Decimal,
    noun: &str,
    priority: u8,
) -> Option<TaxSavingRecommendation> {
    if spent >= target {
        return None;
    }

    let additional = target - spent;
    let saving = round_won(additional * deduction_rate * marginal_rate);
    Some(TaxSavingRecommendation {
        category,
        current_amount: spent,
        recommended_amount: target,
        expected_saving: saving,
        description: format!(
            "{} of {noun} spending is deductible. \
             Spending another {} won saves about {} won.",
            format_rate(deduction_rate),
            format_won(additional),
            format_won(saving)
        ),
        priority,
    })
}

/// Medical spending already past the deductible floor but not far past it.
fn medical_front_load(
    rates: &RateTable,
    salary: Decimal,
    medical: Decimal,
) -> Option<TaxSavingRecommendation> {
    let rules = &rates.recommendations;
    let floor = salary * rates.medical.min_expense_rate;

    if medical <= floor || medical >= floor + rules.medical_window {
        return None;
    }

    let saving = round_won(rules.medical_front_load * rules.assumed_marginal_rate);
    Some(TaxSavingRecommendation {
        category: RecommendationCategory::MedicalFrontLoad,
        current_amount: medical,
        recommended_amount: medical + rules.medical_front_load,
        expected_saving: saving,
        description: format!(
            "Medical spending above {} of total salary is deducted at {}. \
             Bringing planned expenses such as glasses or check-ups forward \
             to before year-end saves about {} won.",
            format_rate(rates.medical.min_expense_rate),
            format_rate(rates.medical.rate),
            format_won(saving)
        ),
        priority: PRIORITY_MEDICAL,
    })
}

/// Pension contributions below the credit limit. The saving uses the
/// taxpayer's actual credit rate.
fn pension_savings(
    rates: &RateTable,
    salary: Decimal,
    contributed: Decimal,
) -> Option<TaxSavingRecommendation> {
    let limit = rates.pension.contribution_limit;
    if contributed >= limit {
        return None;
    }

    let rate = rates.pension_credit_rate(salary);
    let additional = (limit - contributed).min(rates.recommendations.pension_top_up_cap);
    let saving = round_won(additional * rate);
    Some(TaxSavingRecommendation {
        category: RecommendationCategory::PensionSavings,
        current_amount: contributed,
        recommended_amount: contributed + additional,
        expected_saving: saving,
        description: format!(
            "Pension savings earn a {} tax credit. Contributing another {} won \
             saves about {} won (annual limit {} won).",
            format_rate(rate),
            format_won(additional),
            format_won(saving),
            format_won(limit)
        ),
        priority: PRIORITY_PENSION,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::calculate_year_end_tax;
    use crate::models::{DeductionItems, IncomeInfo};

    fn form(total_salary: Decimal, deductions: DeductionItems) -> TaxFormData {
        TaxFormData {
            income: IncomeInfo {
                total_salary,
                work_months: 12,
            },
            deductions,
            ..TaxFormData::default()
        }
    }

    fn run(form: &TaxFormData) -> Vec<TaxSavingRecommendation> {
        generate_recommendations(&RateTable::default(), form)
    }

    fn find(
        recs: &[TaxSavingRecommendation],
        category: RecommendationCategory,
    ) -> Option<&TaxSavingRecommendation> {
        recs.iter().find(|r| r.category == category)
    }

    /// Inputs that trip none of the rules at a 40,000,000 salary.
    fn saturated() -> DeductionItems {
        DeductionItems {
            debit_card: dec!(10000000),
            traditional_market: dec!(1000000),
            public_transport: dec!(500000),
            pension_savings: dec!(6000000),
            ..DeductionItems::default()
        }
    }

    // =========================================================================
    // card rules
    // =========================================================================

    #[test]
    fn card_shortfall_recommends_reaching_floor() {
        let items = DeductionItems {
            credit_card: dec!(4000000),
            debit_card: dec!(2000000),
            ..saturated()
        };

        let recs = run(&form(dec!(40000000), items));
        let card = find(&recs, RecommendationCategory::CardUsage).unwrap();

        // (10,000,000 - 6,000,000) * 30% * 15%
        assert_eq!(card.expected_saving, dec!(180000));
        assert_eq!(card.current_amount, dec!(6000000));
        assert_eq!(card.recommended_amount, dec!(10000000));
        assert_eq!(card.priority, 1);
        assert!(find(&recs, RecommendationCategory::CardSwitch).is_none());
    }

    #[test]
    fn card_shortfall_ignores_market_and_transport() {
        let items = DeductionItems {
            debit_card: dec!(9000000),
            traditional_market: dec!(5000000),
            ..saturated()
        };

        let recs = run(&form(dec!(40000000), items));

        assert!(find(&recs, RecommendationCategory::CardUsage).is_some());
    }

    #[test]
    fn card_switch_recommended_above_minimum_benefit() {
        let items = DeductionItems {
            credit_card: dec!(15000000),
            debit_card: dec!(0),
            ..saturated()
        };

        let recs = run(&form(dec!(40000000), items));
        let switch = find(&recs, RecommendationCategory::CardSwitch).unwrap();

        // min(15,000,000, 10,000,000) * (30% - 15%) * 15%
        assert_eq!(switch.expected_saving, dec!(225000));
        assert_eq!(switch.recommended_amount, dec!(5000000));
        assert_eq!(switch.priority, 2);
    }

    #[test]
    fn card_switch_not_recommended_at_minimum_benefit() {
        // switch 2,222,222 -> benefit 49,999.995 <= 50,000
        let items = DeductionItems {
            credit_card: dec!(2222222),
            debit_card: dec!(10000000),
            ..saturated()
        };

        let recs = run(&form(dec!(40000000), items));

        assert!(find(&recs, RecommendationCategory::CardSwitch).is_none());
    }

    #[test]
    fn card_switch_needs_credit_balance() {
        let recs = run(&form(dec!(40000000), saturated()));

        assert!(recs.is_empty());
    }

    // =========================================================================
    // market / transport / medical rules
    // =========================================================================

    #[test]
    fn market_and_transport_top_up_to_targets() {
        let items = DeductionItems {
            traditional_market: dec!(400000),
            public_transport: dec!(100000),
            ..saturated()
        };

        let recs = run(&form(dec!(40000000), items));

        let market = find(&recs, RecommendationCategory::TraditionalMarket).unwrap();
        assert_eq!(market.expected_saving, dec!(36000)); // 600,000 * 40% * 15%
        assert_eq!(market.priority, 3);

        let transport = find(&recs, RecommendationCategory::PublicTransport).unwrap();
        assert_eq!(transport.expected_saving, dec!(24000)); // 400,000 * 40% * 15%
        assert_eq!(transport.recommended_amount, dec!(500000));
        assert_eq!(transport.priority, 4);
    }

    #[test]
    fn medical_front_load_inside_window() {
        let items = DeductionItems {
            medical: dec!(2000000),
            ..saturated()
        };

        let recs = run(&form(dec!(40000000), items));
        let medical = find(&recs, RecommendationCategory::MedicalFrontLoad).unwrap();

        assert_eq!(medical.expected_saving, dec!(300000));
        assert_eq!(medical.recommended_amount, dec!(4000000));
        assert_eq!(medical.priority, 5);
    }

    #[test]
    fn medical_front_load_window_is_exclusive() {
        // floor = 1,200,000
        for medical in [dec!(1200000), dec!(6200000), dec!(0)] {
            let items = DeductionItems {
                medical,
                ..saturated()
            };

            let recs = run(&form(dec!(40000000), items));

            assert!(find(&recs, RecommendationCategory::MedicalFrontLoad).is_none());
        }
    }

    // =========================================================================
    // pension rule
    // =========================================================================

    #[test]
    fn pension_top_up_capped_and_uses_salary_rate() {
        let items = DeductionItems {
            pension_savings: dec!(0),
            ..saturated()
        };

        let recs = run(&form(dec!(40000000), items.clone()));
        let pension = find(&recs, RecommendationCategory::PensionSavings).unwrap();
        assert_eq!(pension.recommended_amount, dec!(3000000));
        assert_eq!(pension.expected_saving, dec!(450000)); // 3,000,000 * 15%

        let recs = run(&form(dec!(80000000), DeductionItems {
            debit_card: dec!(20000000),
            ..items
        }));
        let pension = find(&recs, RecommendationCategory::PensionSavings).unwrap();
        assert_eq!(pension.expected_saving, dec!(360000)); // 3,000,000 * 12%
    }

    #[test]
    fn pension_top_up_limited_by_headroom() {
        let items = DeductionItems {
            pension_savings: dec!(5000000),
            ..saturated()
        };

        let recs = run(&form(dec!(40000000), items));
        let pension = find(&recs, RecommendationCategory::PensionSavings).unwrap();

        assert_eq!(pension.recommended_amount, dec!(6000000));
        assert_eq!(pension.expected_saving, dec!(150000));
    }

    // =========================================================================
    // ordering
    // =========================================================================

    #[test]
    fn sorted_by_priority_with_ties_in_rule_order() {
        let recs = run(&form(dec!(40000000), DeductionItems {
            medical: dec!(2000000),
            ..DeductionItems::default()
        }));

        let order: Vec<_> = recs.iter().map(|r| r.category).collect();
        assert_eq!(
            order,
            vec![
                RecommendationCategory::CardUsage,
                RecommendationCategory::PensionSavings,
                RecommendationCategory::TraditionalMarket,
                RecommendationCategory::PublicTransport,
                RecommendationCategory::MedicalFrontLoad,
            ]
        );
    }

    #[test]
    fn matches_recommendations_of_full_settlement() {
        let form = form(dec!(55000000), DeductionItems {
            credit_card: dec!(18000000),
            medical: dec!(2500000),
            ..DeductionItems::default()
        });

        let settled = calculate_year_end_tax(&form);

        assert_eq!(run(&form), settled.recommendations);
    }

    #[test]
    fn savings_rounded_to_whole_won() {
        let items = DeductionItems {
            traditional_market: dec!(999999),
            ..saturated()
        };

        let recs = run(&form(dec!(40000000), items));
        let market = find(&recs, RecommendationCategory::TraditionalMarket).unwrap();

        // 1 * 0.4 * 0.15 = 0.06 -> 0
        assert_eq!(market.expected_saving, dec!(0));
    }
}
