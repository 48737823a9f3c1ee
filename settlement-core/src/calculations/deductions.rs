//! Per-category deduction and credit formulas.
//!
//! Each function takes the raw amount(s) it needs plus the [`RateTable`] and
//! returns the resulting amount together with the [`DeductionDetail`] line
//! shown to the taxpayer. Nothing here reads or keeps state between calls.

use rust_decimal::Decimal;

use crate::calculations::common::{format_rate, format_won, non_negative};
use crate::models::{DeductionCategory, DeductionDetail, DeductionItems, DependentInfo};
use crate::rates::RateTable;

/// Result of one deduction or credit formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeductionOutcome {
    pub amount: Decimal,
    pub detail: DeductionDetail,
}

/// Result of the card deduction: one capped total and four breakdown lines
/// (credit, debit, traditional market, public transport).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDeductionOutcome {
    pub amount: Decimal,
    pub details: Vec<DeductionDetail>,
}

/// Basic exemption for the filer plus one per spouse, child and other dependent.
pub fn personal_deduction(rates: &RateTable, dependents: &DependentInfo) -> Decimal {
    rates.personal.basic * Decimal::from(dependents.head_count())
}

/// Deduction for card-like spending above the minimum usage floor.
///
/// The floor is a share of total salary and is charged against credit card
/// spending first. Debit, traditional market and public transport spending
/// earn their full rate. Credit + debit share a salary-tiered cap;
/// traditional market + public transport share a separate cap.
pub fn card_deduction(
    rates: &RateTable,
    total_salary: Decimal,
    items: &DeductionItems,
) -> CardDeductionOutcome {
    let card = &rates.card;
    let min_usage = total_salary * card.min_usage_rate;
    let total_usage = items.total_card_usage();

    if total_usage <= min_usage {
        return CardDeductionOutcome {
            amount: Decimal::ZERO,
            details: card_details(rates, items, min_usage, [Decimal::ZERO; 4]),
        };
    }

    let excess = total_usage - min_usage;
    let credit_excess = non_negative(items.credit_card - min_usage);

    let credit = credit_excess.min(excess) * card.credit_card_rate;
    let debit = items.debit_card * card.debit_card_rate;
    let market = items.traditional_market * card.traditional_market_rate;
    let transport = items.public_transport * card.public_transport_rate;

    let basic = (credit + debit).min(rates.card_limit(total_salary));
    let additional = (market + transport).min(card.additional_limit);

    CardDeductionOutcome {
        amount: basic + additional,
        details: card_details(rates, items, min_usage, [credit, debit, market, transport]),
    }
}

fn card_details(
    rates: &RateTable,
    items: &DeductionItems,
    min_usage: Decimal,
    [credit, debit, market, transport]: [Decimal; 4],
) -> Vec<DeductionDetail> {
    let card = &rates.card;
    let additional_note = format!(
        "{} of spending (separate {} won limit)",
        format_rate(card.traditional_market_rate),
        format_won(card.additional_limit)
    );

    vec![
        DeductionDetail {
            category: DeductionCategory::CreditCard,
            amount: items.credit_card,
            rate: card.credit_card_rate,
            deduction: credit,
            description: format!(
                "{} of spending above the minimum usage of {} won",
                format_rate(card.credit_card_rate),
                format_won(min_usage)
            ),
        },
        DeductionDetail {
            category: DeductionCategory::DebitCard,
            amount: items.debit_card,
            rate: card.debit_card_rate,
            deduction: debit,
            description: format!("{} of spending", format_rate(card.debit_card_rate)),
        },
        DeductionDetail {
            category: DeductionCategory::TraditionalMarket,
            amount: items.traditional_market,
            rate: card.traditional_market_rate,
            deduction: market,
            description: additional_note,
        },
        DeductionDetail {
            category: DeductionCategory::PublicTransport,
            amount: items.public_transport,
            rate: card.public_transport_rate,
            deduction: transport,
            description: format!(
                "{} of spending (separate {} won limit)",
                format_rate(card.public_transport_rate),
                format_won(card.additional_limit)
            ),
        },
    ]
}

/// Deduction for medical spending above a share of total salary. Uncapped.
pub fn medical_deduction(
    rates: &RateTable,
    total_salary: Decimal,
    medical: Decimal,
) -> DeductionOutcome {
    let floor = total_salary * rates.medical.min_expense_rate;
    let deduction = non_negative(medical - floor) * rates.medical.rate;

    DeductionOutcome {
        amount: deduction,
        detail: DeductionDetail {
            category: DeductionCategory::Medical,
            amount: medical,
            rate: rates.medical.rate,
            deduction,
            description: format!(
                "{} of spending above {} of total salary ({} won)",
                format_rate(rates.medical.rate),
                format_rate(rates.medical.min_expense_rate),
                format_won(floor)
            ),
        },
    }
}

/// Flat-rate education deduction. No per-dependent caps are modelled.
pub fn education_deduction(rates: &RateTable, education: Decimal) -> DeductionOutcome {
    let deduction = education * rates.education.rate;

    DeductionOutcome {
        amount: deduction,
        detail: DeductionDetail {
            category: DeductionCategory::Education,
            amount: education,
            rate: rates.education.rate,
            deduction,
            description: format!(
                "{} of education spending, no limit applied",
                format_rate(rates.education.rate)
            ),
        },
    }
}

/// Two-tier donation deduction on the donation capped at a share of earned
/// income (not gross salary).
pub fn donation_deduction(
    rates: &RateTable,
    earned_income: Decimal,
    donation: Decimal,
) -> DeductionOutcome {
    let d = &rates.donation;
    let limit = non_negative(earned_income * d.income_limit_rate);
    let deductible = donation.min(limit);

    let deduction = if deductible <= d.high_amount_threshold {
        deductible * d.rate
    } else {
        d.high_amount_threshold * d.rate + (deductible - d.high_amount_threshold) * d.high_amount_rate
    };

    DeductionOutcome {
        amount: deduction,
        detail: DeductionDetail {
            category: DeductionCategory::Donation,
            amount: donation,
            rate: d.rate,
            deduction,
            description: format!(
                "Capped at {} of earned income ({} won); {} up to {} won, {} above",
                format_rate(d.income_limit_rate),
                format_won(limit),
                format_rate(d.rate),
                format_won(d.high_amount_threshold),
                format_rate(d.high_amount_rate)
            ),
        },
    }
}

/// Deduction for rental housing loan repayments, capped.
pub fn housing_deduction(rates: &RateTable, housing_fund: Decimal) -> DeductionOutcome {
    let h = &rates.housing;
    let deduction = (housing_fund * h.rental_loan_rate).min(h.rental_loan_limit);

    DeductionOutcome {
        amount: deduction,
        detail: DeductionDetail {
            category: DeductionCategory::Housing,
            amount: housing_fund,
            rate: h.rental_loan_rate,
            deduction,
            description: format!(
                "{} of rental loan repayments (limit {} won)",
                format_rate(h.rental_loan_rate),
                format_won(h.rental_loan_limit)
            ),
        },
    }
}

/// Tax credit (not an income deduction) on pension savings contributions.
pub fn pension_tax_credit(
    rates: &RateTable,
    total_salary: Decimal,
    pension_savings: Decimal,
) -> DeductionOutcome {
    let limit = rates.pension.contribution_limit;
    let rate = rates.pension_credit_rate(total_salary);
    let credit = pension_savings.min(limit) * rate;

    DeductionOutcome {
        amount: credit,
        detail: DeductionDetail {
            category: DeductionCategory::PensionSavings,
            amount: pension_savings,
            rate,
            deduction: credit,
            description: format!(
                "{} tax credit on contributions (limit {} won)",
                format_rate(rate),
                format_won(limit)
            ),
        },
    }
}

/// Replaces a credit below the standard tax credit with the standard amount.
///
/// Applied once, after the pension credit; the two are never added together.
pub fn apply_standard_credit(rates: &RateTable, credit: Decimal) -> Decimal {
    if credit < rates.standard_tax_credit {
        rates.standard_tax_credit
    } else {
        credit
    }
}
