use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the progressive income tax schedule.
///
/// A bracket covers `(min_income, max_income]`; the last bracket leaves
/// `max_income` unset. Tax for a base inside the bracket is
/// `base * tax_rate - progressive_deduction`, where the deduction is
/// precomputed so the schedule is continuous at every boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    #[serde(default)]
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
    pub progressive_deduction: Decimal,
}

impl TaxBracket {
    pub fn contains(&self, base: Decimal) -> bool {
        base > self.min_income && self.max_income.is_none_or(|max| base <= max)
    }

    pub fn tax_for(&self, base: Decimal) -> Decimal {
        base * self.tax_rate - self.progressive_deduction
    }
}

/// Finds the bracket covering `base` in a contiguous schedule.
pub fn find_bracket(brackets: &[TaxBracket], base: Decimal) -> Option<&TaxBracket> {
    brackets.iter().find(|b| b.contains(base))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::rates::TAX_BRACKETS_2024;

    #[test]
    fn contains_excludes_lower_bound() {
        let bracket = TAX_BRACKETS_2024[1];

        assert!(!bracket.contains(dec!(14000000)));
        assert!(bracket.contains(dec!(14000000.01)));
        assert!(bracket.contains(dec!(50000000)));
    }

    #[test]
    fn unbounded_bracket_contains_everything_above_min() {
        let top = TAX_BRACKETS_2024[7];

        assert!(top.contains(dec!(1000000000000)));
    }

    #[test]
    fn find_bracket_matches_exactly_one_row() {
        for base in [dec!(1), dec!(14000000), dec!(88000000.5), dec!(999999999999)] {
            let matches = TAX_BRACKETS_2024.iter().filter(|b| b.contains(base)).count();

            assert_eq!(matches, 1, "base {base} should match one bracket");
        }
    }

    #[test]
    fn find_bracket_returns_none_for_zero() {
        assert_eq!(find_bracket(&TAX_BRACKETS_2024, dec!(0)), None);
    }

    #[test]
    fn tax_for_applies_progressive_deduction() {
        let bracket = TAX_BRACKETS_2024[1];

        // 33,250,000 * 0.15 - 1,260,000
        assert_eq!(bracket.tax_for(dec!(33250000)), dec!(3727500));
    }
}
