//! Scoring engine (SCA protocol)
//!
//! Pure functions over the score models. Totals are never clamped: a cup
//! drowning in defects can legitimately compute below zero, and corrupted
//! issue sequences propagate their arithmetic result rather than being
//! repaired here.

use rust_decimal::Decimal;

use crate::models::{ConsistencyAttribute, CupScore, DefectType, LegacyCupScore};
use crate::validation::round2;

/// Legacy aggregate consistency default when the stored record never
/// carried the field
fn legacy_consistency_default() -> Decimal {
    Decimal::TEN
}

/// Derive a consistency sub-score from issue flags: 10 minus 2 per
/// flagged cup. Not clamped; a corrupted over-long sequence yields a
/// negative contribution.
pub fn consistency_score(issues: &[bool]) -> Decimal {
    let flagged = issues.iter().filter(|flag| **flag).count() as i64;
    Decimal::from(10 - 2 * flagged)
}

/// Point deduction for defective cups: 2 per taint, 4 per fault.
/// Widened arithmetic: imported counts bypass the clamping setters and
/// may sit anywhere in the i32 range.
pub fn defect_deduction(cup: &CupScore) -> Decimal {
    Decimal::from(i64::from(cup.taint_cups) * 2 + i64::from(cup.fault_cups) * 4)
}

/// Total score for a current-schema cup: the seven attribute scores plus
/// the three derived consistency scores, minus the defect deduction,
/// rounded to two decimals
pub fn compute_total(cup: &CupScore) -> Decimal {
    let component_sum = cup.fragrance
        + cup.flavor
        + cup.aftertaste
        + cup.acidity
        + cup.body
        + cup.balance
        + cup.overall
        + consistency_score(cup.issues(ConsistencyAttribute::Uniformity))
        + consistency_score(cup.issues(ConsistencyAttribute::CleanCup))
        + consistency_score(cup.issues(ConsistencyAttribute::Sweetness));

    round2(component_sum - defect_deduction(cup))
}

/// Total score for a legacy-schema cup: the seven attribute scores plus
/// the raw aggregate consistency scores, minus the single-type defect
/// deduction
pub fn compute_total_legacy(cup: &LegacyCupScore) -> Decimal {
    let component_sum = cup.fragrance
        + cup.flavor
        + cup.aftertaste
        + cup.acidity
        + cup.body
        + cup.balance
        + cup.overall
        + cup.uniformity.unwrap_or_else(legacy_consistency_default)
        + cup.clean_cup.unwrap_or_else(legacy_consistency_default)
        + cup.sweetness.unwrap_or_else(legacy_consistency_default);

    let per_cup: i64 = match cup.defect_type {
        DefectType::None => 0,
        DefectType::Taint => 2,
        DefectType::Fault => 4,
    };

    round2(component_sum - Decimal::from(i64::from(cup.defect_count) * per_cup))
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::models::ScoreAttribute;
    use proptest::prelude::*;

    /// Valid attribute score: 0.00 to 10.00 in 0.25 steps
    fn score_strategy() -> impl Strategy<Value = Decimal> {
        (0u32..=40u32).prop_map(|quarters| Decimal::new(i64::from(quarters) * 25, 2))
    }

    fn issues_strategy() -> impl Strategy<Value = Vec<bool>> {
        proptest::collection::vec(any::<bool>(), 5)
    }

    fn cup_strategy() -> impl Strategy<Value = CupScore> {
        (
            proptest::collection::vec(score_strategy(), 7),
            issues_strategy(),
            issues_strategy(),
            issues_strategy(),
            0i32..=5i32,
            0i32..=5i32,
        )
            .prop_map(|(scores, uniformity, clean_cup, sweetness, taint, fault)| {
                let mut cup = CupScore::default();
                for (attr, score) in ScoreAttribute::ALL.into_iter().zip(scores) {
                    cup.set_score(attr, score);
                }
                cup.uniformity_issues = uniformity;
                cup.clean_cup_issues = clean_cup;
                cup.sweetness_issues = sweetness;
                cup.taint_cups = taint;
                cup.fault_cups = fault;
                cup
            })
    }

    proptest! {
        /// Totals are deterministic and pure
        #[test]
        fn prop_total_deterministic(cup in cup_strategy()) {
            let before = cup.clone();
            let first = compute_total(&cup);
            let second = compute_total(&cup);
            prop_assert_eq!(first, second);
            prop_assert_eq!(cup, before);
        }

        /// With valid inputs the total stays within [-30, 100]
        #[test]
        fn prop_total_bounded_for_valid_cups(cup in cup_strategy()) {
            let total = compute_total(&cup);
            prop_assert!(total <= Decimal::from(100));
            prop_assert!(total >= Decimal::from(-30));
        }

        /// The total decomposes into component sum minus deduction
        #[test]
        fn prop_total_decomposition(cup in cup_strategy()) {
            let components = cup.fragrance
                + cup.flavor
                + cup.aftertaste
                + cup.acidity
                + cup.body
                + cup.balance
                + cup.overall
                + consistency_score(&cup.uniformity_issues)
                + consistency_score(&cup.clean_cup_issues)
                + consistency_score(&cup.sweetness_issues);
            prop_assert_eq!(compute_total(&cup), round2(components - defect_deduction(&cup)));
        }

        /// Consistency scores move in steps of 2 per flagged cup
        #[test]
        fn prop_consistency_score_formula(issues in issues_strategy()) {
            let flagged = issues.iter().filter(|f| **f).count() as i64;
            prop_assert_eq!(consistency_score(&issues), Decimal::from(10 - 2 * flagged));
        }
    }
}
