//! Boundary validation for score fields
//!
//! Every mutator on the score model funnels through these helpers so that
//! out-of-range input is massaged rather than rejected (SCA protocol
//! ranges, 0.25 stepping, canonical two-decimal representation).

use rust_decimal::{Decimal, RoundingStrategy};

/// Increment applied by the score steppers (SCA protocol quarter points)
pub const SCORE_STEP: Decimal = Decimal::from_parts(25, 0, 0, false, 2);

/// Minimum number of cups in a session
pub const MIN_CUPS: usize = 1;

/// Maximum number of cups in a session
pub const MAX_CUPS: usize = 30;

/// Number of reference cups in a flight; issue sequences and defect
/// counts are always relative to these five cups
pub const CUPS_PER_FLIGHT: usize = 5;

/// Round to two decimal places using standard (midpoint away from zero)
/// rounding, keeping the canonical two-decimal scale
pub fn round2(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Clamp a decimal score to the [0.00, 10.00] domain with the canonical
/// two-decimal representation
pub fn clamp_score(value: Decimal) -> Decimal {
    round2(value.clamp(Decimal::ZERO, Decimal::TEN))
}

/// Step a score by +/- 0.25, rounding to two decimals before clamping
pub fn step_score(current: Decimal, up: bool) -> Decimal {
    let next = if up {
        current + SCORE_STEP
    } else {
        current - SCORE_STEP
    };
    clamp_score(round2(next))
}

/// Clamp a 1-5 descriptive level (roast level, intensities, body level)
pub fn clamp_level(value: i32) -> i32 {
    value.clamp(1, 5)
}

/// Clamp a defective-cup count to [0, 5]
pub fn clamp_cup_count(value: i32) -> i32 {
    value.clamp(0, CUPS_PER_FLIGHT as i32)
}

/// Clamp a session cup count to [1, 30]
pub fn clamp_session_cups(value: usize) -> usize {
    value.clamp(MIN_CUPS, MAX_CUPS)
}
