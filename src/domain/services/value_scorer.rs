//! # Value Scorer
//!
//! Scores coverage quality relative to price.
//!
//! # Formula
//!
//! ```text
//! price_factor = 2000 / max(annual_premium, 100)
//! score        = min(coverage_score / 100 * price_factor * 100, 100)
//! ```
//!
//! The premium floor keeps near-zero premiums from inflating the score
//! without bound. For a fixed coverage score the result never increases as
//! the premium increases.

use crate::domain::value_objects::{Premium, Score};

/// Reference annual premium at which price neither helps nor hurts.
pub const REFERENCE_PREMIUM: f64 = 2000.0;

/// Lowest premium used in the price factor.
pub const PREMIUM_FLOOR: f64 = 100.0;

/// Pure price-adjusted value scorer.
///
/// # Examples
///
/// ```
/// use policy_quote_engine::domain::services::ValueScorer;
/// use policy_quote_engine::domain::value_objects::{Premium, Score};
///
/// let scorer = ValueScorer::new();
/// let at_reference = scorer.score(Premium::from_f64(2000.0).unwrap(), Score::new(50.0));
/// assert_eq!(at_reference.get(), 50.0);
///
/// let expensive = scorer.score(Premium::from_f64(4000.0).unwrap(), Score::new(50.0));
/// assert_eq!(expensive.get(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueScorer;

impl ValueScorer {
    /// Creates a value scorer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Scores an annual premium against a coverage score into `[0, 100]`.
    #[must_use]
    pub fn score(&self, annual_premium: Premium, coverage_score: Score) -> Score {
        let price_factor = REFERENCE_PREMIUM / annual_premium.to_f64().max(PREMIUM_FLOOR);
        let raw = coverage_score.get() / 100.0 * price_factor * 100.0;
        Score::new(raw.min(Score::MAX))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn premium(amount: f64) -> Premium {
        Premium::from_f64(amount).unwrap()
    }

    #[test]
    fn zero_coverage_scores_zero() {
        let score = ValueScorer::new().score(premium(500.0), Score::ZERO);
        assert!(score.get().abs() < f64::EPSILON);
    }

    #[test]
    fn cheap_premium_caps_at_hundred() {
        let score = ValueScorer::new().score(premium(500.0), Score::new(40.0));
        assert!((score.get() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn premium_below_floor_uses_floor() {
        let scorer = ValueScorer::new();
        let below = scorer.score(premium(10.0), Score::new(2.0));
        let at_floor = scorer.score(premium(100.0), Score::new(2.0));
        assert!((below.get() - at_floor.get()).abs() < f64::EPSILON);
        assert!((at_floor.get() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn zero_premium_uses_floor() {
        let score = ValueScorer::new().score(Premium::ZERO, Score::new(1.0));
        assert!((score.get() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn higher_premium_never_scores_higher() {
        let scorer = ValueScorer::new();
        let coverage = Score::new(73.0);
        let mut previous = f64::INFINITY;
        for amount in [0.0, 50.0, 100.0, 960.0, 1200.0, 2500.0, 10_000.0, 1e9] {
            let current = scorer.score(premium(amount), coverage).get();
            assert!(current <= previous, "{amount} scored {current} > {previous}");
            previous = current;
        }
    }
}
