//! # Recommendation Engine
//!
//! Picks the cheapest, best-coverage and best-value quotes.
//!
//! Each pick is a single linear scan that replaces the current best only on
//! a strict improvement, so the first quote in input order wins every tie
//! regardless of any later sorting.

use crate::domain::entities::NormalizedQuote;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{Premium, ReasonCode};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// One recommended quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Recommendation {
    /// Provider display name.
    pub provider: String,
    /// Position of the quote in the input batch.
    pub source_index: usize,
    /// Why it was picked.
    pub reason: ReasonCode,
    /// The metric the pick was based on: premium, coverage or value score.
    pub metric_value: f64,
    /// Annual premium of the picked quote.
    pub annual_premium: Premium,
}

impl Recommendation {
    fn from_quote(quote: &NormalizedQuote, reason: ReasonCode, metric_value: f64) -> Self {
        Self {
            provider: quote.provider().to_string(),
            source_index: quote.source_index(),
            reason,
            metric_value,
            annual_premium: quote.annual_premium(),
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({})",
            self.reason,
            self.provider,
            self.reason.description()
        )
    }
}

/// The three recommendations of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Recommendations {
    /// Lowest annual premium.
    pub cheapest: Recommendation,
    /// Highest coverage score.
    pub best_coverage: Recommendation,
    /// Highest value score.
    pub best_value: Recommendation,
}

/// Selects recommendations from normalized quotes.
///
/// # Examples
///
/// ```
/// use policy_quote_engine::application::services::RecommendationEngine;
/// use policy_quote_engine::domain::entities::NormalizedQuoteBuilder;
/// use policy_quote_engine::domain::value_objects::Premium;
///
/// let quotes = vec![
///     NormalizedQuoteBuilder::new("A", Premium::from_f64(900.0).unwrap()).build(),
///     NormalizedQuoteBuilder::new("B", Premium::from_f64(900.0).unwrap()).source_index(1).build(),
/// ];
/// let picks = RecommendationEngine::new().recommend(&quotes).unwrap();
/// assert_eq!(picks.cheapest.provider, "A");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationEngine;

impl RecommendationEngine {
    /// Creates a recommendation engine.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Computes the three recommendations.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyQuoteSet` if `quotes` is empty.
    pub fn recommend(&self, quotes: &[NormalizedQuote]) -> DomainResult<Recommendations> {
        let cheapest = first_extreme(quotes, NormalizedQuote::annual_premium, Ordering::Less)
            .ok_or(DomainError::EmptyQuoteSet)?;
        let best_coverage = first_extreme(
            quotes,
            |q| q.coverage_score().get(),
            Ordering::Greater,
        )
        .ok_or(DomainError::EmptyQuoteSet)?;
        let best_value = first_extreme(quotes, |q| q.value_score().get(), Ordering::Greater)
            .ok_or(DomainError::EmptyQuoteSet)?;

        Ok(Recommendations {
            cheapest: Recommendation::from_quote(
                cheapest,
                ReasonCode::Cheapest,
                cheapest.annual_premium().to_f64(),
            ),
            best_coverage: Recommendation::from_quote(
                best_coverage,
                ReasonCode::BestCoverage,
                best_coverage.coverage_score().get(),
            ),
            best_value: Recommendation::from_quote(
                best_value,
                ReasonCode::BestValue,
                best_value.value_score().get(),
            ),
        })
    }
}

/// Returns the first quote whose metric compares `preferred` against every
/// earlier best; ties keep the earlier quote.
fn first_extreme<T, F>(
    quotes: &[NormalizedQuote],
    metric: F,
    preferred: Ordering,
) -> Option<&NormalizedQuote>
where
    T: PartialOrd,
    F: Fn(&NormalizedQuote) -> T,
{
    let mut iter = quotes.iter();
    let first = iter.next()?;
    let (best, _) = iter.fold((first, metric(first)), |(best, best_metric), candidate| {
        let candidate_metric = metric(candidate);
        if candidate_metric.partial_cmp(&best_metric) == Some(preferred) {
            (candidate, candidate_metric)
        } else {
            (best, best_metric)
        }
    });
    Some(best)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::NormalizedQuoteBuilder;
    use crate::domain::value_objects::Score;

    fn quote(index: usize, provider: &str, premium: f64, coverage: f64, value: f64) -> NormalizedQuote {
        NormalizedQuoteBuilder::new(provider, Premium::from_f64(premium).unwrap())
            .source_index(index)
            .coverage_score(Score::new(coverage))
            .value_score(Score::new(value))
            .build()
    }

    #[test]
    fn empty_batch_fails() {
        assert_eq!(
            RecommendationEngine::new().recommend(&[]),
            Err(DomainError::EmptyQuoteSet)
        );
    }

    #[test]
    fn picks_each_extreme() {
        let quotes = vec![
            quote(0, "Zurich", 1200.0, 70.0, 90.0),
            quote(1, "AXA", 960.0, 10.0, 20.0),
            quote(2, "Generali", 2500.0, 80.0, 64.0),
        ];
        let picks = RecommendationEngine::new().recommend(&quotes).unwrap();

        assert_eq!(picks.cheapest.provider, "AXA");
        assert_eq!(picks.cheapest.reason, ReasonCode::Cheapest);
        assert!((picks.cheapest.metric_value - 960.0).abs() < f64::EPSILON);

        assert_eq!(picks.best_coverage.provider, "Generali");
        assert!((picks.best_coverage.metric_value - 80.0).abs() < f64::EPSILON);

        assert_eq!(picks.best_value.provider, "Zurich");
        assert_eq!(picks.best_value.source_index, 0);
        assert_eq!(picks.best_value.annual_premium, Premium::from_f64(1200.0).unwrap());
    }

    #[test]
    fn ties_keep_first_occurrence() {
        let quotes = vec![
            quote(0, "First", 800.0, 50.0, 50.0),
            quote(1, "Second", 800.0, 50.0, 50.0),
            quote(2, "Third", 800.0, 50.0, 50.0),
        ];
        let picks = RecommendationEngine::new().recommend(&quotes).unwrap();
        assert_eq!(picks.cheapest.provider, "First");
        assert_eq!(picks.best_coverage.provider, "First");
        assert_eq!(picks.best_value.provider, "First");
    }

    #[test]
    fn later_strict_improvement_wins() {
        let quotes = vec![
            quote(0, "A", 900.0, 40.0, 40.0),
            quote(1, "B", 800.0, 40.0, 41.0),
            quote(2, "C", 800.0, 45.0, 41.0),
        ];
        let picks = RecommendationEngine::new().recommend(&quotes).unwrap();
        assert_eq!(picks.cheapest.provider, "B");
        assert_eq!(picks.best_coverage.provider, "C");
        assert_eq!(picks.best_value.provider, "B");
    }

    #[test]
    fn display_includes_reason() {
        let quotes = vec![quote(0, "Helvetia", 700.0, 0.0, 0.0)];
        let picks = RecommendationEngine::new().recommend(&quotes).unwrap();
        assert_eq!(
            picks.cheapest.to_string(),
            "CHEAPEST: Helvetia (lowest annual premium)"
        );
    }
}
