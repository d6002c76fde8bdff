//! # Ranking Strategy
//!
//! Strategies for ordering normalized quotes in a comparison result.
//!
//! This module provides the [`RankingStrategy`] trait and two
//! implementations. Both use a stable sort, so quotes that compare equal
//! keep their input order.
//!
//! | Strategy | Order |
//! |----------|-------|
//! | [`ValueScoreRanking`] | value score, highest first (default) |
//! | [`PremiumRanking`] | annual premium, lowest first |

use crate::domain::entities::NormalizedQuote;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A normalized quote with its position in the ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RankedQuote {
    /// The rank (1 = best).
    pub rank: usize,
    /// The ranked quote.
    #[serde(flatten)]
    pub quote: NormalizedQuote,
}

impl RankedQuote {
    /// Creates a new ranked quote.
    #[must_use]
    pub fn new(rank: usize, quote: NormalizedQuote) -> Self {
        Self { rank, quote }
    }

    /// Returns true if this quote is ranked first.
    #[must_use]
    pub fn is_best(&self) -> bool {
        self.rank == 1
    }
}

impl fmt::Display for RankedQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.rank, self.quote)
    }
}

/// Trait for ranking strategies.
///
/// Implementations return every input quote exactly once, best first, with
/// consecutive 1-based ranks.
pub trait RankingStrategy: Send + Sync + fmt::Debug {
    /// Ranks the given quotes.
    fn rank(&self, quotes: &[NormalizedQuote]) -> Vec<RankedQuote>;

    /// Returns the name of this ranking strategy.
    fn name(&self) -> &'static str;
}

/// Orders quotes by value score, highest first.
///
/// # Examples
///
/// ```
/// use policy_quote_engine::application::services::{RankingStrategy, ValueScoreRanking};
/// use policy_quote_engine::domain::entities::NormalizedQuoteBuilder;
/// use policy_quote_engine::domain::value_objects::{Premium, Score};
///
/// let quotes = vec![
///     NormalizedQuoteBuilder::new("Low", Premium::ZERO).value_score(Score::new(10.0)).build(),
///     NormalizedQuoteBuilder::new("High", Premium::ZERO).value_score(Score::new(90.0)).build(),
/// ];
/// let ranked = ValueScoreRanking::new().rank(&quotes);
/// assert_eq!(ranked[0].quote.provider(), "High");
/// assert_eq!(ranked[1].rank, 2);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueScoreRanking;

impl ValueScoreRanking {
    /// Creates a new value score ranking.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RankingStrategy for ValueScoreRanking {
    fn rank(&self, quotes: &[NormalizedQuote]) -> Vec<RankedQuote> {
        stable_rank(quotes, |a, b| {
            b.value_score()
                .partial_cmp(&a.value_score())
                .unwrap_or(Ordering::Equal)
        })
    }

    fn name(&self) -> &'static str {
        "ValueScore"
    }
}

/// Orders quotes by annual premium, lowest first.
#[derive(Debug, Clone, Copy, Default)]
pub struct PremiumRanking;

impl PremiumRanking {
    /// Creates a new premium ranking.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RankingStrategy for PremiumRanking {
    fn rank(&self, quotes: &[NormalizedQuote]) -> Vec<RankedQuote> {
        stable_rank(quotes, |a, b| a.annual_premium().cmp(&b.annual_premium()))
    }

    fn name(&self) -> &'static str {
        "Premium"
    }
}

fn stable_rank<F>(quotes: &[NormalizedQuote], compare: F) -> Vec<RankedQuote>
where
    F: FnMut(&NormalizedQuote, &NormalizedQuote) -> Ordering,
{
    let mut ordered = quotes.to_vec();
    // `sort_by` is stable
    ordered.sort_by(compare);
    ordered
        .into_iter()
        .enumerate()
        .map(|(position, quote)| RankedQuote::new(position + 1, quote))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::entities::NormalizedQuoteBuilder;
    use crate::domain::value_objects::{Premium, Score};

    fn quote(index: usize, premium: f64, value: f64) -> NormalizedQuote {
        NormalizedQuoteBuilder::new(format!("P{index}"), Premium::from_f64(premium).unwrap())
            .source_index(index)
            .value_score(Score::new(value))
            .build()
    }

    fn indices(ranked: &[RankedQuote]) -> Vec<usize> {
        ranked.iter().map(|r| r.quote.source_index()).collect()
    }

    #[test]
    fn value_ranking_descending() {
        let quotes = vec![quote(0, 1000.0, 20.0), quote(1, 1000.0, 80.0), quote(2, 1000.0, 50.0)];
        let ranked = ValueScoreRanking::new().rank(&quotes);
        assert_eq!(indices(&ranked), vec![1, 2, 0]);
        assert!(ranked[0].is_best());
        assert_eq!(ranked.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn value_ranking_is_stable() {
        let quotes = vec![
            quote(0, 1000.0, 50.0),
            quote(1, 900.0, 70.0),
            quote(2, 800.0, 50.0),
            quote(3, 700.0, 50.0),
        ];
        let ranked = ValueScoreRanking::new().rank(&quotes);
        assert_eq!(indices(&ranked), vec![1, 0, 2, 3]);
    }

    #[test]
    fn premium_ranking_ascending_and_stable() {
        let quotes = vec![
            quote(0, 1200.0, 0.0),
            quote(1, 960.0, 0.0),
            quote(2, 1200.0, 0.0),
        ];
        let ranked = PremiumRanking::new().rank(&quotes);
        assert_eq!(indices(&ranked), vec![1, 0, 2]);
    }

    #[test]
    fn empty_input_ranks_nothing() {
        assert!(ValueScoreRanking::new().rank(&[]).is_empty());
        assert!(PremiumRanking::new().rank(&[]).is_empty());
    }

    #[test]
    fn strategy_names() {
        assert_eq!(ValueScoreRanking::new().name(), "ValueScore");
        assert_eq!(PremiumRanking::new().name(), "Premium");
    }

    #[test]
    fn ranked_quote_serializes_flat() {
        let ranked = ValueScoreRanking::new().rank(&[quote(0, 1000.0, 42.0)]);
        let json = serde_json::to_value(&ranked[0]).unwrap();
        assert_eq!(json["rank"], 1);
        assert_eq!(json["provider"], "P0");
        assert_eq!(json["value_score"], 42.0);
    }
}
