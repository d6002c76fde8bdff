//! # Coverage Scorer
//!
//! Scores how broad and how deep a quote's coverage is.
//!
//! # Formula
//!
//! ```text
//! breadth = (canonical kinds present / 7) * 60
//! depth   = (sum of min(limit / 1_000_000, 1) over canonical kinds with limit > 0) / 7 * 40
//! score   = min(breadth + depth, 100)
//! ```
//!
//! Keys outside the canonical set are ignored: they neither add to nor
//! subtract from the score.

use crate::domain::entities::normalized_quote::CoverageTerms;
use crate::domain::value_objects::{CoverageKind, Score};
use std::collections::BTreeMap;

/// Share of the score awarded for breadth.
pub const BREADTH_WEIGHT: f64 = 60.0;

/// Share of the score awarded for depth.
pub const DEPTH_WEIGHT: f64 = 40.0;

/// Limit at which a coverage counts as fully deep.
pub const FULL_DEPTH_LIMIT: f64 = 1_000_000.0;

/// Pure coverage breadth and depth scorer.
///
/// # Examples
///
/// ```
/// use policy_quote_engine::domain::entities::CoverageTerms;
/// use policy_quote_engine::domain::services::CoverageScorer;
/// use policy_quote_engine::domain::value_objects::CoverageKind;
/// use std::collections::BTreeMap;
///
/// let scorer = CoverageScorer::new();
/// assert_eq!(scorer.score(&BTreeMap::new()).get(), 0.0);
///
/// let full: BTreeMap<_, _> = CoverageKind::CANONICAL
///     .into_iter()
///     .map(|kind| (kind, CoverageTerms::new(2_000_000.0, true)))
///     .collect();
/// assert_eq!(scorer.score(&full).get(), 100.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CoverageScorer;

impl CoverageScorer {
    /// Creates a coverage scorer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Scores a coverage mapping into `[0, 100]`.
    #[must_use]
    pub fn score(&self, coverages: &BTreeMap<CoverageKind, CoverageTerms>) -> Score {
        let canonical_count = CoverageKind::CANONICAL.len() as f64;

        let (present, depth_sum) = CoverageKind::CANONICAL
            .iter()
            .filter_map(|kind| coverages.get(kind))
            .fold((0usize, 0.0_f64), |(present, depth), terms| {
                let contribution = if terms.limit > 0.0 {
                    (terms.limit / FULL_DEPTH_LIMIT).min(1.0)
                } else {
                    0.0
                };
                (present + 1, depth + contribution)
            });

        let breadth = present as f64 / canonical_count * BREADTH_WEIGHT;
        let depth = depth_sum / canonical_count * DEPTH_WEIGHT;
        Score::new((breadth + depth).min(Score::MAX))
    }
}
