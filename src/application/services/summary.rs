//! # Summary Aggregator
//!
//! Batch statistics over normalized quotes.
//!
//! The median is index based and kept that way for output compatibility:
//! premiums are sorted ascending and the element at index `len / 2` is
//! taken, so an even-length batch yields the upper of the two middle
//! values rather than their average.
//!
//! ```text
//! [100, 200, 300]       -> median 200
//! [100, 200, 300, 400]  -> median 300
//! ```

use crate::domain::entities::NormalizedQuote;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{CheckedArithmetic, Premium, Score, checked_mean};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Price range over a batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PriceRange {
    /// Lowest annual premium.
    pub min: Premium,
    /// Highest annual premium.
    pub max: Premium,
    /// Element at index `len / 2` of the ascending premiums.
    pub median: Premium,
}

/// Batch statistics for a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ComparisonSummary {
    /// Annual premium range.
    pub price_range: PriceRange,
    /// Mean annual premium.
    pub average_price: Premium,
    /// Mean coverage score.
    pub average_coverage: Score,
    /// Highest minus lowest annual premium.
    pub max_savings: Premium,
    /// Number of distinct provider names.
    pub provider_count: usize,
}

/// Computes [`ComparisonSummary`] values.
///
/// # Examples
///
/// ```
/// use policy_quote_engine::application::services::SummaryAggregator;
/// use policy_quote_engine::domain::entities::NormalizedQuoteBuilder;
/// use policy_quote_engine::domain::value_objects::Premium;
///
/// let quotes: Vec<_> = [100.0, 200.0, 300.0, 400.0]
///     .iter()
///     .map(|p| NormalizedQuoteBuilder::new("P", Premium::from_f64(*p).unwrap()).build())
///     .collect();
///
/// let summary = SummaryAggregator::new().summarize(&quotes).unwrap();
/// assert_eq!(summary.price_range.median.to_f64(), 300.0);
/// assert_eq!(summary.max_savings.to_f64(), 300.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryAggregator;

impl SummaryAggregator {
    /// Creates a summary aggregator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Summarizes a non-empty batch.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyQuoteSet` if `quotes` is empty.
    pub fn summarize(&self, quotes: &[NormalizedQuote]) -> DomainResult<ComparisonSummary> {
        if quotes.is_empty() {
            return Err(DomainError::EmptyQuoteSet);
        }

        let mut premiums: Vec<Premium> = quotes.iter().map(NormalizedQuote::annual_premium).collect();
        premiums.sort();

        let (min, max, median) = match (
            premiums.first(),
            premiums.last(),
            premiums.get(premiums.len() / 2),
        ) {
            (Some(min), Some(max), Some(median)) => (*min, *max, *median),
            _ => return Err(DomainError::EmptyQuoteSet),
        };

        let amounts: Vec<Decimal> = premiums.iter().map(Premium::get).collect();
        let average_price = Premium::new(checked_mean(&amounts)?)?;
        let max_savings = Premium::new(max.get().safe_sub(min.get())?)?;

        let coverage_total: f64 = quotes.iter().map(|q| q.coverage_score().get()).sum();
        let average_coverage = Score::new(coverage_total / quotes.len() as f64);

        let provider_count = quotes
            .iter()
            .map(NormalizedQuote::provider)
            .collect::<BTreeSet<_>>()
            .len();

        Ok(ComparisonSummary {
            price_range: PriceRange { min, max, median },
            average_price,
            average_coverage,
            max_savings,
            provider_count,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::NormalizedQuoteBuilder;

    fn quote(provider: &str, premium: f64, coverage: f64) -> NormalizedQuote {
        NormalizedQuoteBuilder::new(provider, Premium::from_f64(premium).unwrap())
            .coverage_score(Score::new(coverage))
            .build()
    }

    fn premiums(values: &[f64]) -> Vec<NormalizedQuote> {
        values.iter().map(|p| quote("P", *p, 0.0)).collect()
    }

    #[test]
    fn empty_batch_fails() {
        let result = SummaryAggregator::new().summarize(&[]);
        assert_eq!(result, Err(DomainError::EmptyQuoteSet));
    }

    #[test]
    fn median_of_odd_length() {
        let summary = SummaryAggregator::new()
            .summarize(&premiums(&[300.0, 100.0, 200.0]))
            .unwrap();
        assert_eq!(summary.price_range.median, Premium::from_f64(200.0).unwrap());
    }

    #[test]
    fn median_of_even_length_takes_index_half() {
        let summary = SummaryAggregator::new()
            .summarize(&premiums(&[400.0, 100.0, 300.0, 200.0]))
            .unwrap();
        assert_eq!(summary.price_range.median, Premium::from_f64(300.0).unwrap());
        assert_eq!(summary.price_range.min, Premium::from_f64(100.0).unwrap());
        assert_eq!(summary.price_range.max, Premium::from_f64(400.0).unwrap());
    }

    #[test]
    fn single_quote_has_no_savings() {
        let summary = SummaryAggregator::new()
            .summarize(&premiums(&[960.0]))
            .unwrap();
        assert!(summary.max_savings.is_zero());
        assert_eq!(summary.average_price, Premium::from_f64(960.0).unwrap());
    }

    #[test]
    fn averages_and_savings() {
        let quotes = vec![
            quote("Zurich", 1200.0, 60.0),
            quote("AXA", 960.0, 0.0),
            quote("Generali", 2500.0, 30.0),
        ];
        let summary = SummaryAggregator::new().summarize(&quotes).unwrap();
        assert_eq!(summary.max_savings, Premium::from_f64(1540.0).unwrap());
        assert_eq!(summary.average_price.get().round_dp(2), Decimal::new(155333, 2));
        assert!((summary.average_coverage.get() - 30.0).abs() < 1e-9);
        assert_eq!(summary.provider_count, 3);
    }

    #[test]
    fn average_of_premiums_near_decimal_range() {
        let large = Premium::new(Decimal::from_i128_with_scale(
            50_000_000_000_000_000_000_000_000_000,
            0,
        ))
        .unwrap();
        let quotes = vec![
            NormalizedQuoteBuilder::new("A", large).build(),
            NormalizedQuoteBuilder::new("B", large).build(),
        ];
        let summary = SummaryAggregator::new().summarize(&quotes).unwrap();
        assert_eq!(summary.average_price, large);
        assert!(summary.max_savings.is_zero());
    }

    #[test]
    fn provider_count_is_distinct() {
        let quotes = vec![
            quote("AXA", 900.0, 0.0),
            quote("AXA", 950.0, 0.0),
            quote("Zurich", 1000.0, 0.0),
        ];
        let summary = SummaryAggregator::new().summarize(&quotes).unwrap();
        assert_eq!(summary.provider_count, 2);
    }

    #[test]
    fn serializes_price_range_as_numbers() {
        let summary = SummaryAggregator::new()
            .summarize(&premiums(&[960.0, 2500.0]))
            .unwrap();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            json.get("price_range").unwrap(),
            &serde_json::json!({ "min": 960.0, "max": 2500.0, "median": 2500.0 })
        );
    }
}
