//! # Comparison Report Builder
//!
//! Orchestrates a full quote comparison.
//!
//! [`ComparisonReportBuilder`] runs the pipeline in a fixed order and
//! assembles a [`ComparisonResult`]:
//!
//! ```text
//! raw quotes ─► normalize ─┬─► summarize
//!                          ├─► recommend
//!                          ├─► compliance
//!                          └─► rank ─► ComparisonResult
//! ```
//!
//! An empty input fails with [`ApplicationError::EmptyInput`] before any
//! work is done; no partial result is ever returned. Every step is a pure
//! function of its input, so the builder can be shared across threads.
//!
//! # Examples
//!
//! ```
//! use policy_quote_engine::application::services::ComparisonReportBuilder;
//! use policy_quote_engine::domain::entities::{ProviderDirectory, RawQuote};
//! use std::sync::Arc;
//!
//! let builder = ComparisonReportBuilder::with_defaults(Arc::new(ProviderDirectory::swiss_default()));
//! let quotes = vec![
//!     RawQuote::new("Zurich").with_annual_premium(1200.0),
//!     RawQuote::new("AXA").with_monthly_premium(80.0),
//! ];
//!
//! let result = builder.build(&quotes, None).unwrap();
//! assert_eq!(result.total_quotes, 2);
//! assert_eq!(result.recommendations.cheapest.provider, "AXA");
//! ```

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::compliance::{
    ComplianceChecker, ComplianceReport, DEFAULT_REGULATOR,
};
use crate::application::services::ranking_strategy::{
    RankedQuote, RankingStrategy, ValueScoreRanking,
};
use crate::application::services::recommendation::{RecommendationEngine, Recommendations};
use crate::application::services::summary::{ComparisonSummary, SummaryAggregator};
use crate::domain::entities::{ProviderDirectory, RawQuote};
use crate::domain::services::QuoteNormalizer;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::info;

/// Opaque client profile passed through to the result.
pub type ClientProfile = Map<String, Value>;

/// Currency label used when none is configured.
pub const DEFAULT_CURRENCY: &str = "CHF";

/// Configuration for a comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonConfig {
    /// Regulator label attached to the compliance report.
    pub regulator: String,
    /// Currency label for premiums.
    pub currency: String,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            regulator: DEFAULT_REGULATOR.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl ComparisonConfig {
    /// Sets the regulator label.
    #[must_use]
    pub fn with_regulator(mut self, regulator: impl Into<String>) -> Self {
        self.regulator = regulator.into();
        self
    }

    /// Sets the currency label.
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }
}

/// The outcome of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ComparisonResult {
    /// Client profile as supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_profile: Option<ClientProfile>,
    /// Number of input quotes.
    pub total_quotes: usize,
    /// Currency label for premiums.
    pub currency: String,
    /// Ranked quotes, best first.
    pub quotes: Vec<RankedQuote>,
    /// Batch statistics.
    pub summary: ComparisonSummary,
    /// Cheapest, best-coverage and best-value picks.
    pub recommendations: Recommendations,
    /// Advisory compliance report.
    pub compliance: ComplianceReport,
}

impl ComparisonResult {
    /// Returns the top ranked quote.
    #[must_use]
    pub fn best(&self) -> Option<&RankedQuote> {
        self.quotes.first()
    }
}

/// Builds comparison results from raw quotes.
#[derive(Debug, Clone)]
pub struct ComparisonReportBuilder {
    normalizer: QuoteNormalizer,
    ranking_strategy: Arc<dyn RankingStrategy>,
    summary: SummaryAggregator,
    recommendations: RecommendationEngine,
    compliance: ComplianceChecker,
    config: ComparisonConfig,
}

impl ComparisonReportBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(
        normalizer: QuoteNormalizer,
        ranking_strategy: Arc<dyn RankingStrategy>,
        config: ComparisonConfig,
    ) -> Self {
        Self {
            normalizer,
            ranking_strategy,
            summary: SummaryAggregator::new(),
            recommendations: RecommendationEngine::new(),
            compliance: ComplianceChecker::with_regulator(config.regulator.clone()),
            config,
        }
    }

    /// Creates a builder with value-score ranking and default configuration.
    #[must_use]
    pub fn with_defaults(directory: Arc<ProviderDirectory>) -> Self {
        Self::new(
            QuoteNormalizer::new(directory),
            Arc::new(ValueScoreRanking::new()),
            ComparisonConfig::default(),
        )
    }

    /// Runs the comparison.
    ///
    /// # Errors
    ///
    /// - `ApplicationError::EmptyInput` if `raw_quotes` is empty
    /// - `ApplicationError::Domain` if premium aggregation overflows
    pub fn build(
        &self,
        raw_quotes: &[RawQuote],
        client_profile: Option<ClientProfile>,
    ) -> ApplicationResult<ComparisonResult> {
        if raw_quotes.is_empty() {
            return Err(ApplicationError::EmptyInput);
        }

        let normalized = self.normalizer.normalize_batch(raw_quotes);
        let summary = self.summary.summarize(&normalized)?;
        let recommendations = self.recommendations.recommend(&normalized)?;
        let compliance = self.compliance.check(&normalized);
        let quotes = self.ranking_strategy.rank(&normalized);

        info!(
            quote_count = quotes.len(),
            compliant = compliance.compliant,
            issues = compliance.issues.len(),
            ranking = self.ranking_strategy.name(),
            "comparison completed"
        );

        Ok(ComparisonResult {
            client_profile,
            total_quotes: raw_quotes.len(),
            currency: self.config.currency.clone(),
            quotes,
            summary,
            recommendations,
            compliance,
        })
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    /// Returns the ranking strategy name.
    #[must_use]
    pub fn ranking_strategy_name(&self) -> &'static str {
        self.ranking_strategy.name()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::application::services::ranking_strategy::PremiumRanking;
    use crate::domain::value_objects::Premium;
    use serde_json::json;

    fn builder() -> ComparisonReportBuilder {
        ComparisonReportBuilder::with_defaults(Arc::new(ProviderDirectory::swiss_default()))
    }

    fn sample_quotes() -> Vec<RawQuote> {
        vec![
            RawQuote::new("Zurich")
                .with_annual_premium(1200.0)
                .with_coverage("liability", 5_000_000.0, true)
                .with_coverage("comprehensive", 1_000_000.0, true)
                .with_coverage("legal_protection", 300_000.0, true)
                .with_coverage("roadside_assistance", 500_000.0, true),
            RawQuote::new("AXA").with_monthly_premium(80.0),
            RawQuote::new("Generali").with_annual_premium(2500.0),
        ]
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = builder().build(&[], None).unwrap_err();
        assert!(err.is_empty_input());
    }

    #[test]
    fn end_to_end_recommendations() {
        let result = builder().build(&sample_quotes(), None).unwrap();

        assert_eq!(result.total_quotes, 3);
        assert_eq!(result.quotes.len(), 3);
        assert_eq!(result.recommendations.cheapest.provider, "AXA");
        assert_eq!(result.recommendations.best_coverage.provider, "Zurich");
        assert_eq!(result.summary.price_range.min, Premium::from_f64(960.0).unwrap());
        assert_eq!(result.summary.price_range.max, Premium::from_f64(2500.0).unwrap());
        assert_eq!(result.currency, "CHF");
        assert_eq!(result.compliance.regulator, "FINMA");
    }

    #[test]
    fn quotes_sorted_by_value_descending() {
        let result = builder().build(&sample_quotes(), None).unwrap();
        let scores: Vec<f64> = result
            .quotes
            .iter()
            .map(|r| r.quote.value_score().get())
            .collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(result.best().unwrap().quote.provider(), "Zurich");
    }

    #[test]
    fn zero_scores_keep_input_order() {
        let result = builder().build(&sample_quotes(), None).unwrap();
        // AXA and Generali have no coverages and therefore value score 0
        assert_eq!(result.quotes[1].quote.provider(), "AXA");
        assert_eq!(result.quotes[2].quote.provider(), "Generali");
    }

    #[test]
    fn client_profile_passes_through() {
        let profile = json!({ "name": "Muster AG", "employees": 12 })
            .as_object()
            .cloned()
            .unwrap();
        let result = builder().build(&sample_quotes(), Some(profile.clone())).unwrap();
        assert_eq!(result.client_profile, Some(profile));
    }

    #[test]
    fn custom_strategy_and_config() {
        let builder = ComparisonReportBuilder::new(
            QuoteNormalizer::new(Arc::new(ProviderDirectory::swiss_default())),
            Arc::new(PremiumRanking::new()),
            ComparisonConfig::default()
                .with_regulator("BaFin")
                .with_currency("EUR"),
        );
        let result = builder.build(&sample_quotes(), None).unwrap();
        assert_eq!(builder.ranking_strategy_name(), "Premium");
        assert_eq!(result.quotes[0].quote.provider(), "AXA");
        assert_eq!(result.compliance.regulator, "BaFin");
        assert_eq!(result.currency, "EUR");
        assert_eq!(builder.config().currency, "EUR");
    }

    #[test]
    fn result_serializes_to_json() {
        let result = builder().build(&sample_quotes(), None).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["total_quotes"], 3);
        assert_eq!(json["recommendations"]["cheapest"]["reason"], "CHEAPEST");
        assert_eq!(json["summary"]["price_range"]["min"], 960.0);
        assert!(json.get("client_profile").is_none());
    }
}
