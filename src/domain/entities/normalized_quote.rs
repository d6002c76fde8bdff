//! # Normalized Quote Entity
//!
//! The canonical, scored form of a [`RawQuote`] used for comparison.
//!
//! A normalized quote is created once per raw quote per comparison and is
//! immutable afterwards. Any defaulting applied during normalization is
//! recorded as a [`NormalizationWarning`] on the quote itself.
//!
//! # Examples
//!
//! ```
//! use policy_quote_engine::domain::entities::normalized_quote::NormalizedQuoteBuilder;
//! use policy_quote_engine::domain::value_objects::{Premium, Score};
//!
//! let quote = NormalizedQuoteBuilder::new("Zurich", Premium::from_f64(1200.0).unwrap())
//!     .coverage_score(Score::new(80.0))
//!     .value_score(Score::new(100.0))
//!     .build();
//!
//! assert_eq!(quote.provider(), "Zurich");
//! assert!(!quote.has_warnings());
//! ```

use crate::domain::entities::provider::ProviderInfo;
use crate::domain::entities::raw_quote::RawQuote;
use crate::domain::value_objects::{CoverageKind, Premium, Score};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Coverage terms after coercion.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct CoverageTerms {
    /// Coverage limit in currency units, `0` when absent or unusable.
    pub limit: f64,
    /// Whether the offer states the coverage as included.
    pub included: bool,
}

impl CoverageTerms {
    /// Creates coverage terms.
    #[must_use]
    pub fn new(limit: f64, included: bool) -> Self {
        Self { limit, included }
    }
}

/// Soft warning attached when normalization had to default a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NormalizationWarning {
    /// The provider name was empty.
    MissingProvider,
    /// A numeric field held a value that is not a number.
    NonNumericField {
        /// Field name (`annual_premium`, `coverages.liability.limit`, ...).
        field: String,
    },
    /// A numeric field was negative or not finite.
    InvalidNumber {
        /// Field name.
        field: String,
    },
    /// Neither premium field produced a positive amount.
    MissingPremium,
    /// A monthly premium at or above the threshold was read as annual.
    MonthlyPremiumReclassified {
        /// The value found in the monthly field.
        stated_monthly: Premium,
    },
    /// A coverage entry had an unusable shape.
    MalformedCoverage {
        /// Coverage key as supplied.
        coverage: String,
    },
    /// The `coverages` field was not a mapping and was read as empty.
    MalformedCoverageSet,
    /// Two coverage keys resolved to the same canonical kind.
    DuplicateCoverage {
        /// Coverage key that replaced an earlier one.
        coverage: String,
    },
}

impl fmt::Display for NormalizationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingProvider => write!(f, "provider name missing"),
            Self::NonNumericField { field } => write!(f, "{field} is not numeric, using 0"),
            Self::InvalidNumber { field } => {
                write!(f, "{field} is negative or not finite, using 0")
            }
            Self::MissingPremium => write!(f, "no usable premium, annual premium set to 0"),
            Self::MonthlyPremiumReclassified { stated_monthly } => write!(
                f,
                "monthly premium {stated_monthly} treated as an annual figure"
            ),
            Self::MalformedCoverage { coverage } => {
                write!(f, "coverage '{coverage}' has an unusable shape")
            }
            Self::MalformedCoverageSet => write!(f, "coverages is not a mapping, using none"),
            Self::DuplicateCoverage { coverage } => {
                write!(f, "coverage '{coverage}' duplicates an earlier entry")
            }
        }
    }
}

/// A canonicalized, scored quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NormalizedQuote {
    /// Position of the originating raw quote in the input batch.
    source_index: usize,
    /// Provider display name as supplied.
    provider: String,
    /// Directory rating, `"N/A"` when unknown.
    provider_rating: String,
    /// Directory market share, `0` when unknown.
    market_share: f64,
    /// Annual premium, never negative.
    annual_premium: Premium,
    /// Monthly premium.
    monthly_premium: Premium,
    /// Deductible.
    deductible: Premium,
    /// Coverages keyed by kind.
    coverages: BTreeMap<CoverageKind, CoverageTerms>,
    /// Breadth and depth of coverage, `[0, 100]`.
    coverage_score: Score,
    /// Price-adjusted value, `[0, 100]`.
    value_score: Score,
    /// Defaults applied while normalizing.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<NormalizationWarning>,
    /// The originating raw quote.
    raw_data: RawQuote,
}

impl NormalizedQuote {
    /// Position of the originating raw quote in the input batch.
    #[must_use]
    pub fn source_index(&self) -> usize {
        self.source_index
    }

    /// Provider display name.
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Provider rating label.
    #[must_use]
    pub fn provider_rating(&self) -> &str {
        &self.provider_rating
    }

    /// Provider market share fraction.
    #[must_use]
    pub fn market_share(&self) -> f64 {
        self.market_share
    }

    /// Annual premium.
    #[must_use]
    pub fn annual_premium(&self) -> Premium {
        self.annual_premium
    }

    /// Monthly premium.
    #[must_use]
    pub fn monthly_premium(&self) -> Premium {
        self.monthly_premium
    }

    /// Deductible.
    #[must_use]
    pub fn deductible(&self) -> Premium {
        self.deductible
    }

    /// Coverages keyed by kind.
    #[must_use]
    pub fn coverages(&self) -> &BTreeMap<CoverageKind, CoverageTerms> {
        &self.coverages
    }

    /// Coverage score.
    #[must_use]
    pub fn coverage_score(&self) -> Score {
        self.coverage_score
    }

    /// Value score.
    #[must_use]
    pub fn value_score(&self) -> Score {
        self.value_score
    }

    /// Soft warnings recorded during normalization.
    #[must_use]
    pub fn warnings(&self) -> &[NormalizationWarning] {
        &self.warnings
    }

    /// Returns true if any default was applied.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// The originating raw quote.
    #[must_use]
    pub fn raw_data(&self) -> &RawQuote {
        &self.raw_data
    }
}

impl fmt::Display for NormalizedQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NormalizedQuote({} annual={} coverage={} value={})",
            self.provider, self.annual_premium, self.coverage_score, self.value_score
        )
    }
}

/// Builder for [`NormalizedQuote`].
#[derive(Debug, Clone)]
pub struct NormalizedQuoteBuilder {
    quote: NormalizedQuote,
}

impl NormalizedQuoteBuilder {
    /// Starts a quote for a provider and annual premium.
    ///
    /// The monthly premium defaults to one twelfth of the annual premium.
    #[must_use]
    pub fn new(provider: impl Into<String>, annual_premium: Premium) -> Self {
        let provider = provider.into();
        let info = ProviderInfo::unknown();
        Self {
            quote: NormalizedQuote {
                source_index: 0,
                raw_data: RawQuote::new(provider.clone()),
                provider,
                provider_rating: info.rating().to_string(),
                market_share: info.market_share(),
                annual_premium,
                monthly_premium: annual_premium.monthly(),
                deductible: Premium::ZERO,
                coverages: BTreeMap::new(),
                coverage_score: Score::ZERO,
                value_score: Score::ZERO,
                warnings: Vec::new(),
            },
        }
    }

    /// Sets the source index.
    #[must_use]
    pub fn source_index(mut self, index: usize) -> Self {
        self.quote.source_index = index;
        self
    }

    /// Sets rating and market share from a directory entry.
    #[must_use]
    pub fn provider_info(mut self, info: &ProviderInfo) -> Self {
        self.quote.provider_rating = info.rating().to_string();
        self.quote.market_share = info.market_share();
        self
    }

    /// Sets the monthly premium.
    #[must_use]
    pub fn monthly_premium(mut self, monthly: Premium) -> Self {
        self.quote.monthly_premium = monthly;
        self
    }

    /// Sets the deductible.
    #[must_use]
    pub fn deductible(mut self, deductible: Premium) -> Self {
        self.quote.deductible = deductible;
        self
    }

    /// Sets the coverages.
    #[must_use]
    pub fn coverages(mut self, coverages: BTreeMap<CoverageKind, CoverageTerms>) -> Self {
        self.quote.coverages = coverages;
        self
    }

    /// Sets the coverage score.
    #[must_use]
    pub fn coverage_score(mut self, score: Score) -> Self {
        self.quote.coverage_score = score;
        self
    }

    /// Sets the value score.
    #[must_use]
    pub fn value_score(mut self, score: Score) -> Self {
        self.quote.value_score = score;
        self
    }

    /// Sets the soft warnings.
    #[must_use]
    pub fn warnings(mut self, warnings: Vec<NormalizationWarning>) -> Self {
        self.quote.warnings = warnings;
        self
    }

    /// Sets the originating raw quote.
    #[must_use]
    pub fn raw_data(mut self, raw: RawQuote) -> Self {
        self.quote.raw_data = raw;
        self
    }

    /// Builds the quote.
    #[must_use]
    pub fn build(self) -> NormalizedQuote {
        self.quote
    }
}
