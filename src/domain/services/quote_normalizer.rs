//! # Quote Normalizer
//!
//! Converts a [`RawQuote`] into a scored [`NormalizedQuote`].
//!
//! # Premium derivation
//!
//! ```text
//! annual_premium > 0                 -> annual = annual_premium, monthly = annual / 12
//! monthly_premium >= 100             -> read as annual: annual = value, monthly = value / 12
//! 0 < monthly_premium < 100          -> annual = monthly * 12, monthly = value
//! otherwise                          -> annual = monthly = 0 (MissingPremium warning)
//! ```
//!
//! The monthly threshold is a compatibility heuristic for offers that put an
//! annual figure in the monthly field. It misclassifies genuine monthly
//! premiums of 100 or more, so every reclassification is recorded as a
//! [`NormalizationWarning::MonthlyPremiumReclassified`] on the quote.
//!
//! # Coercion
//!
//! Numbers and numeric strings (with `'`, `_` or spaces as digit grouping)
//! are accepted. Anything else, including negative or non-finite values,
//! becomes `0` with a soft warning. Normalization never fails.

use crate::domain::entities::normalized_quote::{
    CoverageTerms, NormalizationWarning, NormalizedQuote, NormalizedQuoteBuilder,
};
use crate::domain::entities::provider::ProviderDirectory;
use crate::domain::entities::raw_quote::RawQuote;
use crate::domain::services::coverage_scorer::CoverageScorer;
use crate::domain::services::value_scorer::ValueScorer;
use crate::domain::value_objects::{CoverageKind, Premium, ProviderKey};
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Monthly premiums at or above this amount are read as annual figures.
pub const MONTHLY_AS_ANNUAL_THRESHOLD: Decimal = Decimal::ONE_HUNDRED;

/// Display name used when a quote has no provider.
pub const UNKNOWN_PROVIDER: &str = "Unknown";

/// Normalizes raw quotes against a provider directory.
///
/// # Examples
///
/// ```
/// use policy_quote_engine::domain::entities::{ProviderDirectory, RawQuote};
/// use policy_quote_engine::domain::services::QuoteNormalizer;
/// use std::sync::Arc;
///
/// let normalizer = QuoteNormalizer::new(Arc::new(ProviderDirectory::swiss_default()));
/// let quote = normalizer.normalize(&RawQuote::new("AXA").with_monthly_premium(80.0));
///
/// assert_eq!(quote.annual_premium().to_f64(), 960.0);
/// assert_eq!(quote.provider_rating(), "A+");
/// ```
#[derive(Debug, Clone)]
pub struct QuoteNormalizer {
    directory: Arc<ProviderDirectory>,
    coverage_scorer: CoverageScorer,
    value_scorer: ValueScorer,
}

impl QuoteNormalizer {
    /// Creates a normalizer over a provider directory.
    #[must_use]
    pub fn new(directory: Arc<ProviderDirectory>) -> Self {
        Self {
            directory,
            coverage_scorer: CoverageScorer::new(),
            value_scorer: ValueScorer::new(),
        }
    }

    /// Returns the provider directory in use.
    #[must_use]
    pub fn directory(&self) -> &ProviderDirectory {
        &self.directory
    }

    /// Normalizes a single raw quote.
    #[must_use]
    pub fn normalize(&self, raw: &RawQuote) -> NormalizedQuote {
        self.normalize_at(0, raw)
    }

    /// Normalizes a batch, preserving input order and recording positions.
    #[must_use]
    pub fn normalize_batch(&self, raws: &[RawQuote]) -> Vec<NormalizedQuote> {
        raws.iter()
            .enumerate()
            .map(|(index, raw)| self.normalize_at(index, raw))
            .collect()
    }

    /// Normalizes a raw quote found at `source_index` in its batch.
    #[must_use]
    pub fn normalize_at(&self, source_index: usize, raw: &RawQuote) -> NormalizedQuote {
        let mut warnings = Vec::new();

        let provider = if raw.provider().trim().is_empty() {
            warnings.push(NormalizationWarning::MissingProvider);
            UNKNOWN_PROVIDER.to_string()
        } else {
            raw.provider().to_string()
        };
        let info = self.directory.lookup(&ProviderKey::from_name(&provider));

        let (annual_premium, monthly_premium) = derive_premiums(raw, &mut warnings);
        let deductible =
            read_premium("deductible", raw.deductible(), &mut warnings).unwrap_or(Premium::ZERO);
        if raw.has_malformed_coverages() {
            warnings.push(NormalizationWarning::MalformedCoverageSet);
        }
        let coverages = read_coverages(raw.coverages(), &mut warnings);

        let coverage_score = self.coverage_scorer.score(&coverages);
        let value_score = self.value_scorer.score(annual_premium, coverage_score);

        for warning in &warnings {
            tracing::warn!(
                provider = %provider,
                source_index,
                warning = %warning,
                "quote normalized with defaults"
            );
        }
        tracing::debug!(
            provider = %provider,
            source_index,
            annual_premium = %annual_premium,
            coverage_score = coverage_score.get(),
            value_score = value_score.get(),
            "quote normalized"
        );

        NormalizedQuoteBuilder::new(provider, annual_premium)
            .source_index(source_index)
            .provider_info(&info)
            .monthly_premium(monthly_premium)
            .deductible(deductible)
            .coverages(coverages)
            .coverage_score(coverage_score)
            .value_score(value_score)
            .warnings(warnings)
            .raw_data(raw.clone())
            .build()
    }
}

/// Derives `(annual, monthly)` premiums from the raw premium fields.
fn derive_premiums(
    raw: &RawQuote,
    warnings: &mut Vec<NormalizationWarning>,
) -> (Premium, Premium) {
    let annual = read_premium("annual_premium", raw.annual_premium(), warnings);
    let monthly = read_premium("monthly_premium", raw.monthly_premium(), warnings);

    if let Some(annual) = annual.filter(|p| !p.is_zero()) {
        return (annual, annual.monthly());
    }

    match monthly.filter(|p| !p.is_zero()) {
        Some(stated) if stated.get() >= MONTHLY_AS_ANNUAL_THRESHOLD => {
            warnings.push(NormalizationWarning::MonthlyPremiumReclassified {
                stated_monthly: stated,
            });
            (stated, stated.monthly())
        }
        Some(stated) => (stated.annualized(), stated),
        None => {
            warnings.push(NormalizationWarning::MissingPremium);
            (Premium::ZERO, Premium::ZERO)
        }
    }
}

/// Reads a coverage mapping into typed terms.
fn read_coverages(
    raw: &BTreeMap<String, Value>,
    warnings: &mut Vec<NormalizationWarning>,
) -> BTreeMap<CoverageKind, CoverageTerms> {
    let mut coverages = BTreeMap::new();

    for (key, value) in raw {
        let terms = match value {
            Value::Object(fields) => {
                let field = format!("coverages.{key}.limit");
                let limit = read_number(&field, fields.get("limit"), warnings).unwrap_or(0.0);
                let included = match fields.get("included") {
                    None | Some(Value::Null) => true,
                    Some(Value::Bool(flag)) => *flag,
                    Some(_) => {
                        warnings.push(NormalizationWarning::MalformedCoverage {
                            coverage: key.clone(),
                        });
                        true
                    }
                };
                CoverageTerms::new(limit, included)
            }
            Value::Number(_) | Value::String(_) => {
                let field = format!("coverages.{key}");
                CoverageTerms::new(read_number(&field, Some(value), warnings).unwrap_or(0.0), true)
            }
            Value::Bool(flag) => CoverageTerms::new(0.0, *flag),
            Value::Null | Value::Array(_) => {
                warnings.push(NormalizationWarning::MalformedCoverage {
                    coverage: key.clone(),
                });
                CoverageTerms::new(0.0, true)
            }
        };

        if coverages.insert(CoverageKind::from(key.as_str()), terms).is_some() {
            warnings.push(NormalizationWarning::DuplicateCoverage {
                coverage: key.clone(),
            });
        }
    }

    coverages
}

/// Reads an optional amount as a [`Premium`].
///
/// Returns `None` when the field is absent or had to be defaulted.
fn read_premium(
    field: &str,
    value: Option<&Value>,
    warnings: &mut Vec<NormalizationWarning>,
) -> Option<Premium> {
    let amount = read_number(field, value, warnings)?;
    let premium = Premium::from_f64(amount);
    if premium.is_none() {
        warnings.push(NormalizationWarning::InvalidNumber {
            field: field.to_string(),
        });
    }
    premium
}

/// Reads an optional non-negative finite number.
///
/// Returns `None` when the field is absent or had to be defaulted; a
/// warning is pushed in the latter case.
fn read_number(
    field: &str,
    value: Option<&Value>,
    warnings: &mut Vec<NormalizationWarning>,
) -> Option<f64> {
    let number = match value? {
        Value::Null => return None,
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_grouped_number(s),
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    };

    match number {
        None => {
            warnings.push(NormalizationWarning::NonNumericField {
                field: field.to_string(),
            });
            None
        }
        Some(n) if !n.is_finite() || n < 0.0 => {
            warnings.push(NormalizationWarning::InvalidNumber {
                field: field.to_string(),
            });
            None
        }
        Some(n) => Some(n),
    }
}

/// Parses `"1'200.50"`, `"1 200"` or `"1_200"` style numeric strings.
fn parse_grouped_number(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !matches!(c, '\'' | '_' | ' '))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalizer() -> QuoteNormalizer {
        QuoteNormalizer::new(Arc::new(ProviderDirectory::swiss_default()))
    }

    fn premium(amount: f64) -> Premium {
        Premium::from_f64(amount).unwrap()
    }

    mod premiums {
        use super::*;

        #[test]
        fn annual_premium_wins() {
            let quote = normalizer().normalize(
                &RawQuote::new("Zurich")
                    .with_annual_premium(1200.0)
                    .with_monthly_premium(80.0),
            );
            assert_eq!(quote.annual_premium(), premium(1200.0));
            assert_eq!(quote.monthly_premium(), premium(100.0));
            assert!(!quote.has_warnings());
        }

        #[test]
        fn monthly_premium_is_annualized() {
            let quote = normalizer().normalize(&RawQuote::new("AXA").with_monthly_premium(80.0));
            assert_eq!(quote.annual_premium(), premium(960.0));
            assert_eq!(quote.monthly_premium(), premium(80.0));
        }

        #[test]
        fn zero_annual_falls_back_to_monthly() {
            let quote = normalizer().normalize(
                &RawQuote::new("AXA")
                    .with_annual_premium(0.0)
                    .with_monthly_premium(50.0),
            );
            assert_eq!(quote.annual_premium(), premium(600.0));
        }

        #[test]
        fn oversized_monthly_is_read_as_annual() {
            let quote =
                normalizer().normalize(&RawQuote::new("Helvetia").with_monthly_premium(1500.0));
            assert_eq!(quote.annual_premium(), premium(1500.0));
            assert_eq!(quote.monthly_premium(), premium(125.0));
            assert_eq!(
                quote.warnings(),
                &[NormalizationWarning::MonthlyPremiumReclassified {
                    stated_monthly: premium(1500.0)
                }]
            );
        }

        #[test]
        fn threshold_boundary_is_inclusive() {
            let at = normalizer().normalize(&RawQuote::new("A").with_monthly_premium(100.0));
            assert_eq!(at.annual_premium(), premium(100.0));

            let below = normalizer().normalize(&RawQuote::new("A").with_monthly_premium(99.5));
            assert_eq!(below.annual_premium(), premium(1194.0));
        }

        #[test]
        fn missing_premium_is_zero_with_warning() {
            let quote = normalizer().normalize(&RawQuote::new("Baloise"));
            assert!(quote.annual_premium().is_zero());
            assert!(quote.monthly_premium().is_zero());
            assert_eq!(quote.warnings(), &[NormalizationWarning::MissingPremium]);
        }

        #[test]
        fn non_numeric_premium_is_coerced() {
            let quote = normalizer().normalize(
                &RawQuote::new("Generali").with_raw_annual_premium(json!("on request")),
            );
            assert!(quote.annual_premium().is_zero());
            assert_eq!(
                quote.warnings()[0],
                NormalizationWarning::NonNumericField {
                    field: "annual_premium".to_string()
                }
            );
            assert!(quote.warnings().contains(&NormalizationWarning::MissingPremium));
        }

        #[test]
        fn negative_premium_never_goes_negative() {
            let quote = normalizer().normalize(
                &RawQuote::new("Vaudoise")
                    .with_annual_premium(-400.0)
                    .with_monthly_premium(-30.0),
            );
            assert!(quote.annual_premium().is_zero());
            assert!(quote.warnings().contains(&NormalizationWarning::InvalidNumber {
                field: "annual_premium".to_string()
            }));
        }

        #[test]
        fn grouped_numeric_strings_parse() {
            let quote = normalizer()
                .normalize(&RawQuote::new("Mobiliar").with_raw_annual_premium(json!("1'250.50")));
            assert_eq!(quote.annual_premium(), premium(1250.5));
            assert!(!quote.has_warnings());
        }
    }

    mod providers {
        use super::*;

        #[test]
        fn known_provider_gets_rating() {
            let quote = normalizer()
                .normalize(&RawQuote::new("Vaudoise Versicherung").with_annual_premium(900.0));
            assert_eq!(quote.provider(), "Vaudoise Versicherung");
            assert_eq!(quote.provider_rating(), "A-");
            assert!((quote.market_share() - 0.04).abs() < f64::EPSILON);
        }

        #[test]
        fn unknown_provider_defaults() {
            let quote =
                normalizer().normalize(&RawQuote::new("Acme Insurance").with_annual_premium(900.0));
            assert_eq!(quote.provider_rating(), "N/A");
            assert!(quote.market_share().abs() < f64::EPSILON);
        }

        #[test]
        fn blank_provider_is_unknown() {
            let quote = normalizer().normalize(&RawQuote::new("  ").with_annual_premium(900.0));
            assert_eq!(quote.provider(), UNKNOWN_PROVIDER);
            assert_eq!(quote.warnings(), &[NormalizationWarning::MissingProvider]);
        }

        #[test]
        fn injected_directory_is_used() {
            let directory = ProviderDirectory::new()
                .with_provider(
                    "acme",
                    crate::domain::entities::ProviderInfo::new("Acme", "BBB", 0.01),
                )
                .unwrap();
            let quote = QuoteNormalizer::new(Arc::new(directory))
                .normalize(&RawQuote::new("ACME").with_annual_premium(900.0));
            assert_eq!(quote.provider_rating(), "BBB");
        }
    }

    mod coverages {
        use super::*;

        #[test]
        fn object_entries_are_read() {
            let quote = normalizer().normalize(
                &RawQuote::new("Zurich")
                    .with_annual_premium(1200.0)
                    .with_coverage("liability", 5_000_000.0, true)
                    .with_coverage("partial", 20_000.0, false),
            );
            let terms = quote.coverages()[&CoverageKind::Partial];
            assert!((terms.limit - 20_000.0).abs() < f64::EPSILON);
            assert!(!terms.included);
            assert!(quote.coverage_score().get() > 0.0);
        }

        #[test]
        fn bare_number_and_bool_shapes() {
            let quote = normalizer().normalize(
                &RawQuote::new("Zurich")
                    .with_raw_coverage("liability", json!(2_000_000))
                    .with_raw_coverage("roadside_assistance", json!(true)),
            );
            let liability = quote.coverages()[&CoverageKind::Liability];
            assert!((liability.limit - 2_000_000.0).abs() < f64::EPSILON);
            let roadside = quote.coverages()[&CoverageKind::RoadsideAssistance];
            assert!(roadside.included);
            assert!(roadside.limit.abs() < f64::EPSILON);
        }

        #[test]
        fn non_numeric_limit_is_zero_with_warning() {
            let quote = normalizer().normalize(
                &RawQuote::new("Zurich")
                    .with_annual_premium(1200.0)
                    .with_raw_coverage("liability", json!({ "limit": "unlimited" })),
            );
            let terms = quote.coverages()[&CoverageKind::Liability];
            assert!(terms.limit.abs() < f64::EPSILON);
            assert_eq!(
                quote.warnings(),
                &[NormalizationWarning::NonNumericField {
                    field: "coverages.liability.limit".to_string()
                }]
            );
        }

        #[test]
        fn malformed_entry_is_kept_with_warning() {
            let quote = normalizer().normalize(
                &RawQuote::new("Zurich")
                    .with_annual_premium(1200.0)
                    .with_raw_coverage("partial", json!([1, 2])),
            );
            assert!(quote.coverages().contains_key(&CoverageKind::Partial));
            assert_eq!(
                quote.warnings(),
                &[NormalizationWarning::MalformedCoverage {
                    coverage: "partial".to_string()
                }]
            );
        }

        #[test]
        fn duplicate_canonical_keys_warn() {
            let quote = normalizer().normalize(
                &RawQuote::new("Zurich")
                    .with_annual_premium(1200.0)
                    .with_coverage("Liability", 1.0, true)
                    .with_coverage("liability", 2.0, true),
            );
            assert_eq!(quote.coverages().len(), 1);
            assert!(quote.warnings().iter().any(|w| matches!(
                w,
                NormalizationWarning::DuplicateCoverage { .. }
            )));
        }

        #[test]
        fn non_mapping_coverages_warn_and_score_zero() {
            let raw = RawQuote::from_value(
                0,
                &json!({ "provider": "AXA", "annual_premium": 900, "coverages": null }),
            )
            .unwrap();
            let quote = normalizer().normalize(&raw);
            assert!(quote.coverages().is_empty());
            assert!(quote.coverage_score().get().abs() < f64::EPSILON);
            assert_eq!(quote.warnings(), &[NormalizationWarning::MalformedCoverageSet]);
        }

        #[test]
        fn unknown_kinds_are_kept_but_not_scored() {
            let quote = normalizer().normalize(
                &RawQuote::new("Zurich")
                    .with_annual_premium(1200.0)
                    .with_coverage("pet_insurance", 5_000.0, true),
            );
            assert!(quote.coverages().contains_key(&CoverageKind::Other(
                "pet_insurance".to_string()
            )));
            assert!(quote.coverage_score().get().abs() < f64::EPSILON);
        }
    }

    #[test]
    fn batch_records_source_index() {
        let quotes = normalizer().normalize_batch(&[
            RawQuote::new("A").with_annual_premium(500.0),
            RawQuote::new("B").with_annual_premium(700.0),
        ]);
        assert_eq!(quotes[0].source_index(), 0);
        assert_eq!(quotes[1].source_index(), 1);
        assert_eq!(quotes[1].raw_data().provider(), "B");
    }

    #[test]
    fn deductible_is_read() {
        let quote = normalizer().normalize(
            &RawQuote::new("AXA")
                .with_annual_premium(900.0)
                .with_deductible(500.0),
        );
        assert_eq!(quote.deductible(), premium(500.0));
    }

    #[test]
    fn parse_grouped_number_variants() {
        assert_eq!(parse_grouped_number("1 200"), Some(1200.0));
        assert_eq!(parse_grouped_number("1_200.5"), Some(1200.5));
        assert_eq!(parse_grouped_number("   "), None);
        assert_eq!(parse_grouped_number("CHF 900"), None);
    }
}
