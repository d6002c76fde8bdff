//! # Compliance Checker
//!
//! Advisory heuristics over normalized quotes.
//!
//! Three rules are evaluated independently for every quote:
//!
//! | Rule | Triggers when |
//! |------|---------------|
//! | [`ComplianceRule::InsufficientCoverage`] | coverage score `< 30` |
//! | [`ComplianceRule::LowPremium`] | annual premium `< 300` |
//! | [`ComplianceRule::HighPremium`] | annual premium `> 10000` |
//!
//! Issues are listed in input quote order, then in the rule order above.
//! The report is heuristic only and carries an advisory disclaimer; it is
//! not a legal or regulatory determination.

use crate::domain::entities::NormalizedQuote;
use crate::domain::value_objects::ComplianceRule;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Regulator label used when none is configured.
pub const DEFAULT_REGULATOR: &str = "FINMA";

/// Coverage score below which a quote is flagged.
pub const MIN_COVERAGE_SCORE: f64 = 30.0;

/// Disclaimer attached to every report.
pub const ADVISORY_NOTICE: &str = "Heuristic advisory check only; not a legal or regulatory determination.";

fn low_premium_threshold() -> Decimal {
    Decimal::from(300)
}

fn high_premium_threshold() -> Decimal {
    Decimal::from(10_000)
}

/// A single flagged rule for one quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ComplianceIssue {
    /// Provider display name.
    pub provider: String,
    /// Position of the quote in the input batch.
    pub source_index: usize,
    /// Rule that triggered.
    pub rule: ComplianceRule,
    /// Human-readable issue text.
    pub issue: String,
}

/// Aggregated compliance outcome for a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ComplianceReport {
    /// True iff no issue was raised for any quote.
    pub compliant: bool,
    /// Issues in input order, then rule order.
    pub issues: Vec<ComplianceIssue>,
    /// Static regulator label.
    pub regulator: String,
    /// Disclaimer text.
    pub advisory: String,
}

impl ComplianceReport {
    /// Returns the issues raised for the quote at `source_index`.
    pub fn issues_for(&self, source_index: usize) -> impl Iterator<Item = &ComplianceIssue> {
        self.issues
            .iter()
            .filter(move |issue| issue.source_index == source_index)
    }
}

/// Applies the advisory rules.
///
/// # Examples
///
/// ```
/// use policy_quote_engine::application::services::ComplianceChecker;
/// use policy_quote_engine::domain::entities::NormalizedQuoteBuilder;
/// use policy_quote_engine::domain::value_objects::{Premium, Score};
///
/// let quote = NormalizedQuoteBuilder::new("Zurich", Premium::from_f64(1200.0).unwrap())
///     .coverage_score(Score::new(80.0))
///     .build();
/// let report = ComplianceChecker::new().check(&[quote]);
/// assert!(report.compliant);
/// assert_eq!(report.regulator, "FINMA");
/// ```
#[derive(Debug, Clone)]
pub struct ComplianceChecker {
    regulator: String,
}

impl Default for ComplianceChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl ComplianceChecker {
    /// Creates a checker labelled with the default regulator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_regulator(DEFAULT_REGULATOR)
    }

    /// Creates a checker with a custom regulator label.
    #[must_use]
    pub fn with_regulator(regulator: impl Into<String>) -> Self {
        Self {
            regulator: regulator.into(),
        }
    }

    /// Returns the regulator label.
    #[inline]
    #[must_use]
    pub fn regulator(&self) -> &str {
        &self.regulator
    }

    /// Checks every quote and aggregates the issues.
    #[must_use]
    pub fn check(&self, quotes: &[NormalizedQuote]) -> ComplianceReport {
        let issues: Vec<ComplianceIssue> = quotes
            .iter()
            .flat_map(|quote| {
                triggered_rules(quote)
                    .into_iter()
                    .map(move |rule| ComplianceIssue {
                        provider: quote.provider().to_string(),
                        source_index: quote.source_index(),
                        rule,
                        issue: rule.issue_text().to_string(),
                    })
            })
            .collect();

        ComplianceReport {
            compliant: issues.is_empty(),
            issues,
            regulator: self.regulator.clone(),
            advisory: ADVISORY_NOTICE.to_string(),
        }
    }
}

fn triggered_rules(quote: &NormalizedQuote) -> Vec<ComplianceRule> {
    let premium = quote.annual_premium().get();
    let mut rules = Vec::new();
    if quote.coverage_score().get() < MIN_COVERAGE_SCORE {
        rules.push(ComplianceRule::InsufficientCoverage);
    }
    if premium < low_premium_threshold() {
        rules.push(ComplianceRule::LowPremium);
    }
    if premium > high_premium_threshold() {
        rules.push(ComplianceRule::HighPremium);
    }
    rules
}
