//! # Domain Enums
//!
//! Enumeration types for domain concepts.
//!
//! This module provides the closed vocabularies used by the comparison engine:
//!
//! - [`CoverageKind`] - The seven canonical coverage kinds plus an `Other` bucket
//! - [`ReasonCode`] - Why a quote was recommended
//! - [`ComplianceRule`] - Which advisory rule flagged a quote
//!
//! All enums implement `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`,
//! `Display` and Serde traits.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error parsing an enum from its string form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseEnumError {
    /// The string is not a known value for the named enum.
    #[error("invalid {0} value: {1}")]
    InvalidValue(&'static str, String),
}

/// Insurance coverage category.
///
/// The seven canonical kinds are the only ones that contribute to the
/// coverage score. Any other key lands in [`CoverageKind::Other`] with its
/// original spelling preserved.
///
/// # Examples
///
/// ```
/// use policy_quote_engine::domain::value_objects::enums::CoverageKind;
///
/// assert_eq!(CoverageKind::from("Legal Protection"), CoverageKind::LegalProtection);
/// assert!(CoverageKind::from("liability").is_canonical());
/// assert!(!CoverageKind::from("pet_insurance").is_canonical());
/// assert_eq!(CoverageKind::RoadsideAssistance.to_string(), "roadside_assistance");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CoverageKind {
    /// Third-party liability.
    Liability,
    /// Comprehensive (full casco) cover.
    Comprehensive,
    /// Partial casco cover.
    Partial,
    /// Legal protection.
    LegalProtection,
    /// Personal effects carried in the vehicle.
    PersonalEffects,
    /// Roadside assistance.
    RoadsideAssistance,
    /// Replacement vehicle.
    ReplacementVehicle,
    /// Any key outside the canonical set, as supplied.
    Other(String),
}

impl CoverageKind {
    /// The canonical kinds, in scoring order.
    pub const CANONICAL: [CoverageKind; 7] = [
        Self::Liability,
        Self::Comprehensive,
        Self::Partial,
        Self::LegalProtection,
        Self::PersonalEffects,
        Self::RoadsideAssistance,
        Self::ReplacementVehicle,
    ];

    /// Returns true for the seven scored kinds.
    #[must_use]
    pub fn is_canonical(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Returns the wire name of this kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Liability => "liability",
            Self::Comprehensive => "comprehensive",
            Self::Partial => "partial",
            Self::LegalProtection => "legal_protection",
            Self::PersonalEffects => "personal_effects",
            Self::RoadsideAssistance => "roadside_assistance",
            Self::ReplacementVehicle => "replacement_vehicle",
            Self::Other(key) => key,
        }
    }
}

impl From<&str> for CoverageKind {
    fn from(key: &str) -> Self {
        let canonical = key.trim().to_lowercase().replace(['-', ' '], "_");
        match canonical.as_str() {
            "liability" => Self::Liability,
            "comprehensive" => Self::Comprehensive,
            "partial" => Self::Partial,
            "legal_protection" => Self::LegalProtection,
            "personal_effects" => Self::PersonalEffects,
            "roadside_assistance" => Self::RoadsideAssistance,
            "replacement_vehicle" => Self::ReplacementVehicle,
            _ => Self::Other(key.to_string()),
        }
    }
}

impl fmt::Display for CoverageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CoverageKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CoverageKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Ok(Self::from(key.as_str()))
    }
}

/// Reason a quote was selected as a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    /// Lowest annual premium.
    Cheapest,
    /// Highest coverage score.
    BestCoverage,
    /// Highest value score.
    BestValue,
}

impl ReasonCode {
    /// Returns a short human-readable explanation.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Cheapest => "lowest annual premium",
            Self::BestCoverage => "most comprehensive coverage",
            Self::BestValue => "best price-to-coverage ratio",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cheapest => write!(f, "CHEAPEST"),
            Self::BestCoverage => write!(f, "BEST_COVERAGE"),
            Self::BestValue => write!(f, "BEST_VALUE"),
        }
    }
}

impl FromStr for ReasonCode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "CHEAPEST" => Ok(Self::Cheapest),
            "BEST_COVERAGE" => Ok(Self::BestCoverage),
            "BEST_VALUE" => Ok(Self::BestValue),
            _ => Err(ParseEnumError::InvalidValue("ReasonCode", s.to_string())),
        }
    }
}

/// Advisory compliance heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceRule {
    /// Coverage score below the minimum.
    InsufficientCoverage,
    /// Premium suspiciously low.
    LowPremium,
    /// Premium unusually high.
    HighPremium,
}

impl ComplianceRule {
    /// Returns the issue text attached when the rule triggers.
    #[must_use]
    pub fn issue_text(&self) -> &'static str {
        match self {
            Self::InsufficientCoverage => "insufficient minimum coverage",
            Self::LowPremium => "unusually low premium, review recommended",
            Self::HighPremium => "very high premium, market comparison recommended",
        }
    }
}

impl fmt::Display for ComplianceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientCoverage => write!(f, "INSUFFICIENT_COVERAGE"),
            Self::LowPremium => write!(f, "LOW_PREMIUM"),
            Self::HighPremium => write!(f, "HIGH_PREMIUM"),
        }
    }
}
