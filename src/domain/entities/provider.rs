//! # Provider Directory
//!
//! Injectable lookup of known insurers to display rating and market share.
//!
//! The directory is plain data: it can be built in code, loaded from a
//! TOML or JSON document, or taken from [`ProviderDirectory::swiss_default`].
//! The normalizer receives it by `Arc`, so extending the table never
//! touches engine logic.
//!
//! # Examples
//!
//! ```
//! use policy_quote_engine::domain::entities::provider::{ProviderDirectory, ProviderInfo};
//! use policy_quote_engine::domain::value_objects::ProviderKey;
//!
//! let directory = ProviderDirectory::swiss_default()
//!     .with_provider("Smile Direct", ProviderInfo::new("Smile Direct", "B+", 0.02))
//!     .unwrap();
//!
//! let zurich = directory.lookup(&ProviderKey::from_name("Zurich Versicherung"));
//! assert_eq!(zurich.rating(), "A+");
//!
//! let unknown = directory.lookup(&ProviderKey::from_name("Nobody AG"));
//! assert_eq!(unknown.rating(), "N/A");
//! assert_eq!(unknown.market_share(), 0.0);
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::ProviderKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rating shown for providers missing from the directory.
pub const UNKNOWN_RATING: &str = "N/A";

/// Directory entry for one provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Official display name.
    #[serde(default)]
    name: Option<String>,
    /// Financial strength rating label.
    rating: String,
    /// Market share as a fraction in `[0, 1]`.
    #[serde(default)]
    market_share: f64,
}

impl ProviderInfo {
    /// Creates a directory entry.
    #[must_use]
    pub fn new(name: impl Into<String>, rating: impl Into<String>, market_share: f64) -> Self {
        Self {
            name: Some(name.into()),
            rating: rating.into(),
            market_share,
        }
    }

    /// The entry used for providers not in the directory.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            name: None,
            rating: UNKNOWN_RATING.to_string(),
            market_share: 0.0,
        }
    }

    /// Official display name, if known.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Rating label.
    #[must_use]
    pub fn rating(&self) -> &str {
        &self.rating
    }

    /// Market share fraction.
    #[must_use]
    pub fn market_share(&self) -> f64 {
        self.market_share
    }

    fn validate(&self, key: &ProviderKey) -> DomainResult<()> {
        if !(0.0..=1.0).contains(&self.market_share) {
            return Err(DomainError::invalid_provider_directory(format!(
                "market share for '{}' must be within [0, 1], got {}",
                key, self.market_share
            )));
        }
        Ok(())
    }
}

/// Lookup table from [`ProviderKey`] to [`ProviderInfo`].
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ProviderDirectory {
    entries: BTreeMap<ProviderKey, ProviderInfo>,
}

impl ProviderDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The bundled directory of Swiss insurers.
    #[must_use]
    pub fn swiss_default() -> Self {
        let entries = [
            ("zurich", "Zurich Versicherung", "A+", 0.18),
            ("axa", "AXA Schweiz", "A+", 0.15),
            ("allianz", "Allianz Suisse", "A+", 0.12),
            ("generali", "Generali Schweiz", "A", 0.08),
            ("helvetia", "Helvetia", "A", 0.07),
            ("mobiliar", "Die Mobiliar", "A+", 0.09),
            ("baloise", "Baloise", "A", 0.06),
            ("vaudoise", "Vaudoise", "A-", 0.04),
        ]
        .into_iter()
        .map(|(key, name, rating, share)| {
            (
                ProviderKey::from_name(key),
                ProviderInfo::new(name, rating, share),
            )
        })
        .collect();
        Self { entries }
    }

    /// Builds a directory from name-keyed entries.
    ///
    /// Keys are normalized with [`ProviderKey::from_name`], so either lookup
    /// keys (`"zurich"`) or display names (`"Zurich Versicherung"`) work.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidProviderDirectory` if a market share is
    /// outside `[0, 1]`.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (String, ProviderInfo)>,
    ) -> DomainResult<Self> {
        entries
            .into_iter()
            .try_fold(Self::new(), |directory, (name, info)| {
                directory.with_provider(&name, info)
            })
    }

    /// Parses a TOML document of `[key] rating = .., market_share = ..` tables.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidProviderDirectory` on parse or
    /// validation failure.
    pub fn from_toml_str(document: &str) -> DomainResult<Self> {
        let entries: BTreeMap<String, ProviderInfo> = toml::from_str(document)
            .map_err(|e| DomainError::invalid_provider_directory(e.to_string()))?;
        Self::from_entries(entries)
    }

    /// Parses a JSON object of provider entries.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidProviderDirectory` on parse or
    /// validation failure.
    pub fn from_json_str(document: &str) -> DomainResult<Self> {
        let entries: BTreeMap<String, ProviderInfo> = serde_json::from_str(document)
            .map_err(|e| DomainError::invalid_provider_directory(e.to_string()))?;
        Self::from_entries(entries)
    }

    /// Adds or replaces an entry.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidProviderDirectory` if the market share
    /// is outside `[0, 1]`.
    pub fn with_provider(mut self, name: &str, info: ProviderInfo) -> DomainResult<Self> {
        let key = ProviderKey::from_name(name);
        info.validate(&key)?;
        self.entries.insert(key, info);
        Ok(self)
    }

    /// Looks up a provider, falling back to [`ProviderInfo::unknown`].
    #[must_use]
    pub fn lookup(&self, key: &ProviderKey) -> ProviderInfo {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(ProviderInfo::unknown)
    }

    /// Returns true if the key has an entry.
    #[must_use]
    pub fn contains(&self, key: &ProviderKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the directory has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn swiss_default_has_eight_providers() {
        let directory = ProviderDirectory::swiss_default();
        assert_eq!(directory.len(), 8);
        let axa = directory.lookup(&ProviderKey::from_name("AXA Schweiz"));
        assert_eq!(axa.rating(), "A+");
        assert!((axa.market_share() - 0.15).abs() < f64::EPSILON);
        assert_eq!(axa.name(), Some("AXA Schweiz"));
    }

    #[test]
    fn unknown_provider_defaults() {
        let directory = ProviderDirectory::new();
        let info = directory.lookup(&ProviderKey::from_name("Zurich"));
        assert_eq!(info, ProviderInfo::unknown());
    }

    #[test]
    fn parses_toml_document() {
        let document = r#"
            [zurich]
            name = "Zurich Versicherung"
            rating = "AA-"
            market_share = 0.2

            ["Smile Direct"]
            rating = "B"
        "#;
        let directory = ProviderDirectory::from_toml_str(document).unwrap();
        assert_eq!(directory.len(), 2);
        assert_eq!(
            directory.lookup(&ProviderKey::from_name("Zurich")).rating(),
            "AA-"
        );
        let smile = directory.lookup(&ProviderKey::from_name("smile direct"));
        assert_eq!(smile.rating(), "B");
        assert!(smile.market_share().abs() < f64::EPSILON);
    }

    #[test]
    fn parses_json_document() {
        let document = r#"{ "helvetia": { "rating": "A", "market_share": 0.07 } }"#;
        let directory = ProviderDirectory::from_json_str(document).unwrap();
        assert!(directory.contains(&ProviderKey::from_name("Helvetia")));
    }

    #[test]
    fn rejects_market_share_out_of_range() {
        let result = ProviderDirectory::new()
            .with_provider("Acme", ProviderInfo::new("Acme", "A", 1.5));
        assert!(matches!(
            result,
            Err(DomainError::InvalidProviderDirectory(_))
        ));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(ProviderDirectory::from_toml_str("[zurich").is_err());
    }
}
