//! # Provider Key
//!
//! Canonical lookup key derived from a free-form provider name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Words dropped from provider names before lookup.
const NOISE_WORDS: [&str; 3] = ["versicherung", "schweiz", "suisse"];

/// Normalized provider identifier used for directory lookups.
///
/// Derived by lower-casing the display name, removing all whitespace and
/// removing the words `versicherung`, `schweiz` and `suisse`.
///
/// # Examples
///
/// ```
/// use policy_quote_engine::domain::value_objects::ProviderKey;
///
/// assert_eq!(ProviderKey::from_name("Zurich Versicherung").as_str(), "zurich");
/// assert_eq!(ProviderKey::from_name("AXA Schweiz").as_str(), "axa");
/// assert_eq!(ProviderKey::from_name("Allianz Suisse").as_str(), "allianz");
/// assert_eq!(ProviderKey::from_name("Die Mobiliar").as_str(), "diemobiliar");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderKey(String);

impl ProviderKey {
    /// Derives the key from a provider display name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let mut key: String = name
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        for word in NOISE_WORDS {
            key = key.replace(word, "");
        }
        Self(key)
    }

    /// Returns the key as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
