//! # Raw Quote Entity
//!
//! An unvalidated insurance offer as received from a provider document.
//!
//! Numeric fields are kept as untyped JSON values because upstream
//! extraction is loose: premiums may arrive as numbers, numeric strings
//! or garbage. Coercion happens in the normalizer, which records a soft
//! warning instead of rejecting the quote.
//!
//! # Examples
//!
//! ```
//! use policy_quote_engine::domain::entities::raw_quote::RawQuote;
//!
//! let quote = RawQuote::new("Zurich")
//!     .with_annual_premium(1200.0)
//!     .with_coverage("liability", 5_000_000.0, true);
//!
//! assert_eq!(quote.provider(), "Zurich");
//! assert_eq!(quote.coverages().len(), 1);
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, json};
use std::collections::BTreeMap;

/// A provider quote before normalization.
///
/// Never mutated by the engine; normalized quotes keep a copy for
/// back-reference.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RawQuote {
    /// Provider display name as written on the offer.
    #[serde(deserialize_with = "lenient_provider")]
    #[schemars(with = "String")]
    provider: String,
    /// Annual premium, if stated.
    #[serde(skip_serializing_if = "Option::is_none")]
    annual_premium: Option<Value>,
    /// Monthly premium, if stated.
    #[serde(skip_serializing_if = "Option::is_none")]
    monthly_premium: Option<Value>,
    /// Deductible, if stated.
    #[serde(skip_serializing_if = "Option::is_none")]
    deductible: Option<Value>,
    /// Coverage kind name to coverage terms (`{limit, included}`).
    #[serde(deserialize_with = "lenient_coverages")]
    #[schemars(with = "BTreeMap<String, Value>")]
    coverages: BTreeMap<String, Value>,
    /// Set when the source record had a `coverages` field that was not a
    /// mapping.
    #[serde(skip)]
    malformed_coverages: bool,
}

impl RawQuote {
    /// Creates an empty raw quote for a provider.
    #[must_use]
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Self::default()
        }
    }

    /// Reads one raw quote from an untyped JSON record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MalformedQuote` if the record is not an object.
    /// A `provider` that is not a string reads as empty and a `coverages`
    /// field that is not an object reads as no coverages; the normalizer
    /// flags both with a warning.
    pub fn from_value(index: usize, value: &Value) -> DomainResult<Self> {
        let Some(record) = value.as_object() else {
            return Err(DomainError::malformed_quote(
                index,
                format!("expected an object, found {}", json_type_name(value)),
            ));
        };
        let mut quote = Self::deserialize(value)
            .map_err(|e| DomainError::malformed_quote(index, e.to_string()))?;
        quote.malformed_coverages = record
            .get("coverages")
            .is_some_and(|coverages| !coverages.is_object());
        Ok(quote)
    }

    /// Reads a batch of raw quotes from a JSON array.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MalformedQuote` if the document is not an array
    /// or any element is not an object.
    pub fn batch_from_value(value: &Value) -> DomainResult<Vec<Self>> {
        let records = value.as_array().ok_or_else(|| {
            DomainError::malformed_quote(
                0,
                format!("expected an array of quotes, found {}", json_type_name(value)),
            )
        })?;
        records
            .iter()
            .enumerate()
            .map(|(index, record)| Self::from_value(index, record))
            .collect()
    }

    /// Sets the annual premium.
    #[must_use]
    pub fn with_annual_premium(mut self, amount: f64) -> Self {
        self.annual_premium = Some(json!(amount));
        self
    }

    /// Sets the monthly premium.
    #[must_use]
    pub fn with_monthly_premium(mut self, amount: f64) -> Self {
        self.monthly_premium = Some(json!(amount));
        self
    }

    /// Sets the deductible.
    #[must_use]
    pub fn with_deductible(mut self, amount: f64) -> Self {
        self.deductible = Some(json!(amount));
        self
    }

    /// Sets an arbitrary raw value for the annual premium.
    #[must_use]
    pub fn with_raw_annual_premium(mut self, value: Value) -> Self {
        self.annual_premium = Some(value);
        self
    }

    /// Sets an arbitrary raw value for the monthly premium.
    #[must_use]
    pub fn with_raw_monthly_premium(mut self, value: Value) -> Self {
        self.monthly_premium = Some(value);
        self
    }

    /// Adds a coverage with a limit and inclusion flag.
    #[must_use]
    pub fn with_coverage(mut self, kind: impl Into<String>, limit: f64, included: bool) -> Self {
        self.coverages
            .insert(kind.into(), json!({ "limit": limit, "included": included }));
        self
    }

    /// Adds a coverage entry with an arbitrary raw value.
    #[must_use]
    pub fn with_raw_coverage(mut self, kind: impl Into<String>, value: Value) -> Self {
        self.coverages.insert(kind.into(), value);
        self
    }

    /// Provider display name.
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Raw annual premium field.
    #[must_use]
    pub fn annual_premium(&self) -> Option<&Value> {
        self.annual_premium.as_ref()
    }

    /// Raw monthly premium field.
    #[must_use]
    pub fn monthly_premium(&self) -> Option<&Value> {
        self.monthly_premium.as_ref()
    }

    /// Raw deductible field.
    #[must_use]
    pub fn deductible(&self) -> Option<&Value> {
        self.deductible.as_ref()
    }

    /// Raw coverage entries keyed by the supplied coverage name.
    #[must_use]
    pub fn coverages(&self) -> &BTreeMap<String, Value> {
        &self.coverages
    }

    /// True when the source record's `coverages` field was not a mapping.
    #[must_use]
    pub fn has_malformed_coverages(&self) -> bool {
        self.malformed_coverages
    }
}

fn lenient_provider<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(name) => name,
        _ => String::new(),
    })
}

fn lenient_coverages<'de, D>(deserializer: D) -> Result<BTreeMap<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(entries) => entries.into_iter().collect(),
        _ => BTreeMap::new(),
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
