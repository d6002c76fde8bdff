//! # Score Value Object
//!
//! Bounded 0–100 score used for coverage and value ratings.

use schemars::JsonSchema;
use schemars::r#gen::SchemaGenerator;
use schemars::schema::Schema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A score clamped to `[0, 100]`.
///
/// # Invariants
///
/// - Always finite
/// - Always within `[Score::MIN, Score::MAX]`
///
/// # Examples
///
/// ```
/// use policy_quote_engine::domain::value_objects::Score;
///
/// assert_eq!(Score::new(140.0).get(), 100.0);
/// assert_eq!(Score::new(-3.0).get(), 0.0);
/// assert_eq!(Score::new(f64::NAN).get(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Score(f64);

impl Score {
    /// Lowest possible score.
    pub const MIN: f64 = 0.0;
    /// Highest possible score.
    pub const MAX: f64 = 100.0;
    /// The zero score.
    pub const ZERO: Self = Self(0.0);

    /// Creates a score, clamping into range. NaN becomes zero and the
    /// infinities clamp to the nearest bound.
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// Returns the score value.
    #[inline]
    #[must_use]
    pub fn get(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Self::new)
    }
}

impl JsonSchema for Score {
    fn schema_name() -> String {
        "Score".to_owned()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        <f64>::json_schema(generator)
    }
}
