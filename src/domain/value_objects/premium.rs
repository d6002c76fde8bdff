//! # Premium Value Object
//!
//! Non-negative monetary amount for insurance premiums.
//!
//! Premiums are held as [`Decimal`] so that aggregation (sums, ranges,
//! savings) is exact, and serialized as plain JSON numbers for the
//! presentation layer.
//!
//! # Examples
//!
//! ```
//! use policy_quote_engine::domain::value_objects::Premium;
//! use rust_decimal::Decimal;
//!
//! let annual = Premium::new(Decimal::new(1200, 0)).unwrap();
//! assert_eq!(annual.monthly().get(), Decimal::new(100, 0));
//! assert!(Premium::new(Decimal::new(-1, 0)).is_err());
//! ```

use crate::domain::value_objects::arithmetic::{ArithmeticError, ArithmeticResult};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use schemars::JsonSchema;
use schemars::r#gen::SchemaGenerator;
use schemars::schema::Schema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Months per policy year.
const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// A non-negative premium amount in the quote's currency.
///
/// # Invariants
///
/// - Never negative
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Premium(Decimal);

impl Premium {
    /// The zero premium used when a quote carries no usable amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a premium from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::InvalidValue` if the amount is negative.
    pub fn new(amount: Decimal) -> ArithmeticResult<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ArithmeticError::InvalidValue("premium must not be negative"));
        }
        Ok(Self(amount.normalize()))
    }

    /// Creates a premium from a float.
    ///
    /// Returns `None` for negative, non-finite or unrepresentable values.
    #[must_use]
    pub fn from_f64(amount: f64) -> Option<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return None;
        }
        Decimal::from_f64(amount).map(|d| Self(d.normalize()))
    }

    /// Returns the decimal amount.
    #[inline]
    #[must_use]
    pub fn get(&self) -> Decimal {
        self.0
    }

    /// Returns the amount as a float for scoring formulas.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    /// Returns true if the amount is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Annual amount for a monthly premium.
    ///
    /// Saturates at `Decimal::MAX` rather than overflowing.
    #[must_use]
    pub fn annualized(&self) -> Self {
        Self(
            self.0
                .checked_mul(MONTHS_PER_YEAR)
                .unwrap_or(Decimal::MAX)
                .normalize(),
        )
    }

    /// Monthly amount for an annual premium.
    #[must_use]
    pub fn monthly(&self) -> Self {
        Self((self.0 / MONTHS_PER_YEAR).normalize())
    }
}

impl fmt::Display for Premium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Premium {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Premium {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

impl JsonSchema for Premium {
    fn schema_name() -> String {
        "Premium".to_owned()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        <f64>::json_schema(generator)
    }
}
