//! # Savings Analysis
//!
//! Compares a client's current premium with an offered quote.
//!
//! ```text
//! annual_savings    = current_premium - offered_premium
//! five_year_savings = annual_savings * 5
//! switch            = annual_savings > 0
//! ```
//!
//! Savings may be negative when the offer is more expensive.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::comparison_matrix::group_thousands;
use crate::domain::entities::NormalizedQuote;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{CheckedArithmetic, Premium};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of years in the long-horizon projection.
pub const PROJECTION_YEARS: u32 = 5;

/// Result of comparing a current premium with an offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SavingsAnalysis {
    /// Provider of the offered quote.
    pub provider: String,
    /// Premium the client pays today.
    pub current_premium: Premium,
    /// Annual premium of the offer.
    pub offered_premium: Premium,
    /// Current minus offered premium.
    #[serde(with = "rust_decimal::serde::float")]
    #[schemars(with = "f64")]
    pub annual_savings: Decimal,
    /// Annual savings over the projection horizon.
    #[serde(with = "rust_decimal::serde::float")]
    #[schemars(with = "f64")]
    pub five_year_savings: Decimal,
    /// True when switching lowers the premium.
    pub switch_recommended: bool,
}

impl SavingsAnalysis {
    /// Computes the savings of switching to `offer`.
    ///
    /// # Errors
    ///
    /// - `ApplicationError::Validation` if `current_premium` is zero
    /// - `ApplicationError::Domain` on arithmetic overflow
    ///
    /// # Examples
    ///
    /// ```
    /// use policy_quote_engine::application::services::SavingsAnalysis;
    /// use policy_quote_engine::domain::entities::NormalizedQuoteBuilder;
    /// use policy_quote_engine::domain::value_objects::Premium;
    /// use rust_decimal::Decimal;
    ///
    /// let offer = NormalizedQuoteBuilder::new("AXA", Premium::from_f64(960.0).unwrap()).build();
    /// let analysis = SavingsAnalysis::calculate(Premium::from_f64(1200.0).unwrap(), &offer).unwrap();
    /// assert!(analysis.switch_recommended);
    /// assert_eq!(analysis.five_year_savings, Decimal::from(1200));
    /// ```
    pub fn calculate(current_premium: Premium, offer: &NormalizedQuote) -> ApplicationResult<Self> {
        if current_premium.is_zero() {
            return Err(ApplicationError::validation(
                "current premium must be greater than zero",
            ));
        }

        let offered_premium = offer.annual_premium();
        let annual_savings = current_premium
            .get()
            .safe_sub(offered_premium.get())
            .map_err(DomainError::from)?;
        let five_year_savings = annual_savings
            .safe_mul(Decimal::from(PROJECTION_YEARS))
            .map_err(DomainError::from)?;

        Ok(Self {
            provider: offer.provider().to_string(),
            current_premium,
            offered_premium,
            annual_savings,
            five_year_savings,
            switch_recommended: annual_savings > Decimal::ZERO,
        })
    }
}

impl fmt::Display for SavingsAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Current premium:   {}/year", group_thousands(self.current_premium.get(), 2))?;
        writeln!(
            f,
            "Offered premium:   {}/year ({})",
            group_thousands(self.offered_premium.get(), 2),
            self.provider
        )?;
        writeln!(f, "Annual savings:    {}", group_thousands(self.annual_savings, 2))?;
        writeln!(
            f,
            "{PROJECTION_YEARS}-year savings:    {}",
            group_thousands(self.five_year_savings, 2)
        )?;
        write!(
            f,
            "Recommendation:    {}",
            if self.switch_recommended {
                "switch recommended"
            } else {
                "current policy is already competitive"
            }
        )
    }
}
