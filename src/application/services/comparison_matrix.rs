//! # Comparison Matrix
//!
//! Plain-text table rendering of a [`ComparisonResult`].
//!
//! Rows follow the ranking order of the result. Premiums are rounded to
//! whole currency units with `,` thousands grouping; scores are rounded to
//! whole numbers.
//!
//! ```text
//! COMPARISON MATRIX
//! ================================================================================
//! Provider             Premium/Year    Coverage   Rating       Value
//! --------------------------------------------------------------------------------
//! Zurich               CHF 1,200       50%        A+           84/100
//! AXA                  CHF 960         0%         A+           0/100
//! ```

use crate::application::services::comparison_report::ComparisonResult;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Write;

const PROVIDER_WIDTH: usize = 20;
const PREMIUM_WIDTH: usize = 15;
const COVERAGE_WIDTH: usize = 10;
const RATING_WIDTH: usize = 12;

/// Rendering options for [`render_matrix`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixOptions {
    /// Heading printed above the table.
    pub title: String,
    /// Width of the horizontal rules.
    pub rule_width: usize,
    /// Prefix each row with its rank.
    pub show_rank: bool,
}

impl Default for MatrixOptions {
    fn default() -> Self {
        Self {
            title: "COMPARISON MATRIX".to_string(),
            rule_width: 80,
            show_rank: false,
        }
    }
}

impl MatrixOptions {
    /// Sets the heading.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Enables or disables the rank column.
    #[must_use]
    pub fn with_rank(mut self, show_rank: bool) -> Self {
        self.show_rank = show_rank;
        self
    }
}

/// Renders the ranked quotes of `result` as a fixed-width text table.
///
/// # Examples
///
/// ```
/// use policy_quote_engine::application::services::{
///     ComparisonReportBuilder, MatrixOptions, render_matrix,
/// };
/// use policy_quote_engine::domain::entities::{ProviderDirectory, RawQuote};
/// use std::sync::Arc;
///
/// let builder = ComparisonReportBuilder::with_defaults(Arc::new(ProviderDirectory::swiss_default()));
/// let result = builder
///     .build(&[RawQuote::new("Generali").with_annual_premium(12500.0)], None)
///     .unwrap();
///
/// let table = render_matrix(&result, &MatrixOptions::default());
/// assert!(table.contains("CHF 12,500"));
/// ```
#[must_use]
pub fn render_matrix(result: &ComparisonResult, options: &MatrixOptions) -> String {
    let mut out = String::new();
    let heavy = "=".repeat(options.rule_width);
    let light = "-".repeat(options.rule_width);
    let rank_header = if options.show_rank { "#    " } else { "" };

    // writes into a String cannot fail
    let _ = writeln!(out, "{}", options.title);
    let _ = writeln!(out, "{heavy}");
    let _ = writeln!(
        out,
        "{rank_header}{:<PROVIDER_WIDTH$} {:<PREMIUM_WIDTH$} {:<COVERAGE_WIDTH$} {:<RATING_WIDTH$} Value",
        "Provider", "Premium/Year", "Coverage", "Rating"
    );
    let _ = writeln!(out, "{light}");

    for ranked in &result.quotes {
        let quote = &ranked.quote;
        let rank = if options.show_rank {
            format!("{:<5}", ranked.rank)
        } else {
            String::new()
        };
        let premium = format!(
            "{} {}",
            result.currency,
            group_thousands(quote.annual_premium().get(), 0)
        );
        let coverage = format!("{:.0}%", quote.coverage_score().get());
        let _ = writeln!(
            out,
            "{rank}{:<PROVIDER_WIDTH$} {:<PREMIUM_WIDTH$} {:<COVERAGE_WIDTH$} {:<RATING_WIDTH$} {:.0}/100",
            quote.provider(),
            premium,
            coverage,
            quote.provider_rating(),
            quote.value_score().get()
        );
    }

    out
}

/// Formats `amount` with `dp` decimal places and `,` thousands grouping.
///
/// Rounding is half-to-even.
#[must_use]
pub fn group_thousands(amount: Decimal, dp: u32) -> String {
    let rounded = amount.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven);
    let text = format!("{:.*}", dp as usize, rounded.abs());
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text.as_str(), None),
    };

    let digits: Vec<char> = integer.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + dp as usize + 2);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.push('-');
    }
    for (position, digit) in digits.iter().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}
