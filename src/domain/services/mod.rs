//! # Domain Services
//!
//! Pure scoring and normalization logic over single quotes.
//!
//! ## Services
//!
//! - [`coverage_scorer::CoverageScorer`]: Coverage breadth and depth score
//! - [`value_scorer::ValueScorer`]: Price-adjusted value score
//! - [`quote_normalizer::QuoteNormalizer`]: Raw quote to normalized quote

pub mod coverage_scorer;
pub mod quote_normalizer;
pub mod value_scorer;

pub use coverage_scorer::CoverageScorer;
pub use quote_normalizer::{MONTHLY_AS_ANNUAL_THRESHOLD, QuoteNormalizer};
pub use value_scorer::ValueScorer;
