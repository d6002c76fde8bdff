//! # Domain Entities
//!
//! Records flowing through a comparison.
//!
//! ## Entities
//!
//! - [`RawQuote`]: Unvalidated provider offer
//! - [`NormalizedQuote`]: Canonical, scored quote
//! - [`ProviderDirectory`]: Known providers with rating and market share

pub mod normalized_quote;
pub mod provider;
pub mod raw_quote;

pub use normalized_quote::{
    CoverageTerms, NormalizationWarning, NormalizedQuote, NormalizedQuoteBuilder,
};
pub use provider::{ProviderDirectory, ProviderInfo, UNKNOWN_RATING};
pub use raw_quote::RawQuote;
