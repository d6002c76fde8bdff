//! # Policy Quote Engine
//!
//! Normalization, scoring and recommendation over heterogeneous insurance
//! quotes.
//!
//! A batch of loosely structured provider quotes is canonicalized into
//! [`NormalizedQuote`](domain::entities::NormalizedQuote) values, scored on
//! coverage breadth and depth and on price-adjusted value, summarized,
//! checked against advisory compliance heuristics and ranked into a single
//! serializable [`ComparisonResult`](application::services::ComparisonResult).
//!
//! The engine performs no I/O and keeps no state between calls.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ bin/ (feature "cli"): compare_quotes, export_schemas      │
//! ├──────────────────────────────────────────────────────────┤
//! │ infrastructure: Settings (config), tracing bootstrap      │
//! ├──────────────────────────────────────────────────────────┤
//! │ application: ComparisonReportBuilder, summary,            │
//! │              recommendations, compliance, ranking         │
//! ├──────────────────────────────────────────────────────────┤
//! │ domain: RawQuote, NormalizedQuote, ProviderDirectory,     │
//! │         QuoteNormalizer, CoverageScorer, ValueScorer      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```
//! use policy_quote_engine::prelude::*;
//! use std::sync::Arc;
//!
//! let builder = ComparisonReportBuilder::with_defaults(Arc::new(ProviderDirectory::swiss_default()));
//!
//! let quotes = vec![
//!     RawQuote::new("Zurich")
//!         .with_annual_premium(1200.0)
//!         .with_coverage("liability", 5_000_000.0, true)
//!         .with_coverage("comprehensive", 1_000_000.0, true),
//!     RawQuote::new("AXA").with_monthly_premium(80.0),
//! ];
//!
//! let result = builder.build(&quotes, None).unwrap();
//! assert_eq!(result.recommendations.cheapest.provider, "AXA");
//! assert_eq!(result.recommendations.best_coverage.provider, "Zurich");
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

/// Commonly used types.
pub mod prelude {
    pub use crate::application::error::{ApplicationError, ApplicationResult, ErrorResponse};
    pub use crate::application::services::{
        ComparisonConfig, ComparisonReportBuilder, ComparisonResult, MatrixOptions,
        PremiumRanking, RankingStrategy, SavingsAnalysis, ValueScoreRanking, render_matrix,
    };
    pub use crate::domain::entities::{NormalizedQuote, ProviderDirectory, ProviderInfo, RawQuote};
    pub use crate::domain::errors::{DomainError, DomainResult};
    pub use crate::domain::services::QuoteNormalizer;
    pub use crate::domain::value_objects::{CoverageKind, Premium, Score};
}
