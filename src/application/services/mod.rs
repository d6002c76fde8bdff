//! # Application Services
//!
//! Services that orchestrate domain logic into a complete comparison.
//!
//! This module provides application-level services including:
//! - [`ComparisonReportBuilder`]: Runs the full comparison pipeline
//! - [`SummaryAggregator`]: Price range, averages and provider count
//! - [`RecommendationEngine`]: Cheapest, best-coverage and best-value picks
//! - [`ComplianceChecker`]: Advisory premium and coverage heuristics
//! - [`RankingStrategy`]: Strategies for ordering quotes
//! - [`render_matrix`]: Plain-text comparison table
//! - [`SavingsAnalysis`]: Current premium against an offer

pub mod comparison_matrix;
pub mod comparison_report;
pub mod compliance;
pub mod ranking_strategy;
pub mod recommendation;
pub mod savings;
pub mod summary;

pub use comparison_matrix::{MatrixOptions, group_thousands, render_matrix};
pub use comparison_report::{
    ClientProfile, ComparisonConfig, ComparisonReportBuilder, ComparisonResult, DEFAULT_CURRENCY,
};
pub use compliance::{
    ADVISORY_NOTICE, ComplianceChecker, ComplianceIssue, ComplianceReport, DEFAULT_REGULATOR,
};
pub use ranking_strategy::{PremiumRanking, RankedQuote, RankingStrategy, ValueScoreRanking};
pub use recommendation::{Recommendation, RecommendationEngine, Recommendations};
pub use savings::SavingsAnalysis;
pub use summary::{ComparisonSummary, PriceRange, SummaryAggregator};
