//! # Application Layer
//!
//! Batch-level orchestration on top of the domain layer.
//!
//! - [`services`]: Comparison pipeline, ranking, compliance and reporting
//! - [`error`]: Application errors and the serializable error body

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult, ErrorResponse};
