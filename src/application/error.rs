//! # Application Errors
//!
//! Error types for the application layer.
//!
//! These errors represent failures of a comparison call as a whole. Quote
//! level problems never surface here: the normalizer recovers them with
//! documented defaults and soft warnings, so only batch-level emptiness
//! and unrecoverable input are fatal.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── EmptyInput                 - No quotes supplied to the comparison
//! ├── Domain(DomainError)        - Malformed records, empty aggregation, arithmetic
//! ├── Validation(String)         - Invalid request arguments
//! └── Configuration(String)      - Settings or provider directory could not be loaded
//! ```
//!
//! # Examples
//!
//! ```
//! use policy_quote_engine::application::error::{ApplicationError, ErrorResponse};
//!
//! let err = ApplicationError::EmptyInput;
//! let response = ErrorResponse::from(&err);
//! assert_eq!(response.kind, "EMPTY_INPUT");
//! ```

use crate::domain::errors::DomainError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError {
    /// No quotes were supplied to the comparison entry point.
    #[error("no quotes supplied for comparison")]
    EmptyInput,

    /// Domain error from business logic.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Request validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Returns a stable machine-readable error kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyInput => "EMPTY_INPUT",
            Self::Domain(e) => e.kind(),
            Self::Validation(_) => "VALIDATION",
            Self::Configuration(_) => "CONFIGURATION",
        }
    }

    /// Returns true if the caller supplied no quotes.
    #[must_use]
    pub fn is_empty_input(&self) -> bool {
        matches!(self, Self::EmptyInput)
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// Serializable error body for presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorResponse {
    /// Stable error kind, e.g. `EMPTY_INPUT`.
    pub kind: String,
    /// Human-readable message.
    pub message: String,
}

impl From<&ApplicationError> for ErrorResponse {
    fn from(error: &ApplicationError) -> Self {
        Self {
            kind: error.kind().to_string(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ArithmeticError;

    #[test]
    fn empty_input_error() {
        let err = ApplicationError::EmptyInput;
        assert_eq!(err.to_string(), "no quotes supplied for comparison");
        assert!(err.is_empty_input());
        assert_eq!(err.kind(), "EMPTY_INPUT");
    }

    #[test]
    fn validation_error() {
        let err = ApplicationError::validation("current premium must be positive");
        assert!(err.to_string().contains("current premium must be positive"));
        assert!(err.is_validation());
        assert_eq!(err.kind(), "VALIDATION");
    }

    #[test]
    fn configuration_error() {
        let err = ApplicationError::configuration("missing providers file");
        assert!(err.to_string().contains("configuration"));
        assert_eq!(err.kind(), "CONFIGURATION");
    }

    #[test]
    fn from_domain_error_keeps_kind() {
        let err: ApplicationError = DomainError::malformed_quote(1, "not an object").into();
        assert_eq!(err.kind(), "MALFORMED_QUOTE");
        assert!(err.to_string().contains("not an object"));

        let err: ApplicationError = DomainError::EmptyQuoteSet.into();
        assert_eq!(err.kind(), "EMPTY_QUOTE_SET");
    }

    #[test]
    fn error_response_serializes() {
        let err: ApplicationError = DomainError::from(ArithmeticError::Overflow).into();
        let response = ErrorResponse::from(&err);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["kind"], "ARITHMETIC");
        assert_eq!(json["message"], "domain error: arithmetic error: arithmetic overflow");
    }
}
