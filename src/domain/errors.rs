//! # Domain Errors
//!
//! Error types for business rule violations in the comparison domain.
//!
//! Quote-level problems are normally recovered by the normalizer through
//! documented defaults and soft warnings; the errors here cover the cases
//! that cannot be recovered.

use crate::domain::value_objects::arithmetic::ArithmeticError;
use thiserror::Error;

/// Domain layer error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// An aggregation was attempted over zero quotes.
    #[error("cannot aggregate an empty quote set")]
    EmptyQuoteSet,

    /// A raw record could not be read as a quote at all.
    #[error("malformed quote at index {index}: {reason}")]
    MalformedQuote {
        /// Position of the record in the input batch.
        index: usize,
        /// Why the record was rejected.
        reason: String,
    },

    /// Checked arithmetic failed while aggregating premiums.
    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),

    /// A provider directory document could not be read.
    #[error("invalid provider directory: {0}")]
    InvalidProviderDirectory(String),
}

impl DomainError {
    /// Creates a malformed quote error.
    #[must_use]
    pub fn malformed_quote(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedQuote {
            index,
            reason: reason.into(),
        }
    }

    /// Creates an invalid provider directory error.
    #[must_use]
    pub fn invalid_provider_directory(reason: impl Into<String>) -> Self {
        Self::InvalidProviderDirectory(reason.into())
    }

    /// Returns a stable machine-readable error kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyQuoteSet => "EMPTY_QUOTE_SET",
            Self::MalformedQuote { .. } => "MALFORMED_QUOTE",
            Self::Arithmetic(_) => "ARITHMETIC",
            Self::InvalidProviderDirectory(_) => "INVALID_PROVIDER_DIRECTORY",
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            DomainError::EmptyQuoteSet.to_string(),
            "cannot aggregate an empty quote set"
        );
        assert_eq!(
            DomainError::malformed_quote(2, "expected an object").to_string(),
            "malformed quote at index 2: expected an object"
        );
    }

    #[test]
    fn arithmetic_converts() {
        let err: DomainError = ArithmeticError::Overflow.into();
        assert_eq!(err.kind(), "ARITHMETIC");
    }

    #[test]
    fn kinds_are_stable() {
        assert_eq!(DomainError::EmptyQuoteSet.kind(), "EMPTY_QUOTE_SET");
        assert_eq!(
            DomainError::malformed_quote(0, "x").kind(),
            "MALFORMED_QUOTE"
        );
    }
}
