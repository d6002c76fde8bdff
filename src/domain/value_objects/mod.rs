//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Numeric Types
//!
//! - [`Premium`]: Non-negative decimal premium amount
//! - [`Score`]: Score clamped to `[0, 100]`
//!
//! ## Arithmetic
//!
//! - [`ArithmeticError`]: Error type for arithmetic failures
//! - [`CheckedArithmetic`]: Trait for safe arithmetic operations
//!
//! ## Identity
//!
//! - [`ProviderKey`]: Canonical provider lookup key
//!
//! ## Domain Enums
//!
//! - `CoverageKind`: Canonical coverage kinds plus `Other`
//! - `ReasonCode`: Recommendation reasons
//! - `ComplianceRule`: Advisory compliance heuristics

pub mod arithmetic;
pub mod enums;
pub mod premium;
pub mod provider_key;
pub mod score;

pub use arithmetic::{
    ArithmeticError, ArithmeticResult, CheckedArithmetic, checked_mean, checked_sum,
};
pub use enums::{ComplianceRule, CoverageKind, ParseEnumError, ReasonCode};
pub use premium::Premium;
pub use provider_key::ProviderKey;
pub use score::Score;
