//! # Checked Arithmetic
//!
//! Safe decimal arithmetic for premium aggregation.
//!
//! This module provides:
//! - [`ArithmeticError`] - Error type for arithmetic failures
//! - [`CheckedArithmetic`] - Trait for safe arithmetic operations
//! - [`checked_sum`] and [`checked_mean`] - Folds over premium amounts
//!
//! # Examples
//!
//! ```
//! use policy_quote_engine::domain::value_objects::arithmetic::{checked_mean, CheckedArithmetic};
//! use rust_decimal::Decimal;
//!
//! let a = Decimal::new(100, 0);
//! let b = Decimal::new(3, 0);
//! assert!(a.safe_div(b).is_ok());
//!
//! let mean = checked_mean(&[Decimal::new(100, 0), Decimal::new(300, 0)]).unwrap();
//! assert_eq!(mean, Decimal::new(200, 0));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Error type for arithmetic operations.
///
/// Represents failures that can occur during checked arithmetic,
/// including overflow, division by zero, and invalid values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ArithmeticError {
    /// Arithmetic operation resulted in overflow.
    #[error("arithmetic overflow")]
    Overflow,

    /// Arithmetic operation resulted in underflow.
    #[error("arithmetic underflow")]
    Underflow,

    /// Division by zero attempted.
    #[error("division by zero")]
    DivisionByZero,

    /// Invalid value provided (e.g., negative when positive required).
    #[error("invalid value: {0}")]
    InvalidValue(&'static str),
}

/// Result type for arithmetic operations.
pub type ArithmeticResult<T> = Result<T, ArithmeticError>;

/// Trait for checked arithmetic operations.
///
/// Provides safe arithmetic methods that return `Result` instead of
/// panicking on overflow or division by zero.
pub trait CheckedArithmetic: Sized {
    /// Safely add two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the result would overflow.
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Safely subtract two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Underflow` if the result would underflow.
    fn safe_sub(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Safely multiply two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the result would overflow.
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Safely divide two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::DivisionByZero` if the divisor is zero.
    fn safe_div(self, rhs: Self) -> ArithmeticResult<Self>;
}

impl CheckedArithmetic for Decimal {
    #[inline]
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_add(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_sub(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_sub(rhs).ok_or(ArithmeticError::Underflow)
    }

    #[inline]
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_mul(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_div(self, rhs: Self) -> ArithmeticResult<Self> {
        if rhs.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        self.checked_div(rhs).ok_or(ArithmeticError::Overflow)
    }
}

/// Sums decimal values, failing on overflow.
///
/// # Errors
///
/// Returns `ArithmeticError::Overflow` if the running total overflows.
pub fn checked_sum(values: &[Decimal]) -> ArithmeticResult<Decimal> {
    values
        .iter()
        .try_fold(Decimal::ZERO, |acc, value| acc.safe_add(*value))
}

/// Arithmetic mean of decimal values.
///
/// Sums first and divides once. When the sum would overflow, each value is
/// divided by the count before accumulating, so any slice of in-range
/// values has a mean.
///
/// # Errors
///
/// Returns `ArithmeticError::DivisionByZero` for an empty slice.
pub fn checked_mean(values: &[Decimal]) -> ArithmeticResult<Decimal> {
    if values.is_empty() {
        return Err(ArithmeticError::DivisionByZero);
    }
    let count = Decimal::from(values.len());
    match checked_sum(values) {
        Ok(total) => total.safe_div(count),
        Err(ArithmeticError::Overflow) => values
            .iter()
            .try_fold(Decimal::ZERO, |acc, value| acc.safe_add(value.safe_div(count)?)),
        Err(e) => Err(e),
    }
}
