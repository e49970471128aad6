//! Error types for token amounts, fractions and prices
//!
//! Every arithmetic failure in the value layer is reported through
//! [`AmountError`]. None of these errors is recoverable by retrying: the
//! caller must abandon the computation that produced it.

use thiserror::Error;

/// Errors that can occur while constructing or combining token values
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// Raw value falls outside the unsigned 64-bit range of a token amount
    #[error("Overflow: value {value} is outside the u64 token amount range")]
    Overflow { value: String },

    /// Two values tagged with different tokens were combined
    #[error("Token mismatch: expected {expected}, found {found}")]
    TokenMismatch { expected: String, found: String },

    /// Division by a zero fraction or a zero denominator
    #[error("Division by zero in fraction arithmetic")]
    DivisionByZero,

    /// Text that does not parse as a fraction
    #[error("Invalid fraction: '{input}' - expected 'n' or 'n/d'")]
    InvalidFormat { input: String },

    /// Fee ratio outside of [0, 1)
    #[error("Invalid fee '{name}': {value} is not within [0, 1)")]
    InvalidFee { name: &'static str, value: String },
}

impl AmountError {
    pub(crate) fn overflow(value: impl ToString) -> Self {
        Self::Overflow {
            value: value.to_string(),
        }
    }

    pub(crate) fn mismatch(expected: impl ToString, found: impl ToString) -> Self {
        Self::TokenMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}
