//! # Error Types
//!
//! Typed parse failures for cartline-core.
//!
//! The public editing contract is lenient: free-text input that fails to
//! parse degrades to quantity `0` and never raises. The typed errors here
//! back the strict parse API ([`RawQuantity::parse`]) so hosts that want to
//! reject bad input before it reaches the editor can do so.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending input in the message
//! 3. Errors are enum variants, never String
//!
//! [`RawQuantity::parse`]: crate::types::RawQuantity::parse

use thiserror::Error;

/// Failures when strictly parsing a raw quantity input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityParseError {
    /// The text field was empty or whitespace.
    #[error("quantity input is empty")]
    Empty,

    /// The text field did not contain an integer.
    #[error("quantity input is not a number: {0:?}")]
    NotANumber(String),

    /// The input parsed but was below zero.
    ///
    /// ## When This Occurs
    /// A decrement control driven past zero, or a pasted negative number.
    /// The lenient path clamps this to 0 instead.
    #[error("quantity cannot be negative: {0}")]
    Negative(i64),
}

/// Convenience type alias for Results with QuantityParseError.
pub type ParseResult<T> = Result<T, QuantityParseError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            QuantityParseError::Empty.to_string(),
            "quantity input is empty"
        );
        assert_eq!(
            QuantityParseError::NotANumber("abc".to_string()).to_string(),
            "quantity input is not a number: \"abc\""
        );
        assert_eq!(
            QuantityParseError::Negative(-3).to_string(),
            "quantity cannot be negative: -3"
        );
    }
}
