//! # Error Types
//!
//! Errors raised while decoding shared primitives.

use thiserror::Error;

/// Errors that can occur when parsing an `Identity` from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityParseError {
    /// Wrong number of hex digits.
    #[error("invalid identity length: expected {expected} hex digits, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Non-hex characters.
    #[error("invalid identity hex: {0}")]
    InvalidHex(String),
}

/// Errors that can occur when decoding a shipping status wire code.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum StatusCodeError {
    /// Code 1 sits between RECEIVED and IN_TRANSIT and is not assigned.
    #[error("shipping status code {0} is reserved")]
    Reserved(u8),

    /// Code outside the known range.
    #[error("unknown shipping status code {0}")]
    Unknown(u8),
}
