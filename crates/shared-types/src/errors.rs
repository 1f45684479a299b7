//! # Error Types
//!
//! Decoding errors for the value objects in this crate.

use thiserror::Error;

/// Errors raised while parsing addresses or ABI-encoded words.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    /// Input has the wrong number of bytes.
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Length required.
        expected: usize,
        /// Length found.
        actual: usize,
    },

    /// An address word carries non-zero bytes in its 12-byte left padding.
    #[error("Address word has dirty padding")]
    DirtyAddressPadding,

    /// Value does not fit the target integer width.
    #[error("Word value overflows {bits}-bit integer")]
    Overflow {
        /// Width of the target integer.
        bits: u32,
    },

    /// Hex string could not be decoded.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),
}
