//! Error types for the Hamming(7,4) codec.
//!
//! The block and data codecs are total and never fail. Errors only arise at
//! the checked boundaries: constructing a [`Nibble`](crate::ecc::hamming::Nibble)
//! or [`Codeword`](crate::ecc::hamming::Codeword) from an out-of-range value,
//! misusing the raw bit primitives, or turning decoded bytes back into text.

use std::string::FromUtf8Error;
use thiserror::Error;

/// Top-level error type for all fallible operations in the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A value does not fit the domain of the requested type
    #[error("{kind} value {value:#04x} out of range (max {max:#04x})")]
    OutOfRange {
        kind: &'static str,
        value: u8,
        max: u8,
    },

    /// Bit count outside the supported 1..=8 range
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),

    /// Attempted to read more bits than remain in the stream
    #[error("insufficient bits: requested {requested}, available {available}")]
    InsufficientBits { requested: usize, available: usize },

    /// Decoded bytes do not form valid UTF-8 text
    #[error("decoded data is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
