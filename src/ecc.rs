//! Hamming(7,4) error correction.
//!
//! The codec is split into layers, leaf first:
//! - [`tables`]: the parity table and the three code tables derived from the
//!   generator and parity-check matrices
//! - [`hamming`]: block encode/decode/syndrome operations and the byte-buffer
//!   codec built on them
//! - [`bitstream`]: the dense packer that lays 7-bit codewords across byte
//!   boundaries
//! - [`text`]: encoding of text as its UTF-8 bytes
//!
//! # Examples
//!
//! ```rust
//! use hamming74::ecc::{ErrorCorrection, Hamming74};
//!
//! let codec = Hamming74::new();
//! let mut encoded = codec.encode(b"Slim shady").unwrap();
//! encoded[2] ^= 0x08;
//! assert_eq!(codec.decode(&encoded).unwrap(), b"Slim shady");
//! ```

pub use crate::error::Result;

/// Trait for error correction code implementations
pub trait ErrorCorrection {
    /// Encode data with error correction symbols
    fn encode(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Decode data and correct errors if possible
    fn decode(&self, data: &[u8]) -> Result<Vec<u8>>;
}

pub mod bitstream;
pub mod hamming;
pub mod tables;
pub mod text;

pub use bitstream::{BitCursor, BitReader, BitWriter};
pub use hamming::{
    compute_error, compute_syndrome_vector, decode_block, decode_data, encode_block, encode_data,
    Codeword, DecodeReport, Hamming74, Nibble,
};
pub use tables::{tables, CodeTables};
pub use text::{decode_string, decode_string_lossy, encode_string};
