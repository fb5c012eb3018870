//! Hamming(7,4) block and data codec.
//!
//! Hamming codes are a family of linear error-correcting codes developed by
//! Richard Hamming in 1950. The (7,4) variant encodes 4 data bits into 7 bits
//! by adding 3 parity bits, and corrects any single flipped bit per codeword.
//!
//! This module provides:
//! - Block operations on single nibbles and codewords, as table lookups
//! - Checked [`Nibble`] and [`Codeword`] types for callers that want
//!   out-of-range values rejected rather than masked
//! - Byte-buffer encoding, where every byte becomes two codewords packed
//!   densely into the output (14 bits per input byte)
//!
//! # Limitations
//!
//! Two or more flipped bits in the same codeword are *not* detected. The
//! syndrome then points at the wrong bit and the block decodes to a different,
//! valid-looking nibble with no indication of failure. This is inherent to a
//! single-error-correcting code.
//!
//! # Examples
//!
//! ```
//! use hamming74::ecc::hamming::{decode_data, encode_data};
//!
//! let data = [7, 100, 125, 200, 20, 50];
//! let mut encoded = encode_data(&data);
//! assert_eq!(encoded.len(), 11);
//!
//! encoded[3] ^= 0x10;
//! assert_eq!(decode_data(&encoded), data);
//! ```

use crate::ecc::bitstream::{BitReader, BitWriter};
use crate::ecc::tables::{error_mask, tables, NIBBLE_BITS, NIBBLE_MASK, WORD_BITS, WORD_MASK};
use crate::ecc::{ErrorCorrection, Result};
use crate::error::Error;
use log::{debug, trace};

/// Encoded bits produced per input byte.
pub const BITS_PER_BYTE: usize = 2 * WORD_BITS;

/// Encodes the low 4 bits of `nibble` into a 7-bit codeword.
#[inline]
pub fn encode_block(nibble: u8) -> u8 {
    tables().encode(nibble)
}

/// Computes the 3-bit syndrome vector of the low 7 bits of `codeword`.
///
/// Zero means `codeword` is a valid codeword; a single flip of bit `p`
/// produces `7 - p`.
#[inline]
pub fn compute_syndrome_vector(codeword: u8) -> u8 {
    tables().syndrome(codeword)
}

/// Returns the single-bit mask that corrects `syndrome`, or 0 for no error.
#[inline]
pub fn compute_error(syndrome: u8) -> u8 {
    error_mask(syndrome)
}

/// Decodes the low 7 bits of `codeword` to a nibble, correcting up to one
/// flipped bit.
#[inline]
pub fn decode_block(codeword: u8) -> u8 {
    tables().decode(codeword)
}

/// A 4-bit data value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Nibble(u8);

impl Nibble {
    /// Creates a nibble, rejecting values above 15.
    pub fn new(value: u8) -> Result<Self> {
        if value > NIBBLE_MASK {
            return Err(Error::OutOfRange {
                kind: "nibble",
                value,
                max: NIBBLE_MASK,
            });
        }
        Ok(Nibble(value))
    }

    /// Get the raw value of this nibble
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Splits a byte into its (high, low) nibbles.
    pub fn split(byte: u8) -> (Nibble, Nibble) {
        (Nibble(byte >> NIBBLE_BITS), Nibble(byte & NIBBLE_MASK))
    }

    /// Joins a (high, low) nibble pair back into a byte.
    pub fn join(high: Nibble, low: Nibble) -> u8 {
        (high.0 << NIBBLE_BITS) | low.0
    }

    /// Encodes this nibble into its codeword.
    pub fn encode(self) -> Codeword {
        Codeword(encode_block(self.0))
    }
}

impl TryFrom<u8> for Nibble {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Nibble::new(value)
    }
}

impl From<Nibble> for u8 {
    fn from(nibble: Nibble) -> u8 {
        nibble.0
    }
}

/// A 7-bit codeword, valid or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Codeword(u8);

impl Codeword {
    /// Creates a codeword, rejecting values above 127.
    pub fn new(value: u8) -> Result<Self> {
        if value > WORD_MASK {
            return Err(Error::OutOfRange {
                kind: "codeword",
                value,
                max: WORD_MASK,
            });
        }
        Ok(Codeword(value))
    }

    /// Get the raw value of this codeword
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Syndrome vector of this codeword (0 when valid).
    pub fn syndrome(&self) -> u8 {
        compute_syndrome_vector(self.0)
    }

    /// Single-bit mask that corrects this codeword, or 0 when valid.
    pub fn error_mask(&self) -> u8 {
        compute_error(self.syndrome())
    }

    /// Whether this is one of the 16 codewords produced by encoding.
    pub fn is_valid(&self) -> bool {
        self.syndrome() == 0
    }

    /// Returns this codeword with bit `position` (0-6) inverted.
    pub fn flip_bit(self, position: u8) -> Result<Self> {
        if position as usize >= WORD_BITS {
            return Err(Error::OutOfRange {
                kind: "bit position",
                value: position,
                max: WORD_BITS as u8 - 1,
            });
        }
        Ok(Codeword(self.0 ^ (1 << position)))
    }

    /// Decodes to the nearest nibble, correcting up to one flipped bit.
    pub fn decode(self) -> Nibble {
        Nibble(decode_block(self.0))
    }
}

impl TryFrom<u8> for Codeword {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Codeword::new(value)
    }
}

impl From<Codeword> for u8 {
    fn from(codeword: Codeword) -> u8 {
        codeword.0
    }
}

/// Outcome of decoding a buffer, with correction statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeReport {
    /// Decoded bytes
    pub data: Vec<u8>,
    /// Number of codewords consumed (two per decoded byte)
    pub words: usize,
    /// Codewords with a non-zero syndrome, i.e. where a bit was flipped back
    pub corrected_words: usize,
}

/// Encodes a byte buffer, high nibble first, into a dense codeword stream.
///
/// The output holds exactly `14 * data.len()` meaningful bits; any bits left
/// over in the final byte are zero.
pub fn encode_data(data: &[u8]) -> Vec<u8> {
    #[cfg(feature = "parallel")]
    let encoded = parallel::encode(data);
    #[cfg(not(feature = "parallel"))]
    let encoded = encode_serial(data);
    encoded
}

/// Decodes a codeword stream produced by [`encode_data`].
///
/// Each pair of codewords yields one byte. Decoding stops once fewer than 7
/// bits remain; those bits, and a final codeword without a partner, are
/// dropped. The output therefore has `floor(8 * encoded.len() / 14)` bytes.
///
/// Input that did not come from [`encode_data`] still decodes to something,
/// but the result carries no meaning.
pub fn decode_data(encoded: &[u8]) -> Vec<u8> {
    decode_report(encoded).data
}

fn decode_report(encoded: &[u8]) -> DecodeReport {
    #[cfg(feature = "parallel")]
    let report = parallel::decode(encoded);
    #[cfg(not(feature = "parallel"))]
    let report = decode_serial(encoded);
    report
}

fn encode_serial(data: &[u8]) -> Vec<u8> {
    let mut writer = BitWriter::with_capacity(data.len() * BITS_PER_BYTE);
    for &byte in data {
        let (high, low) = Nibble::split(byte);
        writer.put_word(encode_block(high.value()));
        writer.put_word(encode_block(low.value()));
    }
    writer.finish()
}

fn decode_serial(encoded: &[u8]) -> DecodeReport {
    let mut reader = BitReader::new(encoded);
    let mut report = DecodeReport {
        data: Vec::with_capacity(encoded.len() * 8 / BITS_PER_BYTE),
        ..DecodeReport::default()
    };

    while let Some(first) = reader.get_word() {
        let Some(second) = reader.get_word() else {
            debug!("dropping unpaired trailing codeword {first:#04x}");
            break;
        };

        for word in [first, second] {
            if compute_syndrome_vector(word) != 0 {
                report.corrected_words += 1;
            }
        }
        report.words += 2;
        report
            .data
            .push(Nibble::join(Codeword(first).decode(), Codeword(second).decode()));
    }

    // encode_data pads with fewer than 8 bits; anything more is foreign
    if reader.remaining() >= 8 {
        debug!("discarding {} trailing bits", reader.remaining());
    }

    report
}

#[cfg(feature = "parallel")]
mod parallel {
    use super::{decode_serial, encode_serial, DecodeReport, BITS_PER_BYTE};
    use rayon::prelude::*;

    /// Input bytes per work item. Any multiple of 4 encodes to a whole number
    /// of bytes (4 * 14 = 56 bits), so chunks can be encoded independently and
    /// concatenated.
    const CHUNK_BYTES: usize = 4 * 1024;
    const ENCODED_CHUNK_BYTES: usize = CHUNK_BYTES * BITS_PER_BYTE / 8;

    pub(super) fn encode(data: &[u8]) -> Vec<u8> {
        data.par_chunks(CHUNK_BYTES)
            .map(encode_serial)
            .collect::<Vec<_>>()
            .concat()
    }

    pub(super) fn decode(encoded: &[u8]) -> DecodeReport {
        encoded
            .par_chunks(ENCODED_CHUNK_BYTES)
            .map(decode_serial)
            .collect::<Vec<_>>()
            .into_iter()
            .fold(DecodeReport::default(), merge)
    }

    fn merge(mut acc: DecodeReport, chunk: DecodeReport) -> DecodeReport {
        acc.data.extend_from_slice(&chunk.data);
        acc.words += chunk.words;
        acc.corrected_words += chunk.corrected_words;
        acc
    }
}

/// The Hamming(7,4) codec as a value, for use behind [`ErrorCorrection`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hamming74;

impl Hamming74 {
    /// Creates the codec.
    pub fn new() -> Self {
        Hamming74
    }

    /// Number of data bits per block
    pub const fn data_bits(&self) -> usize {
        NIBBLE_BITS
    }

    /// Gets the total code word length (data bits + parity bits)
    pub const fn total_bits(&self) -> usize {
        WORD_BITS
    }

    /// Gets the number of encoded bytes produced for a given number of input bytes
    pub fn encoded_len(&self, input_bytes: usize) -> usize {
        (input_bytes * BITS_PER_BYTE).div_ceil(8)
    }

    /// Gets the number of bytes decoded from a given number of encoded bytes
    pub fn decoded_len(&self, encoded_bytes: usize) -> usize {
        encoded_bytes * 8 / BITS_PER_BYTE
    }

    /// Decodes `encoded` and reports how many codewords needed correcting.
    pub fn decode_with_report(&self, encoded: &[u8]) -> DecodeReport {
        let report = decode_report(encoded);
        trace!(
            "decoded {} bytes from {} codewords, {} corrected",
            report.data.len(),
            report.words,
            report.corrected_words
        );
        report
    }
}

impl ErrorCorrection for Hamming74 {
    fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        trace!("encoding {} bytes", data.len());
        Ok(encode_data(data))
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<u8>> {
        trace!("decoding {} bytes", data.len());
        Ok(decode_data(data))
    }
}
