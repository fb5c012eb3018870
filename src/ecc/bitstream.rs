//! Dense bitstream packing for 7-bit codewords.
//!
//! Codewords are laid out back to back with no padding between them, so a
//! word generally straddles a byte boundary. Bits are numbered LSB-first: bit
//! `k` of the stream is bit `k % 8` of byte `k / 8`, and bit 0 of a word lands
//! at the cursor position.
//!
//! ```text
//! byte:   |    0    |    1    |    2    |
//! bit:     01234567 01234567 01234567
//! words:   aaaaaaab bbbbbbcc ccccc...
//! ```
//!
//! [`BitWriter`] appends words and [`BitReader`] extracts them again; both
//! keep a [`BitCursor`] and are backed by `bitvec` so the shifting across the
//! byte boundary is done by `BitField` loads and stores.

use crate::ecc::tables::WORD_BITS;
use crate::error::{Error, Result};
use bitvec::prelude::*;

/// Largest number of bits `write_bits`/`read_bits` move in one call.
pub const MAX_BITS: usize = u8::BITS as usize;

/// A position inside a byte buffer, as a byte index plus bit offset.
///
/// `offset` is always in `0..8`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitCursor {
    byte: usize,
    offset: u8,
}

impl BitCursor {
    /// Creates a cursor at bit `offset` of byte `byte`.
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfRange` if `offset` is not in `0..8`.
    pub fn new(byte: usize, offset: u8) -> Result<Self> {
        if offset >= 8 {
            return Err(Error::OutOfRange {
                kind: "bit offset",
                value: offset,
                max: 7,
            });
        }
        Ok(Self { byte, offset })
    }

    /// Builds a cursor from an absolute bit position.
    pub fn from_bit_position(position: usize) -> Self {
        Self {
            byte: position / 8,
            offset: (position % 8) as u8,
        }
    }

    /// Index of the current byte
    pub fn byte(&self) -> usize {
        self.byte
    }

    /// Bit offset inside the current byte (0-7)
    pub fn offset(&self) -> u8 {
        self.offset
    }

    /// Absolute bit position of the cursor, or `None` if it does not fit a `usize`.
    pub fn bit_position(&self) -> Option<usize> {
        self.byte
            .checked_mul(8)
            .and_then(|bits| bits.checked_add(self.offset as usize))
    }

    /// Returns the cursor moved forward by `bits`, carrying into the byte index,
    /// or `None` on overflow.
    pub fn advance(self, bits: usize) -> Option<Self> {
        self.bit_position()
            .and_then(|position| position.checked_add(bits))
            .map(Self::from_bit_position)
    }
}

fn check_count(count: usize) -> Result<()> {
    if count == 0 || count > MAX_BITS {
        return Err(Error::InvalidBitCount(count));
    }
    Ok(())
}

/// Appends bit groups to a growing byte buffer.
///
/// Unused bits of the final byte are zero once the buffer is taken out with
/// [`BitWriter::finish`].
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    bits: BitVec<u8, Lsb0>,
}

impl BitWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self {
            bits: BitVec::new(),
        }
    }

    /// Creates an empty writer with room for `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bits: BitVec::with_capacity(bits),
        }
    }

    /// Writes the low `count` bits of `value` at the cursor.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidBitCount` unless `1 <= count <= 8`.
    pub fn write_bits(&mut self, value: u8, count: usize) -> Result<()> {
        check_count(count)?;
        self.push_bits(value, count);
        Ok(())
    }

    /// Writes the low 7 bits of `word` at the cursor and advances it by 7.
    pub fn put_word(&mut self, word: u8) {
        self.push_bits(word, WORD_BITS);
    }

    fn push_bits(&mut self, value: u8, count: usize) {
        self.bits
            .extend_from_bitslice(&value.view_bits::<Lsb0>()[..count]);
    }

    /// Current write position.
    pub fn cursor(&self) -> BitCursor {
        BitCursor::from_bit_position(self.bits.len())
    }

    /// Total number of bits written.
    pub fn bit_len(&self) -> usize {
        self.bits.len()
    }

    /// Consumes the writer and returns the packed bytes.
    pub fn finish(mut self) -> Vec<u8> {
        self.bits.set_uninitialized(false);
        self.bits.into_vec()
    }
}

/// Reads bit groups back out of a byte buffer.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    bits: &'a BitSlice<u8, Lsb0>,
    position: usize,
}

impl<'a> BitReader<'a> {
    /// Starts reading at the first bit of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::at(bytes, BitCursor::default())
    }

    /// Starts reading at an arbitrary cursor inside `bytes`.
    ///
    /// A cursor past the end yields a reader with nothing left to read.
    pub fn at(bytes: &'a [u8], cursor: BitCursor) -> Self {
        let bits = bytes.view_bits::<Lsb0>();
        Self {
            bits,
            position: cursor
                .bit_position()
                .map_or(bits.len(), |position| position.min(bits.len())),
        }
    }

    /// Reads the next `count` bits as the low bits of a byte.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidBitCount` unless `1 <= count <= 8`, and
    /// `Error::InsufficientBits` if fewer than `count` bits remain. The
    /// cursor does not move on error.
    pub fn read_bits(&mut self, count: usize) -> Result<u8> {
        check_count(count)?;
        if count > self.remaining() {
            return Err(Error::InsufficientBits {
                requested: count,
                available: self.remaining(),
            });
        }
        Ok(self.take_bits(count))
    }

    /// Reads the next 7-bit word, or `None` once fewer than 7 bits remain.
    ///
    /// Trailing bits that do not form a whole word are never returned.
    pub fn get_word(&mut self) -> Option<u8> {
        if self.remaining() < WORD_BITS {
            return None;
        }
        Some(self.take_bits(WORD_BITS))
    }

    fn take_bits(&mut self, count: usize) -> u8 {
        let value = self.bits[self.position..self.position + count].load_le::<u8>();
        self.position += count;
        value
    }

    /// Current read position.
    pub fn cursor(&self) -> BitCursor {
        BitCursor::from_bit_position(self.position)
    }

    /// Number of unread bits.
    pub fn remaining(&self) -> usize {
        self.bits.len() - self.position
    }
}

impl Iterator for BitReader<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        self.get_word()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let words = self.remaining() / WORD_BITS;
        (words, Some(words))
    }
}

impl ExactSizeIterator for BitReader<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(byte: usize, offset: u8) -> BitCursor {
        BitCursor::new(byte, offset).unwrap()
    }

    #[test]
    fn test_cursor_arithmetic() {
        let cursor = BitCursor::default().advance(7).unwrap();
        assert_eq!(cursor, at(0, 7));

        let cursor = cursor.advance(7).unwrap();
        assert_eq!(cursor, at(1, 6));
        assert_eq!(cursor.bit_position(), Some(14));
        assert_eq!((cursor.byte(), cursor.offset()), (1, 6));

        let cursor = cursor.advance(2).unwrap();
        assert_eq!(cursor, at(2, 0));
    }

    #[test]
    fn test_cursor_offset_range() {
        assert!(BitCursor::new(3, 7).is_ok());
        assert!(matches!(
            BitCursor::new(3, 8),
            Err(Error::OutOfRange {
                kind: "bit offset",
                value: 8,
                max: 7
            })
        ));
    }

    #[test]
    fn test_cursor_overflow() {
        let far = at(usize::MAX / 8 + 1, 0);
        assert_eq!(far.bit_position(), None);
        assert_eq!(at(usize::MAX / 8, 7).advance(1), None);

        let bytes = [0xFF; 4];
        let reader = BitReader::at(&bytes, far);
        assert_eq!(reader.remaining(), 0);
        let mut reader = BitReader::at(&bytes, at(usize::MAX / 8, 7));
        assert_eq!(reader.remaining(), 0);
        assert_eq!(reader.get_word(), None);
    }

    #[test]
    fn test_put_word_layout() {
        let mut writer = BitWriter::new();
        writer.put_word(0b1111111);
        assert_eq!(writer.cursor(), at(0, 7));
        writer.put_word(0b0000001);
        writer.put_word(0b1000000);
        assert_eq!(writer.bit_len(), 21);

        // word 0 fills bits 0-6, word 1 starts at bit 7 of byte 0,
        // word 2 ends at bit 4 of byte 2.
        assert_eq!(writer.finish(), vec![0b1111_1111, 0b0000_0000, 0b0001_0000]);
    }

    #[test]
    fn test_put_word_ignores_high_bit() {
        let mut writer = BitWriter::new();
        writer.put_word(0xFF);
        writer.put_word(0x80);
        assert_eq!(writer.finish(), vec![0x7F, 0x00]);
    }

    #[test]
    fn test_get_word_across_boundary() {
        let bytes = [0b1111_1111, 0b0000_0000, 0b0001_0000];
        let mut reader = BitReader::new(&bytes);
        assert_eq!(reader.get_word(), Some(0b1111111));
        assert_eq!(reader.get_word(), Some(0b0000001));
        assert_eq!(reader.cursor(), at(1, 6));
        assert_eq!(reader.get_word(), Some(0b1000000));
        // 3 bits left over
        assert_eq!(reader.remaining(), 3);
        assert_eq!(reader.get_word(), None);
    }

    #[test]
    fn test_reader_at_offset() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b101, 3).unwrap();
        writer.put_word(0x5A);
        writer.put_word(0x33);
        let bytes = writer.finish();

        let mut reader = BitReader::at(&bytes, at(0, 3));
        assert_eq!(reader.get_word(), Some(0x5A));
        assert_eq!(reader.get_word(), Some(0x33));
        assert_eq!(reader.remaining(), 7);

        let reader = BitReader::at(&bytes, at(10, 0));
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_write_read_bits() {
        let mut writer = BitWriter::with_capacity(16);
        writer.write_bits(0b1, 1).unwrap();
        writer.write_bits(0b10, 2).unwrap();
        writer.write_bits(0xAB, 8).unwrap();
        let bytes = writer.finish();
        assert_eq!(bytes.len(), 2);

        let mut reader = BitReader::new(&bytes);
        assert_eq!(reader.read_bits(1).unwrap(), 0b1);
        assert_eq!(reader.read_bits(2).unwrap(), 0b10);
        assert_eq!(reader.read_bits(8).unwrap(), 0xAB);
        // padding bits of the final byte are zero
        assert_eq!(reader.read_bits(5).unwrap(), 0);
    }

    #[test]
    fn test_invalid_bit_counts() {
        let mut writer = BitWriter::new();
        assert!(matches!(
            writer.write_bits(0, 0),
            Err(Error::InvalidBitCount(0))
        ));
        assert!(matches!(
            writer.write_bits(0, 9),
            Err(Error::InvalidBitCount(9))
        ));
        assert_eq!(writer.bit_len(), 0);

        let bytes = [0u8; 1];
        let mut reader = BitReader::new(&bytes);
        assert!(matches!(reader.read_bits(9), Err(Error::InvalidBitCount(9))));
        reader.read_bits(6).unwrap();
        assert!(matches!(
            reader.read_bits(3),
            Err(Error::InsufficientBits {
                requested: 3,
                available: 2
            })
        ));
        assert_eq!(reader.cursor(), at(0, 6));
    }

    #[test]
    fn test_reader_iterates_words() {
        let mut writer = BitWriter::new();
        let words: Vec<u8> = (0..20).map(|i| (i * 13) % 128).collect();
        for &w in &words {
            writer.put_word(w);
        }
        let bytes = writer.finish();
        assert_eq!(bytes.len(), (20 * 7 + 7) / 8);

        let reader = BitReader::new(&bytes);
        assert_eq!(reader.len(), 20);
        assert_eq!(reader.collect::<Vec<_>>(), words);
    }

    #[test]
    fn test_empty_buffer() {
        assert!(BitWriter::new().finish().is_empty());
        let mut reader = BitReader::new(&[]);
        assert_eq!(reader.get_word(), None);
    }
}
