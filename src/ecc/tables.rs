//! Precomputed lookup tables for the Hamming(7,4) code.
//!
//! The code is fully described by two fixed binary matrices: the generator
//! matrix [`GENERATOR`] and the parity-check matrix [`PARITY_CHECK`]. Rather
//! than multiplying by them at runtime, every possible input is evaluated once
//! and the results are stored in four small tables:
//!
//! | Table    | Entries | Index      | Value                 |
//! |----------|---------|------------|-----------------------|
//! | parity   | 256     | any byte   | XOR of its bits       |
//! | encoding | 16      | nibble     | codeword              |
//! | syndrome | 128     | codeword   | syndrome vector       |
//! | decoding | 128     | codeword   | corrected nibble      |
//!
//! A row-times-vector product over GF(2) reduces to `parity(input & row)`, so
//! the parity table is the only primitive the other three need.
//!
//! All tables are generated by a `const fn` and live in an immutable static,
//! so they are ready before the first lookup and may be read from any number
//! of threads.

/// Number of data bits per block.
pub const NIBBLE_BITS: usize = 4;
/// Number of bits in a syndrome vector.
pub const SYNDROME_BITS: usize = 3;
/// Number of bits in a codeword.
pub const WORD_BITS: usize = 7;

pub const NIBBLE_MASK: u8 = (1 << NIBBLE_BITS) - 1;
pub const SYNDROME_MASK: u8 = (1 << SYNDROME_BITS) - 1;
pub const WORD_MASK: u8 = (1 << WORD_BITS) - 1;

const NIBBLES: usize = 1 << NIBBLE_BITS;
const WORDS: usize = 1 << WORD_BITS;

/// Generator matrix, one row per codeword bit (row `i` produces bit `i`).
///
/// Bit 0 of each row corresponds to the least significant nibble bit, so the
/// rows read reversed relative to the textbook matrix.
pub const GENERATOR: [u8; WORD_BITS] = [
    0b1000, 0b0100, 0b0010, 0b1110, 0b0001, 0b1101, 0b1011,
];

/// Parity-check matrix, one row per syndrome bit.
pub const PARITY_CHECK: [u8; SYNDROME_BITS] = [0b1010101, 0b0110011, 0b0001111];

/// Codeword bit positions holding the nibble, lowest nibble bit first.
///
/// These are the rows of [`GENERATOR`] that form an identity sub-matrix.
const DATA_POSITIONS: [u8; NIBBLE_BITS] = [4, 2, 1, 0];

static TABLES: CodeTables = CodeTables::generate();

/// Returns the shared, immutable code tables.
///
/// The tables are evaluated at compile time, so this is a plain reference
/// and never performs any work.
#[inline]
pub fn tables() -> &'static CodeTables {
    &TABLES
}

/// The four lookup tables implementing the code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTables {
    parity: [u8; 256],
    encoding: [u8; NIBBLES],
    syndrome: [u8; WORDS],
    decoding: [u8; WORDS],
}

impl CodeTables {
    /// Builds all four tables from the fixed matrices.
    pub const fn generate() -> Self {
        let parity = gen_parity_table();
        let encoding = gen_encoding_table(&parity);
        let syndrome = gen_syndrome_table(&parity);
        let decoding = gen_decoding_table(&syndrome);

        Self {
            parity,
            encoding,
            syndrome,
            decoding,
        }
    }

    /// Parity (0 or 1) of the set bits in `x`.
    #[inline]
    pub fn parity(&self, x: u8) -> u8 {
        self.parity[x as usize]
    }

    /// Codeword for the low 4 bits of `nibble`.
    #[inline]
    pub fn encode(&self, nibble: u8) -> u8 {
        self.encoding[(nibble & NIBBLE_MASK) as usize]
    }

    /// Syndrome vector for the low 7 bits of `word`.
    #[inline]
    pub fn syndrome(&self, word: u8) -> u8 {
        self.syndrome[(word & WORD_MASK) as usize]
    }

    /// Corrected nibble for the low 7 bits of `word`.
    #[inline]
    pub fn decode(&self, word: u8) -> u8 {
        self.decoding[(word & WORD_MASK) as usize]
    }
}

/// Maps a syndrome vector to the single-bit mask that corrects it.
///
/// The columns of [`PARITY_CHECK`] are ordered so that a flip of codeword bit
/// `p` yields syndrome `7 - p`; inverting that gives bit `7 - syndrome`.
/// Only the low 3 bits of `syndrome` are considered.
#[inline]
pub const fn error_mask(syndrome: u8) -> u8 {
    let syndrome = syndrome & SYNDROME_MASK;
    if syndrome == 0 {
        return 0;
    }
    1 << (WORD_BITS as u8 - syndrome)
}

const fn gen_parity_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < table.len() {
        table[i] = ((i as u8).count_ones() & 1) as u8;
        i += 1;
    }
    table
}

/// Multiplies `input` by each row of `matrix`, packing result bit `i` at
/// position `i`.
const fn mul_rows(parity: &[u8; 256], matrix: &[u8], input: u8) -> u8 {
    let mut result = 0;
    let mut i = 0;
    while i < matrix.len() {
        result |= parity[(input & matrix[i]) as usize] << i;
        i += 1;
    }
    result
}

const fn gen_encoding_table(parity: &[u8; 256]) -> [u8; NIBBLES] {
    let mut table = [0u8; NIBBLES];
    let mut nibble = 0;
    while nibble < NIBBLES {
        table[nibble] = mul_rows(parity, &GENERATOR, nibble as u8);
        nibble += 1;
    }
    table
}

const fn gen_syndrome_table(parity: &[u8; 256]) -> [u8; WORDS] {
    let mut table = [0u8; WORDS];
    let mut word = 0;
    while word < WORDS {
        table[word] = mul_rows(parity, &PARITY_CHECK, word as u8);
        word += 1;
    }
    table
}

const fn gen_decoding_table(syndrome: &[u8; WORDS]) -> [u8; WORDS] {
    let mut table = [0u8; WORDS];
    let mut word = 0;
    while word < WORDS {
        let corrected = word as u8 ^ error_mask(syndrome[word]);
        table[word] = extract_nibble(corrected);
        word += 1;
    }
    table
}

const fn extract_nibble(word: u8) -> u8 {
    let mut nibble = 0;
    let mut i = 0;
    while i < NIBBLE_BITS {
        nibble |= ((word >> DATA_POSITIONS[i]) & 1) << i;
        i += 1;
    }
    nibble
}
