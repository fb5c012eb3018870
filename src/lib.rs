pub mod ecc;
pub mod error;

pub use ecc::{decode_data, decode_string, encode_data, encode_string, ErrorCorrection, Hamming74};
pub use error::{Error, Result};
