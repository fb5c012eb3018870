//! Text front end for the data codec.
//!
//! Text is encoded as its UTF-8 bytes. Decoding copies the recovered bytes
//! into a new `String`, so bytes that are not valid UTF-8 (possible only when
//! the input was not produced by [`encode_string`] or was damaged beyond what
//! the code can correct) surface as an error rather than a malformed string.

use crate::ecc::hamming::{decode_data, encode_data};
use crate::ecc::Result;

/// Encodes the UTF-8 bytes of `text`.
pub fn encode_string(text: &str) -> Vec<u8> {
    encode_data(text.as_bytes())
}

/// Decodes a buffer produced by [`encode_string`] back into text.
///
/// # Errors
///
/// Returns `Error::Utf8` if the decoded bytes are not valid UTF-8.
pub fn decode_string(encoded: &[u8]) -> Result<String> {
    Ok(String::from_utf8(decode_data(encoded))?)
}

/// Like [`decode_string`], but replaces invalid UTF-8 with U+FFFD.
pub fn decode_string_lossy(encoded: &[u8]) -> String {
    String::from_utf8_lossy(&decode_data(encoded)).into_owned()
}
