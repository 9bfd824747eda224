//! Base16 (hexadecimal).

use hex::FromHexError;

use crate::{Error, Result};

/// Encode bytes as lowercase hex.
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Encode bytes as uppercase hex.
#[must_use]
pub fn encode_upper(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

/// Decode hex of either case. An empty string decodes to empty bytes.
///
/// # Errors
///
/// Returns [`Error::OddLength`] when the input has an odd number of digits,
/// or [`Error::InvalidCharacter`] for a non-hex character.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    hex::decode(text).map_err(|e| match e {
        FromHexError::OddLength => Error::OddLength,
        FromHexError::InvalidHexCharacter { c, index } => Error::InvalidCharacter {
            character: c,
            index,
        },
        FromHexError::InvalidStringLength => Error::InvalidEncoding(e.to_string()),
    })
}
