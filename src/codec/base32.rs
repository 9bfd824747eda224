//! Base32 (RFC 4648) with `=` padding to an 8-character block boundary.
//!
//! Unlike the other codecs, an empty (or all-padding) input is rejected
//! rather than decoding to empty bytes.

use multibase::Base;

use crate::{Error, Result};

/// Encode bytes with the lowercase alphabet `a-z2-7`.
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    Base::Base32PadLower.encode(bytes)
}

/// Encode bytes with the uppercase alphabet `A-Z2-7`.
#[must_use]
pub fn encode_upper(bytes: &[u8]) -> String {
    Base::Base32PadUpper.encode(bytes)
}

/// Decode lowercase, padded Base32.
///
/// # Errors
///
/// Returns [`Error::InvalidEncoding`] for an empty input, a character outside
/// the lowercase alphabet, or malformed padding.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    decode_with(Base::Base32PadLower, text)
}

/// Decode uppercase, padded Base32.
///
/// # Errors
///
/// Returns [`Error::InvalidEncoding`] for an empty input, a character outside
/// the uppercase alphabet, or malformed padding.
pub fn decode_upper(text: &str) -> Result<Vec<u8>> {
    decode_with(Base::Base32PadUpper, text)
}

fn decode_with(base: Base, text: &str) -> Result<Vec<u8>> {
    if text.trim_end_matches('=').is_empty() {
        return Err(Error::InvalidEncoding("base32: no data to decode".into()));
    }
    base.decode(text).map_err(|e| Error::InvalidEncoding(format!("base32: {e}")))
}
