//! Base58 using the Bitcoin alphabet, with an optional Base58Check variant.
//!
//! Leading zero bytes are preserved as leading `1` characters.

use crate::{Error, Result};

/// Encode bytes as base58btc.
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    bs58::encode(bytes).into_string()
}

/// Decode base58btc. An empty string decodes to empty bytes.
///
/// # Errors
///
/// Returns [`Error::InvalidCharacter`] for any character outside the
/// 58-character alphabet.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    bs58::decode(text).into_vec().map_err(decode_error)
}

/// Encode `version || payload || checksum` where the checksum is the first
/// four bytes of `SHA-256(SHA-256(version || payload))`.
#[must_use]
pub fn encode_check(version: u8, payload: &[u8]) -> String {
    bs58::encode(payload).with_check_version(version).into_string()
}

/// Decode Base58Check text into its version byte and payload.
///
/// # Errors
///
/// Returns [`Error::InvalidCharacter`] for characters outside the alphabet,
/// [`Error::InvalidEncoding`] when the decoded bytes are too short to hold a
/// version and checksum, and [`Error::InvalidChecksum`] on checksum mismatch.
pub fn decode_check(text: &str) -> Result<(u8, Vec<u8>)> {
    let data = bs58::decode(text).with_check(None).into_vec().map_err(decode_error)?;
    let Some((version, payload)) = data.split_first() else {
        return Err(Error::InvalidEncoding("base58check: missing version byte".into()));
    };
    Ok((*version, payload.to_vec()))
}

fn decode_error(e: bs58::decode::Error) -> Error {
    match e {
        bs58::decode::Error::InvalidCharacter { character, index } => {
            Error::InvalidCharacter { character, index }
        }
        bs58::decode::Error::InvalidChecksum { .. } => Error::InvalidChecksum,
        _ => Error::InvalidEncoding(format!("base58: {e}")),
    }
}
