//! # DID Key
//!
//! The `did:key` method encodes a public key directly in the identifier:
//!
//! ```text
//! did:key:z<base58btc(multicodec prefix || compressed public key)>
//! ```
//!
//! The multicodec prefix selects the curve: `0x80 0x24` for P-256 and
//! `0xe7 0x01` for secp256k1.
//!
//! See:
//!
//! - <https://w3c-ccg.github.io/did-method-key>
//! - <https://github.com/multiformats/multicodec>

use crate::codec::base58;
use crate::curve::{self, COMPRESSED_KEY_LENGTH, UNCOMPRESSED_KEY_LENGTH};
use crate::multikey::Multibase;
use crate::{Algorithm, Error, Result};

/// Scheme and method prefix of every `did:key` identifier.
pub const DID_KEY_PREFIX: &str = "did:key:";

/// A parsed `did:key`: the algorithm selected by its multicodec prefix and
/// the uncompressed (65-byte) public key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedDidKey {
    /// Signature algorithm of the key.
    pub algorithm: Algorithm,

    /// SEC1 uncompressed public key.
    pub public_key: Vec<u8>,
}

/// Build a multikey (the `did:key` method-specific identifier) from a public
/// key in either SEC1 form.
///
/// # Errors
///
/// Returns [`Error::InvalidKeyLength`] if the key is neither a 65-byte
/// uncompressed nor a 33-byte compressed SEC1 key.
pub fn format_multikey(alg: Algorithm, public_key: &[u8]) -> Result<String> {
    let compressed = match public_key.len() {
        UNCOMPRESSED_KEY_LENGTH => curve::compress(public_key)?,
        COMPRESSED_KEY_LENGTH if matches!(public_key[0], 0x02 | 0x03) => {
            let mut compressed = [0u8; COMPRESSED_KEY_LENGTH];
            compressed.copy_from_slice(public_key);
            compressed
        }
        len => {
            let curve = alg.curve_name();
            crate::tracerr!(Error::InvalidKeyLength(format!(
                "{curve}: expected an uncompressed or compressed SEC1 key, got {len} bytes"
            )));
        }
    };

    let mut multi_bytes = alg.multicodec_prefix().to_vec();
    multi_bytes.extend_from_slice(&compressed);
    Ok(format!("{}{}", Multibase::Base58Btc.prefix(), base58::encode(&multi_bytes)))
}

/// Parse a multikey into its algorithm and uncompressed public key.
///
/// # Errors
///
/// Returns [`Error::InvalidMultikeyPrefix`] if the multikey is not
/// base58btc (`z`), [`Error::InvalidCharacter`] for non-base58 characters,
/// [`Error::UnsupportedKeyType`] for an unregistered multicodec prefix, or
/// the decompression error for a malformed key.
pub fn parse_multikey(multikey: &str) -> Result<ParsedDidKey> {
    let Some(encoded) = multikey.strip_prefix(Multibase::Base58Btc.prefix()) else {
        crate::tracerr!(Error::InvalidMultikeyPrefix(format!(
            "multikey must be base58btc ('z') encoded: {multikey}"
        )));
    };
    let multi_bytes = base58::decode(encoded)?;

    let Some(algorithm) = Algorithm::from_multicodec(&multi_bytes) else {
        let prefix = &multi_bytes[..multi_bytes.len().min(2)];
        crate::tracerr!(
            Error::UnsupportedKeyType(format!("unregistered multicodec prefix {prefix:02x?}")),
            "no key type registered for multicodec prefix {prefix:02x?}"
        );
    };
    let compressed = &multi_bytes[algorithm.multicodec_prefix().len()..];
    let public_key = curve::decompress(algorithm, compressed)?;

    Ok(ParsedDidKey {
        algorithm,
        public_key: public_key.to_vec(),
    })
}

/// Format a `did:key` identifier from an algorithm and a SEC1 public key.
///
/// # Errors
///
/// Returns [`Error::InvalidKeyLength`] if the public key is not a 65-byte
/// uncompressed or 33-byte compressed SEC1 key.
pub fn format_did_key(alg: Algorithm, public_key: &[u8]) -> Result<String> {
    Ok(format!("{DID_KEY_PREFIX}{}", format_multikey(alg, public_key)?))
}

/// Parse a `did:key` identifier into its algorithm and uncompressed public
/// key.
///
/// # Errors
///
/// Returns [`Error::InvalidDidPrefix`] if the identifier does not start with
/// `did:key:`, otherwise the errors of [`parse_multikey`].
pub fn parse_did_key(did: &str) -> Result<ParsedDidKey> {
    let Some(multikey) = did.strip_prefix(DID_KEY_PREFIX) else {
        crate::tracerr!(Error::InvalidDidPrefix(format!("not a did:key identifier: {did}")));
    };
    parse_multikey(multikey)
}
