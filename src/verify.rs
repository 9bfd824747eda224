//! # Verification
//!
//! Verify a signature against the public key encoded in a `did:key`
//! identifier. The message is hashed with SHA-256 and checked under the
//! strictness policy of [`VerifyOptions`].

use anyhow::anyhow;

use crate::codec::base64;
use crate::did::{parse_did_key, ParsedDidKey};
use crate::signature::VerifyOptions;
use crate::{curve, hash, Algorithm, Error, Result};

/// Verify `signature` over `message` for the key in `did`.
///
/// When `expected` is set, the key's algorithm must match it.
///
/// # Errors
///
/// Returns the [`parse_did_key`] errors for a malformed identifier,
/// [`Error::MismatchedAlgorithm`] when the key is not of the expected
/// algorithm, and [`Error::InvalidSignatureFormat`] when strict verification
/// is given a non-compact signature.
pub fn verify_signature(
    did: &str, message: &[u8], signature: &[u8], options: &VerifyOptions,
    expected: Option<Algorithm>,
) -> Result<bool> {
    let ParsedDidKey { algorithm, public_key } = parse_did_key(did)?;
    if let Some(expected) = expected {
        if expected != algorithm {
            crate::tracerr!(Error::MismatchedAlgorithm {
                expected,
                found: algorithm
            });
        }
    }

    let hash = hash::sha256(message);
    curve::verify(algorithm, &public_key, &hash, signature, options)
}

/// Verify with strict options and no algorithm constraint.
///
/// # Errors
///
/// See [`verify_signature`].
pub fn verify_did_signature(did: &str, data: &[u8], signature: &[u8]) -> Result<bool> {
    verify_signature(did, data, signature, &VerifyOptions::default(), None)
}

/// Verify a UTF-8 message against a base64url (unpadded) signature.
///
/// # Errors
///
/// Returns [`Error::InvalidEncoding`] if the signature is not valid
/// base64url, otherwise the errors of [`verify_signature`].
pub fn verify_signature_str(
    did: &str, message: &str, signature: &str, options: &VerifyOptions,
    expected: Option<Algorithm>,
) -> Result<bool> {
    let signature = base64::decode_url(signature)?;
    verify_signature(did, message.as_bytes(), &signature, options, expected)
}

/// Run [`verify_signature`] on a blocking worker thread.
///
/// # Errors
///
/// Returns the errors of [`verify_signature`], or
/// [`Error::Other`](crate::Error::Other) if the worker task fails.
pub async fn verify_signature_async(
    did: String, message: Vec<u8>, signature: Vec<u8>, options: VerifyOptions,
    expected: Option<Algorithm>,
) -> Result<bool> {
    tokio::task::spawn_blocking(move || {
        verify_signature(&did, &message, &signature, &options, expected)
    })
    .await
    .map_err(|e| anyhow!("verification task failed: {e}"))?
}
