//! # Errors
//!
//! Typed errors returned by the codec, curve, signature, `did:key` and keypair
//! modules. Every failure is surfaced to the immediate caller; nothing in this
//! crate retries or falls back to a default past a malformed input.

use thiserror::Error;

use crate::Algorithm;

/// Log an error with `tracing` and return it.
///
/// # Example
///
/// ```rust,ignore
/// use credibil_crypto::{tracerr, Error};
///
/// fn with_msg() -> credibil_crypto::Result<()> {
///     tracerr!(Error::InvalidChecksum, "checksum mismatch for version {}", 0)
/// }
/// ```
#[macro_export]
macro_rules! tracerr {
    // with context
    ($err:expr, $($msg:tt)*) => {
        {
        tracing::debug!($($msg)*);
        return Err($err);
        }
    };
    // no context
    ($err:expr) => {
        {
        let err = $err;
        tracing::debug!("{err}");
        return Err(err);
        }
    };
}

/// Errors returned by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A key given to compress or decompress has the wrong size or SEC1 prefix.
    #[error("invalid_key_length: {0}")]
    InvalidKeyLength(String),

    /// Decompression found no curve point for the encoded X coordinate.
    #[error("point_not_on_curve: {0}")]
    PointNotOnCurve(String),

    /// The signature is in a format disallowed by the verification policy, or
    /// its compact/DER structure is malformed.
    #[error("invalid_signature_format: {0}")]
    InvalidSignatureFormat(String),

    /// Public key bytes do not parse as a point on the claimed curve.
    #[error("invalid_public_key: {0}")]
    InvalidPublicKey(String),

    /// Private key bytes are the wrong length or outside `[1, N-1]`.
    #[error("invalid_private_key: {0}")]
    InvalidPrivateKey(String),

    /// The multicodec prefix of a multikey is not registered.
    #[error("unsupported_key_type: {0}")]
    UnsupportedKeyType(String),

    /// The algorithm name is not one this crate implements.
    #[error("unsupported_algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The identifier does not start with `did:key:`.
    #[error("invalid_did_prefix: {0}")]
    InvalidDidPrefix(String),

    /// The multikey does not start with the base58btc multibase tag `z`.
    #[error("invalid_multikey_prefix: {0}")]
    InvalidMultikeyPrefix(String),

    /// Unknown multibase tag, or the inner codec rejected the payload.
    #[error("unsupported_multibase: {0}")]
    UnsupportedMultibase(String),

    /// A character outside the codec's alphabet.
    #[error("invalid_character: {character:?} at index {index}")]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Index of the character in the input.
        index: usize,
    },

    /// Base16 input with an odd number of digits.
    #[error("odd_length")]
    OddLength,

    /// Text could not be decoded by the requested codec.
    #[error("invalid_encoding: {0}")]
    InvalidEncoding(String),

    /// Base58Check checksum mismatch.
    #[error("invalid_checksum")]
    InvalidChecksum,

    /// The caller expected a different algorithm from the one in the DID.
    #[error("mismatched_algorithm: expected {expected}, found {found}")]
    MismatchedAlgorithm {
        /// Algorithm asserted by the caller.
        expected: Algorithm,
        /// Algorithm encoded in the DID.
        found: Algorithm,
    },

    /// Export was attempted on a keypair created as non-exportable.
    #[error("private_key_not_exportable")]
    PrivateKeyNotExportable,

    /// Random integer requested from an empty range.
    #[error("invalid_range: low ({low}) must be less than high ({high})")]
    InvalidRange {
        /// Inclusive lower bound.
        low: u64,
        /// Exclusive upper bound.
        high: u64,
    },

    /// Failure in a collaborator (entropy source, background task) with no
    /// domain-specific meaning.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Stable, machine-readable code for the error kind.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidKeyLength(_) => "invalid_key_length",
            Self::PointNotOnCurve(_) => "point_not_on_curve",
            Self::InvalidSignatureFormat(_) => "invalid_signature_format",
            Self::InvalidPublicKey(_) => "invalid_public_key",
            Self::InvalidPrivateKey(_) => "invalid_private_key",
            Self::UnsupportedKeyType(_) => "unsupported_key_type",
            Self::UnsupportedAlgorithm(_) => "unsupported_algorithm",
            Self::InvalidDidPrefix(_) => "invalid_did_prefix",
            Self::InvalidMultikeyPrefix(_) => "invalid_multikey_prefix",
            Self::UnsupportedMultibase(_) => "unsupported_multibase",
            Self::InvalidCharacter { .. } => "invalid_character",
            Self::OddLength => "odd_length",
            Self::InvalidEncoding(_) => "invalid_encoding",
            Self::InvalidChecksum => "invalid_checksum",
            Self::MismatchedAlgorithm { .. } => "mismatched_algorithm",
            Self::PrivateKeyNotExportable => "private_key_not_exportable",
            Self::InvalidRange { .. } => "invalid_range",
            Self::Other(_) => "other",
        }
    }
}

/// Result type for this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
