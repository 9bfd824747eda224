//! # Credibil Crypto
//!
//! Cryptographic primitives for decentralized identity:
//!
//! - P-256 and secp256k1 keypairs with opt-in private key export.
//! - ECDSA signatures canonicalized to "low-S" form, with conversion between
//!   compact (`r || s`) and DER encodings.
//! - SEC1 point compression and decompression.
//! - `did:key` identifiers built from multicodec-prefixed, base58btc-encoded
//!   compressed public keys.
//! - Base16, Base32, Base64, Base58 and multibase text codecs.
//!
//! ```rust
//! use credibil_crypto::keypair::{K256Keypair, Keypair};
//! use credibil_crypto::verify::verify_did_signature;
//!
//! let keypair = K256Keypair::generate(false);
//! let did = keypair.did().expect("should derive did");
//! let data = [1, 2, 3, 4, 5, 6, 7, 8];
//! let signature = keypair.sign_compact(&data).expect("should sign");
//!
//! assert!(verify_did_signature(&did, &data, &signature).expect("should verify"));
//! ```
//!
//! See:
//!
//! - <https://w3c-ccg.github.io/did-method-key>
//! - <https://atproto.com/specs/cryptography>

pub mod codec;
pub mod curve;
pub mod did;
mod error;
pub mod hash;
pub mod keypair;
pub mod multikey;
pub mod random;
pub mod signature;
pub mod verify;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

pub use self::did::{format_did_key, parse_did_key, ParsedDidKey};
pub use self::error::{Error, Result};
pub use self::keypair::{K256Keypair, Keypair, P256Keypair};
pub use self::multikey::{bytes_to_multibase, multibase_to_bytes, Multibase};
pub use self::signature::{SignatureFormat, VerifyOptions};
pub use self::verify::{verify_did_signature, verify_signature};

/// Multicodec prefix for a compressed P-256 public key (`p256-pub`, 0x1200).
pub const P256_DID_PREFIX: [u8; 2] = [0x80, 0x24];

/// Multicodec prefix for a compressed secp256k1 public key (`secp256k1-pub`,
/// 0xe7).
pub const K256_DID_PREFIX: [u8; 2] = [0xe7, 0x01];

/// JWT `alg` header value for ECDSA over P-256.
pub const P256_JWT_ALG: &str = "ES256";

/// JWT `alg` header value for ECDSA over secp256k1.
pub const K256_JWT_ALG: &str = "ES256K";

/// Signature algorithms supported by this crate. Each variant is a closed
/// registry entry binding a curve to its multicodec prefix and JWT tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Algorithm {
    /// ECDSA over NIST P-256 (secp256r1).
    #[serde(rename = "ES256")]
    P256,

    /// ECDSA over secp256k1.
    #[serde(rename = "ES256K")]
    K256,
}

impl Algorithm {
    /// Every registered algorithm, in multicodec lookup order.
    pub const ALL: [Self; 2] = [Self::P256, Self::K256];

    /// JWT `alg` header value.
    #[must_use]
    pub const fn jwt_alg(self) -> &'static str {
        match self {
            Self::P256 => P256_JWT_ALG,
            Self::K256 => K256_JWT_ALG,
        }
    }

    /// Two-byte multicodec prefix used in multikeys and `did:key` identifiers.
    #[must_use]
    pub const fn multicodec_prefix(self) -> [u8; 2] {
        match self {
            Self::P256 => P256_DID_PREFIX,
            Self::K256 => K256_DID_PREFIX,
        }
    }

    /// Short curve name.
    #[must_use]
    pub const fn curve_name(self) -> &'static str {
        match self {
            Self::P256 => "p256",
            Self::K256 => "k256",
        }
    }

    /// Order (N) of the curve's base point.
    #[must_use]
    pub fn order(self) -> &'static BigUint {
        &curve::params(self).n
    }

    /// Find the algorithm whose multicodec prefix starts `bytes`.
    #[must_use]
    pub fn from_multicodec(bytes: &[u8]) -> Option<Self> {
        Self::ALL.into_iter().find(|alg| bytes.starts_with(&alg.multicodec_prefix()))
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.jwt_alg())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    /// Parse a JWT `alg` value or curve name into an [`Algorithm`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedAlgorithm`] if the string names neither
    /// supported curve.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            P256_JWT_ALG | "p256" | "P-256" | "secp256r1" => Ok(Self::P256),
            K256_JWT_ALG | "k256" | "secp256k1" => Ok(Self::K256),
            _ => Err(Error::UnsupportedAlgorithm(s.to_string())),
        }
    }
}
