//! # Keypairs
//!
//! A keypair owns a private scalar and exposes signing, `did:key` derivation
//! and, if created as exportable, export of the raw private key. The
//! exportable flag is fixed at construction.
//!
//! Signatures from [`Keypair::sign`] are DER-encoded and low-S. Callers that
//! need compact `r || s` signatures (for example, for strict verification)
//! use [`Keypair::sign_compact`].

// A keypair type over one RustCrypto curve crate. Signing goes through
// `curve::sign` so every keypair produces the same low-S DER output.
macro_rules! ecdsa_keypair {
    ($name:ident, $krate:ident, $alg:expr, $doc:literal) => {
        use std::fmt::{self, Debug, Formatter};

        use ::$krate::ecdsa::SigningKey;
        use rand::rngs::OsRng;

        use crate::codec::base16;
        use crate::curve::{self, COMPRESSED_KEY_LENGTH};
        use crate::keypair::Keypair;
        use crate::{hash, Algorithm, Error, Result};

        #[doc = $doc]
        pub struct $name {
            signing_key: SigningKey,
            public_key: [u8; COMPRESSED_KEY_LENGTH],
            exportable: bool,
        }

        impl $name {
            /// Generate a keypair from a uniformly random scalar.
            #[must_use]
            pub fn generate(exportable: bool) -> Self {
                Self::new(SigningKey::random(&mut OsRng), exportable)
            }

            /// Import a keypair from a raw 32-byte private key.
            ///
            /// # Errors
            ///
            /// Returns [`Error::InvalidPrivateKey`] if the key is not 32 bytes
            /// or its scalar is outside `[1, N-1]`.
            pub fn import(private_key: &[u8], exportable: bool) -> Result<Self> {
                curve::check_private_key($alg, private_key)?;
                let signing_key = SigningKey::from_slice(private_key).map_err(|e| {
                    Error::InvalidPrivateKey(format!("{}: {e}", $alg.curve_name()))
                })?;
                Ok(Self::new(signing_key, exportable))
            }

            /// Import a keypair from a hex-encoded private key.
            ///
            /// # Errors
            ///
            /// Returns a codec error for malformed hex, otherwise the errors of
            /// [`Self::import`].
            pub fn from_hex(private_key: &str, exportable: bool) -> Result<Self> {
                Self::import(&base16::decode(private_key)?, exportable)
            }

            /// SEC1 uncompressed public key (65 bytes).
            #[must_use]
            pub fn public_key_uncompressed(&self) -> Vec<u8> {
                self.signing_key.verifying_key().to_encoded_point(false).as_bytes().to_vec()
            }

            fn new(signing_key: SigningKey, exportable: bool) -> Self {
                let point = signing_key.verifying_key().to_encoded_point(true);
                let mut public_key = [0u8; COMPRESSED_KEY_LENGTH];
                public_key.copy_from_slice(point.as_bytes());
                Self {
                    signing_key,
                    public_key,
                    exportable,
                }
            }
        }

        impl Keypair for $name {
            fn algorithm(&self) -> Algorithm {
                $alg
            }

            fn public_key_bytes(&self) -> Vec<u8> {
                self.public_key.to_vec()
            }

            fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
                let hash = hash::sha256(message);
                curve::sign($alg, &self.signing_key.to_bytes(), &hash)
            }

            fn is_exportable(&self) -> bool {
                self.exportable
            }

            fn export(&self) -> Result<Vec<u8>> {
                if !self.exportable {
                    crate::tracerr!(
                        Error::PrivateKeyNotExportable,
                        "refused export of non-exportable {} key",
                        $alg.curve_name()
                    );
                }
                Ok(self.signing_key.to_bytes().to_vec())
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("public_key", &base16::encode(&self.public_key))
                    .field("exportable", &self.exportable)
                    .finish_non_exhaustive()
            }
        }
    };
}

mod k256;
mod p256;

use std::sync::Arc;

use anyhow::anyhow;

pub use self::k256::K256Keypair;
pub use self::p256::P256Keypair;
use crate::multikey::{bytes_to_multibase, Multibase};
use crate::signature::der_to_compact;
use crate::{did, Algorithm, Result};

/// Capabilities shared by the P-256 and secp256k1 keypairs.
pub trait Keypair: Send + Sync {
    /// Signature algorithm of the key.
    fn algorithm(&self) -> Algorithm;

    /// SEC1 compressed public key (33 bytes).
    fn public_key_bytes(&self) -> Vec<u8>;

    /// SHA-256 hash the message and sign it, returning a DER-encoded low-S
    /// signature.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve library fails to sign.
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>>;

    /// Whether [`Keypair::export`] is permitted.
    fn is_exportable(&self) -> bool;

    /// Raw 32-byte private key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PrivateKeyNotExportable`](crate::Error::PrivateKeyNotExportable)
    /// if the keypair was not created as exportable.
    fn export(&self) -> Result<Vec<u8>>;

    /// Sign the message, returning a compact (64-byte) low-S signature.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve library fails to sign.
    fn sign_compact(&self, message: &[u8]) -> Result<Vec<u8>> {
        Ok(der_to_compact(&self.sign(message)?)?.to_vec())
    }

    /// The `did:key` identifier for this keypair's public key.
    ///
    /// # Errors
    ///
    /// Returns an error if the public key cannot be encoded.
    fn did(&self) -> Result<String> {
        did::format_did_key(self.algorithm(), &self.public_key_bytes())
    }

    /// Multibase text of the compressed public key.
    fn public_key_string(&self, encoding: Multibase) -> String {
        bytes_to_multibase(&self.public_key_bytes(), encoding)
    }

    /// JWT `alg` header value for signatures made by this keypair.
    fn jwt_alg(&self) -> &'static str {
        self.algorithm().jwt_alg()
    }
}

/// Sign on a blocking worker thread so hashing and signing do not stall the
/// async runtime.
///
/// # Errors
///
/// Returns the signing error, or [`Error::Other`](crate::Error::Other) if the
/// worker task fails.
pub async fn sign_async<K>(keypair: Arc<K>, message: Vec<u8>) -> Result<Vec<u8>>
where
    K: Keypair + 'static,
{
    tokio::task::spawn_blocking(move || keypair.sign(&message))
        .await
        .map_err(|e| anyhow!("signing task failed: {e}"))?
}
