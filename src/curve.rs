//! # Curve Adapter
//!
//! A uniform set of operations over the two supported curves: SEC1 point
//! compression and decompression, ECDSA signing over a prehashed message, and
//! the [`verify`] pipeline that applies the signature strictness policy.
//!
//! Decompression solves `y² = x³ + ax + b (mod p)` directly. Both curve primes
//! are congruent to 3 mod 4, so the square root is `(y²)^((p+1)/4) mod p`.

// ECDSA over one RustCrypto curve crate, instantiated once per curve module.
macro_rules! ecdsa_backend {
    ($krate:ident, $alg:expr) => {
        use ::$krate::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
        use ::$krate::ecdsa::{Signature, SigningKey, VerifyingKey};
        use anyhow::anyhow;

        use crate::curve::COMPRESSED_KEY_LENGTH;
        use crate::signature::COMPACT_SIGNATURE_LENGTH;
        use crate::{Error, Result};

        pub fn public_key_from_private(private_key: &[u8]) -> Result<[u8; COMPRESSED_KEY_LENGTH]> {
            let point = signing_key(private_key)?.verifying_key().to_encoded_point(true);
            let mut public_key = [0u8; COMPRESSED_KEY_LENGTH];
            public_key.copy_from_slice(point.as_bytes());
            Ok(public_key)
        }

        pub fn sign(private_key: &[u8], hash: &[u8]) -> Result<[u8; COMPACT_SIGNATURE_LENGTH]> {
            let signature: Signature = signing_key(private_key)?
                .sign_prehash(hash)
                .map_err(|e| anyhow!("{} signing failed: {e}", $alg.curve_name()))?;
            let mut compact = [0u8; COMPACT_SIGNATURE_LENGTH];
            compact.copy_from_slice(&signature.to_bytes());
            Ok(compact)
        }

        pub fn is_valid_public_key(public_key: &[u8]) -> bool {
            VerifyingKey::from_sec1_bytes(public_key).is_ok()
        }

        pub fn is_valid_signature(
            public_key: &[u8], signature: &[u8; COMPACT_SIGNATURE_LENGTH], hash: &[u8],
        ) -> bool {
            let Ok(verifying_key) = VerifyingKey::from_sec1_bytes(public_key) else {
                return false;
            };
            let Ok(signature) = Signature::from_slice(signature) else {
                return false;
            };
            verifying_key.verify_prehash(hash, &signature).is_ok()
        }

        fn signing_key(private_key: &[u8]) -> Result<SigningKey> {
            SigningKey::from_slice(private_key)
                .map_err(|e| Error::InvalidPrivateKey(format!("{}: {e}", $alg.curve_name())))
        }
    };
}

mod k256;
mod p256;

use std::sync::LazyLock;

use num_bigint::BigUint;

use crate::signature::{EcdsaSignature, VerifyOptions, COMPACT_SIGNATURE_LENGTH};
use crate::{Algorithm, Error, Result};

/// Length of a SEC1 compressed public key (`0x02|0x03 || X`).
pub const COMPRESSED_KEY_LENGTH: usize = 33;

/// Length of a SEC1 uncompressed public key (`0x04 || X || Y`).
pub const UNCOMPRESSED_KEY_LENGTH: usize = 65;

/// Length of a private scalar.
pub const PRIVATE_KEY_LENGTH: usize = 32;

const FIELD_LENGTH: usize = 32;

/// Short Weierstrass domain parameters for a prime-field curve.
#[derive(Debug)]
pub struct CurveParams {
    /// Field prime.
    pub p: BigUint,

    /// Curve coefficient `a`, reduced mod `p`.
    pub a: BigUint,

    /// Curve coefficient `b`.
    pub b: BigUint,

    /// Order of the base point.
    pub n: BigUint,
}

impl CurveParams {
    fn from_hex(p: &str, a: &str, b: &str, n: &str) -> Self {
        let parse = |hex: &str| BigUint::parse_bytes(hex.as_bytes(), 16).expect("should parse");
        Self {
            p: parse(p),
            a: parse(a),
            b: parse(b),
            n: parse(n),
        }
    }
}

static P256_PARAMS: LazyLock<CurveParams> = LazyLock::new(|| {
    CurveParams::from_hex(p256::P, p256::A, p256::B, p256::N)
});

static K256_PARAMS: LazyLock<CurveParams> = LazyLock::new(|| {
    CurveParams::from_hex(k256::P, k256::A, k256::B, k256::N)
});

/// Domain parameters for the algorithm's curve.
#[must_use]
pub fn params(alg: Algorithm) -> &'static CurveParams {
    match alg {
        Algorithm::P256 => &P256_PARAMS,
        Algorithm::K256 => &K256_PARAMS,
    }
}

/// Compress a SEC1 uncompressed public key (`0x04 || X || Y`) to
/// `0x02|0x03 || X`, where the prefix is `0x03` when Y is odd.
///
/// # Errors
///
/// Returns [`Error::InvalidKeyLength`] if the key is not 65 bytes or does not
/// start with `0x04`.
pub fn compress(uncompressed: &[u8]) -> Result<[u8; COMPRESSED_KEY_LENGTH]> {
    if uncompressed.len() != UNCOMPRESSED_KEY_LENGTH || uncompressed[0] != 0x04 {
        crate::tracerr!(Error::InvalidKeyLength(format!(
            "expected {UNCOMPRESSED_KEY_LENGTH}-byte key with 0x04 prefix, got {} bytes",
            uncompressed.len()
        )));
    }

    let mut compressed = [0u8; COMPRESSED_KEY_LENGTH];
    compressed[0] = if uncompressed[UNCOMPRESSED_KEY_LENGTH - 1] & 1 == 1 { 0x03 } else { 0x02 };
    compressed[1..].copy_from_slice(&uncompressed[1..=FIELD_LENGTH]);
    Ok(compressed)
}

/// Recover the uncompressed form of a SEC1 compressed public key.
///
/// # Errors
///
/// Returns [`Error::InvalidKeyLength`] if the key is not 33 bytes with a
/// `0x02`/`0x03` prefix, or [`Error::PointNotOnCurve`] if X is not a field
/// element or `x³ + ax + b` has no square root.
pub fn decompress(alg: Algorithm, compressed: &[u8]) -> Result<[u8; UNCOMPRESSED_KEY_LENGTH]> {
    if compressed.len() != COMPRESSED_KEY_LENGTH || !matches!(compressed[0], 0x02 | 0x03) {
        crate::tracerr!(Error::InvalidKeyLength(format!(
            "expected {COMPRESSED_KEY_LENGTH}-byte key with 0x02 or 0x03 prefix, got {} bytes",
            compressed.len()
        )));
    }

    let CurveParams { p, a, b, .. } = params(alg);
    let x = BigUint::from_bytes_be(&compressed[1..]);
    if &x >= p {
        crate::tracerr!(Error::PointNotOnCurve(format!(
            "x coordinate exceeds {} field prime",
            alg.curve_name()
        )));
    }

    let y_squared = (x.modpow(&BigUint::from(3u8), p) + a * &x + b) % p;
    let exponent = (p + BigUint::from(1u8)) / BigUint::from(4u8);
    let mut y = y_squared.modpow(&exponent, p);
    if (&y * &y) % p != y_squared {
        crate::tracerr!(Error::PointNotOnCurve(format!(
            "x coordinate has no {} point",
            alg.curve_name()
        )));
    }

    let odd = compressed[0] == 0x03;
    if (to_field_bytes(&y)[FIELD_LENGTH - 1] & 1 == 1) != odd {
        y = p - y;
    }

    let mut uncompressed = [0u8; UNCOMPRESSED_KEY_LENGTH];
    uncompressed[0] = 0x04;
    uncompressed[1..=FIELD_LENGTH].copy_from_slice(&compressed[1..]);
    uncompressed[1 + FIELD_LENGTH..].copy_from_slice(&to_field_bytes(&y));
    Ok(uncompressed)
}

/// Check that a private key is 32 bytes and its scalar lies in `[1, N-1]`.
///
/// # Errors
///
/// Returns [`Error::InvalidPrivateKey`] if either condition fails.
pub fn check_private_key(alg: Algorithm, private_key: &[u8]) -> Result<()> {
    if private_key.len() != PRIVATE_KEY_LENGTH {
        crate::tracerr!(Error::InvalidPrivateKey(format!(
            "expected {PRIVATE_KEY_LENGTH} bytes, got {}",
            private_key.len()
        )));
    }
    let scalar = BigUint::from_bytes_be(private_key);
    if scalar.bits() == 0 || &scalar >= alg.order() {
        crate::tracerr!(Error::InvalidPrivateKey(format!(
            "scalar outside [1, N-1] for {}",
            alg.curve_name()
        )));
    }
    Ok(())
}

/// Derive the compressed public key for a private scalar.
///
/// # Errors
///
/// Returns [`Error::InvalidPrivateKey`] if the scalar is not valid for the
/// curve.
pub fn public_key_from_private(
    alg: Algorithm, private_key: &[u8],
) -> Result<[u8; COMPRESSED_KEY_LENGTH]> {
    check_private_key(alg, private_key)?;
    match alg {
        Algorithm::P256 => p256::public_key_from_private(private_key),
        Algorithm::K256 => k256::public_key_from_private(private_key),
    }
}

/// Sign a 32-byte message hash, returning a DER-encoded low-S signature.
///
/// # Errors
///
/// Returns [`Error::InvalidPrivateKey`] for an invalid scalar.
pub fn sign(alg: Algorithm, private_key: &[u8], hash: &[u8]) -> Result<Vec<u8>> {
    check_private_key(alg, private_key)?;
    let compact = match alg {
        Algorithm::P256 => p256::sign(private_key, hash)?,
        Algorithm::K256 => k256::sign(private_key, hash)?,
    };
    let signature = EcdsaSignature::from_compact(&compact)?.normalize_s(alg.order());
    Ok(signature.to_der())
}

/// Check a compact signature against a message hash, exactly as given: no
/// format gate and no S normalization. A public key or signature that does
/// not parse yields `false`.
#[must_use]
pub fn is_valid_signature(
    alg: Algorithm, public_key: &[u8], signature: &[u8], hash: &[u8],
) -> bool {
    let Ok(signature) = <[u8; COMPACT_SIGNATURE_LENGTH]>::try_from(signature) else {
        return false;
    };
    match alg {
        Algorithm::P256 => p256::is_valid_signature(public_key, &signature, hash),
        Algorithm::K256 => k256::is_valid_signature(public_key, &signature, hash),
    }
}

/// Verify a signature over a message hash under the strictness policy in
/// `options`.
///
/// Strict (the default): the signature must be 64-byte compact `r || s`,
/// otherwise [`Error::InvalidSignatureFormat`] is returned before any
/// cryptographic check. A high-S signature verifies as `false`.
///
/// Malleable: compact or DER signatures are accepted and high-S values are
/// allowed. Bytes that parse as neither verify as `false`.
///
/// # Errors
///
/// Returns [`Error::InvalidPublicKey`] when the public key is not a valid
/// SEC1 point for the curve, or [`Error::InvalidSignatureFormat`] when the
/// strict policy rejects the signature's encoding.
pub fn verify(
    alg: Algorithm, public_key: &[u8], hash: &[u8], signature: &[u8], options: &VerifyOptions,
) -> Result<bool> {
    check_public_key(alg, public_key)?;

    let order = alg.order();
    let signature = if options.allow_malleable_signatures {
        let Ok(signature) = EcdsaSignature::from_bytes(signature) else {
            tracing::debug!("{alg} signature does not parse as compact or DER");
            return Ok(false);
        };
        if !signature.is_in_range(order) {
            tracing::debug!("{alg} signature component exceeds the curve order");
            return Ok(false);
        }
        // `s` and `N - s` verify identically; the curve libraries only accept
        // the low form
        signature.normalize_s(order)
    } else {
        if signature.len() != COMPACT_SIGNATURE_LENGTH {
            crate::tracerr!(
                Error::InvalidSignatureFormat(format!(
                    "expected {COMPACT_SIGNATURE_LENGTH}-byte compact signature, got {} bytes",
                    signature.len()
                )),
                "strict verification rejected non-compact {alg} signature"
            );
        }
        let signature = EcdsaSignature::from_compact(signature)?;
        if !signature.is_low_s(order) {
            tracing::debug!("strict verification rejected high-S {alg} signature");
            return Ok(false);
        }
        signature
    };

    Ok(is_valid_signature(alg, public_key, &signature.to_compact(), hash))
}

fn check_public_key(alg: Algorithm, public_key: &[u8]) -> Result<()> {
    let valid = match alg {
        Algorithm::P256 => p256::is_valid_public_key(public_key),
        Algorithm::K256 => k256::is_valid_public_key(public_key),
    };
    if !valid {
        crate::tracerr!(Error::InvalidPublicKey(format!(
            "{} bytes do not encode a {alg} point",
            public_key.len()
        )));
    }
    Ok(())
}

// Big-endian, left-padded to the field size.
fn to_field_bytes(value: &BigUint) -> [u8; FIELD_LENGTH] {
    let bytes = value.to_bytes_be();
    let mut out = [0u8; FIELD_LENGTH];
    out[FIELD_LENGTH - bytes.len()..].copy_from_slice(&bytes);
    out
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const K256_COMPRESSED: &str =
        "03874c15c7fda20e539c6e5ba573c139884c351188799f5458b4b41f7924f235cd";
    const K256_UNCOMPRESSED: &str = "04874c15c7fda20e539c6e5ba573c139884c351188799f5458b4b41f\
        7924f235cd3b61004c819bbba0decca169b63e6c7002119ed81f79c6a754d5f16add6b9f01";
    const P256_COMPRESSED: &str =
        "03df8df521f3a01d77b649ffdb21de0f4ab75025921513b2f3f412c1bda80da1ba";
    const P256_UNCOMPRESSED: &str = "04df8df521f3a01d77b649ffdb21de0f4ab75025921513b2f3f412c\
        1bda80da1ba1ddace96dfb17cd3d5bd30d3b46d9e123a093cae867734c755d729a63fa29b79";
    const SEED: &str = "9085d2bef69286a6cbb51623c8fa258629945cd55ca705cc4e66700396894e0c";

    fn bytes(hex: &str) -> Vec<u8> {
        hex::decode(hex).expect("should decode")
    }

    fn public_key_for(alg: Algorithm, private_key: &[u8]) -> Vec<u8> {
        let compressed = public_key_from_private(alg, private_key).expect("should derive");
        decompress(alg, &compressed).expect("should decompress").to_vec()
    }

    #[test]
    fn primes_are_3_mod_4() {
        for alg in Algorithm::ALL {
            assert_eq!(&params(alg).p % BigUint::from(4u8), BigUint::from(3u8));
        }
    }

    #[test]
    fn compress_known_keys() {
        let k256 = compress(&bytes(K256_UNCOMPRESSED)).expect("should compress");
        assert_eq!(k256.to_vec(), bytes(K256_COMPRESSED));
        let p256 = compress(&bytes(P256_UNCOMPRESSED)).expect("should compress");
        assert_eq!(p256.to_vec(), bytes(P256_COMPRESSED));
    }

    #[test]
    fn decompress_known_keys() {
        let k256 = decompress(Algorithm::K256, &bytes(K256_COMPRESSED)).expect("should decompress");
        assert_eq!(k256.to_vec(), bytes(K256_UNCOMPRESSED));
        let p256 = decompress(Algorithm::P256, &bytes(P256_COMPRESSED)).expect("should decompress");
        assert_eq!(p256.to_vec(), bytes(P256_UNCOMPRESSED));
    }

    #[test]
    fn decompress_selects_parity() {
        let mut even = bytes(K256_COMPRESSED);
        even[0] = 0x02;
        let point = decompress(Algorithm::K256, &even).expect("should decompress");
        assert_eq!(point[64] & 1, 0);
        assert_eq!(point[1..33], even[1..]);
        assert_eq!(compress(&point).expect("should compress").to_vec(), even);
    }

    #[test]
    fn wrong_lengths() {
        assert!(matches!(compress(&[0x04; 64]), Err(Error::InvalidKeyLength(_))));
        let mut wrong_prefix = bytes(K256_UNCOMPRESSED);
        wrong_prefix[0] = 0x02;
        assert!(matches!(compress(&wrong_prefix), Err(Error::InvalidKeyLength(_))));

        let err = decompress(Algorithm::P256, &[0x02; 32]).expect_err("should reject");
        assert!(matches!(err, Error::InvalidKeyLength(_)));

        let mut wrong_prefix = bytes(P256_COMPRESSED);
        wrong_prefix[0] = 0x04;
        let err = decompress(Algorithm::P256, &wrong_prefix).expect_err("should reject");
        assert!(matches!(err, Error::InvalidKeyLength(_)));
    }

    #[test]
    fn not_on_curve() {
        // x = 7 is not on either curve
        let mut compressed = [0u8; 33];
        compressed[0] = 0x02;
        compressed[32] = 7;
        for alg in Algorithm::ALL {
            let err = decompress(alg, &compressed).expect_err("should reject");
            assert!(matches!(err, Error::PointNotOnCurve(_)));
        }

        // x >= p
        let mut compressed = [0xffu8; 33];
        compressed[0] = 0x03;
        let err = decompress(Algorithm::K256, &compressed).expect_err("should reject");
        assert!(matches!(err, Error::PointNotOnCurve(_)));
    }

    #[test]
    fn public_key_from_seed() {
        let seed = bytes(SEED);
        let k256 = public_key_from_private(Algorithm::K256, &seed).expect("should derive");
        assert_eq!(k256.to_vec(), bytes(K256_COMPRESSED));
        let p256 = public_key_from_private(Algorithm::P256, &seed).expect("should derive");
        assert_eq!(p256.to_vec(), bytes(P256_COMPRESSED));
    }

    #[test]
    fn private_key_range() {
        for alg in Algorithm::ALL {
            let err = check_private_key(alg, &[0u8; 32]).expect_err("should reject zero");
            assert!(matches!(err, Error::InvalidPrivateKey(_)));
            assert!(err.to_string().contains(alg.curve_name()));

            let err = check_private_key(alg, &[1u8; 31]).expect_err("should reject length");
            assert!(matches!(err, Error::InvalidPrivateKey(_)));

            let order = to_field_bytes(alg.order());
            let err = check_private_key(alg, &order).expect_err("should reject order");
            assert!(matches!(err, Error::InvalidPrivateKey(_)));

            let max = to_field_bytes(&(alg.order() - BigUint::from(1u8)));
            assert!(check_private_key(alg, &max).is_ok());
        }
    }

    #[test]
    fn sign_then_verify() {
        let seed = bytes(SEED);
        let hash = crate::hash::sha256(b"hello");
        let other = crate::hash::sha256(b"bye");
        for alg in Algorithm::ALL {
            let public_key = public_key_from_private(alg, &seed).expect("should derive");
            let der = sign(alg, &seed, &hash).expect("should sign");
            let signature = EcdsaSignature::from_der(&der).expect("should parse");
            assert!(signature.is_low_s(alg.order()));

            let compact = signature.to_compact();
            assert!(is_valid_signature(alg, &public_key, &compact, &hash));
            assert!(!is_valid_signature(alg, &public_key, &compact, &other));
            assert!(!is_valid_signature(alg, &public_key, &compact[..63], &hash));

            let strict = VerifyOptions::default();
            assert!(verify(alg, &public_key, &hash, &compact, &strict).expect("should verify"));
        }
    }

    #[test]
    fn strict_policy() {
        let seed = bytes(SEED);
        let hash = crate::hash::sha256(b"strict");
        let strict = VerifyOptions::default();
        let malleable = VerifyOptions {
            allow_malleable_signatures: true,
        };

        for alg in Algorithm::ALL {
            let public_key = public_key_from_private(alg, &seed).expect("should derive");
            let der = sign(alg, &seed, &hash).expect("should sign");
            let low = EcdsaSignature::from_der(&der).expect("should parse");
            let high_s = alg.order() - BigUint::from_bytes_be(low.s());
            let high = EcdsaSignature::from_parts(*low.r(), to_field_bytes(&high_s));
            assert!(!high.is_low_s(alg.order()));

            let err =
                verify(alg, &public_key, &hash, &der, &strict).expect_err("should reject DER");
            assert_eq!(err.code(), "invalid_signature_format");
            let high_compact = high.to_compact();
            let verified =
                verify(alg, &public_key, &hash, &high_compact, &strict).expect("should verify");
            assert!(!verified);

            for signature in [der, high.to_compact().to_vec(), high.to_der()] {
                let verified =
                    verify(alg, &public_key, &hash, &signature, &malleable).expect("should verify");
                assert!(verified);
            }
            let verified =
                verify(alg, &public_key, &hash, &[0x30, 0x01], &malleable).expect("should verify");
            assert!(!verified);
        }
    }

    #[test]
    fn out_of_range_signature_is_false() {
        let seed = bytes(SEED);
        let hash = crate::hash::sha256(b"range");
        let malleable = VerifyOptions {
            allow_malleable_signatures: true,
        };

        let mut compact = [0x11u8; 64];
        compact[32..].copy_from_slice(&[0xff; 32]);
        let der = EcdsaSignature::from_compact(&compact).expect("should parse").to_der();

        for alg in Algorithm::ALL {
            let public_key = public_key_from_private(alg, &seed).expect("should derive");
            for signature in [&compact[..], &der[..]] {
                let verified =
                    verify(alg, &public_key, &hash, signature, &malleable).expect("should verify");
                assert!(!verified);
            }
            let verified = verify(alg, &public_key, &hash, &compact, &VerifyOptions::default())
                .expect("should verify");
            assert!(!verified);
        }
    }

    #[test]
    fn unparseable_compact_is_false() {
        let seed = bytes(SEED);
        let public_key = public_key_from_private(Algorithm::P256, &seed).expect("should derive");
        let hash = crate::hash::sha256(b"zero");
        let strict = VerifyOptions::default();
        let verified = verify(Algorithm::P256, &public_key, &hash, &[0u8; 64], &strict)
            .expect("should verify");
        assert!(!verified);
    }

    #[test]
    fn invalid_public_key_is_error() {
        let hash = crate::hash::sha256(b"key");
        // x = 7 is not on secp256k1
        let mut public_key = [0u8; 33];
        public_key[0] = 0x02;
        public_key[32] = 7;
        let strict = VerifyOptions::default();
        let err = verify(Algorithm::K256, &public_key, &hash, &[1u8; 64], &strict)
            .expect_err("should reject key");
        assert_eq!(err.code(), "invalid_public_key");
    }

    proptest! {
        #[test]
        fn compression_round_trip(private_key in any::<[u8; 32]>()) {
            for alg in Algorithm::ALL {
                prop_assume!(check_private_key(alg, &private_key).is_ok());

                let uncompressed = public_key_for(alg, &private_key);
                prop_assert_eq!(uncompressed.len(), UNCOMPRESSED_KEY_LENGTH);

                let compressed = compress(&uncompressed).expect("should compress");
                prop_assert!(matches!(compressed[0], 0x02 | 0x03));
                let restored = decompress(alg, &compressed).expect("should decompress");
                prop_assert_eq!(restored.to_vec(), uncompressed);
            }
        }
    }
}
