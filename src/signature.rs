//! # Signature Normalizer
//!
//! ECDSA signatures as `(r, s)` pairs, with conversion between the two wire
//! encodings and "low-S" canonicalization.
//!
//! - Compact: 64 bytes, `r || s`, each a 32-byte big-endian integer.
//! - DER: ASN.1 `SEQUENCE { INTEGER r, INTEGER s }`, minimally encoded.
//!
//! For any valid signature `(r, s)`, `(r, N - s)` is also valid for the same
//! message and key. Canonical signatures keep `s <= N / 2` so that a third
//! party cannot produce a second valid signature from the first.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::{Algorithm, Error, Result};

/// Length of a compact `r || s` signature.
pub const COMPACT_SIGNATURE_LENGTH: usize = 64;

const SCALAR_LENGTH: usize = 32;
const SEQUENCE_TAG: u8 = 0x30;
const INTEGER_TAG: u8 = 0x02;

/// Signature wire encodings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SignatureFormat {
    /// 64-byte `r || s`.
    #[default]
    Compact,

    /// ASN.1 DER `SEQUENCE { INTEGER r, INTEGER s }`.
    Der,
}

/// Signature verification policy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VerifyOptions {
    /// Accept DER-encoded and high-S signatures. When `false` (the default),
    /// only compact low-S signatures verify.
    pub allow_malleable_signatures: bool,
}

/// An ECDSA signature as fixed-width big-endian `r` and `s`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EcdsaSignature {
    r: [u8; SCALAR_LENGTH],
    s: [u8; SCALAR_LENGTH],
}

impl EcdsaSignature {
    /// Create a signature from its components.
    #[must_use]
    pub const fn from_parts(r: [u8; SCALAR_LENGTH], s: [u8; SCALAR_LENGTH]) -> Self {
        Self { r, s }
    }

    /// Parse a 64-byte compact signature.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSignatureFormat`] if the input is not 64 bytes.
    pub fn from_compact(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != COMPACT_SIGNATURE_LENGTH {
            return Err(Error::InvalidSignatureFormat(format!(
                "compact signature must be {COMPACT_SIGNATURE_LENGTH} bytes, got {}",
                bytes.len()
            )));
        }
        let mut r = [0u8; SCALAR_LENGTH];
        let mut s = [0u8; SCALAR_LENGTH];
        r.copy_from_slice(&bytes[..SCALAR_LENGTH]);
        s.copy_from_slice(&bytes[SCALAR_LENGTH..]);
        Ok(Self { r, s })
    }

    /// Parse a strictly DER-encoded signature: short-form lengths, minimal
    /// positive integers of at most 32 significant bytes, no trailing data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSignatureFormat`] on any structural violation.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let [SEQUENCE_TAG, length, body @ ..] = bytes else {
            return Err(der_error("missing SEQUENCE header"));
        };
        if usize::from(*length) != body.len() || *length >= 0x80 {
            return Err(der_error("SEQUENCE length does not match content"));
        }

        let (r, rest) = read_integer(body)?;
        let (s, rest) = read_integer(rest)?;
        if !rest.is_empty() {
            return Err(der_error("trailing bytes after INTEGER s"));
        }
        Ok(Self { r, s })
    }

    /// Parse either encoding: 64 bytes is read as compact, anything else as
    /// DER.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSignatureFormat`] if the bytes are not a valid
    /// DER signature.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() == COMPACT_SIGNATURE_LENGTH {
            Self::from_compact(bytes)
        } else {
            Self::from_der(bytes)
        }
    }

    /// The `r` component.
    #[must_use]
    pub const fn r(&self) -> &[u8; SCALAR_LENGTH] {
        &self.r
    }

    /// The `s` component.
    #[must_use]
    pub const fn s(&self) -> &[u8; SCALAR_LENGTH] {
        &self.s
    }

    /// Compact `r || s` encoding.
    #[must_use]
    pub fn to_compact(&self) -> [u8; COMPACT_SIGNATURE_LENGTH] {
        let mut bytes = [0u8; COMPACT_SIGNATURE_LENGTH];
        bytes[..SCALAR_LENGTH].copy_from_slice(&self.r);
        bytes[SCALAR_LENGTH..].copy_from_slice(&self.s);
        bytes
    }

    /// DER encoding.
    #[must_use]
    pub fn to_der(&self) -> Vec<u8> {
        let r = der_integer(&self.r);
        let s = der_integer(&self.s);

        // at most 2 * (2 + 33) bytes, so the length always fits short form
        let mut bytes = Vec::with_capacity(2 + r.len() + s.len());
        bytes.push(SEQUENCE_TAG);
        bytes.push(u8::try_from(r.len() + s.len()).unwrap_or(u8::MAX));
        bytes.extend_from_slice(&r);
        bytes.extend_from_slice(&s);
        bytes
    }

    /// Encode in the requested format.
    #[must_use]
    pub fn encode(&self, format: SignatureFormat) -> Vec<u8> {
        match format {
            SignatureFormat::Compact => self.to_compact().to_vec(),
            SignatureFormat::Der => self.to_der(),
        }
    }

    /// Whether `s <= order / 2`.
    #[must_use]
    pub fn is_low_s(&self, order: &BigUint) -> bool {
        BigUint::from_bytes_be(&self.s) <= half(order)
    }

    /// Whether both `r` and `s` are below `order`. Only such signatures can
    /// be valid for the curve.
    #[must_use]
    pub fn is_in_range(&self, order: &BigUint) -> bool {
        BigUint::from_bytes_be(&self.r) < *order && BigUint::from_bytes_be(&self.s) < *order
    }

    /// Return the canonical low-S form: `s` is replaced by `order - s` when it
    /// exceeds `order / 2`, and kept otherwise. A signature whose `s` is not
    /// below `order` is returned unchanged.
    #[must_use]
    pub fn normalize_s(&self, order: &BigUint) -> Self {
        let s = BigUint::from_bytes_be(&self.s);
        if s <= half(order) || s >= *order {
            return self.clone();
        }

        let low = (order - s).to_bytes_be();
        let mut normalized = [0u8; SCALAR_LENGTH];
        normalized[SCALAR_LENGTH - low.len()..].copy_from_slice(&low);
        Self {
            r: self.r,
            s: normalized,
        }
    }
}

/// Canonicalize a compact or DER signature to low-S for the algorithm's curve
/// and re-encode it in `format`.
///
/// # Errors
///
/// Returns [`Error::InvalidSignatureFormat`] if `signature` does not parse or
/// either component is not below the curve order.
pub fn normalize(signature: &[u8], alg: Algorithm, format: SignatureFormat) -> Result<Vec<u8>> {
    let signature = EcdsaSignature::from_bytes(signature)?;
    let order = alg.order();
    if !signature.is_in_range(order) {
        return Err(Error::InvalidSignatureFormat(format!(
            "{} signature component out of range",
            alg.curve_name()
        )));
    }
    Ok(signature.normalize_s(order).encode(format))
}

/// Whether a compact or DER signature is already in low-S form.
///
/// # Errors
///
/// Returns [`Error::InvalidSignatureFormat`] if `signature` does not parse.
pub fn is_low_s(signature: &[u8], alg: Algorithm) -> Result<bool> {
    Ok(EcdsaSignature::from_bytes(signature)?.is_low_s(alg.order()))
}

/// Convert a DER signature to compact form.
///
/// # Errors
///
/// Returns [`Error::InvalidSignatureFormat`] if `der` is not valid DER.
pub fn der_to_compact(der: &[u8]) -> Result<[u8; COMPACT_SIGNATURE_LENGTH]> {
    Ok(EcdsaSignature::from_der(der)?.to_compact())
}

/// Convert a compact signature to DER form.
///
/// # Errors
///
/// Returns [`Error::InvalidSignatureFormat`] if `compact` is not 64 bytes.
pub fn compact_to_der(compact: &[u8]) -> Result<Vec<u8>> {
    Ok(EcdsaSignature::from_compact(compact)?.to_der())
}

fn half(order: &BigUint) -> BigUint {
    order / BigUint::from(2u8)
}

fn der_error(reason: &str) -> Error {
    Error::InvalidSignatureFormat(format!("DER: {reason}"))
}

// Read one INTEGER, returning its value left-padded to 32 bytes and the
// remaining input.
fn read_integer(bytes: &[u8]) -> Result<([u8; SCALAR_LENGTH], &[u8])> {
    let [INTEGER_TAG, length, rest @ ..] = bytes else {
        return Err(der_error("missing INTEGER header"));
    };
    let length = usize::from(*length);
    if length == 0 || length > rest.len() {
        return Err(der_error("INTEGER length out of bounds"));
    }

    let (content, rest) = rest.split_at(length);
    if content[0] & 0x80 != 0 {
        return Err(der_error("negative INTEGER"));
    }
    if content.len() > 1 && content[0] == 0 && content[1] & 0x80 == 0 {
        return Err(der_error("INTEGER is not minimally encoded"));
    }

    let significant = if content[0] == 0 { &content[1..] } else { content };
    if significant.len() > SCALAR_LENGTH {
        return Err(der_error("INTEGER wider than 32 bytes"));
    }
    let mut value = [0u8; SCALAR_LENGTH];
    value[SCALAR_LENGTH - significant.len()..].copy_from_slice(significant);
    Ok((value, rest))
}

fn der_integer(value: &[u8; SCALAR_LENGTH]) -> Vec<u8> {
    let start = value.iter().position(|b| *b != 0).unwrap_or(SCALAR_LENGTH - 1);
    let significant = &value[start..];
    let pad = significant[0] & 0x80 != 0;

    let mut bytes = Vec::with_capacity(3 + significant.len());
    bytes.push(INTEGER_TAG);
    bytes.push(u8::try_from(significant.len() + usize::from(pad)).unwrap_or(u8::MAX));
    if pad {
        bytes.push(0);
    }
    bytes.extend_from_slice(significant);
    bytes
}
