//! secp256k1. Signing with `k256` already yields low-S signatures.

pub const P: &str = "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f";
pub const A: &str = "0";
pub const B: &str = "7";
pub const N: &str = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";

ecdsa_backend!(k256, crate::Algorithm::K256);
