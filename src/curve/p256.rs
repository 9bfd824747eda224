//! NIST P-256 (secp256r1).

pub const P: &str = "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff";
// a = -3 mod p
pub const A: &str = "ffffffff00000001000000000000000000000000fffffffffffffffffffffffc";
pub const B: &str = "5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b";
pub const N: &str = "ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551";

ecdsa_backend!(p256, crate::Algorithm::P256);
