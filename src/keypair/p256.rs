//! P-256 keypair.

ecdsa_keypair!(P256Keypair, p256, crate::Algorithm::P256, "ECDSA keypair over NIST P-256.");
