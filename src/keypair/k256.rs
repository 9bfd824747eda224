//! secp256k1 keypair.

ecdsa_keypair!(K256Keypair, k256, crate::Algorithm::K256, "ECDSA keypair over secp256k1.");
