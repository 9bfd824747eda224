//! Tests for signing with a keypair and verifying against its `did:key`.

use credibil_crypto::signature::{self, EcdsaSignature, SignatureFormat};
use credibil_crypto::verify::verify_signature_async;
use credibil_crypto::{
    Algorithm, Error, K256Keypair, Keypair, P256Keypair, VerifyOptions, verify_did_signature,
    verify_signature,
};
use num_bigint::BigUint;

const DATA: [u8; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

fn keypairs() -> Vec<Box<dyn Keypair>> {
    vec![Box::new(P256Keypair::generate(false)), Box::new(K256Keypair::generate(false))]
}

// Flip a low-S signature to its high-S twin.
fn high_s(alg: Algorithm, compact: &[u8]) -> Vec<u8> {
    let low = EcdsaSignature::from_compact(compact).expect("should parse");
    let s = alg.order() - BigUint::from_bytes_be(low.s());
    let s_bytes = s.to_bytes_be();
    let mut high = [0u8; 32];
    high[32 - s_bytes.len()..].copy_from_slice(&s_bytes);
    EcdsaSignature::from_parts(*low.r(), high).to_compact().to_vec()
}

// Sign a fixed message, derive the DID, and verify with default options.
#[test]
fn end_to_end() {
    for keypair in keypairs() {
        let signature = keypair.sign_compact(&DATA).expect("should sign");
        let did = keypair.did().expect("should derive did");

        let verified = verify_did_signature(&did, &DATA, &signature).expect("should verify");
        assert!(verified, "{} signature should verify", keypair.algorithm());
    }
}

// Strict verification rejects DER and high-S signatures but accepts the
// canonical compact form.
#[test]
fn strict_rejects_der_and_high_s() {
    for keypair in keypairs() {
        let alg = keypair.algorithm();
        let did = keypair.did().expect("should derive did");
        let der = keypair.sign(&DATA).expect("should sign");
        let compact = signature::der_to_compact(&der).expect("should convert").to_vec();
        let high = high_s(alg, &compact);

        let err = verify_did_signature(&did, &DATA, &der).expect_err("DER should be rejected");
        assert!(matches!(err, Error::InvalidSignatureFormat(_)));
        assert!(!verify_did_signature(&did, &DATA, &high).expect("should verify"));
        assert!(verify_did_signature(&did, &DATA, &compact).expect("should verify"));
    }
}

// With malleable signatures allowed, DER and high-S forms of a valid
// signature verify.
#[test]
fn malleable_accepts_der_and_high_s() {
    let options = VerifyOptions {
        allow_malleable_signatures: true,
    };
    for keypair in keypairs() {
        let alg = keypair.algorithm();
        let did = keypair.did().expect("should derive did");
        let der = keypair.sign(&DATA).expect("should sign");
        let high = high_s(alg, &signature::der_to_compact(&der).expect("should convert"));
        let high_der =
            signature::normalize(&high, alg, SignatureFormat::Der).expect("should normalize");
        assert_eq!(high_der, der);

        for sig in [&der, &high] {
            let verified =
                verify_signature(&did, &DATA, sig, &options, Some(alg)).expect("should verify");
            assert!(verified);
        }
    }
}

// Signatures with `s` above the curve order verify as false and cannot be
// normalized, in both encodings.
#[test]
fn out_of_range_s() {
    let options = VerifyOptions {
        allow_malleable_signatures: true,
    };
    let mut compact = [0x11u8; 64];
    compact[32..].copy_from_slice(&[0xff; 32]);
    let der = signature::compact_to_der(&compact).expect("should convert");

    for keypair in keypairs() {
        let alg = keypair.algorithm();
        let did = keypair.did().expect("should derive did");
        for sig in [&compact[..], &der[..]] {
            let verified =
                verify_signature(&did, b"x", sig, &options, None).expect("should verify");
            assert!(!verified);

            let err =
                signature::normalize(sig, alg, SignatureFormat::Der).expect_err("should fail");
            assert!(matches!(err, Error::InvalidSignatureFormat(_)));
        }
    }
}

// A W3C did:key secp256k1 vector round-trips through keypair import.
#[test]
fn w3c_vector() {
    let keypair = K256Keypair::from_hex(
        "9085d2bef69286a6cbb51623c8fa258629945cd55ca705cc4e66700396894e0c",
        false,
    )
    .expect("should import");
    assert_eq!(
        keypair.did().expect("should derive did"),
        "did:key:zQ3shokFTS3brHcDQrn82RUDfCZESWL1ZdCEJwekUDPQiYBme"
    );

    let parsed = credibil_crypto::parse_did_key(&keypair.did().expect("should derive did"))
        .expect("should parse");
    assert_eq!(parsed.algorithm, Algorithm::K256);
    assert_eq!(parsed.public_key, keypair.public_key_uncompressed());
}

// Verification runs off the async runtime and agrees with the sync path.
#[tokio::test]
async fn verify_async() {
    let keypair = P256Keypair::generate(false);
    let did = keypair.did().expect("should derive did");
    let signature = keypair.sign_compact(&DATA).expect("should sign");

    let options = VerifyOptions::default();
    let data = DATA.to_vec();
    let verified = verify_signature_async(did.clone(), data, signature, options.clone(), None)
        .await
        .expect("should verify");
    assert!(verified);

    let verified = verify_signature_async(did, b"other".to_vec(), vec![0u8; 64], options, None)
        .await
        .expect("should verify");
    assert!(!verified);
}
