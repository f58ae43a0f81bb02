use pgp_core::composed::{Key, KeyRing, PlainMessage, SignatureStatus, StandaloneSignature};
use pgp_core::errors::Error;
use pgp_core::helper;
use regex::Regex;

#[test]
fn detached_binary_signature() {
    let ring = KeyRing::new(Key::generate());
    let message = PlainMessage::new(vec![1, 2, 3, 4]);

    let sig = ring.sign_detached(&message).unwrap();
    ring.verify_detached(&message, &sig, 0).unwrap();
}

#[test]
fn altered_message_is_failed() {
    let ring = KeyRing::new(Key::generate());
    let message = PlainMessage::new(b"the fine print".to_vec());
    let sig = ring.sign_detached(&message).unwrap();

    let altered = PlainMessage::new(b"the altered print".to_vec());
    match ring.verify_detached(&altered, &sig, 0) {
        Err(Error::InvalidSignature {
            status: SignatureStatus::Failed,
        }) => {}
        other => panic!("expected Failed status, got {:?}", other),
    }
}

#[test]
fn wrong_ring_is_no_verifier() {
    let signer = KeyRing::new(Key::generate());
    let stranger = KeyRing::new(Key::generate());
    let message = PlainMessage::new(b"who, me?".to_vec());
    let sig = signer.sign_detached(&message).unwrap();

    match stranger.verify_detached(&message, &sig, 0) {
        Err(Error::InvalidSignature {
            status: SignatureStatus::NoVerifier,
        }) => {}
        other => panic!("expected NoVerifier status, got {:?}", other),
    }
}

#[test]
fn text_signature_ignores_line_endings() {
    let ring = KeyRing::new(Key::generate());

    let crlf = PlainMessage::from_string("line one\r\nline two");
    let lf = PlainMessage::from_string("line one\nline two");

    let sig = ring.sign_detached(&crlf).unwrap();
    ring.verify_detached(&lf, &sig, 0).unwrap();
}

#[test]
fn signature_armor_layout() {
    let ring = KeyRing::new(Key::generate());
    let message = PlainMessage::from_string("armor me");

    let armored = ring
        .sign_detached(&message)
        .unwrap()
        .to_armored_string()
        .unwrap();

    let re = Regex::new(
        r"(?s)^-----BEGIN PGP SIGNATURE-----\n\n[A-Za-z0-9+/=\n]+\n=[A-Za-z0-9+/]{4}\n-----END PGP SIGNATURE-----\n$",
    )
    .unwrap();
    assert!(re.is_match(&armored), "unexpected armor:\n{armored}");

    let parsed = StandaloneSignature::from_armored(&armored).unwrap();
    ring.verify_detached(&message, &parsed, 0).unwrap();
}

#[test]
fn verification_uses_issuer_lookup_across_the_ring() {
    let signer = Key::generate();
    let mut ring = KeyRing::new(Key::generate().as_public());
    ring.add_key(signer);

    let message = PlainMessage::from_string("second key signs");
    let sig = ring.sign_detached(&message).unwrap();

    // a ring holding only the public halves still verifies
    ring.public_ring().verify_detached(&message, &sig, 0).unwrap();
}

#[test]
fn fingerprint_export_is_lowercase_hex_json() {
    let mut ring = KeyRing::new(Key::generate());
    ring.add_key(Key::generate());

    let json = helper::sha256_fingerprints_json(&ring).unwrap();
    let text = String::from_utf8(json).unwrap();

    let re = Regex::new(r#"^\["[0-9a-f]{64}","[0-9a-f]{64}"\]$"#).unwrap();
    assert!(re.is_match(&text), "unexpected export: {text}");
}

#[test]
fn no_signing_key_in_public_ring() {
    let ring = KeyRing::new(Key::generate()).public_ring();
    let message = PlainMessage::from_string("nobody home");

    assert!(matches!(
        ring.sign_detached(&message),
        Err(Error::NoSigningKey)
    ));
}
