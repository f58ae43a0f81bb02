use pgp_core::composed::{CleartextSignedMessage, Key, KeyRing, SignatureStatus};
use pgp_core::errors::Error;
use pgp_core::helper;
use regex::Regex;

#[test]
fn sign_and_verify_roundtrip() {
    let ring = KeyRing::new(Key::generate());

    let armored = helper::sign_cleartext_message(&ring, "plain statement").unwrap();
    let text = helper::verify_cleartext_message(&ring, &armored, 0).unwrap();
    assert_eq!(text, "plain statement");
}

#[test]
fn trailing_whitespace_is_canonicalized() {
    let ring = KeyRing::new(Key::generate());

    let armored = helper::sign_cleartext_message(&ring, "  Signed message\n  \n  ").unwrap();
    let text = helper::verify_cleartext_message(&ring, &armored, 0).unwrap();

    // leading whitespace stays, trailing whitespace per line goes
    assert_eq!(text, "  Signed message\n\n");
}

#[test]
fn crlf_input_verifies_like_lf() {
    let ring = KeyRing::new(Key::generate());

    let armored = helper::sign_cleartext_message(&ring, "one\r\ntwo\r\n").unwrap();
    let text = helper::verify_cleartext_message(&ring, &armored, 0).unwrap();
    assert_eq!(text, "one\ntwo\n");
}

#[test]
fn document_layout() {
    let ring = KeyRing::new(Key::generate());

    let armored = helper::sign_cleartext_message(&ring, "layout check").unwrap();

    let re = Regex::new(
        r"(?s)^-----BEGIN PGP SIGNED MESSAGE-----\nHash: SHA256\n\nlayout check\n-----BEGIN PGP SIGNATURE-----\n.*-----END PGP SIGNATURE-----\n$",
    )
    .unwrap();
    assert!(re.is_match(&armored), "unexpected document:\n{armored}");
}

#[test]
fn dashed_lines_survive() {
    let ring = KeyRing::new(Key::generate());
    let input = "-----not a marker\n- a list item\ntext";

    let armored = helper::sign_cleartext_message(&ring, input).unwrap();
    let text = helper::verify_cleartext_message(&ring, &armored, 0).unwrap();
    assert_eq!(text, input);
}

#[test]
fn tampered_text_is_rejected() {
    let ring = KeyRing::new(Key::generate());

    let armored = helper::sign_cleartext_message(&ring, "pay 10 coins").unwrap();
    let tampered = armored.replace("pay 10 coins", "pay 99 coins");

    match helper::verify_cleartext_message(&ring, &tampered, 0) {
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

    let armored = helper::sign_cleartext_message(&signer, "hello").unwrap();

    match helper::verify_cleartext_message(&stranger, &armored, 0) {
        Err(Error::InvalidSignature {
            status: SignatureStatus::NoVerifier,
        }) => {}
        other => panic!("expected NoVerifier status, got {:?}", other),
    }
}

#[test]
fn parse_accepts_leading_garbage() {
    let ring = KeyRing::new(Key::generate());

    let armored = helper::sign_cleartext_message(&ring, "embedded").unwrap();
    let wrapped = format!("Some mail preamble.\n\n{armored}");

    let parsed = CleartextSignedMessage::from_armored(&wrapped).unwrap();
    assert_eq!(parsed.verify(&ring, 0).unwrap(), "embedded");
}

#[test]
fn missing_wrappers() {
    assert!(matches!(
        CleartextSignedMessage::from_armored("no markers anywhere"),
        Err(Error::InvalidArmorWrappers)
    ));
}
