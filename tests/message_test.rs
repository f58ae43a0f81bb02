use pgp_core::composed::{Key, KeyRing, PlainMessage, SessionKey, SignatureStatus};
use pgp_core::errors::Error;

#[test]
fn encrypt_decrypt_without_verification() {
    let session_key = SessionKey::generate_default().unwrap();
    let plain = PlainMessage::from_string("hello world");

    let encrypted = session_key.encrypt(&plain).unwrap();
    assert_ne!(encrypted, plain.data());

    let decrypted = session_key.decrypt(&encrypted).unwrap();
    assert_eq!(decrypted.as_string(), "hello world");
    assert!(decrypted.is_text());
}

#[test]
fn decrypt_and_verify_unsigned_is_not_signed() {
    let session_key = SessionKey::generate_default().unwrap();
    let ring = KeyRing::new(Key::generate());
    let plain = PlainMessage::from_string("hello world");

    let encrypted = session_key.encrypt(&plain).unwrap();

    // no ring supplied
    let decrypted = session_key.decrypt_and_verify(&encrypted, None, 0).unwrap();
    assert_eq!(decrypted.status, SignatureStatus::NotSigned);
    assert_eq!(decrypted.message.as_string(), "hello world");

    // ring supplied, but the message carries no signature
    let decrypted = session_key
        .decrypt_and_verify(&encrypted, Some(&ring), 0)
        .unwrap();
    assert_eq!(decrypted.status, SignatureStatus::NotSigned);
    assert_eq!(decrypted.message.as_string(), "hello world");
}

#[test]
fn encrypt_and_sign_verifies() {
    let session_key = SessionKey::generate_default().unwrap();
    let ring = KeyRing::new(Key::generate());
    let plain = PlainMessage::from_string("signed and sealed");

    let encrypted = session_key.encrypt_and_sign(&plain, &ring).unwrap();

    let decrypted = session_key
        .decrypt_and_verify(&encrypted, Some(&ring.public_ring()), 0)
        .unwrap();
    assert_eq!(decrypted.status, SignatureStatus::Ok);
    assert_eq!(decrypted.message.as_string(), "signed and sealed");
}

#[test]
fn wrong_ring_is_no_verifier_not_failed() {
    let session_key = SessionKey::generate_default().unwrap();
    let signer = KeyRing::new(Key::generate());
    let stranger = KeyRing::new(Key::generate());
    let plain = PlainMessage::from_string("who signed this");

    let encrypted = session_key.encrypt_and_sign(&plain, &signer).unwrap();

    let decrypted = session_key
        .decrypt_and_verify(&encrypted, Some(&stranger), 0)
        .unwrap();
    assert_eq!(decrypted.status, SignatureStatus::NoVerifier);
    // plaintext is still recovered
    assert_eq!(decrypted.message.as_string(), "who signed this");
}

#[test]
fn signature_outside_time_window_is_failed() {
    let session_key = SessionKey::generate_default().unwrap();
    let ring = KeyRing::new(Key::generate());
    let plain = PlainMessage::from_string("from the future");

    let encrypted = session_key.encrypt_and_sign(&plain, &ring).unwrap();

    // verification pinned long before the signature was created
    let decrypted = session_key
        .decrypt_and_verify(&encrypted, Some(&ring), 1000)
        .unwrap();
    assert_eq!(decrypted.status, SignatureStatus::Failed);
    assert_eq!(decrypted.message.as_string(), "from the future");
}

#[test]
fn compression_roundtrip() {
    let session_key = SessionKey::generate_default().unwrap();
    let data = "squeeze me ".repeat(100);
    let plain = PlainMessage::from_string(&data);

    let encrypted = session_key.encrypt_with_compression(&plain).unwrap();
    let decrypted = session_key.decrypt(&encrypted).unwrap();
    assert_eq!(decrypted.as_string(), data);
}

#[test]
fn metadata_survives_the_roundtrip() {
    let session_key = SessionKey::generate("aes128").unwrap();
    let plain = PlainMessage::with_metadata(vec![0xde, 0xad, 0xbe, 0xef], false, "blob.bin", 1_600_000_000);

    let encrypted = session_key.encrypt(&plain).unwrap();
    let decrypted = session_key.decrypt(&encrypted).unwrap();

    assert!(decrypted.is_binary());
    assert_eq!(decrypted.data(), &[0xde, 0xad, 0xbe, 0xef]);
    assert_eq!(decrypted.filename(), "blob.bin");
    assert_eq!(decrypted.time(), 1_600_000_000);
}

#[test]
fn every_registered_cipher_roundtrips() {
    for algo in ["3des", "cast5", "aes128", "aes192", "aes256"] {
        let session_key = SessionKey::generate(algo).unwrap();
        let plain = PlainMessage::from_string("cipher agility");

        let encrypted = session_key.encrypt(&plain).unwrap();
        let decrypted = session_key.decrypt(&encrypted).unwrap();
        assert_eq!(decrypted.as_string(), "cipher agility", "algo {algo}");
    }
}

#[test]
fn wrong_key_fails_decryption() {
    let session_key = SessionKey::generate_default().unwrap();
    let other_key = SessionKey::generate_default().unwrap();
    let plain = PlainMessage::from_string("secret");

    let encrypted = session_key.encrypt(&plain).unwrap();

    match other_key.decrypt(&encrypted) {
        Err(Error::DecryptionFailed) => {}
        other => panic!("expected DecryptionFailed, got {:?}", other.map(|m| m.as_string())),
    }
}

#[test]
fn garbage_input_is_malformed() {
    let session_key = SessionKey::generate_default().unwrap();

    match session_key.decrypt(b"clearly not a packet stream") {
        Err(Error::MalformedPacket { .. }) => {}
        other => panic!("expected MalformedPacket, got {:?}", other.map(|m| m.as_string())),
    }
}

#[test]
fn session_key_from_token() {
    let token = [7u8; 32];
    let session_key = SessionKey::from_token(&token, "aes256");
    assert_eq!(session_key.key(), token);
    assert_eq!(session_key.algo(), "aes256");
    session_key.check_size().unwrap();

    // a wrong sized token is representable but unusable
    let short = SessionKey::from_token(&[7u8; 4], "aes256");
    assert!(matches!(short.check_size(), Err(Error::InvalidKeySize)));
    assert!(matches!(
        short.decrypt(&[0u8; 64]),
        Err(Error::InvalidKeySize)
    ));

    let unknown = SessionKey::from_token(&[7u8; 16], "idea");
    assert!(matches!(
        unknown.check_size(),
        Err(Error::UnsupportedAlgorithm { .. })
    ));
}

#[test]
fn decrypt_with_token_restored_key() {
    let session_key = SessionKey::generate_default().unwrap();
    let plain = PlainMessage::from_string("restored");

    let encrypted = session_key.encrypt(&plain).unwrap();

    // a key rebuilt from the exported material decrypts the message
    let restored = SessionKey::from_token(session_key.key(), session_key.algo());
    assert_eq!(restored.decrypt(&encrypted).unwrap().as_string(), "restored");
}
