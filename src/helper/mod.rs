//! One-call wrappers around the composed types, for callers that only
//! need the common flows.

use crate::composed::{
    CleartextSignedMessage, DecryptedMessage, KeyRing, PlainMessage, SessionKey,
};
use crate::errors::Result;
use crate::format_err;

/// Signs `text` as a cleartext framework document.
pub fn sign_cleartext_message(ring: &KeyRing, text: &str) -> Result<String> {
    CleartextSignedMessage::sign(ring, text)?.to_armored_string()
}

/// Verifies a cleartext framework document and returns the canonical
/// signed text.
pub fn verify_cleartext_message(ring: &KeyRing, armored: &str, verify_time: i64) -> Result<String> {
    CleartextSignedMessage::from_armored(armored)?.verify(ring, verify_time)
}

/// Encrypts `plain` under a fresh AES-256 session key and signs it with
/// `ring`. Returns the serialized message and the session key.
pub fn encrypt_sign_message(
    ring: &KeyRing,
    plain: &PlainMessage,
) -> Result<(Vec<u8>, SessionKey)> {
    let session_key = SessionKey::generate_default()?;
    let message = session_key.encrypt_and_sign(plain, ring)?;

    Ok((message, session_key))
}

/// Decrypts a message and reports the signature status alongside the
/// plaintext instead of failing on bad signatures.
pub fn decrypt_verify_message(
    session_key: &SessionKey,
    verify_ring: Option<&KeyRing>,
    message: &[u8],
    verify_time: i64,
) -> Result<DecryptedMessage> {
    session_key.decrypt_and_verify(message, verify_ring, verify_time)
}

/// The ring's SHA-256 key fingerprints as a JSON array of lowercase hex
/// strings, ring order.
pub fn sha256_fingerprints_json(ring: &KeyRing) -> Result<Vec<u8>> {
    serde_json::to_vec(&ring.sha256_fingerprints())
        .map_err(|e| format_err!("fingerprint serialization: {}", e))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::composed::{Key, SignatureStatus};

    #[test]
    fn cleartext_helpers_roundtrip() {
        let ring = KeyRing::new(Key::generate());
        let armored = sign_cleartext_message(&ring, "hello helper").unwrap();
        let text = verify_cleartext_message(&ring, &armored, 0).unwrap();
        assert_eq!(text, "hello helper");
    }

    #[test]
    fn encrypt_sign_decrypt_verify() {
        let ring = KeyRing::new(Key::generate());
        let plain = PlainMessage::from_string("round and round");

        let (message, session_key) = encrypt_sign_message(&ring, &plain).unwrap();
        let decrypted =
            decrypt_verify_message(&session_key, Some(&ring), &message, 0).unwrap();

        assert_eq!(decrypted.status, SignatureStatus::Ok);
        assert_eq!(decrypted.message.as_string(), "round and round");
    }

    #[test]
    fn fingerprints_are_json() {
        let ring = KeyRing::new(Key::generate());
        let json = sha256_fingerprints_json(&ring).unwrap();
        let parsed: Vec<String> = serde_json::from_slice(&json).unwrap();
        assert_eq!(parsed, ring.sha256_fingerprints());
    }
}
