use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::composed::keyring::KeyRing;
use crate::composed::message;
use crate::composed::plain_message::PlainMessage;
use crate::composed::verification::DecryptedMessage;
use crate::crypto::sym::SymmetricKeyAlgorithm;
use crate::errors::{Error, Result};

/// A symmetric session key together with the name of the cipher it is
/// meant for.
///
/// The algorithm is kept as a string so that keys received from outside
/// sources can be represented even when the cipher is unknown; validation
/// happens when the key is used, not when it is constructed. Key material
/// is wiped on drop, but callers exporting it through [`SessionKey::key`]
/// or [`SessionKey::to_base64`] are responsible for the copies they make.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SessionKey {
    key: Vec<u8>,
    #[zeroize(skip)]
    algo: String,
}

impl SessionKey {
    /// Generates a random session key for the named cipher.
    pub fn generate(algo: &str) -> Result<Self> {
        let cipher = SymmetricKeyAlgorithm::from_name(algo)?;

        let mut key = vec![0u8; cipher.key_size()];
        rand::thread_rng().fill_bytes(&mut key);

        Ok(SessionKey {
            key,
            algo: algo.to_string(),
        })
    }

    /// Generates a random AES-256 session key.
    pub fn generate_default() -> Result<Self> {
        Self::generate("aes256")
    }

    /// Wraps externally supplied key material. No validation happens here;
    /// the algorithm and key size are checked on first use.
    pub fn from_token(token: &[u8], algo: &str) -> Self {
        SessionKey {
            key: token.to_vec(),
            algo: algo.to_string(),
        }
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn algo(&self) -> &str {
        &self.algo
    }

    /// Resolves the algorithm name to a cipher.
    pub fn cipher(&self) -> Result<SymmetricKeyAlgorithm> {
        SymmetricKeyAlgorithm::from_name(&self.algo)
    }

    /// Checks that the key material matches the named cipher's key size.
    pub fn check_size(&self) -> Result<SymmetricKeyAlgorithm> {
        let cipher = self.cipher()?;
        if self.key.len() != cipher.key_size() {
            return Err(Error::InvalidKeySize);
        }

        Ok(cipher)
    }

    /// The key material, base64 encoded without framing.
    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.key)
    }

    /// Wipes the key material in place.
    pub fn clear(&mut self) {
        self.key.zeroize();
    }

    /// Encrypts `plain` under this session key into a serialized,
    /// integrity protected message.
    pub fn encrypt(&self, plain: &PlainMessage) -> Result<Vec<u8>> {
        let cipher = self.check_size()?;
        message::encrypt_with_rng(rand::thread_rng(), cipher, &self.key, plain, None, false)
    }

    /// Like [`SessionKey::encrypt`], with the inner packets compressed.
    pub fn encrypt_with_compression(&self, plain: &PlainMessage) -> Result<Vec<u8>> {
        let cipher = self.check_size()?;
        message::encrypt_with_rng(rand::thread_rng(), cipher, &self.key, plain, None, true)
    }

    /// Encrypts `plain` and embeds a signature from the first signing
    /// capable key of `ring`.
    pub fn encrypt_and_sign(&self, plain: &PlainMessage, ring: &KeyRing) -> Result<Vec<u8>> {
        let cipher = self.check_size()?;
        message::encrypt_with_rng(rand::thread_rng(), cipher, &self.key, plain, Some(ring), false)
    }

    /// Decrypts a serialized encrypted message, ignoring any signature.
    pub fn decrypt(&self, input: &[u8]) -> Result<PlainMessage> {
        let cipher = self.check_size()?;
        let decrypted = message::decrypt(cipher, &self.key, input, None, 0)?;

        Ok(decrypted.message)
    }

    /// Decrypts a serialized encrypted message and reports the signature
    /// status separately from the plaintext.
    ///
    /// Decryption failures are errors; signature problems are never errors
    /// and only show up in the returned status.
    pub fn decrypt_and_verify(
        &self,
        input: &[u8],
        verify_ring: Option<&KeyRing>,
        verify_time: i64,
    ) -> Result<DecryptedMessage> {
        let cipher = self.check_size()?;
        message::decrypt(cipher, &self.key, input, verify_ring, verify_time)
    }
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKey")
            .field("algo", &self.algo)
            .field("key_len", &self.key.len())
            .finish()
    }
}
