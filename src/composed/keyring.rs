use std::fmt;

use ed25519_dalek::{SigningKey, VerifyingKey};
use rand::{CryptoRng, Rng};
use sha1::{Digest, Sha1};
use sha2::Sha256;

use crate::crypto::eddsa;
use crate::crypto::public_key::PublicKeyAlgorithm;
use crate::errors::{Error, Result};
use crate::ser::now_u32;
use crate::types::{KeyId, Mpi};

/// OID of curve Ed25519 as carried in EdDSALegacy key material.
const ED25519_OID: [u8; 9] = [0x2B, 0x06, 0x01, 0x04, 0x01, 0xDA, 0x47, 0x0F, 0x01];

/// A single Ed25519 key: always a public half, optionally the secret half
/// when the key is usable for signing.
#[derive(Clone)]
pub struct Key {
    created: u32,
    secret: Option<SigningKey>,
    public: VerifyingKey,
}

impl Key {
    /// Generate a fresh signing-capable key.
    pub fn generate() -> Self {
        Self::generate_with_rng(rand::thread_rng(), now_u32())
    }

    pub fn generate_with_rng<R: Rng + CryptoRng>(rng: R, created: u32) -> Self {
        let secret = eddsa::generate_key(rng);
        let public = secret.verifying_key();

        Key {
            created,
            secret: Some(secret),
            public,
        }
    }

    /// Wrap an existing public key; the result can verify but not sign.
    pub fn from_public(public: VerifyingKey, created: u32) -> Self {
        Key {
            created,
            secret: None,
            public,
        }
    }

    /// This key with the secret half stripped.
    pub fn as_public(&self) -> Key {
        Key {
            created: self.created,
            secret: None,
            public: self.public,
        }
    }

    pub fn created(&self) -> u32 {
        self.created
    }

    pub fn can_sign(&self) -> bool {
        self.secret.is_some()
    }

    pub fn public_key(&self) -> &VerifyingKey {
        &self.public
    }

    pub(crate) fn secret_key(&self) -> Option<&SigningKey> {
        self.secret.as_ref()
    }

    /// The v4 public key packet body in EdDSALegacy framing. Fingerprints
    /// and key ids are derived from this serialization.
    fn public_packet_body(&self) -> Vec<u8> {
        let mut q = Vec::with_capacity(33);
        q.push(0x40);
        q.extend_from_slice(self.public.as_bytes());

        let mut body = Vec::with_capacity(6 + 1 + ED25519_OID.len() + 2 + q.len());
        body.push(0x04);
        body.extend_from_slice(&self.created.to_be_bytes());
        body.push(PublicKeyAlgorithm::EdDSALegacy.into());
        body.push(ED25519_OID.len() as u8);
        body.extend_from_slice(&ED25519_OID);
        // q never has leading zeros, the 0x40 prefix is always present
        let q_mpi = Mpi::from_slice(&q);
        body.extend_from_slice(&q_mpi.bit_len().to_be_bytes());
        body.extend_from_slice(q_mpi.as_bytes());

        body
    }

    /// The octets hashed for v4 fingerprints: 0x99, two octet length, body.
    fn fingerprint_material(&self) -> Vec<u8> {
        let body = self.public_packet_body();

        let mut material = Vec::with_capacity(3 + body.len());
        material.push(0x99);
        material.extend_from_slice(&(body.len() as u16).to_be_bytes());
        material.extend_from_slice(&body);

        material
    }

    /// The v4 (SHA1) fingerprint.
    pub fn fingerprint(&self) -> [u8; 20] {
        Sha1::digest(self.fingerprint_material()).into()
    }

    /// SHA-256 fingerprint over the same key material, as exported to
    /// calling code.
    pub fn sha256_fingerprint(&self) -> [u8; 32] {
        Sha256::digest(self.fingerprint_material()).into()
    }

    /// Key id: the low 64 bits of the v4 fingerprint.
    pub fn key_id(&self) -> KeyId {
        let fp = self.fingerprint();
        let mut id = [0u8; 8];
        id.copy_from_slice(&fp[12..]);
        KeyId::from(id)
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("key_id", &self.key_id())
            .field("created", &self.created)
            .field("can_sign", &self.can_sign())
            .finish()
    }
}

/// An ordered, non-empty set of keys.
///
/// Capabilities depend on the keys inside: a ring can sign when at least
/// one key carries its secret half, and verify with any of its members.
/// Unlocking and parsing of long-term key storage happens outside this
/// crate; a ring only holds ready-to-use key material.
#[derive(Debug, Clone)]
pub struct KeyRing {
    entries: Vec<Key>,
}

impl KeyRing {
    pub fn new(key: Key) -> Self {
        KeyRing { entries: vec![key] }
    }

    pub fn from_keys(entries: Vec<Key>) -> Result<Self> {
        crate::ensure!(!entries.is_empty(), "a key ring cannot be empty");
        Ok(KeyRing { entries })
    }

    pub fn add_key(&mut self, key: Key) {
        self.entries.push(key);
    }

    pub fn keys(&self) -> &[Key] {
        &self.entries
    }

    /// The first key holding secret material.
    pub fn signing_key(&self) -> Result<&Key> {
        self.entries
            .iter()
            .find(|k| k.can_sign())
            .ok_or(Error::NoSigningKey)
    }

    /// The first key whose id matches, ring order. When several keys share
    /// an id the first match wins; no stronger tie-break is attempted.
    pub fn key_by_id(&self, id: &KeyId) -> Option<&Key> {
        self.entries.iter().find(|k| &k.key_id() == id)
    }

    /// A ring of the same keys with all secret halves stripped.
    pub fn public_ring(&self) -> KeyRing {
        KeyRing {
            entries: self.entries.iter().map(Key::as_public).collect(),
        }
    }

    /// Lowercase hex SHA-256 fingerprints, one per key, ring order.
    pub fn sha256_fingerprints(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|k| hex::encode(k.sha256_fingerprint()))
            .collect()
    }
}
