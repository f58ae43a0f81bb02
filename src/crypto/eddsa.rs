//! EdDSA for OpenPGP.
//!
//! Only the `EdDSALegacy` framing with curve Ed25519 is carried here; it is
//! the framing v4 keys use. The signature is computed over the digest of
//! the signed material, and transported as the two MPIs R and S.

use ed25519_dalek::{Signer as _, SigningKey, VerifyingKey};
use rand::{CryptoRng, Rng};
use zeroize::Zeroizing;

use crate::errors::Result;
use crate::types::Mpi;

/// Generate an Ed25519 key pair, returning the secret half.
pub fn generate_key<R: Rng + CryptoRng>(mut rng: R) -> SigningKey {
    let mut bytes = Zeroizing::new([0u8; ed25519_dalek::SECRET_KEY_LENGTH]);
    rng.fill_bytes(&mut *bytes);

    SigningKey::from_bytes(&bytes)
}

/// Sign the given digest, returning the signature halves R and S.
pub fn sign(key: &SigningKey, digest: &[u8]) -> Result<(Mpi, Mpi)> {
    let signature = key.sign(digest);
    let bytes = signature.to_bytes();

    let r = Mpi::from_slice(&bytes[..32]);
    let s = Mpi::from_slice(&bytes[32..]);

    Ok((r, s))
}

/// Verify R and S against the digest of the signed material.
pub fn verify(key: &VerifyingKey, digest: &[u8], r: &Mpi, s: &Mpi) -> Result<()> {
    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(&r.to_padded(32)?);
    sig_bytes[32..].copy_from_slice(&s.to_padded(32)?);

    let signature = ed25519_dalek::Signature::from_bytes(&sig_bytes);
    key.verify_strict(digest, &signature)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn sign_verify_roundtrip() {
        let key = generate_key(rand::thread_rng());
        let digest = crate::crypto::hash::HashAlgorithm::Sha256
            .digest(b"hello world")
            .unwrap();

        let (r, s) = sign(&key, &digest).unwrap();
        verify(&key.verifying_key(), &digest, &r, &s).unwrap();

        let other = crate::crypto::hash::HashAlgorithm::Sha256
            .digest(b"other")
            .unwrap();
        assert!(verify(&key.verifying_key(), &other, &r, &s).is_err());
    }
}
