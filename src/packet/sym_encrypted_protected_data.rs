use std::io;

use rand::{CryptoRng, Rng};

use crate::crypto::sym::SymmetricKeyAlgorithm;
use crate::errors::Result;
use crate::malformed;
use crate::ser::Serialize;

/// Symmetrically Encrypted Integrity Protected Data Packet (v1)
/// <https://www.rfc-editor.org/rfc/rfc4880.html#section-5.13>
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymEncryptedProtectedData {
    data: Vec<u8>,
}

impl SymEncryptedProtectedData {
    /// Parses a `SymEncryptedProtectedData` packet from the given slice.
    pub fn from_slice(input: &[u8]) -> Result<Self> {
        if input.len() < 2 {
            return Err(malformed!("invalid input length"));
        }
        if input[0] != 0x01 {
            return Err(malformed!(
                "unknown SymEncryptedProtectedData version {}",
                input[0]
            ));
        }

        Ok(SymEncryptedProtectedData {
            data: input[1..].to_vec(),
        })
    }

    /// Encrypts the data using the given symmetric key.
    pub fn encrypt_with_rng<R: CryptoRng + Rng>(
        rng: R,
        alg: SymmetricKeyAlgorithm,
        key: &[u8],
        plaintext: &[u8],
    ) -> Result<Self> {
        let data = alg.encrypt_protected(rng, key, plaintext)?;

        Ok(SymEncryptedProtectedData { data })
    }

    /// Decrypts the contained data, verifying the MDC.
    pub fn decrypt(&self, alg: SymmetricKeyAlgorithm, key: &[u8]) -> Result<Vec<u8>> {
        alg.decrypt_protected(key, &self.data)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl Serialize for SymEncryptedProtectedData {
    fn to_writer<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&[0x01])?;
        writer.write_all(&self.data)?;

        Ok(())
    }
}
