use std::io;

use crate::crypto::sym::SymmetricKeyAlgorithm;
use crate::errors::Result;
use crate::malformed;
use crate::ser::Serialize;

/// Symmetrically Encrypted Data Packet (legacy, without integrity
/// protection). Accepted on decrypt for compatibility, never produced.
/// <https://www.rfc-editor.org/rfc/rfc4880.html#section-5.7>
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymEncryptedData {
    data: Vec<u8>,
}

impl SymEncryptedData {
    /// Parses a `SymEncryptedData` packet from the given slice.
    pub fn from_slice(input: &[u8]) -> Result<Self> {
        if input.is_empty() {
            return Err(malformed!("invalid input length"));
        }

        Ok(SymEncryptedData {
            data: input.to_vec(),
        })
    }

    /// Decrypts the contained data using OpenPGP CFB with resync.
    pub fn decrypt(&self, alg: SymmetricKeyAlgorithm, key: &[u8]) -> Result<Vec<u8>> {
        alg.decrypt_unprotected(key, &self.data)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl Serialize for SymEncryptedData {
    fn to_writer<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.data)?;

        Ok(())
    }
}
