use aes::{Aes128, Aes192, Aes256};
use cast5::Cast5;
use cfb_mode::{cipher::KeyIvInit, BufDecryptor, BufEncryptor};
use cipher::{BlockCipher, BlockDecrypt, BlockEncryptMut};
use des::TdesEde3;
use log::debug;
use num_enum::{FromPrimitive, IntoPrimitive};
use rand::{CryptoRng, Rng};

use crate::errors::{Error, Result};

fn encrypt<MODE>(key: &[u8], iv: &[u8], data: &mut [u8]) -> Result<()>
where
    MODE: BlockDecrypt + BlockEncryptMut + BlockCipher,
    BufEncryptor<MODE>: KeyIvInit,
{
    let mut mode = BufEncryptor::<MODE>::new_from_slices(key, iv)?;
    mode.encrypt(data);

    Ok(())
}

fn decrypt<MODE>(key: &[u8], iv: &[u8], data: &mut [u8]) -> Result<()>
where
    MODE: BlockDecrypt + BlockEncryptMut + BlockCipher,
    BufDecryptor<MODE>: KeyIvInit,
{
    let mut mode = BufDecryptor::<MODE>::new_from_slices(key, iv)?;
    mode.decrypt(data);

    Ok(())
}

/// Legacy format using OpenPGP CFB mode: the cipher is re-initialized after
/// the prefix, keyed on the last block-size octets of prefix ciphertext.
///
/// <https://datatracker.ietf.org/doc/html/rfc4880.html#section-13.9>
fn decrypt_resync<MODE>(key: &[u8], iv: &[u8], ciphertext: &mut [u8]) -> Result<()>
where
    MODE: BlockDecrypt + BlockEncryptMut + BlockCipher,
    BufDecryptor<MODE>: KeyIvInit,
{
    let bs = iv.len();
    let (prefix, data) = ciphertext.split_at_mut(bs + 2);
    let resync_iv = prefix[2..].to_vec();

    BufDecryptor::<MODE>::new_from_slices(key, iv)?.decrypt(prefix);
    BufDecryptor::<MODE>::new_from_slices(key, &resync_iv)?.decrypt(data);

    Ok(())
}

/// The symmetric key algorithms in the fixed cipher registry.
/// Identifiers follow <https://www.rfc-editor.org/rfc/rfc4880.html#section-9.2>.
#[derive(Debug, PartialEq, Eq, Copy, Clone, FromPrimitive, IntoPrimitive, Hash)]
#[repr(u8)]
pub enum SymmetricKeyAlgorithm {
    /// Plaintext or unencrypted data
    Plaintext = 0,
    /// Triple-DES
    TripleDES = 2,
    /// CAST5
    CAST5 = 3,
    /// AES with 128-bit key
    AES128 = 7,
    /// AES with 192-bit key
    AES192 = 8,
    /// AES with 256-bit key
    AES256 = 9,

    #[num_enum(catch_all)]
    Other(u8),
}

impl Default for SymmetricKeyAlgorithm {
    fn default() -> Self {
        Self::AES256
    }
}

/// MDC trailer: 1 byte packet tag, 1 byte length prefix, 20 bytes SHA1.
const MDC_LEN: usize = 22;

impl SymmetricKeyAlgorithm {
    /// Look up an algorithm by registry name. `"3des"` and `"tripledes"`
    /// are aliases for the same cipher.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "3des" | "tripledes" => Ok(SymmetricKeyAlgorithm::TripleDES),
            "cast5" => Ok(SymmetricKeyAlgorithm::CAST5),
            "aes128" => Ok(SymmetricKeyAlgorithm::AES128),
            "aes192" => Ok(SymmetricKeyAlgorithm::AES192),
            "aes256" => Ok(SymmetricKeyAlgorithm::AES256),
            _ => Err(Error::UnsupportedAlgorithm {
                name: name.to_string(),
            }),
        }
    }

    /// Registry name for this algorithm.
    ///
    /// Where two names alias the same cipher this returns one of them
    /// (`"3des"` for Triple-DES); callers must not rely on which alias
    /// comes back from an identifier lookup.
    pub fn name(self) -> Result<&'static str> {
        match self {
            SymmetricKeyAlgorithm::TripleDES => Ok("3des"),
            SymmetricKeyAlgorithm::CAST5 => Ok("cast5"),
            SymmetricKeyAlgorithm::AES128 => Ok("aes128"),
            SymmetricKeyAlgorithm::AES192 => Ok("aes192"),
            SymmetricKeyAlgorithm::AES256 => Ok("aes256"),
            _ => Err(Error::UnsupportedAlgorithm {
                name: format!("cipher function {}", u8::from(self)),
            }),
        }
    }

    /// The size of a single block in bytes.
    pub const fn block_size(self) -> usize {
        match self {
            SymmetricKeyAlgorithm::TripleDES => 8,
            SymmetricKeyAlgorithm::CAST5 => 8,
            SymmetricKeyAlgorithm::AES128 => 16,
            SymmetricKeyAlgorithm::AES192 => 16,
            SymmetricKeyAlgorithm::AES256 => 16,
            SymmetricKeyAlgorithm::Plaintext | SymmetricKeyAlgorithm::Other(_) => 0,
        }
    }

    /// The key size in bytes.
    pub const fn key_size(self) -> usize {
        match self {
            SymmetricKeyAlgorithm::TripleDES => 24,
            SymmetricKeyAlgorithm::CAST5 => 16,
            SymmetricKeyAlgorithm::AES128 => 16,
            SymmetricKeyAlgorithm::AES192 => 24,
            SymmetricKeyAlgorithm::AES256 => 32,
            SymmetricKeyAlgorithm::Plaintext | SymmetricKeyAlgorithm::Other(_) => 0,
        }
    }

    /// Encrypt for a v1 symmetrically encrypted integrity protected packet:
    /// random prefix with quick-check octets, plaintext, MDC trailer, all
    /// run through CFB with an all-zero IV and no resync.
    pub fn encrypt_protected<R: CryptoRng + Rng>(
        self,
        mut rng: R,
        key: &[u8],
        plaintext: &[u8],
    ) -> Result<Vec<u8>> {
        // We use regular sha1 for the MDC; it is an integrity check, not a
        // collision target.
        use sha1::{Digest, Sha1};

        debug!("protected encrypt");

        let bs = self.block_size();
        let prefix_len = bs + 2;
        let plaintext_len = plaintext.len();

        let mut ciphertext = vec![0u8; prefix_len + plaintext_len + MDC_LEN];

        // prefix
        rng.fill_bytes(&mut ciphertext[..bs]);

        // add quick check
        ciphertext[bs] = ciphertext[bs - 2];
        ciphertext[bs + 1] = ciphertext[bs - 1];

        // plaintext
        ciphertext[prefix_len..(prefix_len + plaintext_len)].copy_from_slice(plaintext);
        // mdc header
        ciphertext[prefix_len + plaintext_len] = 0xD3;
        ciphertext[prefix_len + plaintext_len + 1] = 0x14;
        // mdc body
        let checksum = &Sha1::digest(&ciphertext[..(prefix_len + plaintext_len + 2)])[..20];
        ciphertext[(prefix_len + plaintext_len + 2)..].copy_from_slice(checksum);

        let iv_vec = vec![0u8; bs];
        self.encrypt_with_iv(key, &iv_vec, &mut ciphertext)?;

        Ok(ciphertext)
    }

    /// Decrypt a v1 protected packet body, verifying the quick-check octets
    /// and the MDC. Any mismatch is a hard [`Error::DecryptionFailed`].
    pub fn decrypt_protected(self, key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        use sha1::{Digest, Sha1};

        debug!("protected decrypt");

        let bs = self.block_size();
        let prefix_len = bs + 2;
        if ciphertext.len() < prefix_len + MDC_LEN {
            return Err(Error::DecryptionFailed);
        }

        let mut plaintext = ciphertext.to_vec();
        let iv_vec = vec![0u8; bs];
        self.decrypt_with_iv(key, &iv_vec, &mut plaintext)?;

        // quick check
        if plaintext[bs] != plaintext[bs - 2] || plaintext[bs + 1] != plaintext[bs - 1] {
            return Err(Error::DecryptionFailed);
        }

        // mdc: 0xD3 0x14 followed by SHA1 over everything before the hash
        let mdc_offset = plaintext.len() - MDC_LEN;
        if plaintext[mdc_offset] != 0xD3 || plaintext[mdc_offset + 1] != 0x14 {
            return Err(Error::DecryptionFailed);
        }
        let checksum = Sha1::digest(&plaintext[..mdc_offset + 2]);
        if checksum[..] != plaintext[mdc_offset + 2..] {
            return Err(Error::DecryptionFailed);
        }

        plaintext.truncate(mdc_offset);
        plaintext.drain(..prefix_len);

        Ok(plaintext)
    }

    /// Decrypt a legacy (unprotected) symmetrically encrypted packet body,
    /// which uses OpenPGP CFB with a resync after the prefix.
    pub fn decrypt_unprotected(self, key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        debug!("unprotected decrypt");

        let bs = self.block_size();
        let prefix_len = bs + 2;
        if ciphertext.len() < prefix_len {
            return Err(Error::DecryptionFailed);
        }

        let mut plaintext = ciphertext.to_vec();
        let iv_vec = vec![0u8; bs];
        self.decrypt_with_iv_resync(key, &iv_vec, &mut plaintext)?;

        if plaintext[bs] != plaintext[bs - 2] || plaintext[bs + 1] != plaintext[bs - 1] {
            return Err(Error::DecryptionFailed);
        }

        plaintext.drain(..prefix_len);

        Ok(plaintext)
    }

    /// Encrypt the data using CFB mode, without padding. Overwrites the input.
    fn encrypt_with_iv(self, key: &[u8], iv_vec: &[u8], ciphertext: &mut [u8]) -> Result<()> {
        match self {
            SymmetricKeyAlgorithm::TripleDES => encrypt::<TdesEde3>(key, iv_vec, ciphertext),
            SymmetricKeyAlgorithm::CAST5 => encrypt::<Cast5>(key, iv_vec, ciphertext),
            SymmetricKeyAlgorithm::AES128 => encrypt::<Aes128>(key, iv_vec, ciphertext),
            SymmetricKeyAlgorithm::AES192 => encrypt::<Aes192>(key, iv_vec, ciphertext),
            SymmetricKeyAlgorithm::AES256 => encrypt::<Aes256>(key, iv_vec, ciphertext),
            SymmetricKeyAlgorithm::Plaintext | SymmetricKeyAlgorithm::Other(_) => {
                Err(Error::UnsupportedAlgorithm {
                    name: format!("cipher function {}", u8::from(self)),
                })
            }
        }
    }

    /// Decrypt the data using CFB mode, without padding. Overwrites the input.
    fn decrypt_with_iv(self, key: &[u8], iv_vec: &[u8], ciphertext: &mut [u8]) -> Result<()> {
        match self {
            SymmetricKeyAlgorithm::TripleDES => decrypt::<TdesEde3>(key, iv_vec, ciphertext),
            SymmetricKeyAlgorithm::CAST5 => decrypt::<Cast5>(key, iv_vec, ciphertext),
            SymmetricKeyAlgorithm::AES128 => decrypt::<Aes128>(key, iv_vec, ciphertext),
            SymmetricKeyAlgorithm::AES192 => decrypt::<Aes192>(key, iv_vec, ciphertext),
            SymmetricKeyAlgorithm::AES256 => decrypt::<Aes256>(key, iv_vec, ciphertext),
            SymmetricKeyAlgorithm::Plaintext | SymmetricKeyAlgorithm::Other(_) => {
                Err(Error::UnsupportedAlgorithm {
                    name: format!("cipher function {}", u8::from(self)),
                })
            }
        }
    }

    fn decrypt_with_iv_resync(
        self,
        key: &[u8],
        iv_vec: &[u8],
        ciphertext: &mut [u8],
    ) -> Result<()> {
        match self {
            SymmetricKeyAlgorithm::TripleDES => decrypt_resync::<TdesEde3>(key, iv_vec, ciphertext),
            SymmetricKeyAlgorithm::CAST5 => decrypt_resync::<Cast5>(key, iv_vec, ciphertext),
            SymmetricKeyAlgorithm::AES128 => decrypt_resync::<Aes128>(key, iv_vec, ciphertext),
            SymmetricKeyAlgorithm::AES192 => decrypt_resync::<Aes192>(key, iv_vec, ciphertext),
            SymmetricKeyAlgorithm::AES256 => decrypt_resync::<Aes256>(key, iv_vec, ciphertext),
            SymmetricKeyAlgorithm::Plaintext | SymmetricKeyAlgorithm::Other(_) => {
                Err(Error::UnsupportedAlgorithm {
                    name: format!("cipher function {}", u8::from(self)),
                })
            }
        }
    }
}
