use std::io::{self, Read};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use ed25519_dalek::{SigningKey, VerifyingKey};

use crate::crypto::hash::HashAlgorithm;
use crate::crypto::public_key::PublicKeyAlgorithm;
use crate::crypto::eddsa;
use crate::errors::{Error, Result};
use crate::malformed;
use crate::normalize_lines::{LineBreak, Normalized};
use crate::ser::Serialize;
use crate::types::{KeyId, Mpi};

/// Signature types relevant to message processing.
/// Ref: <https://www.rfc-editor.org/rfc/rfc4880.html#section-5.2.1>
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum SignatureType {
    /// Signature over a binary document
    Binary = 0x00,
    /// Signature over a canonical text document (CRLF line endings)
    Text = 0x01,
}

impl SignatureType {
    pub fn try_from_u8(v: u8) -> Result<Self> {
        match v {
            0x00 => Ok(SignatureType::Binary),
            0x01 => Ok(SignatureType::Text),
            _ => Err(malformed!("unsupported signature type {:#x}", v)),
        }
    }
}

/// Subpacket type ids we emit and evaluate.
const SUBPACKET_CREATION_TIME: u8 = 2;
const SUBPACKET_ISSUER: u8 = 16;

/// Version 4 Signature Packet.
///
/// The subpacket areas are retained as raw bytes so that the verification
/// digest is always computed over the area exactly as received.
/// <https://www.rfc-editor.org/rfc/rfc4880.html#section-5.2.3>
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    typ: SignatureType,
    pub_alg: PublicKeyAlgorithm,
    hash_alg: HashAlgorithm,
    hashed_area: Vec<u8>,
    unhashed_area: Vec<u8>,
    signed_hash_value: [u8; 2],
    sig_r: Mpi,
    sig_s: Mpi,
}

impl Signature {
    /// Create a signature over `data` with the given secret key.
    ///
    /// The hashed subpacket area carries the creation time and the issuer
    /// key id, which is the set required for interoperable verification.
    pub fn sign(
        key: &SigningKey,
        typ: SignatureType,
        hash_alg: HashAlgorithm,
        created: u32,
        issuer: KeyId,
        data: &[u8],
    ) -> Result<Self> {
        let mut hashed_area = Vec::with_capacity(2 + 5 + 9);
        write_subpacket(&mut hashed_area, SUBPACKET_CREATION_TIME, &created.to_be_bytes())?;
        write_subpacket(&mut hashed_area, SUBPACKET_ISSUER, issuer.as_ref())?;

        let mut sig = Signature {
            typ,
            pub_alg: PublicKeyAlgorithm::EdDSALegacy,
            hash_alg,
            hashed_area,
            unhashed_area: Vec::new(),
            signed_hash_value: [0; 2],
            sig_r: Mpi::default(),
            sig_s: Mpi::default(),
        };

        let digest = sig.digest(data)?;
        sig.signed_hash_value.copy_from_slice(&digest[..2]);

        let (r, s) = eddsa::sign(key, &digest)?;
        sig.sig_r = r;
        sig.sig_s = s;

        Ok(sig)
    }

    /// Parses a `Signature` packet from the given slice.
    pub fn from_slice(input: &[u8]) -> Result<Self> {
        let mut r = input;

        let version = r.read_u8().map_err(|_| malformed!("signature truncated"))?;
        if version != 4 {
            return Err(malformed!("unsupported signature version {}", version));
        }

        let typ = SignatureType::try_from_u8(
            r.read_u8().map_err(|_| malformed!("signature truncated"))?,
        )?;
        let pub_alg = PublicKeyAlgorithm::from(
            r.read_u8().map_err(|_| malformed!("signature truncated"))?,
        );
        let hash_alg =
            HashAlgorithm::from(r.read_u8().map_err(|_| malformed!("signature truncated"))?);

        let hashed_len = r
            .read_u16::<BigEndian>()
            .map_err(|_| malformed!("signature truncated"))? as usize;
        if r.len() < hashed_len {
            return Err(malformed!("signature hashed area truncated"));
        }
        let hashed_area = r[..hashed_len].to_vec();
        r = &r[hashed_len..];

        let unhashed_len = r
            .read_u16::<BigEndian>()
            .map_err(|_| malformed!("signature truncated"))? as usize;
        if r.len() < unhashed_len {
            return Err(malformed!("signature unhashed area truncated"));
        }
        let unhashed_area = r[..unhashed_len].to_vec();
        r = &r[unhashed_len..];

        let mut signed_hash_value = [0u8; 2];
        r.read_exact(&mut signed_hash_value)
            .map_err(|_| malformed!("signature truncated"))?;

        let sig_r = Mpi::from_reader(&mut r)?;
        let sig_s = Mpi::from_reader(&mut r)?;

        Ok(Signature {
            typ,
            pub_alg,
            hash_alg,
            hashed_area,
            unhashed_area,
            signed_hash_value,
            sig_r,
            sig_s,
        })
    }

    pub fn typ(&self) -> SignatureType {
        self.typ
    }

    pub fn hash_alg(&self) -> HashAlgorithm {
        self.hash_alg
    }

    /// Signature creation time from the hashed subpacket area.
    pub fn created(&self) -> Option<u32> {
        find_subpacket(&self.hashed_area, SUBPACKET_CREATION_TIME)
            .filter(|body| body.len() == 4)
            .map(|body| u32::from_be_bytes([body[0], body[1], body[2], body[3]]))
    }

    /// Issuer key id, from the hashed area first, the unhashed one second.
    pub fn issuer(&self) -> Option<KeyId> {
        find_subpacket(&self.hashed_area, SUBPACKET_ISSUER)
            .or_else(|| find_subpacket(&self.unhashed_area, SUBPACKET_ISSUER))
            .and_then(|body| KeyId::from_slice(body).ok())
    }

    /// Compute the digest this signature binds: the signed data (normalized
    /// for text signatures) followed by the v4 trailer.
    pub fn digest(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut hasher = self.hash_alg.new_hasher()?;

        match self.typ {
            SignatureType::Binary => hasher.update(data),
            SignatureType::Text => {
                let normalized: Vec<u8> =
                    Normalized::new(data.iter().copied(), LineBreak::Crlf).collect();
                hasher.update(&normalized);
            }
        }

        // v4 trailer: the hashed meta data, followed by a final length field
        let mut trailer = Vec::with_capacity(6 + self.hashed_area.len() + 6);
        trailer.push(4u8);
        trailer.push(self.typ as u8);
        trailer.push(self.pub_alg.into());
        trailer.push(self.hash_alg.into());
        trailer.extend_from_slice(&(self.hashed_area.len() as u16).to_be_bytes());
        trailer.extend_from_slice(&self.hashed_area);
        trailer.push(0x04);
        trailer.push(0xFF);
        trailer.extend_from_slice(&((6 + self.hashed_area.len()) as u32).to_be_bytes());

        hasher.update(&trailer);

        Ok(hasher.finalize_reset().to_vec())
    }

    /// Verify this signature over `data` with the given public key.
    pub fn verify(&self, key: &VerifyingKey, data: &[u8]) -> Result<()> {
        if self.pub_alg != PublicKeyAlgorithm::EdDSALegacy {
            return Err(Error::Unsupported {
                message: format!("public key algorithm {:?}", self.pub_alg),
            });
        }

        let digest = self.digest(data)?;
        if digest[..2] != self.signed_hash_value[..] {
            return Err(Error::SignatureError {
                source: ed25519_dalek::SignatureError::new(),
            });
        }

        eddsa::verify(key, &digest, &self.sig_r, &self.sig_s)
    }
}

impl Serialize for Signature {
    fn to_writer<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u8(4)?;
        writer.write_u8(self.typ as u8)?;
        writer.write_u8(self.pub_alg.into())?;
        writer.write_u8(self.hash_alg.into())?;

        writer.write_u16::<BigEndian>(self.hashed_area.len() as u16)?;
        writer.write_all(&self.hashed_area)?;
        writer.write_u16::<BigEndian>(self.unhashed_area.len() as u16)?;
        writer.write_all(&self.unhashed_area)?;

        writer.write_all(&self.signed_hash_value)?;
        self.sig_r.to_writer(writer)?;
        self.sig_s.to_writer(writer)?;

        Ok(())
    }
}

/// Writes a subpacket with a one-octet length specifier.
fn write_subpacket<W: io::Write>(writer: &mut W, typ: u8, body: &[u8]) -> Result<()> {
    debug_assert!(body.len() < 191);

    writer.write_u8((body.len() + 1) as u8)?;
    writer.write_u8(typ)?;
    writer.write_all(body)?;

    Ok(())
}

/// Scans a subpacket area for the first subpacket of the given type.
fn find_subpacket(mut area: &[u8], wanted: u8) -> Option<&[u8]> {
    while !area.is_empty() {
        let olen = area[0];
        let (len, mut off) = match olen {
            0..=191 => (olen as usize, 1),
            192..=254 => {
                if area.len() < 2 {
                    return None;
                }
                ((((olen as usize) - 192) << 8) + 192 + area[1] as usize, 2)
            }
            255 => {
                if area.len() < 5 {
                    return None;
                }
                (
                    u32::from_be_bytes([area[1], area[2], area[3], area[4]]) as usize,
                    5,
                )
            }
        };

        if len == 0 || area.len() < off + len {
            return None;
        }

        let typ = area[off] & 0x7F;
        off += 1;

        if typ == wanted {
            return Some(&area[off..off + len - 1]);
        }

        area = &area[off + len - 1..];
    }

    None
}
