use std::io;

use byteorder::{ReadBytesExt, WriteBytesExt};

use crate::crypto::hash::HashAlgorithm;
use crate::crypto::public_key::PublicKeyAlgorithm;
use crate::errors::Result;
use crate::malformed;
use crate::packet::signature::SignatureType;
use crate::ser::Serialize;
use crate::types::KeyId;

/// One-Pass Signature Packet
/// <https://www.rfc-editor.org/rfc/rfc4880.html#section-5.4>
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnePassSignature {
    version: u8,
    typ: SignatureType,
    hash_algorithm: HashAlgorithm,
    pub_algorithm: PublicKeyAlgorithm,
    key_id: KeyId,
    /// Zero when another one-pass signature follows, nonzero for the last.
    last: u8,
}

impl OnePassSignature {
    pub fn new(
        typ: SignatureType,
        hash_algorithm: HashAlgorithm,
        pub_algorithm: PublicKeyAlgorithm,
        key_id: KeyId,
    ) -> Self {
        OnePassSignature {
            version: 3,
            typ,
            hash_algorithm,
            pub_algorithm,
            key_id,
            last: 1,
        }
    }

    /// Parses a `OnePassSignature` packet from the given slice.
    pub fn from_slice(input: &[u8]) -> Result<Self> {
        let mut r = input;

        let version = r
            .read_u8()
            .map_err(|_| malformed!("one pass signature truncated"))?;
        if version != 3 {
            return Err(malformed!("unsupported one pass signature version {}", version));
        }

        let typ = SignatureType::try_from_u8(
            r.read_u8()
                .map_err(|_| malformed!("one pass signature truncated"))?,
        )?;
        let hash_algorithm = HashAlgorithm::from(
            r.read_u8()
                .map_err(|_| malformed!("one pass signature truncated"))?,
        );
        let pub_algorithm = PublicKeyAlgorithm::from(
            r.read_u8()
                .map_err(|_| malformed!("one pass signature truncated"))?,
        );

        if r.len() < 9 {
            return Err(malformed!("one pass signature truncated"));
        }
        let key_id = KeyId::from_slice(&r[..8])?;
        let last = r[8];

        Ok(OnePassSignature {
            version,
            typ,
            hash_algorithm,
            pub_algorithm,
            key_id,
            last,
        })
    }

    pub fn typ(&self) -> SignatureType {
        self.typ
    }

    pub fn key_id(&self) -> &KeyId {
        &self.key_id
    }
}

impl Serialize for OnePassSignature {
    fn to_writer<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u8(self.version)?;
        writer.write_u8(self.typ as u8)?;
        writer.write_u8(self.hash_algorithm.into())?;
        writer.write_u8(self.pub_algorithm.into())?;
        self.key_id.to_writer(writer)?;
        writer.write_u8(self.last)?;

        Ok(())
    }
}
