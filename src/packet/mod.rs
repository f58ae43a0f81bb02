mod compressed_data;
mod header;
mod literal_data;
mod one_pass_signature;
mod signature;
mod sym_encrypted_data;
mod sym_encrypted_protected_data;

use std::io;

pub use self::compressed_data::{CompressedData, CompressionAlgorithm};
pub use self::header::{write_packet_header, PacketParser, Tag};
pub use self::literal_data::{DataMode, LiteralData};
pub use self::one_pass_signature::OnePassSignature;
pub use self::signature::{Signature, SignatureType};
pub use self::sym_encrypted_data::SymEncryptedData;
pub use self::sym_encrypted_protected_data::SymEncryptedProtectedData;

use crate::errors::Result;
use crate::malformed;
use crate::ser::Serialize;

/// The packets that can occur inside a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packet {
    Literal(LiteralData),
    CompressedData(CompressedData),
    OnePassSignature(OnePassSignature),
    Signature(Signature),
    SymEncryptedData(SymEncryptedData),
    SymEncryptedProtectedData(SymEncryptedProtectedData),
}

impl Packet {
    pub fn tag(&self) -> Tag {
        match self {
            Packet::Literal(_) => Tag::Literal,
            Packet::CompressedData(_) => Tag::CompressedData,
            Packet::OnePassSignature(_) => Tag::OnePassSignature,
            Packet::Signature(_) => Tag::Signature,
            Packet::SymEncryptedData(_) => Tag::SymEncryptedData,
            Packet::SymEncryptedProtectedData(_) => Tag::SymEncryptedProtectedData,
        }
    }
}

/// Parses all packets from the given slice.
pub fn parse_packets(input: &[u8]) -> Result<Vec<Packet>> {
    let mut packets = Vec::new();

    for entry in PacketParser::new(input) {
        let (tag, body) = entry?;
        match tag {
            Tag::Literal => packets.push(Packet::Literal(LiteralData::from_slice(&body)?)),
            Tag::CompressedData => {
                packets.push(Packet::CompressedData(CompressedData::from_slice(&body)?))
            }
            Tag::OnePassSignature => packets.push(Packet::OnePassSignature(
                OnePassSignature::from_slice(&body)?,
            )),
            Tag::Signature => packets.push(Packet::Signature(Signature::from_slice(&body)?)),
            Tag::SymEncryptedData => {
                packets.push(Packet::SymEncryptedData(SymEncryptedData::from_slice(&body)?))
            }
            Tag::SymEncryptedProtectedData => packets.push(Packet::SymEncryptedProtectedData(
                SymEncryptedProtectedData::from_slice(&body)?,
            )),
            // marker, padding and similar packets are skipped
            Tag::ModDetectionCode | Tag::Other(_) => {}
        }
    }

    if packets.is_empty() {
        return Err(malformed!("no recognized packets in input"));
    }

    Ok(packets)
}

/// Serializes a packet body with a new-style header.
pub fn write_packet<W: io::Write>(writer: &mut W, tag: Tag, body: &impl Serialize) -> Result<()> {
    let bytes = body.to_bytes()?;
    write_packet_header(writer, tag, bytes.len())?;
    writer.write_all(&bytes)?;

    Ok(())
}
