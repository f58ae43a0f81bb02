use std::io;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use num_enum::{FromPrimitive, IntoPrimitive};

use crate::errors::Result;
use crate::malformed;

/// Packet tags.
/// Ref: <https://www.rfc-editor.org/rfc/rfc4880.html#section-4.3>
#[derive(Debug, PartialEq, Eq, Clone, Copy, FromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Tag {
    /// Signature Packet
    Signature = 2,
    /// One-Pass Signature Packet
    OnePassSignature = 4,
    /// Compressed Data Packet
    CompressedData = 8,
    /// Symmetrically Encrypted Data Packet (legacy, no integrity protection)
    SymEncryptedData = 9,
    /// Literal Data Packet
    Literal = 11,
    /// Symmetrically Encrypted Integrity Protected Data Packet
    SymEncryptedProtectedData = 18,
    /// Modification Detection Code Packet
    ModDetectionCode = 19,

    #[num_enum(catch_all)]
    Other(u8),
}

/// Writes a new-style packet header with a definite length.
pub fn write_packet_header<W: io::Write>(writer: &mut W, tag: Tag, len: usize) -> Result<()> {
    writer.write_u8(0b1100_0000 | u8::from(tag))?;

    match len {
        0..=191 => {
            writer.write_u8(len as u8)?;
        }
        192..=8383 => {
            let v = len - 192;
            writer.write_u8((v >> 8) as u8 + 192)?;
            writer.write_u8((v & 0xFF) as u8)?;
        }
        _ => {
            writer.write_u8(255)?;
            writer.write_u32::<BigEndian>(u32::try_from(len).map_err(|_| {
                malformed!("packet body of {} octets does not fit a five octet length", len)
            })?)?;
        }
    }

    Ok(())
}

/// Iterates over the packets of a byte buffer, yielding tag and body.
///
/// Handles both old and new style headers, including partial body lengths
/// (chunks are concatenated) and old style indeterminate lengths.
pub struct PacketParser<'a> {
    input: &'a [u8],
}

impl<'a> PacketParser<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        PacketParser { input }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.input.len() < n {
            return Err(malformed!("packet truncated, {} octets missing", n - self.input.len()));
        }
        let (head, rest) = self.input.split_at(n);
        self.input = rest;
        Ok(head)
    }

    fn read_u8(&mut self) -> Result<u8> {
        Ok((&mut self.input)
            .read_u8()
            .map_err(|_| malformed!("packet header truncated"))?)
    }

    /// Reads a new-style length specifier, returning the chunk size and
    /// whether it is a partial body length.
    fn read_new_length(&mut self) -> Result<(usize, bool)> {
        let olen = self.read_u8()?;
        match olen {
            // One-Octet Lengths
            0..=191 => Ok((olen as usize, false)),
            // Two-Octet Lengths
            192..=223 => {
                let a = self.read_u8()?;
                Ok((((olen as usize - 192) << 8) + 192 + a as usize, false))
            }
            // Partial Body Lengths
            224..=254 => Ok((1 << (olen as usize & 0x1F), true)),
            // Five-Octet Lengths
            255 => {
                let len = (&mut self.input)
                    .read_u32::<BigEndian>()
                    .map_err(|_| malformed!("packet header truncated"))?;
                Ok((len as usize, false))
            }
        }
    }

    fn next_packet(&mut self) -> Result<(Tag, Vec<u8>)> {
        let header = self.read_u8()?;

        let first_two_bits = header & 0b1100_0000;
        match first_two_bits {
            0b1100_0000 => {
                // new format, tag in the low six bits
                let tag = Tag::from(header & 0b0011_1111);
                let (len, partial) = self.read_new_length()?;
                let mut body = self.take(len)?.to_vec();

                // partial chunks are followed by more length specifiers,
                // ending with a definite one
                let mut more = partial;
                while more {
                    let (len, partial) = self.read_new_length()?;
                    body.extend_from_slice(self.take(len)?);
                    more = partial;
                }

                Ok((tag, body))
            }
            0b1000_0000 => {
                // old format, tag in bits 2..5, length type in bits 0..1
                let tag = Tag::from((header & 0b0011_1100) >> 2);
                let body = match header & 0b0000_0011 {
                    0 => {
                        let len = self.read_u8()? as usize;
                        self.take(len)?.to_vec()
                    }
                    1 => {
                        let len = (&mut self.input)
                            .read_u16::<BigEndian>()
                            .map_err(|_| malformed!("packet header truncated"))?
                            as usize;
                        self.take(len)?.to_vec()
                    }
                    2 => {
                        let len = (&mut self.input)
                            .read_u32::<BigEndian>()
                            .map_err(|_| malformed!("packet header truncated"))?
                            as usize;
                        self.take(len)?.to_vec()
                    }
                    3 => {
                        // indeterminate, extends to the end of the input
                        let rest = self.input;
                        self.input = &[];
                        rest.to_vec()
                    }
                    _ => unreachable!("old packet length type is only 2 bits"),
                };

                Ok((tag, body))
            }
            _ => Err(malformed!("unknown packet header version {:#b}", header)),
        }
    }
}

impl Iterator for PacketParser<'_> {
    type Item = Result<(Tag, Vec<u8>)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.input.is_empty() {
            return None;
        }

        Some(self.next_packet())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn header_roundtrip_short() {
        let mut buf = Vec::new();
        write_packet_header(&mut buf, Tag::Literal, 5).unwrap();
        buf.extend_from_slice(b"hello");

        let mut parser = PacketParser::new(&buf);
        let (tag, body) = parser.next().unwrap().unwrap();
        assert_eq!(tag, Tag::Literal);
        assert_eq!(body, b"hello");
        assert!(parser.next().is_none());
    }

    #[test]
    fn header_roundtrip_two_octet() {
        let body = vec![0xAB; 1000];
        let mut buf = Vec::new();
        write_packet_header(&mut buf, Tag::CompressedData, body.len()).unwrap();
        buf.extend_from_slice(&body);

        let (tag, parsed) = PacketParser::new(&buf).next().unwrap().unwrap();
        assert_eq!(tag, Tag::CompressedData);
        assert_eq!(parsed, body);
    }

    #[test]
    fn header_roundtrip_five_octet() {
        let body = vec![0x01; 10_000];
        let mut buf = Vec::new();
        write_packet_header(&mut buf, Tag::SymEncryptedProtectedData, body.len()).unwrap();
        buf.extend_from_slice(&body);

        let (tag, parsed) = PacketParser::new(&buf).next().unwrap().unwrap();
        assert_eq!(tag, Tag::SymEncryptedProtectedData);
        assert_eq!(parsed, body);
    }

    #[test]
    fn partial_lengths_are_concatenated() {
        // 512 byte partial chunk (0xE9 = 224 | 9), then a definite 3 byte rest
        let mut buf = vec![0b1100_0000 | 11, 0xE9];
        buf.extend_from_slice(&[0x55; 512]);
        buf.push(3);
        buf.extend_from_slice(b"end");

        let (tag, body) = PacketParser::new(&buf).next().unwrap().unwrap();
        assert_eq!(tag, Tag::Literal);
        assert_eq!(body.len(), 515);
        assert_eq!(&body[512..], b"end");
    }

    #[test]
    fn truncated_input_is_malformed() {
        let buf = vec![0b1100_0000 | 11, 10, 1, 2];
        assert!(PacketParser::new(&buf).next().unwrap().is_err());
    }
}
