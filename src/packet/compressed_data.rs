use std::io::{self, Read, Write};

use flate2::read::{DeflateDecoder, ZlibDecoder};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use num_enum::{FromPrimitive, IntoPrimitive};

use crate::errors::Result;
use crate::malformed;
use crate::ser::Serialize;
use crate::unsupported_err;

/// Available compression algorithms.
/// Ref: <https://www.rfc-editor.org/rfc/rfc4880.html#section-9.3>
#[derive(Debug, PartialEq, Eq, Clone, Copy, FromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum CompressionAlgorithm {
    Uncompressed = 0,
    ZIP = 1,
    ZLIB = 2,
    BZip2 = 3,

    #[num_enum(catch_all)]
    Other(u8),
}

/// Compressed Data Packet
/// <https://www.rfc-editor.org/rfc/rfc4880.html#section-5.6>
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedData {
    compression_algorithm: CompressionAlgorithm,
    compressed_data: Vec<u8>,
}

impl CompressedData {
    /// Compress the given packet bytes. ZLIB at the fixed default level is
    /// the only algorithm produced.
    pub fn compress(data: &[u8]) -> Result<Self> {
        let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
        enc.write_all(data)?;
        let compressed_data = enc.finish()?;

        Ok(CompressedData {
            compression_algorithm: CompressionAlgorithm::ZLIB,
            compressed_data,
        })
    }

    /// Parses a `CompressedData` packet from the given slice.
    pub fn from_slice(input: &[u8]) -> Result<Self> {
        if input.len() < 2 {
            return Err(malformed!("compressed packet too short"));
        }

        Ok(CompressedData {
            compression_algorithm: CompressionAlgorithm::from(input[0]),
            compressed_data: input[1..].to_vec(),
        })
    }

    pub fn algorithm(&self) -> CompressionAlgorithm {
        self.compression_algorithm
    }

    /// Undo the compression, yielding the contained packet bytes.
    pub fn decompress(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        match self.compression_algorithm {
            CompressionAlgorithm::Uncompressed => {
                out.extend_from_slice(&self.compressed_data);
            }
            CompressionAlgorithm::ZIP => {
                DeflateDecoder::new(&self.compressed_data[..])
                    .read_to_end(&mut out)
                    .map_err(|_| malformed!("invalid zip compressed data"))?;
            }
            CompressionAlgorithm::ZLIB => {
                ZlibDecoder::new(&self.compressed_data[..])
                    .read_to_end(&mut out)
                    .map_err(|_| malformed!("invalid zlib compressed data"))?;
            }
            CompressionAlgorithm::BZip2 | CompressionAlgorithm::Other(_) => {
                unsupported_err!(
                    "compression algorithm {}",
                    u8::from(self.compression_algorithm)
                )
            }
        }

        Ok(out)
    }
}

impl Serialize for CompressedData {
    fn to_writer<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&[u8::from(self.compression_algorithm)])?;
        writer.write_all(&self.compressed_data)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn zlib_roundtrip() {
        let data = b"some packet bytes, repeated enough to compress compress compress";
        let packet = CompressedData::compress(data).unwrap();
        assert_eq!(packet.algorithm(), CompressionAlgorithm::ZLIB);

        let bytes = packet.to_bytes().unwrap();
        let parsed = CompressedData::from_slice(&bytes).unwrap();
        assert_eq!(parsed.decompress().unwrap(), data);
    }

    #[test]
    fn bzip2_is_unsupported() {
        let packet = CompressedData {
            compression_algorithm: CompressionAlgorithm::BZip2,
            compressed_data: vec![1, 2, 3],
        };
        assert!(packet.decompress().is_err());
    }
}
