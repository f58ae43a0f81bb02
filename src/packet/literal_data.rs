use std::io::{self, Read};
use std::str;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::errors::Result;
use crate::malformed;
use crate::ser::Serialize;

/// Literal Data Packet
/// <https://www.rfc-editor.org/rfc/rfc4880.html#section-5.9>
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralData {
    mode: DataMode,
    file_name: String,
    /// Modification time as seconds since the epoch, 0 when absent.
    created: u32,
    data: Vec<u8>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum DataMode {
    Binary = b'b',
    Text = b't',
    Utf8 = b'u',
}

impl LiteralData {
    pub fn new(mode: DataMode, file_name: &str, created: u32, data: Vec<u8>) -> Self {
        LiteralData {
            mode,
            file_name: file_name.to_string(),
            created,
            data,
        }
    }

    /// Parses a `LiteralData` packet from the given slice.
    pub fn from_slice(input: &[u8]) -> Result<Self> {
        let mut r = input;

        let mode = match r.read_u8().map_err(|_| malformed!("empty literal packet"))? {
            b'b' => DataMode::Binary,
            b't' => DataMode::Text,
            b'u' => DataMode::Utf8,
            other => return Err(malformed!("unknown literal data mode {:#x}", other)),
        };

        let name_len = r
            .read_u8()
            .map_err(|_| malformed!("literal packet truncated"))? as usize;
        if r.len() < name_len + 4 {
            return Err(malformed!("literal packet truncated"));
        }
        let file_name = str::from_utf8(&r[..name_len])?.to_string();
        r = &r[name_len..];

        let created = r
            .read_u32::<BigEndian>()
            .map_err(|_| malformed!("literal packet truncated"))?;

        let mut data = Vec::with_capacity(r.len());
        r.read_to_end(&mut data)?;

        Ok(LiteralData {
            mode,
            file_name,
            created,
            data,
        })
    }

    pub fn mode(&self) -> DataMode {
        self.mode
    }

    pub fn is_binary(&self) -> bool {
        self.mode == DataMode::Binary
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn created(&self) -> u32 {
        self.created
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

impl Serialize for LiteralData {
    fn to_writer<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        crate::ensure!(
            self.file_name.len() <= 255,
            "literal data file name is limited to 255 octets"
        );

        writer.write_u8(self.mode as u8)?;
        writer.write_u8(self.file_name.len() as u8)?;
        writer.write_all(self.file_name.as_bytes())?;
        writer.write_u32::<BigEndian>(self.created)?;
        writer.write_all(&self.data)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn roundtrip() {
        let lit = LiteralData::new(DataMode::Utf8, "note.txt", 1600000000, b"hello".to_vec());
        let bytes = lit.to_bytes().unwrap();
        let parsed = LiteralData::from_slice(&bytes).unwrap();
        assert_eq!(parsed, lit);
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(LiteralData::from_slice(&[b'x', 0, 0, 0, 0, 0]).is_err());
    }
}
