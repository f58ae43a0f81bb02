use std::fmt;
use std::io::{self, Read};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::errors::Result;
use crate::malformed;
use crate::ser::Serialize;

/// Represents an owned multi precision integer.
///
/// Stored without leading zero octets; the serialized form carries the bit
/// length followed by the big endian octets, per RFC 4880 section 3.2.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Mpi(Vec<u8>);

impl Mpi {
    /// Strips leading zeros and wraps the remaining octets.
    pub fn from_slice(raw: &[u8]) -> Self {
        let offset = raw.iter().position(|&b| b != 0).unwrap_or(raw.len());
        Mpi(raw[offset..].to_vec())
    }

    /// Reads a single MPI from the given reader.
    pub fn from_reader<R: Read>(r: &mut R) -> Result<Self> {
        let bits = r.read_u16::<BigEndian>()? as usize;
        let len = (bits + 7) / 8;
        let mut body = vec![0u8; len];
        r.read_exact(&mut body)
            .map_err(|_| malformed!("mpi body of {} octets missing", len))?;

        Ok(Mpi(body))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The value left padded with zeros to `size` octets, for fixed width
    /// signature halves.
    pub fn to_padded(&self, size: usize) -> Result<Vec<u8>> {
        if self.0.len() > size {
            return Err(malformed!("mpi larger than {} octets", size));
        }
        let mut out = vec![0u8; size - self.0.len()];
        out.extend_from_slice(&self.0);
        Ok(out)
    }

    pub(crate) fn bit_len(&self) -> u16 {
        match self.0.first() {
            None => 0,
            Some(&first) => ((self.0.len() - 1) * 8 + (8 - first.leading_zeros() as usize)) as u16,
        }
    }
}

impl Serialize for Mpi {
    fn to_writer<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u16::<BigEndian>(self.bit_len())?;
        writer.write_all(&self.0)?;
        Ok(())
    }
}

impl fmt::Debug for Mpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mpi({})", hex::encode(&self.0))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn roundtrip_strips_leading_zeros() {
        let mpi = Mpi::from_slice(&[0x00, 0x01, 0xff]);
        assert_eq!(mpi.as_bytes(), &[0x01, 0xff]);

        let bytes = mpi.to_bytes().unwrap();
        assert_eq!(bytes, vec![0x00, 0x09, 0x01, 0xff]);

        let back = Mpi::from_reader(&mut &bytes[..]).unwrap();
        assert_eq!(back, mpi);
    }

    #[test]
    fn padding() {
        let mpi = Mpi::from_slice(&[0x01, 0xff]);
        assert_eq!(mpi.to_padded(4).unwrap(), vec![0x00, 0x00, 0x01, 0xff]);
    }
}
