//! # Serialize trait module

use std::io;

use crate::errors::Result;

pub trait Serialize {
    fn to_writer<W: io::Write>(&self, _: &mut W) -> Result<()>;

    fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.to_writer(&mut buf)?;

        Ok(buf)
    }
}

impl<T: Serialize> Serialize for &T {
    fn to_writer<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        (*self).to_writer(writer)
    }
}

/// Current unix time, clamped into the u32 range used by OpenPGP packets.
pub(crate) fn now_u32() -> u32 {
    let secs = chrono::Utc::now().timestamp();
    u32::try_from(secs).unwrap_or(u32::MAX)
}
