//! ASCII armor for binary packet data: base64 body wrapped in begin and
//! end markers, with a CRC-24 checksum line.
//! <https://www.rfc-editor.org/rfc/rfc4880.html#section-6>

use std::fmt;
use std::io::Write;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::errors::{Error, Result};
use crate::malformed;

/// Characters per base64 line in the armored body.
const LINE_LENGTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    Message,
    Signature,
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockType::Message => write!(f, "MESSAGE"),
            BlockType::Signature => write!(f, "SIGNATURE"),
        }
    }
}

/// The low three octets of the CRC-24, big endian.
fn crc24_bytes(data: &[u8]) -> Vec<u8> {
    crc24::hash_raw(data).to_be_bytes()[1..].to_vec()
}

/// Writes the armored form of `data` to the given writer.
pub fn write<W: Write>(writer: &mut W, typ: BlockType, data: &[u8]) -> Result<()> {
    writeln!(writer, "-----BEGIN PGP {}-----", typ)?;
    writeln!(writer)?;

    let encoded = BASE64.encode(data);
    for chunk in encoded.as_bytes().chunks(LINE_LENGTH) {
        writer.write_all(chunk)?;
        writer.write_all(b"\n")?;
    }

    writeln!(writer, "={}", BASE64.encode(crc24_bytes(data)))?;
    writeln!(writer, "-----END PGP {}-----", typ)?;

    Ok(())
}

/// The armored form of `data` as a string.
pub fn encode(typ: BlockType, data: &[u8]) -> Result<String> {
    let mut out = Vec::new();
    write(&mut out, typ, data)?;

    // the writer only produces ascii
    String::from_utf8(out).map_err(|e| malformed!("armor is not utf8: {}", e))
}

/// Decodes an armored block of the given type, verifying the checksum
/// when one is present.
pub fn decode(input: &str, typ: BlockType) -> Result<Vec<u8>> {
    let begin = format!("-----BEGIN PGP {}-----", typ);
    let end = format!("-----END PGP {}-----", typ);

    let mut lines = input.lines();

    // skip leading garbage up to the begin marker
    if !lines.any(|line| line.trim_end() == begin) {
        return Err(Error::InvalidArmorWrappers);
    }

    let mut body = String::new();
    let mut checksum = None;
    let mut in_headers = true;
    let mut terminated = false;

    for line in lines.by_ref() {
        let line = line.trim_end();

        if in_headers {
            // armor headers (Version, Comment, ...) run until a blank line;
            // a body without headers starts right away
            if line.is_empty() {
                in_headers = false;
                continue;
            }
            if line.contains(": ") {
                continue;
            }
            in_headers = false;
        }

        if line == end {
            terminated = true;
            break;
        }
        if let Some(sum) = line.strip_prefix('=') {
            checksum = Some(sum.to_string());
            continue;
        }
        if line.is_empty() {
            continue;
        }

        body.push_str(line);
    }

    if !terminated {
        return Err(Error::InvalidArmorWrappers);
    }

    let data = BASE64.decode(body.as_bytes())?;

    if let Some(sum) = checksum {
        let expected = BASE64.decode(sum.as_bytes())?;
        if expected != crc24_bytes(&data) {
            return Err(Error::InvalidChecksum);
        }
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn roundtrip() {
        let data: Vec<u8> = (0u8..200).collect();
        let armored = encode(BlockType::Signature, &data).unwrap();

        assert!(armored.starts_with("-----BEGIN PGP SIGNATURE-----\n"));
        assert!(armored.ends_with("-----END PGP SIGNATURE-----\n"));
        // body lines stay within the wrap width
        assert!(armored.lines().all(|l| l.len() <= LINE_LENGTH));

        assert_eq!(decode(&armored, BlockType::Signature).unwrap(), data);
    }

    #[test]
    fn rejects_missing_wrappers() {
        assert!(matches!(
            decode("no armor here", BlockType::Signature),
            Err(Error::InvalidArmorWrappers)
        ));

        let truncated = "-----BEGIN PGP SIGNATURE-----\n\nAAAA\n";
        assert!(matches!(
            decode(truncated, BlockType::Signature),
            Err(Error::InvalidArmorWrappers)
        ));
    }

    #[test]
    fn rejects_bad_checksum() {
        let body = BASE64.encode(b"hello world");
        let armored = format!(
            "-----BEGIN PGP SIGNATURE-----\n\n{}\n=AAAA\n-----END PGP SIGNATURE-----\n",
            body
        );

        assert!(matches!(
            decode(&armored, BlockType::Signature),
            Err(Error::InvalidChecksum)
        ));
    }

    #[test]
    fn tolerates_headers() {
        let data = b"payload".to_vec();
        let plain = encode(BlockType::Message, &data).unwrap();
        let with_headers = plain.replace(
            "-----BEGIN PGP MESSAGE-----\n",
            "-----BEGIN PGP MESSAGE-----\nVersion: test\nComment: armored\n",
        );

        assert_eq!(decode(&with_headers, BlockType::Message).unwrap(), data);
    }
}
