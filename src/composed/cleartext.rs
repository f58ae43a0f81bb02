//! Cleartext signature framework: readable text plus an armored signature
//! in one document.
//! <https://www.rfc-editor.org/rfc/rfc4880.html#section-7>

use crate::composed::keyring::KeyRing;
use crate::composed::plain_message::PlainMessage;
use crate::composed::signature::StandaloneSignature;
use crate::errors::{Error, Result};
use crate::normalize_lines::{canonicalize_and_trim, LineBreak};

const MESSAGE_BEGIN: &str = "-----BEGIN PGP SIGNED MESSAGE-----";
const SIGNATURE_BEGIN: &str = "-----BEGIN PGP SIGNATURE-----";

/// A cleartext signed message: the canonical text together with a text
/// mode signature over it.
///
/// The text is held with line feeds and without trailing whitespace per
/// line, the form also returned from verification. The text signature
/// hashes the CRLF form, so documents re-wrapped by transports that
/// rewrite line endings keep verifying.
#[derive(Debug, Clone)]
pub struct CleartextSignedMessage {
    text: String,
    signature: StandaloneSignature,
}

impl CleartextSignedMessage {
    /// Signs `text` with the first signing capable key of `ring`.
    pub fn sign(ring: &KeyRing, text: &str) -> Result<Self> {
        let text = canonicalize_and_trim(text, LineBreak::Lf);
        let signature = ring.sign_detached(&PlainMessage::from_string(&text))?;

        Ok(CleartextSignedMessage { text, signature })
    }

    /// The canonical signed text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn signature(&self) -> &StandaloneSignature {
        &self.signature
    }

    /// Verifies the contained signature against `ring` and returns the
    /// canonical text.
    pub fn verify(&self, ring: &KeyRing, verify_time: i64) -> Result<String> {
        let canonical = canonicalize_and_trim(&self.text, LineBreak::Lf);
        ring.verify_detached(
            &PlainMessage::from_string(&canonical),
            &self.signature,
            verify_time,
        )?;

        Ok(canonical)
    }

    /// The full cleartext framework document.
    pub fn to_armored_string(&self) -> Result<String> {
        let mut out = String::new();
        out.push_str(MESSAGE_BEGIN);
        out.push_str("\nHash: ");
        out.push_str(self.signature.signature().hash_alg().name());
        out.push_str("\n\n");

        for (i, line) in self.text.split('\n').enumerate() {
            if i > 0 {
                out.push('\n');
            }
            // dash escape, so text lines can never look like armor markers
            if line.starts_with('-') {
                out.push_str("- ");
            }
            out.push_str(line);
        }
        out.push('\n');

        out.push_str(&self.signature.to_armored_string()?);

        Ok(out)
    }

    /// Parses a cleartext framework document.
    pub fn from_armored(input: &str) -> Result<Self> {
        let rest = match input.find(MESSAGE_BEGIN) {
            Some(pos) => &input[pos + MESSAGE_BEGIN.len()..],
            None => return Err(Error::InvalidArmorWrappers),
        };

        let sig_pos = rest.find(SIGNATURE_BEGIN).ok_or(Error::InvalidArmorWrappers)?;
        let (head, armored_sig) = rest.split_at(sig_pos);

        // hash headers run until the first blank line
        let body = match head.find("\n\n") {
            Some(pos) => &head[pos + 2..],
            None => return Err(Error::InvalidArmorWrappers),
        };

        // the newline before the signature marker separates, it is not text
        let body = body.strip_suffix('\n').unwrap_or(body);

        let text: String = body
            .split('\n')
            .map(|line| line.strip_prefix("- ").unwrap_or(line))
            .collect::<Vec<_>>()
            .join("\n");

        let signature = StandaloneSignature::from_armored(armored_sig)?;

        Ok(CleartextSignedMessage { text, signature })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::composed::keyring::Key;

    #[test]
    fn sign_serialize_parse_verify() {
        let ring = KeyRing::new(Key::generate());

        let msg = CleartextSignedMessage::sign(&ring, "  Signed message\n  \n  ").unwrap();
        assert_eq!(msg.text(), "  Signed message\n\n");

        let armored = msg.to_armored_string().unwrap();
        assert!(armored.starts_with(MESSAGE_BEGIN));
        assert!(armored.contains("Hash: SHA256"));

        let parsed = CleartextSignedMessage::from_armored(&armored).unwrap();
        let text = parsed.verify(&ring, 0).unwrap();
        assert_eq!(text, "  Signed message\n\n");
    }

    #[test]
    fn dash_escaping() {
        let ring = KeyRing::new(Key::generate());

        let msg = CleartextSignedMessage::sign(&ring, "--- begin\n- item\nplain").unwrap();
        let armored = msg.to_armored_string().unwrap();
        assert!(armored.contains("\n- --- begin\n"));
        assert!(armored.contains("\n- - item\n"));

        let parsed = CleartextSignedMessage::from_armored(&armored).unwrap();
        assert_eq!(parsed.verify(&ring, 0).unwrap(), "--- begin\n- item\nplain");
    }

    #[test]
    fn missing_markers() {
        assert!(matches!(
            CleartextSignedMessage::from_armored("just text"),
            Err(Error::InvalidArmorWrappers)
        ));
    }
}
