use crate::armor;
use crate::composed::keyring::KeyRing;
use crate::composed::message::evaluate_signature;
use crate::composed::plain_message::PlainMessage;
use crate::composed::verification::SignatureStatus;
use crate::crypto::hash::HashAlgorithm;
use crate::errors::{Error, Result};
use crate::malformed;
use crate::packet::{self, Packet, Signature, SignatureType, Tag};
use crate::ser::now_u32;

/// A detached signature, serialized as a lone signature packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandaloneSignature {
    signature: Signature,
}

impl StandaloneSignature {
    pub fn new(signature: Signature) -> Self {
        StandaloneSignature { signature }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        packet::write_packet(&mut out, Tag::Signature, &self.signature)?;

        Ok(out)
    }

    pub fn from_bytes(input: &[u8]) -> Result<Self> {
        let packets = packet::parse_packets(input)?;
        let signature = packets
            .into_iter()
            .find_map(|p| match p {
                Packet::Signature(sig) => Some(sig),
                _ => None,
            })
            .ok_or_else(|| malformed!("no signature packet in input"))?;

        Ok(StandaloneSignature { signature })
    }

    pub fn to_armored_string(&self) -> Result<String> {
        armor::encode(armor::BlockType::Signature, &self.to_bytes()?)
    }

    pub fn from_armored(input: &str) -> Result<Self> {
        Self::from_bytes(&armor::decode(input, armor::BlockType::Signature)?)
    }
}

impl KeyRing {
    /// Creates a detached signature over `message` with the first signing
    /// capable key. Text messages get a text signature, so verification is
    /// line-ending agnostic.
    pub fn sign_detached(&self, message: &PlainMessage) -> Result<StandaloneSignature> {
        let signer = self.signing_key()?;
        let key = signer
            .secret_key()
            .ok_or_else(|| malformed!("signing key lost its secret half"))?;

        let typ = if message.is_text() {
            SignatureType::Text
        } else {
            SignatureType::Binary
        };

        let signature = Signature::sign(
            key,
            typ,
            HashAlgorithm::Sha256,
            now_u32(),
            signer.key_id(),
            message.data(),
        )?;

        Ok(StandaloneSignature::new(signature))
    }

    /// Verifies a detached signature over `message` against this ring.
    ///
    /// Any outcome other than a valid signature is reported as
    /// [`Error::InvalidSignature`] carrying the precise status.
    pub fn verify_detached(
        &self,
        message: &PlainMessage,
        signature: &StandaloneSignature,
        verify_time: i64,
    ) -> Result<()> {
        let status = evaluate_signature(
            Some(signature.signature()),
            message.data(),
            self,
            verify_time,
        );

        match status {
            SignatureStatus::Ok => Ok(()),
            status => Err(Error::InvalidSignature { status }),
        }
    }
}
