use std::collections::VecDeque;

use log::debug;
use rand::{CryptoRng, Rng};

use crate::composed::keyring::KeyRing;
use crate::composed::plain_message::PlainMessage;
use crate::composed::verification::{in_time_window, DecryptedMessage, SignatureStatus};
use crate::crypto::hash::HashAlgorithm;
use crate::crypto::public_key::PublicKeyAlgorithm;
use crate::crypto::sym::SymmetricKeyAlgorithm;
use crate::errors::Result;
use crate::malformed;
use crate::packet::{
    self, CompressedData, LiteralData, OnePassSignature, Packet, Signature, SignatureType,
    SymEncryptedData, SymEncryptedProtectedData, Tag,
};
use crate::ser::now_u32;

/// An encrypted data layer: integrity protected (the only form produced),
/// or the legacy unprotected form, accepted on decrypt only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edata {
    Protected(SymEncryptedProtectedData),
    Legacy(SymEncryptedData),
}

impl Edata {
    fn decrypt(&self, alg: SymmetricKeyAlgorithm, key: &[u8]) -> Result<Vec<u8>> {
        match self {
            Edata::Protected(p) => p.decrypt(alg, key),
            Edata::Legacy(p) => {
                debug!("decrypting legacy packet without integrity protection");
                p.decrypt(alg, key)
            }
        }
    }
}

/// A parsed message: the structure of RFC 4880 section 11.3, built from a
/// packet sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Literal(LiteralData),
    Compressed(CompressedData),
    Signed {
        /// The message the signature applies to. Optional, so a trailing
        /// signature with a missing body still parses.
        message: Option<Box<Message>>,
        one_pass_signature: Option<OnePassSignature>,
        signature: Signature,
    },
    Encrypted(Edata),
}

impl Message {
    /// Parses a message from raw packet bytes.
    pub fn from_bytes(input: &[u8]) -> Result<Message> {
        let packets = packet::parse_packets(input)?;
        Self::from_packets(packets.into())
    }

    fn from_packets(mut packets: VecDeque<Packet>) -> Result<Message> {
        let first = packets
            .pop_front()
            .ok_or_else(|| malformed!("empty message"))?;

        match first {
            Packet::Literal(lit) => Ok(Message::Literal(lit)),
            Packet::CompressedData(data) => Ok(Message::Compressed(data)),
            Packet::SymEncryptedProtectedData(p) => Ok(Message::Encrypted(Edata::Protected(p))),
            Packet::SymEncryptedData(p) => Ok(Message::Encrypted(Edata::Legacy(p))),
            Packet::OnePassSignature(ops) => {
                // the matching signature packet comes after the signed body
                let signature = match packets.pop_back() {
                    Some(Packet::Signature(sig)) => sig,
                    _ => return Err(malformed!("one pass signature without signature packet")),
                };
                let message = if packets.is_empty() {
                    None
                } else {
                    Some(Box::new(Self::from_packets(packets)?))
                };

                Ok(Message::Signed {
                    message,
                    one_pass_signature: Some(ops),
                    signature,
                })
            }
            Packet::Signature(signature) => {
                let message = if packets.is_empty() {
                    None
                } else {
                    Some(Box::new(Self::from_packets(packets)?))
                };

                Ok(Message::Signed {
                    message,
                    one_pass_signature: None,
                    signature,
                })
            }
        }
    }

    /// Expands a compressed layer, leaving other messages untouched.
    pub fn decompress(self) -> Result<Message> {
        match self {
            Message::Compressed(data) => Message::from_bytes(&data.decompress()?),
            Message::Signed {
                message,
                one_pass_signature,
                signature,
            } => {
                let message = match message {
                    Some(inner) => Some(Box::new(inner.decompress()?)),
                    None => None,
                };
                Ok(Message::Signed {
                    message,
                    one_pass_signature,
                    signature,
                })
            }
            other => Ok(other),
        }
    }

    /// The literal data layer, if this message contains one.
    pub fn literal(&self) -> Option<&LiteralData> {
        match self {
            Message::Literal(lit) => Some(lit),
            Message::Signed { message, .. } => message.as_ref().and_then(|m| m.literal()),
            Message::Compressed(_) | Message::Encrypted(_) => None,
        }
    }

    /// The outermost signature, if this message carries one.
    pub fn signature(&self) -> Option<&Signature> {
        match self {
            Message::Signed { signature, .. } => Some(signature),
            _ => None,
        }
    }

    pub fn is_encrypted(&self) -> bool {
        matches!(self, Message::Encrypted(_))
    }
}

/// Builds the packet bytes for a signed literal message: one-pass
/// signature, literal data, signature.
fn sign_literal(plain: &PlainMessage, ring: &KeyRing) -> Result<Vec<u8>> {
    let signer = ring.signing_key()?;
    let key = signer
        .secret_key()
        .ok_or_else(|| malformed!("signing key lost its secret half"))?;

    let literal = plain.to_literal();
    let sig = Signature::sign(
        key,
        SignatureType::Binary,
        HashAlgorithm::Sha256,
        now_u32(),
        signer.key_id(),
        literal.data(),
    )?;
    let ops = OnePassSignature::new(
        SignatureType::Binary,
        HashAlgorithm::Sha256,
        PublicKeyAlgorithm::EdDSALegacy,
        signer.key_id(),
    );

    let mut out = Vec::new();
    packet::write_packet(&mut out, Tag::OnePassSignature, &ops)?;
    packet::write_packet(&mut out, Tag::Literal, &literal)?;
    packet::write_packet(&mut out, Tag::Signature, &sig)?;

    Ok(out)
}

/// Encrypts `plain` under the given session key, optionally signing with
/// the first secret key of `sign_ring` and compressing the inner packets.
/// Returns the serialized encrypted packet.
pub(crate) fn encrypt_with_rng<R: CryptoRng + Rng>(
    mut rng: R,
    alg: SymmetricKeyAlgorithm,
    session_key: &[u8],
    plain: &PlainMessage,
    sign_ring: Option<&KeyRing>,
    compress: bool,
) -> Result<Vec<u8>> {
    let mut inner = match sign_ring {
        Some(ring) => sign_literal(plain, ring)?,
        None => {
            let mut out = Vec::new();
            packet::write_packet(&mut out, Tag::Literal, &plain.to_literal())?;
            out
        }
    };

    if compress {
        let compressed = CompressedData::compress(&inner)?;
        inner.clear();
        packet::write_packet(&mut inner, Tag::CompressedData, &compressed)?;
    }

    let edata = SymEncryptedProtectedData::encrypt_with_rng(&mut rng, alg, session_key, &inner)?;

    let mut out = Vec::new();
    packet::write_packet(&mut out, Tag::SymEncryptedProtectedData, &edata)?;

    Ok(out)
}

/// Decrypts an encrypted message and evaluates its signature, if any,
/// against `verify_ring`.
pub(crate) fn decrypt(
    alg: SymmetricKeyAlgorithm,
    session_key: &[u8],
    input: &[u8],
    verify_ring: Option<&KeyRing>,
    verify_time: i64,
) -> Result<DecryptedMessage> {
    let message = Message::from_bytes(input)?;
    let edata = match message {
        Message::Encrypted(edata) => edata,
        _ => return Err(malformed!("message is not encrypted")),
    };

    let inner = Message::from_bytes(&edata.decrypt(alg, session_key)?)?.decompress()?;

    let literal = inner
        .literal()
        .cloned()
        .ok_or_else(|| malformed!("decrypted message contains no literal data"))?;

    let status = match verify_ring {
        None => SignatureStatus::NotSigned,
        Some(ring) => evaluate_signature(inner.signature(), literal.data(), ring, verify_time),
    };

    Ok(DecryptedMessage {
        message: PlainMessage::from_literal(literal),
        status,
    })
}

/// Maps a signature and the available keys onto a verification status.
/// Never fails; every failure mode is a status.
pub(crate) fn evaluate_signature(
    signature: Option<&Signature>,
    data: &[u8],
    ring: &KeyRing,
    verify_time: i64,
) -> SignatureStatus {
    let sig = match signature {
        Some(sig) => sig,
        None => return SignatureStatus::NotSigned,
    };

    let issuer = match sig.issuer() {
        Some(issuer) => issuer,
        None => return SignatureStatus::NoVerifier,
    };
    let key = match ring.key_by_id(&issuer) {
        Some(key) => key,
        None => {
            debug!("no key in ring for issuer {}", issuer);
            return SignatureStatus::NoVerifier;
        }
    };

    if !in_time_window(sig.created(), verify_time) {
        return SignatureStatus::Failed;
    }

    match sig.verify(key.public_key(), data) {
        Ok(()) => SignatureStatus::Ok,
        Err(_) => SignatureStatus::Failed,
    }
}
