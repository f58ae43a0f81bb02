//! OpenPGP message processing: symmetric encryption under explicit
//! session keys, embedded and detached Ed25519 signatures, and the
//! cleartext signature framework.
//!
//! Key material is handed in ready to use via [`composed::KeyRing`];
//! parsing and unlocking of long-term key storage is out of scope. All
//! values are immutable after construction, so they can be shared across
//! threads freely.
//!
//! ```rust
//! use pgp_core::composed::{Key, KeyRing, PlainMessage, SessionKey, SignatureStatus};
//!
//! # fn main() -> pgp_core::errors::Result<()> {
//! let ring = KeyRing::new(Key::generate());
//! let session_key = SessionKey::generate_default()?;
//!
//! let encrypted = session_key.encrypt_and_sign(&PlainMessage::from_string("hello"), &ring)?;
//!
//! let decrypted = session_key.decrypt_and_verify(&encrypted, Some(&ring), 0)?;
//! assert_eq!(decrypted.status, SignatureStatus::Ok);
//! assert_eq!(decrypted.message.as_string(), "hello");
//! # Ok(())
//! # }
//! ```

#![deny(clippy::unwrap_used)]
#![warn(rust_2018_idioms)]

#[macro_use]
pub mod errors;

pub mod armor;
pub mod composed;
pub mod crypto;
pub mod helper;
pub mod normalize_lines;
pub mod packet;
pub mod ser;
pub mod types;

pub use crate::composed::{
    CleartextSignedMessage, DecryptedMessage, Key, KeyRing, PlainMessage, SessionKey,
    SignatureStatus, StandaloneSignature,
};
pub use crate::errors::{Error, Result};
