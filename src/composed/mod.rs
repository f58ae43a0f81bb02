mod cleartext;
mod keyring;
mod message;
mod plain_message;
mod session_key;
mod signature;
mod verification;

pub use self::cleartext::CleartextSignedMessage;
pub use self::keyring::{Key, KeyRing};
pub use self::message::{Edata, Message};
pub use self::plain_message::PlainMessage;
pub use self::session_key::SessionKey;
pub use self::signature::StandaloneSignature;
pub use self::verification::{DecryptedMessage, SignatureStatus, CREATION_TIME_OFFSET};
