use ed25519_dalek::SignatureError;
use snafu::Snafu;

use crate::composed::SignatureStatus;

pub type Result<T, E = Error> = ::std::result::Result<T, E>;

#[allow(unused_imports)]
pub(crate) use crate::{bail, ensure, ensure_eq, format_err, malformed, unsupported_err};

/// Error types
#[derive(Debug, Snafu)]
pub enum Error {
    /// The requested cipher name is not part of the fixed registry.
    #[snafu(display("unsupported cipher algorithm: {name}"))]
    UnsupportedAlgorithm { name: String },
    /// Session key length does not match the registry size for its algorithm.
    #[snafu(display("invalid session key size"))]
    InvalidKeySize,
    /// The input bytes are not a well formed OpenPGP packet sequence.
    #[snafu(display("malformed packet: {message}"))]
    MalformedPacket { message: String },
    /// Wrong key, corrupted ciphertext or integrity protection mismatch.
    /// Always fatal, no partial plaintext is ever returned.
    #[snafu(display("decryption failed"))]
    DecryptionFailed,
    /// Signing was requested but the key ring holds no usable secret key.
    #[snafu(display("no usable signing key"))]
    NoSigningKey,
    /// Detached signature verification failed; `status` carries the reason.
    #[snafu(display("signature verification error: {status}"))]
    InvalidSignature { status: SignatureStatus },
    #[snafu(display("invalid armor wrappers"))]
    InvalidArmorWrappers,
    #[snafu(display("invalid crc24 checksum"))]
    InvalidChecksum,
    #[snafu(transparent)]
    Base64Decode { source: base64::DecodeError },
    #[snafu(transparent)]
    IO { source: std::io::Error },
    #[snafu(display("cfb: invalid key iv length"))]
    CfbInvalidKeyIvLength,
    #[snafu(transparent)]
    Utf8Error { source: std::str::Utf8Error },
    #[snafu(transparent)]
    SignatureError { source: SignatureError },
    /// Signals packet versions and parameters we don't support, but can safely ignore
    #[snafu(display("Unsupported: {message}"))]
    Unsupported { message: String },
    #[snafu(display("{message}"))]
    Message { message: String },
}

impl From<cipher::InvalidLength> for Error {
    fn from(_: cipher::InvalidLength) -> Error {
        Error::CfbInvalidKeyIvLength
    }
}

impl From<String> for Error {
    fn from(err: String) -> Error {
        Error::Message { message: err }
    }
}

#[macro_export]
macro_rules! unsupported_err {
    ($e:expr) => {
        return Err($crate::errors::Error::Unsupported { message: $e.to_string()})
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err($crate::errors::Error::Unsupported { message: format!($fmt, $($arg)+) })
    };
}

#[macro_export]
macro_rules! bail {
    ($e:expr) => {
        return Err($crate::errors::Error::Message { message: $e.to_string() })
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err($crate::errors::Error::Message { message: format!($fmt, $($arg)+) })
    };
}

#[macro_export]
macro_rules! format_err {
    ($e:expr) => {
        $crate::errors::Error::Message { message: $e.to_string() }
    };
    ($fmt:expr, $($arg:tt)+) => {
        $crate::errors::Error::Message { message: format!($fmt, $($arg)+) }
    };
}

/// A `MalformedPacket` error with a formatted message.
#[macro_export]
macro_rules! malformed {
    ($e:expr) => {
        $crate::errors::Error::MalformedPacket { message: $e.to_string() }
    };
    ($fmt:expr, $($arg:tt)+) => {
        $crate::errors::Error::MalformedPacket { message: format!($fmt, $($arg)+) }
    };
}

#[macro_export(local_inner_macros)]
macro_rules! ensure {
    ($cond:expr, $e:expr) => {
        if !($cond) {
            bail!($e);
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)+) => {
        if !($cond) {
            bail!($fmt, $($arg)+);
        }
    };
}

#[macro_export]
macro_rules! ensure_eq {
    ($left:expr, $right:expr) => ({
        match (&$left, &$right) {
            (left_val, right_val) => {
                if !(*left_val == *right_val) {
                    $crate::bail!(r#"assertion failed: `(left == right)`
  left: `{:?}`,
 right: `{:?}`"#, left_val, right_val)
                }
            }
        }
    });
    ($left:expr, $right:expr,) => ({
        $crate::ensure_eq!($left, $right)
    });
    ($left:expr, $right:expr, $($arg:tt)+) => ({
        match (&($left), &($right)) {
            (left_val, right_val) => {
                if !(*left_val == *right_val) {
                    $crate::bail!(r#"assertion failed: `(left == right)`
  left: `{:?}`,
 right: `{:?}`: {}"#, left_val, right_val,
                           format_args!($($arg)+))
                }
            }
        }
    });
}
