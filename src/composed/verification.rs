use std::fmt;

use num_enum::{FromPrimitive, IntoPrimitive};

use crate::composed::PlainMessage;

/// The amount of seconds a signature may be created in the future relative
/// to the verification time, to compensate for clock skew between signer
/// and verifier. Fixed, not configurable.
pub const CREATION_TIME_OFFSET: i64 = 60 * 60 * 24 * 2;

/// Outcome of signature evaluation during decryption or detached
/// verification. Stable small-integer values, safe for equality checks by
/// calling code.
#[derive(Debug, PartialEq, Eq, Clone, Copy, FromPrimitive, IntoPrimitive, Hash)]
#[repr(u8)]
pub enum SignatureStatus {
    /// A signature is present and verified against a supplied key.
    Ok = 0,
    /// No signature is present, or verification was not requested.
    NotSigned = 1,
    /// A signature is present but no supplied key matches its issuer.
    NoVerifier = 2,
    /// A signature is present and a matching key was found, but the check
    /// failed (bad signature, or creation time outside the allowed window).
    Failed = 3,

    #[num_enum(catch_all)]
    Other(u8),
}

impl fmt::Display for SignatureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureStatus::Ok => write!(f, "Valid signature"),
            SignatureStatus::NotSigned => write!(f, "Missing signature"),
            SignatureStatus::NoVerifier => write!(f, "No matching signature"),
            SignatureStatus::Failed => write!(f, "Invalid signature"),
            SignatureStatus::Other(v) => write!(f, "Unknown status {}", v),
        }
    }
}

/// Result of an explicit-verification decryption: the recovered plaintext
/// together with the signature status.
///
/// The two are independent. A status other than [`SignatureStatus::Ok`]
/// never suppresses the plaintext, and a decryption failure is an error,
/// never a status. Callers must check `status` before trusting the origin
/// of `message`.
#[derive(Debug, Clone)]
pub struct DecryptedMessage {
    pub message: PlainMessage,
    pub status: SignatureStatus,
}

/// Checks a signature creation time against the verification time,
/// allowing the fixed forward clock-skew window. `verify_time == 0`
/// disables the check.
pub(crate) fn in_time_window(created: Option<u32>, verify_time: i64) -> bool {
    if verify_time == 0 {
        return true;
    }

    match created {
        Some(created) => i64::from(created) <= verify_time + CREATION_TIME_OFFSET,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_values_are_stable() {
        assert_eq!(u8::from(SignatureStatus::Ok), 0);
        assert_eq!(u8::from(SignatureStatus::NotSigned), 1);
        assert_eq!(u8::from(SignatureStatus::NoVerifier), 2);
        assert_eq!(u8::from(SignatureStatus::Failed), 3);
    }

    #[test]
    fn time_window() {
        assert!(in_time_window(Some(100), 0));
        assert!(in_time_window(Some(100), 100));
        // within the two day skew allowance
        assert!(in_time_window(Some(100 + 3600), 100));
        assert!(!in_time_window(
            Some((100 + CREATION_TIME_OFFSET + 1) as u32),
            100
        ));
        assert!(!in_time_window(None, 100));
    }
}
