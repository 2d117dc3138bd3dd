pub(crate) mod armor;
mod cleartext;
mod keyring;
mod packet;
mod signer;
mod verifier;

use std::fmt;

#[cfg(test)]
use proptest_derive::Arbitrary;
use thiserror::Error;

pub use armor::{decode as unarmor, encode as armor, ArmorError};
pub use cleartext::{sign_cleartext, verify_cleartext, CleartextMessage};
pub use keyring::Keyring;
pub use packet::SignaturePacket;
pub use signer::DetachedSigner;
pub use verifier::DetachedVerifier;

/// How the signature bytes handed to a verifier are encoded.
#[cfg_attr(test, derive(Arbitrary))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureEncoding {
    /// ASCII armor around the packet.
    Armor,
    /// The raw packet.
    Binary,
}

impl Default for SignatureEncoding {
    fn default() -> Self {
        Self::Armor
    }
}

/// What the signature was computed over.
#[cfg_attr(test, derive(Arbitrary))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureClass {
    /// The content bytes as they are.
    Binary,
    /// The canonicalized content (see [`Canonicalize`](crate::Canonicalize)).
    Text,
}

impl SignatureClass {
    fn to_byte(self) -> u8 {
        match self {
            Self::Binary => 0x00,
            Self::Text => 0x01,
        }
    }

    fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(Self::Binary),
            0x01 => Some(Self::Text),
            _ => None,
        }
    }
}

/// Short identifier of a verification key, carried in every signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyId(pub [u8; 8]);

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}

/// Why a well-formed signature from a known key was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureFailure {
    #[error("signature by {issuer} does not match the signed content: {reason}")]
    BadSignature { issuer: KeyId, reason: String },
}

/// Hard failures of the verification engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("signature issuer {0} is not a known key")]
    UnknownIssuer(KeyId),
    #[error("armor: {0}")]
    Armor(#[from] ArmorError),
    #[error("malformed signature packet: {0}")]
    Malformed(String),
    #[error("unsupported signature packet version {0}")]
    UnsupportedVersion(u8),
    #[error("malformed cleartext message: {0}")]
    Cleartext(&'static str),
}

impl EngineError {
    pub fn is_unknown_issuer(&self) -> bool {
        matches!(self, Self::UnknownIssuer(_))
    }
}

/// The verdict of a verification call that got as far as checking the
/// signature itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    signer: KeyId,
    failure: Option<SignatureFailure>,
}

impl VerificationResult {
    pub fn valid(signer: KeyId) -> Self {
        Self {
            signer,
            failure: None,
        }
    }

    pub fn invalid(signer: KeyId, failure: SignatureFailure) -> Self {
        Self {
            signer,
            failure: Some(failure),
        }
    }

    pub fn signer(&self) -> KeyId {
        self.signer
    }

    /// `None` when the signature is cryptographically valid.
    pub fn signature_error(&self) -> Option<&SignatureFailure> {
        self.failure.as_ref()
    }

    pub fn into_signature_error(self) -> Option<SignatureFailure> {
        self.failure
    }
}
