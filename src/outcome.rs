use std::fmt;

use thiserror::Error;

use crate::signature::SignatureFailure;

pub const SIGNATURE_OK: u8 = 0;
pub const SIGNATURE_NOT_SIGNED: u8 = 1;
pub const SIGNATURE_NO_VERIFIER: u8 = 2;
pub const SIGNATURE_FAILED: u8 = 3;

/// What a completed traversal found out about the message's signature.
///
/// A mismatch is data, not an error: callers that never look at the outcome
/// accept unverified content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// No signature present, or the signed envelope was malformed.
    NotSigned,
    /// A signature is present but nothing could check it: no verifier was
    /// configured or the signing key is unknown.
    NoVerifier,
    Success,
    Mismatch(SignatureFailure),
}

impl VerificationOutcome {
    pub fn status(&self) -> u8 {
        match self {
            Self::Success => SIGNATURE_OK,
            Self::NotSigned => SIGNATURE_NOT_SIGNED,
            Self::NoVerifier => SIGNATURE_NO_VERIFIER,
            Self::Mismatch(_) => SIGNATURE_FAILED,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Signature verified",
            Self::NotSigned => "Missing signature",
            Self::NoVerifier => "No matching signature",
            Self::Mismatch(_) => "Invalid signature",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Turns everything but `Success` into an error.
    pub fn into_result(self) -> Result<(), SignatureVerificationError> {
        let status = self.status();
        let message = self.message();
        match self {
            Self::Success => Ok(()),
            Self::NotSigned | Self::NoVerifier => Err(SignatureVerificationError {
                status,
                message,
                cause: None,
            }),
            Self::Mismatch(cause) => Err(SignatureVerificationError {
                status,
                message,
                cause: Some(cause),
            }),
        }
    }
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mismatch(cause) => write!(f, "{}: {cause}", self.message()),
            _ => f.write_str(self.message()),
        }
    }
}

impl From<crate::signature::VerificationResult> for VerificationOutcome {
    fn from(result: crate::signature::VerificationResult) -> Self {
        match result.into_signature_error() {
            None => Self::Success,
            Some(cause) => Self::Mismatch(cause),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("signature verification failed (status {status}): {message}")]
pub struct SignatureVerificationError {
    pub status: u8,
    pub message: &'static str,
    #[source]
    pub cause: Option<SignatureFailure>,
}
