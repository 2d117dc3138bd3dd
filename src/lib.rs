//! Extraction and verification of detached signatures carried in
//! `multipart/signed` (RFC 1847) MIME envelopes.
//!
//! [`SignatureCollector`] sits between a MIME traversal and whatever consumes
//! the message content. It splits a signed envelope into its content and
//! signature parts, forwards the content unchanged, and verifies the signature
//! over the canonicalized raw content.
mod collector;
mod error;
pub mod mime;
mod outcome;
pub mod signature;
mod util;

pub use collector::{verify_message, SignatureCollector, SignedMessage};
pub use error::{Error, Result};
pub use mime::{Acceptor, HeaderMap, PartCollector, ParsedContentType};
pub use outcome::{
    SignatureVerificationError, VerificationOutcome, SIGNATURE_FAILED, SIGNATURE_NOT_SIGNED,
    SIGNATURE_NO_VERIFIER, SIGNATURE_OK,
};
pub use signature::{
    DetachedSigner, DetachedVerifier, Keyring, SignatureClass, SignatureEncoding,
    VerificationResult,
};
pub use util::{canonical_line_endings, trim_each_line, Canonicalize};
