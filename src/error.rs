use std::io;

use thiserror::Error;

use crate::mime::{CharsetError, MailParseError, TransferEncodingError};
use crate::signature::EngineError;

/// Errors that abort a MIME traversal.
///
/// Envelope anomalies and signature mismatches are not errors; they surface
/// as a [`VerificationOutcome`](crate::VerificationOutcome).
#[derive(Debug, Error)]
pub enum Error {
    #[error("error reading {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("error parsing message header: {0}")]
    Header(#[from] MailParseError),
    #[error("error decoding signature transfer encoding: {0}")]
    TransferEncoding(#[from] TransferEncodingError),
    #[error("error decoding signature charset: {0}")]
    Charset(#[from] CharsetError),
    #[error("signature verification failed: {0}")]
    Verification(#[from] EngineError),
    #[error("downstream acceptor failed: {0}")]
    Downstream(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    pub(crate) fn io(context: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| Self::Io { context, source }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
