use std::fmt::Debug;
use std::io::{Cursor, Read};

use derivative::Derivative;

use crate::error::{Error, Result};
use crate::mime::{
    decode_charset, decode_transfer_encoding, multipart, walk, AcceptedPart, Acceptor,
    HeaderMap, ParsedContentType, PartCollector,
};
use crate::outcome::VerificationOutcome;
use crate::signature::{DetachedVerifier, Keyring, SignatureEncoding};
use crate::util::Canonicalize;

/// Acceptor that pulls the detached signature out of a `multipart/signed`
/// node, verifies it, and forwards the signed content to `target`.
///
/// Anything that is not `multipart/signed` goes to `target` untouched. The
/// outcome is only recorded, never raised: check [`outcome`](Self::outcome)
/// after the traversal.
#[derive(Derivative)]
#[derivative(Debug(bound = "A: Debug"))]
pub struct SignatureCollector<A, V = Keyring> {
    target: A,
    #[derivative(Debug = "ignore")]
    verifier: Option<V>,
    signature: Option<String>,
    outcome: Option<VerificationOutcome>,
}

impl<A> SignatureCollector<A> {
    /// A collector that extracts signatures but cannot verify them.
    pub fn new(target: A) -> Self {
        Self::with_optional_verifier(target, None)
    }
}

impl<A, V> SignatureCollector<A, V> {
    /// A collector that checks signatures with `verifier`.
    pub fn with_verifier(target: A, verifier: V) -> Self {
        Self::with_optional_verifier(target, Some(verifier))
    }

    /// Like [`with_verifier`](Self::with_verifier), but behaves like
    /// [`new`](SignatureCollector::new) when `verifier` is `None`.
    pub fn with_optional_verifier(target: A, verifier: Option<V>) -> Self {
        Self {
            target,
            verifier,
            signature: None,
            outcome: None,
        }
    }

    /// The decoded signature text, available even when it could not be
    /// verified. Only the first signature seen is kept.
    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    /// `None` until a node has been accepted.
    pub fn outcome(&self) -> Option<&VerificationOutcome> {
        self.outcome.as_ref()
    }

    /// The acceptor that receives the forwarded content.
    pub fn target(&self) -> &A {
        &self.target
    }

    /// Consumes the collector, returning the downstream acceptor.
    pub fn into_target(self) -> A {
        self.target
    }

    /// Consumes the collector, returning the downstream acceptor, the
    /// captured signature and the outcome.
    pub fn into_parts(self) -> (A, Option<String>, Option<VerificationOutcome>) {
        (self.target, self.signature, self.outcome)
    }

    /// Records `NotSigned` unless an earlier node already carried a signature.
    fn record_unsigned(&mut self) {
        if self.signature.is_none() {
            self.outcome = Some(VerificationOutcome::NotSigned);
        }
    }
}

fn is_multipart_signed(content_type: &ParsedContentType) -> bool {
    content_type.mimetype == "multipart/signed"
}

/// Children without a `Content-Type` are `text/plain` (RFC 2045 section 5.2).
fn is_plain(header: &HeaderMap) -> bool {
    header
        .content_type()
        .map_or(true, |content_type| content_type.mimetype == "text/plain")
}

impl<A: Acceptor, V: DetachedVerifier> Acceptor for SignatureCollector<A, V> {
    fn accept(
        &mut self,
        part: &mut dyn Read,
        header: &HeaderMap,
        has_plain_sibling: bool,
        is_first: bool,
        is_last: bool,
    ) -> Result<()> {
        let raw_content_type = header.get("Content-Type").unwrap_or_default();
        let content_type = mailparse::parse_content_type(raw_content_type);
        if !is_multipart_signed(&content_type) {
            tracing::debug!("not multipart/signed, forwarding node unchanged");
            self.record_unsigned();
            return self
                .target
                .accept(part, header, has_plain_sibling, is_first, is_last);
        }

        // Read everything up front so the stream is drained on every path.
        let mut body = Vec::new();
        part.read_to_end(&mut body)
            .map_err(Error::io("multipart/signed body"))?;

        let mut parts = match multipart::split(raw_content_type, &body) {
            Ok(parts) => parts,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "unparseable multipart/signed body, treating as unsigned"
                );
                self.record_unsigned();
                return self.target.accept(
                    &mut Cursor::new(body),
                    header,
                    has_plain_sibling,
                    is_first,
                    is_last,
                );
            }
        };
        let has_plain_child = parts.iter().any(|part| is_plain(part.header()));

        if parts.len() != 2 {
            tracing::warn!(
                parts = parts.len(),
                "malformed multipart/signed envelope, treating as unsigned"
            );
            self.record_unsigned();
            for part in parts {
                let (header, body) = part.into_header_and_body();
                self.target
                    .accept(&mut Cursor::new(body), &header, has_plain_child, true, true)?;
            }
            return Ok(());
        }

        let signature_part = parts.remove(1);
        let content_part = parts.remove(0);

        self.target.accept(
            &mut Cursor::new(content_part.body()),
            content_part.header(),
            has_plain_child,
            true,
            true,
        )?;

        if self.signature.is_some() {
            tracing::warn!("another multipart/signed node, keeping the first signature");
            return Ok(());
        }

        let decoded = decode_transfer_encoding(
            signature_part.header().content_transfer_encoding(),
            signature_part.body(),
        )?;
        let signature = decode_charset(&decoded, Some(&content_type))?;
        let signature = self.signature.insert(signature);

        let content = content_part.raw().canonicalize();
        let verifier = match &self.verifier {
            Some(verifier) => verifier,
            None => {
                tracing::debug!("no verifier configured, signature left unchecked");
                self.outcome = Some(VerificationOutcome::NoVerifier);
                return Ok(());
            }
        };

        let verified =
            verifier.verify_detached(&content, signature.as_bytes(), SignatureEncoding::Armor);
        let outcome = match verified {
            Ok(result) => VerificationOutcome::from(result),
            Err(err) if err.is_unknown_issuer() => {
                tracing::debug!(error = %err, "signed by an unknown key");
                VerificationOutcome::NoVerifier
            }
            Err(err) => return Err(err.into()),
        };
        tracing::debug!(outcome = %outcome, "multipart/signed verified");
        self.outcome = Some(outcome);
        Ok(())
    }
}

/// Everything [`verify_message`] learned about a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedMessage {
    /// The parts forwarded downstream: the signed content, or the message
    /// itself when it is not signed.
    pub parts: Vec<AcceptedPart>,
    pub signature: Option<String>,
    pub outcome: VerificationOutcome,
}

/// Reads a whole message and verifies it if it is `multipart/signed`.
pub fn verify_message<R: Read, V: DetachedVerifier>(
    reader: R,
    verifier: Option<V>,
) -> Result<SignedMessage> {
    let mut collector = SignatureCollector::with_optional_verifier(PartCollector::new(), verifier);
    walk(reader, &mut collector)?;
    let (target, signature, outcome) = collector.into_parts();
    Ok(SignedMessage {
        parts: target.into_parts(),
        signature,
        outcome: outcome.unwrap_or(VerificationOutcome::NotSigned),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_plain() {
        let plain: HeaderMap = [("Content-Type", "text/plain; charset=utf-8")]
            .into_iter()
            .collect();
        let html: HeaderMap = [("Content-Type", "text/html")].into_iter().collect();
        assert!(is_plain(&plain));
        assert!(is_plain(&HeaderMap::new()));
        assert!(!is_plain(&html));
    }

    #[test]
    fn test_outcome_unset_before_accept() {
        let collector = SignatureCollector::new(PartCollector::new());
        assert!(collector.outcome().is_none());
        assert!(collector.signature().is_none());
    }
}
