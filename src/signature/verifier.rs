use super::{EngineError, SignatureEncoding, VerificationResult};

/// The verification capability: checks a detached signature over content.
///
/// `Ok` means the engine reached a verdict, which may still be a mismatch
/// (see [`VerificationResult::signature_error`]). `Err` means it could not:
/// the signature is unreadable or its issuer is unknown.
pub trait DetachedVerifier {
    fn verify_detached(
        &self,
        content: &[u8],
        signature: &[u8],
        encoding: SignatureEncoding,
    ) -> Result<VerificationResult, EngineError>;
}

impl<V: DetachedVerifier + ?Sized> DetachedVerifier for &V {
    fn verify_detached(
        &self,
        content: &[u8],
        signature: &[u8],
        encoding: SignatureEncoding,
    ) -> Result<VerificationResult, EngineError> {
        (**self).verify_detached(content, signature, encoding)
    }
}

impl<V: DetachedVerifier + ?Sized> DetachedVerifier for Box<V> {
    fn verify_detached(
        &self,
        content: &[u8],
        signature: &[u8],
        encoding: SignatureEncoding,
    ) -> Result<VerificationResult, EngineError> {
        (**self).verify_detached(content, signature, encoding)
    }
}
