use super::{armor, KeyId, SignatureClass};

/// Produces detached signatures that a matching
/// [`DetachedVerifier`](super::DetachedVerifier) accepts.
pub trait DetachedSigner {
    fn key_id(&self) -> KeyId;

    /// Signs `content` and returns the binary signature packet.
    fn sign_detached(&self, content: &[u8], class: SignatureClass) -> Vec<u8>;

    fn sign_armored(&self, content: &[u8], class: SignatureClass) -> String {
        armor::encode(&self.sign_detached(content, class))
    }
}
