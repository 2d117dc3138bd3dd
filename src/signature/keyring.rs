use std::borrow::Cow;
use std::collections::HashMap;

use digest::{Digest as Hasher, Output};
use ed25519_dalek as ed25519;
use sha2::Sha512;

use super::{
    armor, DetachedSigner, DetachedVerifier, EngineError, KeyId, SignatureClass,
    SignatureEncoding, SignatureFailure, SignaturePacket, VerificationResult,
};
use crate::util::Canonicalize;

fn hash<H: Hasher>(data: &[u8]) -> Output<H> {
    let mut hasher = H::new();
    hasher.update(data);
    hasher.finalize()
}

impl KeyId {
    /// First eight bytes of the SHA-512 fingerprint of `key`.
    pub fn of(key: &ed25519::PublicKey) -> Self {
        let fingerprint = hash::<Sha512>(key.as_bytes());
        let mut id = [0u8; 8];
        id.copy_from_slice(&fingerprint[..8]);
        KeyId(id)
    }
}

fn signed_data(content: &[u8], class: SignatureClass) -> Cow<'_, [u8]> {
    match class {
        SignatureClass::Binary => Cow::Borrowed(content),
        SignatureClass::Text => Cow::Owned(content.canonicalize()),
    }
}

fn read_packet(
    signature: &[u8],
    encoding: SignatureEncoding,
) -> Result<SignaturePacket, EngineError> {
    match encoding {
        SignatureEncoding::Armor => SignaturePacket::from_bytes(&armor::decode(signature)?),
        SignatureEncoding::Binary => SignaturePacket::from_bytes(signature),
    }
}

fn check(key: &ed25519::PublicKey, content: &[u8], packet: &SignaturePacket) -> VerificationResult {
    use ::signature::Verifier as _;
    let data = signed_data(content, packet.class);
    match key.verify(&data, &packet.signature) {
        Ok(()) => VerificationResult::valid(packet.issuer),
        Err(err) => VerificationResult::invalid(
            packet.issuer,
            SignatureFailure::BadSignature {
                issuer: packet.issuer,
                reason: err.to_string(),
            },
        ),
    }
}

impl DetachedSigner for ed25519::Keypair {
    fn key_id(&self) -> KeyId {
        KeyId::of(&self.public)
    }

    fn sign_detached(&self, content: &[u8], class: SignatureClass) -> Vec<u8> {
        use ::signature::Signer as _;
        let signature = self.sign(&signed_data(content, class));
        SignaturePacket::new(class, self.key_id(), signature).to_bytes()
    }
}

/// A single trusted key.
impl DetachedVerifier for ed25519::PublicKey {
    fn verify_detached(
        &self,
        content: &[u8],
        signature: &[u8],
        encoding: SignatureEncoding,
    ) -> Result<VerificationResult, EngineError> {
        let packet = read_packet(signature, encoding)?;
        if packet.issuer != KeyId::of(self) {
            return Err(EngineError::UnknownIssuer(packet.issuer));
        }
        Ok(check(self, content, &packet))
    }
}

/// Set of trusted verification keys, looked up by the issuer a signature
/// names.
#[derive(Debug, Clone, Default)]
pub struct Keyring {
    keys: HashMap<KeyId, ed25519::PublicKey>,
}

impl Keyring {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_keys<I: IntoIterator<Item = ed25519::PublicKey>>(keys: I) -> Self {
        let mut keyring = Self::new();
        for key in keys {
            keyring.add(key);
        }
        keyring
    }

    pub fn add(&mut self, key: ed25519::PublicKey) -> KeyId {
        let id = KeyId::of(&key);
        self.keys.insert(id, key);
        id
    }

    pub fn get(&self, id: &KeyId) -> Option<&ed25519::PublicKey> {
        self.keys.get(id)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl DetachedVerifier for Keyring {
    fn verify_detached(
        &self,
        content: &[u8],
        signature: &[u8],
        encoding: SignatureEncoding,
    ) -> Result<VerificationResult, EngineError> {
        let packet = read_packet(signature, encoding)?;
        let key = self
            .keys
            .get(&packet.issuer)
            .ok_or(EngineError::UnknownIssuer(packet.issuer))?;
        Ok(check(key, content, &packet))
    }
}
