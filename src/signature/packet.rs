use std::convert::TryFrom;

use ed25519_dalek as ed25519;

use super::{EngineError, KeyId, SignatureClass};

const VERSION: u8 = 1;
const PACKET_LEN: usize = 2 + 8 + ed25519::SIGNATURE_LENGTH;

/// Wire form of a detached signature: version, class, issuer, signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignaturePacket {
    pub class: SignatureClass,
    pub issuer: KeyId,
    pub signature: ed25519::Signature,
}

impl SignaturePacket {
    pub fn new(class: SignatureClass, issuer: KeyId, signature: ed25519::Signature) -> Self {
        Self {
            class,
            issuer,
            signature,
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(PACKET_LEN);
        data.push(VERSION);
        data.push(self.class.to_byte());
        data.extend_from_slice(&self.issuer.0);
        data.extend_from_slice(&self.signature.to_bytes());
        data
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, EngineError> {
        let (&version, rest) = data
            .split_first()
            .ok_or_else(|| EngineError::Malformed("empty packet".to_string()))?;
        if version != VERSION {
            return Err(EngineError::UnsupportedVersion(version));
        }
        if data.len() != PACKET_LEN {
            return Err(EngineError::Malformed(format!(
                "expected {PACKET_LEN} bytes, got {}",
                data.len()
            )));
        }
        let class = SignatureClass::from_byte(rest[0])
            .ok_or_else(|| EngineError::Malformed(format!("unknown class {:#04x}", rest[0])))?;
        let mut issuer = [0u8; 8];
        issuer.copy_from_slice(&rest[1..9]);
        let signature = ed25519::Signature::try_from(&rest[9..])
            .map_err(|err| EngineError::Malformed(err.to_string()))?;
        Ok(Self::new(class, KeyId(issuer), signature))
    }
}
