use super::{
    armor, DetachedSigner, DetachedVerifier, EngineError, SignatureClass, SignatureEncoding,
    VerificationResult,
};

const HEADER: &str = "-----BEGIN ED25519 SIGNED MESSAGE-----";

/// A verified cleartext-signed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleartextMessage {
    text: String,
    result: VerificationResult,
}

impl CleartextMessage {
    /// The signed text with dash escaping undone.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn result(&self) -> &VerificationResult {
        &self.result
    }

    pub fn into_parts(self) -> (String, VerificationResult) {
        (self.text, self.result)
    }
}

/// Signs `text` and embeds it, readable, above a text-class signature.
pub fn sign_cleartext<S: DetachedSigner + ?Sized>(signer: &S, text: &str) -> String {
    let signature = signer.sign_armored(text.as_bytes(), SignatureClass::Text);
    let mut out = String::with_capacity(HEADER.len() + text.len() + signature.len() + 16);
    out.push_str(HEADER);
    out.push_str("\n\n");
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if line.starts_with('-') {
            out.push_str("- ");
        }
        out.push_str(line);
    }
    out.push('\n');
    out.push_str(&signature);
    out
}

/// Parses a message produced by [`sign_cleartext`] and verifies it.
pub fn verify_cleartext<V: DetachedVerifier + ?Sized>(
    verifier: &V,
    message: &str,
) -> Result<CleartextMessage, EngineError> {
    let mut lines = message.split('\n');

    lines
        .by_ref()
        .find(|line| line.trim_end() == HEADER)
        .ok_or(EngineError::Cleartext("missing signed message header"))?;
    lines
        .by_ref()
        .find(|line| line.trim_end().is_empty())
        .ok_or(EngineError::Cleartext("missing blank line after header"))?;

    let mut text_lines = Vec::new();
    let mut found_signature = false;
    for line in lines.by_ref() {
        if line.trim_end() == armor::BEGIN {
            found_signature = true;
            break;
        }
        text_lines.push(line.strip_prefix("- ").unwrap_or(line));
    }
    if !found_signature {
        return Err(EngineError::Cleartext("missing signature"));
    }

    let mut signature = String::from(armor::BEGIN);
    for line in lines {
        signature.push('\n');
        signature.push_str(line);
    }

    let text = text_lines.join("\n");
    let result =
        verifier.verify_detached(text.as_bytes(), signature.as_bytes(), SignatureEncoding::Armor)?;
    Ok(CleartextMessage { text, result })
}
