use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use charset::Charset;
use mailparse::ParsedContentType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransferEncodingError {
    #[error("unsupported transfer encoding {0:?}")]
    Unsupported(String),
    #[error("base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("quoted-printable: {0}")]
    QuotedPrintable(#[from] quoted_printable::QuotedPrintableError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CharsetError {
    #[error("unsupported charset {0:?}")]
    Unsupported(String),
    #[error("input is not valid {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferEncoding {
    SevenBit,
    EightBit,
    Binary,
    QuotedPrintable,
    Base64,
}

impl FromStr for TransferEncoding {
    type Err = TransferEncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("7bit") {
            Ok(Self::SevenBit)
        } else if s.eq_ignore_ascii_case("8bit") {
            Ok(Self::EightBit)
        } else if s.eq_ignore_ascii_case("binary") {
            Ok(Self::Binary)
        } else if s.eq_ignore_ascii_case("quoted-printable") {
            Ok(Self::QuotedPrintable)
        } else if s.eq_ignore_ascii_case("base64") {
            Ok(Self::Base64)
        } else {
            Err(TransferEncodingError::Unsupported(s.to_string()))
        }
    }
}

impl TransferEncoding {
    pub fn decode(self, data: &[u8]) -> Result<Vec<u8>, TransferEncodingError> {
        match self {
            Self::SevenBit | Self::EightBit | Self::Binary => Ok(data.to_vec()),
            Self::QuotedPrintable => Ok(quoted_printable::decode(
                data,
                quoted_printable::ParseMode::Robust,
            )?),
            Self::Base64 => {
                // RFC 2045 wraps lines and allows stray whitespace.
                let compact: Vec<u8> = data
                    .iter()
                    .copied()
                    .filter(|b| !b.is_ascii_whitespace())
                    .collect();
                Ok(STANDARD.decode(compact)?)
            }
        }
    }
}

/// Undoes a `Content-Transfer-Encoding`. A missing or empty encoding name
/// means the data is not encoded.
pub fn decode_transfer_encoding(
    encoding: Option<&str>,
    data: &[u8],
) -> Result<Vec<u8>, TransferEncodingError> {
    match encoding.map(str::trim) {
        None | Some("") => Ok(data.to_vec()),
        Some(name) => name.parse::<TransferEncoding>()?.decode(data),
    }
}

/// Decodes `data` to text using the `charset` parameter of `content_type`.
/// Without a charset the data must already be UTF-8.
pub fn decode_charset(
    data: &[u8],
    content_type: Option<&ParsedContentType>,
) -> Result<String, CharsetError> {
    let label = content_type.and_then(|content_type| content_type.params.get("charset"));
    let label = match label {
        Some(label) => label.trim(),
        None => {
            return String::from_utf8(data.to_vec())
                .map_err(|_| CharsetError::Malformed("UTF-8".to_string()))
        }
    };
    let charset = Charset::for_label(label.as_bytes())
        .ok_or_else(|| CharsetError::Unsupported(label.to_string()))?;
    let (text, malformed) = charset.decode_without_bom_handling(data);
    if malformed {
        return Err(CharsetError::Malformed(charset.name().to_string()));
    }
    Ok(text.into_owned())
}
