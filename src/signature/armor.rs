use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

pub(crate) const BEGIN: &str = "-----BEGIN ED25519 SIGNATURE-----";
pub(crate) const END: &str = "-----END ED25519 SIGNATURE-----";
const LINE_WIDTH: usize = 64;

#[derive(Debug, Error)]
pub enum ArmorError {
    #[error("armored data is not text")]
    NotText,
    #[error("missing armor begin line")]
    MissingBegin,
    #[error("missing armor end line")]
    MissingEnd,
    #[error("base64: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Wraps a signature packet in ASCII armor.
pub fn encode(data: &[u8]) -> String {
    let body = STANDARD.encode(data);
    let mut out = String::with_capacity(body.len() + body.len() / LINE_WIDTH + 80);
    out.push_str(BEGIN);
    out.push_str("\n\n");
    for chunk in body.as_bytes().chunks(LINE_WIDTH) {
        // base64 output is ASCII.
        out.push_str(&String::from_utf8_lossy(chunk));
        out.push('\n');
    }
    out.push_str(END);
    out.push('\n');
    out
}

/// Extracts the packet from ASCII armor. Text before the begin line and
/// `Name: value` armor headers are ignored.
pub fn decode(armored: &[u8]) -> Result<Vec<u8>, ArmorError> {
    let text = std::str::from_utf8(armored).map_err(|_| ArmorError::NotText)?;
    let mut lines = text.lines().map(str::trim_end);

    lines
        .by_ref()
        .find(|line| *line == BEGIN)
        .ok_or(ArmorError::MissingBegin)?;

    let mut body = String::new();
    let mut in_headers = true;
    for line in lines {
        if line == END {
            return Ok(STANDARD.decode(body)?);
        }
        if in_headers {
            if line.contains(':') {
                continue;
            }
            in_headers = false;
            if line.is_empty() {
                continue;
            }
        }
        body.extend(line.chars().filter(|c| !c.is_ascii_whitespace()));
    }
    Err(ArmorError::MissingEnd)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_lines() {
        let armored = encode(&[0xab; 100]);
        let lines: Vec<&str> = armored.lines().collect();
        assert_eq!(lines[0], BEGIN);
        assert_eq!(lines[1], "");
        assert_eq!(lines[2].len(), LINE_WIDTH);
        assert_eq!(*lines.last().unwrap(), END);
        assert_eq!(decode(armored.as_bytes()).unwrap(), vec![0xab; 100]);
    }

    #[test]
    fn test_headers_and_crlf() {
        let armored = format!(
            "garbage before\r\n{BEGIN}\r\nComment: hello\r\nVersion: 1\r\n\r\nAQID\r\nBA==  \r\n{END}\r\n"
        );
        assert_eq!(decode(armored.as_bytes()).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_no_blank_line() {
        let armored = format!("{BEGIN}\nAQID\n{END}");
        assert_eq!(decode(armored.as_bytes()).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(decode(b"\xff\xfe"), Err(ArmorError::NotText)));
        assert!(matches!(decode(b"AQID"), Err(ArmorError::MissingBegin)));
        let truncated = format!("{BEGIN}\n\nAQID\n");
        assert!(matches!(
            decode(truncated.as_bytes()),
            Err(ArmorError::MissingEnd)
        ));
        let corrupt = format!("{BEGIN}\n\nA*ID\n{END}\n");
        assert!(matches!(
            decode(corrupt.as_bytes()),
            Err(ArmorError::Base64(_))
        ));
    }
}
