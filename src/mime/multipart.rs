use std::ops::Range;

use mailparse::MailParseError;

use super::HeaderMap;

/// One body part of a multipart entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyPart {
    /// Header section and body exactly as transmitted, without the line break
    /// that precedes the next delimiter.
    raw: Vec<u8>,
    header: HeaderMap,
    body_offset: usize,
}

impl BodyPart {
    fn new(raw: Vec<u8>) -> Result<Self, MailParseError> {
        let (header, body_offset) = HeaderMap::parse(&raw)?;
        Ok(Self {
            raw,
            header,
            body_offset,
        })
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn header(&self) -> &HeaderMap {
        &self.header
    }

    pub fn body(&self) -> &[u8] {
        &self.raw[self.body_offset..]
    }

    pub fn into_header_and_body(self) -> (HeaderMap, Vec<u8>) {
        let mut raw = self.raw;
        let body = raw.split_off(self.body_offset);
        (self.header, body)
    }
}

/// Splits the body of a multipart entity whose `Content-Type` header value
/// is `content_type`.
///
/// The preamble and epilogue are discarded. A missing or empty boundary
/// yields no parts at all.
pub fn split(content_type: &str, body: &[u8]) -> Result<Vec<BodyPart>, MailParseError> {
    let boundary = mailparse::parse_content_type(content_type)
        .params
        .remove("boundary")
        .unwrap_or_default();
    if boundary.is_empty() {
        return Ok(Vec::new());
    }

    let mut entity = format!("Content-Type: {content_type}\r\n\r\n").into_bytes();
    entity.extend_from_slice(body);
    let parsed = mailparse::parse_mail(&entity)?;
    parsed
        .subparts
        .iter()
        .map(|part| {
            let span = span_in(&entity, part.raw_bytes);
            BodyPart::new(without_delimiter_break(&entity, span).to_vec())
        })
        .collect()
}

/// Where `part`, a subslice of `entity`, sits inside it.
fn span_in(entity: &[u8], part: &[u8]) -> Range<usize> {
    let start = (part.as_ptr() as usize)
        .saturating_sub(entity.as_ptr() as usize)
        .min(entity.len());
    start..(start + part.len()).min(entity.len())
}

/// The line break in front of a delimiter line belongs to the delimiter
/// (RFC 2046 section 5.1.1), never to the signed content.
fn without_delimiter_break(entity: &[u8], span: Range<usize>) -> &[u8] {
    let part = &entity[span.start..span.end];
    if !entity[span.end..].starts_with(b"--") {
        return part;
    }
    match part.strip_suffix(b"\n") {
        Some(part) => part.strip_suffix(b"\r").unwrap_or(part),
        None => part,
    }
}
