use mailparse::{MailHeader, MailParseError, ParsedContentType};

/// Case-insensitive, multi-valued header map handed to every
/// [`Acceptor`](super::Acceptor).
///
/// Values are stored unfolded, with RFC 2047 encoded words decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Replaces every value of `name` with `value`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.entries.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.entries.push((name, value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// The parsed `Content-Type`, or `None` if the header is missing.
    pub fn content_type(&self) -> Option<ParsedContentType> {
        self.get("Content-Type").map(mailparse::parse_content_type)
    }

    pub fn content_transfer_encoding(&self) -> Option<&str> {
        self.get("Content-Transfer-Encoding").map(str::trim)
    }

    /// Parses the header section at the start of `data`.
    ///
    /// Returns the headers and the offset of the first body byte.
    pub fn parse(data: &[u8]) -> Result<(Self, usize), MailParseError> {
        let (headers, body_offset) = mailparse::parse_headers(data)?;
        Ok((headers.iter().collect(), body_offset))
    }
}

impl<'a, 'b> FromIterator<&'a MailHeader<'b>> for HeaderMap {
    fn from_iter<I: IntoIterator<Item = &'a MailHeader<'b>>>(iter: I) -> Self {
        iter.into_iter()
            .map(|header| (header.get_key(), header.get_value()))
            .collect()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for HeaderMap {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.append(name, value);
        }
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let data = b"Content-Type: text/plain\r\nX-Other:  value \r\n\r\nbody\r\n";
        let (headers, offset) = HeaderMap::parse(data).unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("content-type"), Some("text/plain"));
        assert_eq!(headers.get("X-OTHER").map(str::trim), Some("value"));
        assert_eq!(&data[offset..], b"body\r\n");
    }

    #[test]
    fn test_parse_folded() {
        let data = b"Content-Type: multipart/signed;\n\tboundary=\"b1\";\n protocol=\"x\"\n\nrest";
        let (headers, offset) = HeaderMap::parse(data).unwrap();
        let content_type = headers.content_type().unwrap();
        assert_eq!(content_type.mimetype, "multipart/signed");
        assert_eq!(content_type.params.get("boundary").map(String::as_str), Some("b1"));
        assert_eq!(content_type.params.get("protocol").map(String::as_str), Some("x"));
        assert_eq!(&data[offset..], b"rest");
    }

    #[test]
    fn test_parse_multi_valued() {
        let (headers, _) = HeaderMap::parse(b"Received: a\nreceived: b\n\n").unwrap();
        assert_eq!(headers.get_all("RECEIVED").collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_header_section() {
        let data = b"\r\nbody";
        let (headers, offset) = HeaderMap::parse(data).unwrap();
        assert!(headers.is_empty());
        assert_eq!(&data[offset..], b"body");
    }

    #[test]
    fn test_insert_replaces() {
        let mut headers: HeaderMap = [("Content-Type", "text/plain"), ("content-type", "text/html")]
            .into_iter()
            .collect();
        headers.insert("CONTENT-TYPE", "multipart/mixed");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("Content-Type"), Some("multipart/mixed"));
    }

    #[test]
    fn test_content_type() {
        let headers: HeaderMap = [("Content-Type", "Text/Plain; Charset=\"ISO-8859-1\"")]
            .into_iter()
            .collect();
        let content_type = headers.content_type().unwrap();
        assert_eq!(content_type.mimetype, "text/plain");
        assert_eq!(content_type.params.get("charset").map(String::as_str), Some("ISO-8859-1"));
        assert!(HeaderMap::new().content_type().is_none());
    }
}
