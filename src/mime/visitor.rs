use std::io::{Cursor, Read};

use crate::error::{Error, Result};

use super::HeaderMap;

/// One node of a MIME tree, offered to whoever consumes it.
///
/// Implementations must either read `part` to the end before returning or
/// hand it to another acceptor that will. Returning an error aborts the rest
/// of the traversal.
pub trait Acceptor {
    fn accept(
        &mut self,
        part: &mut dyn Read,
        header: &HeaderMap,
        has_plain_sibling: bool,
        is_first: bool,
        is_last: bool,
    ) -> Result<()>;
}

impl<A: Acceptor + ?Sized> Acceptor for &mut A {
    fn accept(
        &mut self,
        part: &mut dyn Read,
        header: &HeaderMap,
        has_plain_sibling: bool,
        is_first: bool,
        is_last: bool,
    ) -> Result<()> {
        (**self).accept(part, header, has_plain_sibling, is_first, is_last)
    }
}

/// A part as it was handed to a [`PartCollector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedPart {
    pub header: HeaderMap,
    pub body: Vec<u8>,
    pub has_plain_sibling: bool,
    pub is_first: bool,
    pub is_last: bool,
}

/// Downstream acceptor that buffers every part it receives.
#[derive(Debug, Clone, Default)]
pub struct PartCollector {
    parts: Vec<AcceptedPart>,
}

impl PartCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parts(&self) -> &[AcceptedPart] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<AcceptedPart> {
        self.parts
    }
}

impl Acceptor for PartCollector {
    fn accept(
        &mut self,
        part: &mut dyn Read,
        header: &HeaderMap,
        has_plain_sibling: bool,
        is_first: bool,
        is_last: bool,
    ) -> Result<()> {
        let mut body = Vec::new();
        part.read_to_end(&mut body)
            .map_err(Error::io("part body"))?;
        self.parts.push(AcceptedPart {
            header: header.clone(),
            body,
            has_plain_sibling,
            is_first,
            is_last,
        });
        Ok(())
    }
}

/// Reads a complete message from `reader` and offers it to `acceptor` as the
/// single top-level node.
pub fn walk<R: Read, A: Acceptor + ?Sized>(mut reader: R, acceptor: &mut A) -> Result<()> {
    let mut message = Vec::new();
    reader
        .read_to_end(&mut message)
        .map_err(Error::io("message"))?;
    let (header, body_offset) = HeaderMap::parse(&message)?;
    let mut body = Cursor::new(&message[body_offset..]);
    acceptor.accept(&mut body, &header, false, true, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
        }
    }

    #[test]
    fn test_walk_splits_header_and_body() {
        let mut collector = PartCollector::new();
        walk(
            &b"Subject: hi\r\nContent-Type: text/plain\r\n\r\nI am the body"[..],
            &mut collector,
        )
        .unwrap();
        let parts = collector.into_parts();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].header.get("subject"), Some("hi"));
        assert_eq!(parts[0].body, b"I am the body");
        assert!(parts[0].is_first && parts[0].is_last && !parts[0].has_plain_sibling);
    }

    #[test]
    fn test_walk_read_error() {
        let mut collector = PartCollector::new();
        let err = walk(FailingReader, &mut collector).unwrap_err();
        assert!(matches!(err, Error::Io { context: "message", .. }));
        assert!(collector.parts().is_empty());
    }

    fn offer<A: Acceptor>(mut acceptor: A) -> Result<()> {
        acceptor.accept(&mut &b"x"[..], &HeaderMap::new(), true, false, true)
    }

    #[test]
    fn test_acceptor_through_mut_ref() {
        let mut collector = PartCollector::new();
        offer(&mut collector).unwrap();
        assert_eq!(collector.parts()[0].body, b"x");
        assert!(collector.parts()[0].has_plain_sibling);
    }
}
