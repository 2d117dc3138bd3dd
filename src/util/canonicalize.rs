/// Normalizes signed content so that transport mutation does not break
/// signatures: trailing spaces and tabs (and stray carriage returns) are
/// trimmed from every line and every line ending becomes CRLF.
pub trait Canonicalize {
    fn canonicalize(&self) -> Vec<u8>;
}

impl Canonicalize for [u8] {
    fn canonicalize(&self) -> Vec<u8> {
        canonical_line_endings(&trim_each_line(self))
    }
}

impl Canonicalize for Vec<u8> {
    fn canonicalize(&self) -> Vec<u8> {
        self.as_slice().canonicalize()
    }
}

impl Canonicalize for str {
    fn canonicalize(&self) -> Vec<u8> {
        self.as_bytes().canonicalize()
    }
}

impl Canonicalize for String {
    fn canonicalize(&self) -> Vec<u8> {
        self.as_bytes().canonicalize()
    }
}

fn is_trailing_space(byte: &u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r')
}

/// Strips spaces, tabs and carriage returns from the end of every
/// LF-separated line. Lines are rejoined with a bare LF.
pub fn trim_each_line(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    for (i, line) in data.split(|&b| b == b'\n').enumerate() {
        if i > 0 {
            out.push(b'\n');
        }
        let end = line
            .iter()
            .rposition(|b| !is_trailing_space(b))
            .map_or(0, |p| p + 1);
        out.extend_from_slice(&line[..end]);
    }
    out
}

/// Rewrites every line ending (LF or CRLF) as CRLF. A CR that is not
/// followed by LF is left alone.
pub fn canonical_line_endings(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + data.len() / 16);
    let mut prev = None;
    for &b in data {
        if b == b'\n' && prev != Some(b'\r') {
            out.push(b'\r');
        }
        out.push(b);
        prev = Some(b);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_trims_trailing_whitespace() {
        let input = "This is a test\nWith trailing spaces:    \n  With leading spaces\nWith trailing tabs:\t\t\n\tWith leading tabs\nWith trailing carriage returns:\r\n\rWith leading carriage returns\n\t \r With a mix \t\r\n";
        let expected = "This is a test\r\nWith trailing spaces:\r\n  With leading spaces\r\nWith trailing tabs:\r\n\tWith leading tabs\r\nWith trailing carriage returns:\r\n\rWith leading carriage returns\r\n\t \r With a mix\r\n";
        assert_eq!(input.canonicalize(), expected.as_bytes());
    }

    #[test]
    fn test_no_trailing_newline_added() {
        assert_eq!("Hello World :)".canonicalize(), b"Hello World :)");
        assert_eq!("Hello World :)  \t".canonicalize(), b"Hello World :)");
        assert_eq!(b"".canonicalize(), b"");
    }

    #[test]
    fn test_crlf_left_alone() {
        assert_eq!(b"a\r\nb\r\n".canonicalize(), b"a\r\nb\r\n");
        assert_eq!(canonical_line_endings(b"a\rb"), b"a\rb");
    }

    proptest! {
        #[test]
        fn test_idempotent(data: Vec<u8>) {
            let once = data.canonicalize();
            prop_assert_eq!(once.canonicalize(), once);
        }

        #[test]
        fn test_trailing_whitespace_ignored(
            lines in prop::collection::vec("[a-zA-Z0-9 :)(]{0,20}[a-zA-Z0-9:)(]", 1..8),
            padding in prop::collection::vec("[ \t]{0,4}\r?", 8),
        ) {
            let clean = lines.join("\n");
            let padded = lines
                .iter()
                .zip(padding.iter())
                .map(|(line, pad)| format!("{line}{pad}"))
                .collect::<Vec<_>>()
                .join("\r\n");
            prop_assert_eq!(padded.canonicalize(), clean.canonicalize());
        }
    }
}
