mod canonicalize;

pub use canonicalize::{canonical_line_endings, trim_each_line, Canonicalize};
