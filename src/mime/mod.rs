mod encoding;
mod header;
pub mod multipart;
mod visitor;

pub use encoding::{
    decode_charset, decode_transfer_encoding, CharsetError, TransferEncoding,
    TransferEncodingError,
};
pub use header::HeaderMap;
pub use mailparse::{MailParseError, ParsedContentType};
pub use multipart::BodyPart;
pub use visitor::{walk, AcceptedPart, Acceptor, PartCollector};
