use std::io;
use thiserror::Error;

/// Every way reading a request can fail.
///
/// All variants are terminal for the request being parsed: the decoder moves to
/// [`ParseState::Error`](crate::protocol::ParseState::Error) and the caller is
/// expected to drop the connection.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("bad request line: {reason}")]
    BadRequestLine { reason: String },

    #[error("unsupported http version: {version}")]
    UnsupportedVersion { version: String },

    #[error("invalid header: {reason}")]
    InvalidHeader { reason: String },

    #[error("header size too large, current: {current_size} exceed the limit {max_size}")]
    TooLargeHeader { current_size: usize, max_size: usize },

    #[error("header number exceed the limit {max_num}")]
    TooManyHeaders { max_num: usize },

    #[error("invalid content-length header: {reason}")]
    InvalidContentLength { reason: String },

    #[error("body size {length} exceed the limit {max_size}")]
    BodyTooLarge { length: u64, max_size: usize },

    #[error("read buffer exhausted, {capacity} bytes buffered without completing a parse step")]
    BufferExhausted { capacity: usize },

    #[error("body framing not implemented: {framing}")]
    NotImplemented { framing: String },

    #[error("request is already in error state")]
    AlreadyFailed,

    #[error("request is not complete yet")]
    Incomplete,

    #[error("unexpected end of stream, {buffered} bytes left unparsed")]
    UnexpectedEof { buffered: usize },

    #[error("read failed: {source}")]
    ReadFailed {
        #[from]
        source: io::Error,
    },

    #[error("invalid http method")]
    InvalidMethod,

    #[error("invalid http uri")]
    InvalidUri,
}

impl ParseError {
    pub fn bad_request_line<S: ToString>(str: S) -> Self {
        Self::BadRequestLine { reason: str.to_string() }
    }

    pub fn unsupported_version<S: ToString>(version: S) -> Self {
        Self::UnsupportedVersion { version: version.to_string() }
    }

    pub fn invalid_header<S: ToString>(str: S) -> Self {
        Self::InvalidHeader { reason: str.to_string() }
    }

    pub fn too_large_header(current_size: usize, max_size: usize) -> Self {
        Self::TooLargeHeader { current_size, max_size }
    }

    pub fn too_many_headers(max_num: usize) -> Self {
        Self::TooManyHeaders { max_num }
    }

    pub fn invalid_content_length<S: ToString>(str: S) -> Self {
        Self::InvalidContentLength { reason: str.to_string() }
    }

    pub fn body_too_large(length: u64, max_size: usize) -> Self {
        Self::BodyTooLarge { length, max_size }
    }

    pub fn buffer_exhausted(capacity: usize) -> Self {
        Self::BufferExhausted { capacity }
    }

    pub fn not_implemented<S: ToString>(framing: S) -> Self {
        Self::NotImplemented { framing: framing.to_string() }
    }

    pub fn unexpected_eof(buffered: usize) -> Self {
        Self::UnexpectedEof { buffered }
    }

    pub fn read_failed<E: Into<io::Error>>(e: E) -> Self {
        Self::ReadFailed { source: e.into() }
    }

    /// Returns true for errors raised by the byte source rather than by the request bytes.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::ReadFailed { .. } | Self::UnexpectedEof { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_details() {
        assert_eq!(ParseError::unsupported_version("HTTP/2.0").to_string(), "unsupported http version: HTTP/2.0");
        assert_eq!(
            ParseError::buffer_exhausted(16).to_string(),
            "read buffer exhausted, 16 bytes buffered without completing a parse step"
        );
        assert_eq!(ParseError::AlreadyFailed.to_string(), "request is already in error state");
    }

    #[test]
    fn io_errors_are_classified() {
        let e: ParseError = io::Error::new(io::ErrorKind::ConnectionReset, "reset").into();
        assert!(e.is_io());
        assert!(ParseError::unexpected_eof(3).is_io());
        assert!(!ParseError::bad_request_line("two tokens").is_io());
    }
}
