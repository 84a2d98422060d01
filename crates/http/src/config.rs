//! Parser limits and policies.
//!
//! A [`ParserConfig`] is copied into every decoder and stream reader. The defaults
//! mirror what a small HTTP/1.1 server accepts; use [`ParserConfig::DEFAULT`] unless
//! you know the traffic you expect.
//!
//! ```
//! use micro_http_parser::config::{ContentLengthPolicy, ParserConfig};
//!
//! let config = ParserConfig {
//!     buffer_capacity: 16 * 1024,
//!     content_length: ContentLengthPolicy::Lenient,
//!     ..ParserConfig::DEFAULT
//! };
//! assert_eq!(config.max_header_count, 64);
//! ```

/// How a `Content-Length` value that is not a non-negative integer is handled.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ContentLengthPolicy {
    /// Reject the request with [`ParseError::InvalidContentLength`](crate::protocol::ParseError::InvalidContentLength)
    #[default]
    Strict,
    /// Treat the request as having no body
    Lenient,
}

/// Limits applied while reading one request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Capacity of the working read buffer (default: `8 KiB`)
    ///
    /// Bytes are only dropped from the buffer once parsed, so the longest single
    /// line of a request must fit into it.
    pub buffer_capacity: usize,

    /// Maximum size of the request line plus header section (default: `8 KiB`)
    pub max_header_bytes: usize,

    /// Maximum number of header lines (default: `64`)
    pub max_header_count: usize,

    /// Maximum accepted `Content-Length` (default: `1 MiB`)
    ///
    /// The body buffer is allocated up front with the declared length.
    pub max_body_bytes: usize,

    /// Handling of unparsable `Content-Length` values (default: strict)
    pub content_length: ContentLengthPolicy,
}

impl ParserConfig {
    pub const DEFAULT: ParserConfig = ParserConfig {
        buffer_capacity: 8 * 1024,
        max_header_bytes: 8 * 1024,
        max_header_count: 64,
        max_body_bytes: 1024 * 1024,
        content_length: ContentLengthPolicy::Strict,
    };
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
