//! HTTP request decoder module
//!
//! This module provides the incremental request state machine. It is fed the
//! bytes buffered so far, consumes as much of them as it can and reports how many
//! it took, so callers can drop exactly that prefix and call again once more
//! bytes arrived.
//!
//! # Components
//!
//! - [`RequestDecoder`]: the state machine itself, also usable as a
//!   [`tokio_util::codec::Decoder`]
//! - Request line parsing: strict `METHOD SP TARGET SP HTTP/1.1`
//! - Header parsing: delegated to [`HeaderStore`]
//! - Payload handling: [`LengthDecoder`] for `Content-Length` framed bodies
//!
//! # Example
//!
//! ```
//! use micro_http_parser::codec::RequestDecoder;
//! use micro_http_parser::protocol::ParseState;
//!
//! let mut decoder = RequestDecoder::new();
//! let mut buf = b"GET /coffee HTTP/1.1\r\nHost: loc".to_vec();
//!
//! let consumed = decoder.parse(&buf).unwrap();
//! assert_eq!(decoder.state(), ParseState::Headers);
//!
//! buf.drain(..consumed);
//! buf.extend_from_slice(b"alhost\r\n\r\n");
//! decoder.parse(&buf).unwrap();
//!
//! let request = decoder.finish().unwrap();
//! assert_eq!(request.target(), "/coffee");
//! assert_eq!(request.headers().get("host"), Some("localhost"));
//! ```

use bytes::{Buf, BytesMut};
use http::header::{CONTENT_LENGTH, TRANSFER_ENCODING};
use tokio_util::codec::Decoder;
use tracing::{debug, trace, warn};

use crate::codec::body::LengthDecoder;
use crate::codec::header::HeaderStore;
use crate::codec::line::LineScanner;
use crate::codec::request_line::parse_request_line;
use crate::config::{ContentLengthPolicy, ParserConfig};
use crate::ensure;
use crate::protocol::{ParseError, ParseState, Request, RequestLine};

/// The incremental request state machine.
///
/// # State Machine
///
/// - `Init`: waiting for the CRLF closing the request line
/// - `Headers`: header lines are handed to the [`HeaderStore`]
/// - `Body`: a `Content-Length` body is accumulated
/// - `Done` / `Error`: terminal
///
/// One call to [`parse`](Self::parse) moves through as many states as the
/// buffered bytes allow.
#[derive(Debug)]
pub struct RequestDecoder {
    config: ParserConfig,
    state: ParseState,
    scanner: LineScanner,
    request_line: Option<RequestLine>,
    headers: HeaderStore,
    /// Bytes of request line and header section consumed so far
    header_bytes: usize,
    body: Option<LengthDecoder>,
}

impl RequestDecoder {
    /// Creates a new `RequestDecoder` instance
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            state: ParseState::Init,
            scanner: LineScanner::default(),
            request_line: None,
            headers: HeaderStore::new(),
            header_bytes: 0,
            body: None,
        }
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// The request line, once it has been parsed.
    pub fn request_line(&self) -> Option<&RequestLine> {
        self.request_line.as_ref()
    }

    /// Headers parsed so far.
    pub fn headers(&self) -> &HeaderStore {
        &self.headers
    }

    /// Body bytes accumulated so far.
    pub fn body_received(&self) -> usize {
        self.body.as_ref().map_or(0, LengthDecoder::received)
    }

    /// Feeds the currently buffered bytes to the state machine.
    ///
    /// Returns how many bytes from the front of `buf` were consumed. The caller
    /// must drop exactly that prefix and pass the remaining bytes again, followed
    /// by whatever arrives next. Zero consumed without an error means more data
    /// is needed.
    ///
    /// Once the request is [`Done`](ParseState::Done) every call consumes nothing.
    ///
    /// # Errors
    ///
    /// Any error moves the decoder to [`ParseState::Error`]; later calls fail with
    /// [`ParseError::AlreadyFailed`] without looking at `buf`.
    pub fn parse(&mut self, buf: &[u8]) -> Result<usize, ParseError> {
        ensure!(!self.state.is_error(), ParseError::AlreadyFailed);

        let mut read = 0;
        loop {
            let state = self.state;
            let remaining = &buf[read..];

            let step = match state {
                ParseState::Init => self.decode_request_line(remaining),
                ParseState::Headers => self.decode_headers(remaining),
                ParseState::Body => self.decode_body(remaining),
                ParseState::Done => break,
                ParseState::Error => Err(ParseError::AlreadyFailed),
            };

            let consumed = match step {
                Ok(consumed) => consumed,
                Err(e) => {
                    debug!(state = %state, cause = %e, "request parse failed");
                    self.state = ParseState::Error;
                    return Err(e);
                }
            };

            read += consumed;

            // the current step is waiting for more bytes
            if consumed == 0 && self.state == state {
                break;
            }
        }

        trace!(consumed = read, available = buf.len(), state = %self.state, "parsed request bytes");
        Ok(read)
    }

    /// Returns the parsed request.
    ///
    /// # Errors
    ///
    /// [`ParseError::Incomplete`] before the request is done,
    /// [`ParseError::AlreadyFailed`] if parsing failed.
    pub fn finish(self) -> Result<Request, ParseError> {
        match self.state {
            ParseState::Done => {}
            ParseState::Error => return Err(ParseError::AlreadyFailed),
            ParseState::Init | ParseState::Headers | ParseState::Body => return Err(ParseError::Incomplete),
        }

        let request_line = self.request_line.ok_or(ParseError::Incomplete)?;
        let body = self.body.map(LengthDecoder::into_bytes).unwrap_or_default();

        Ok(Request::new(request_line, self.headers, body))
    }

    /// Takes the finished request and leaves a fresh decoder with the same config behind.
    fn take_request(&mut self) -> Result<Request, ParseError> {
        let fresh = RequestDecoder::with_config(self.config);
        std::mem::replace(self, fresh).finish()
    }

    fn decode_request_line(&mut self, buf: &[u8]) -> Result<usize, ParseError> {
        let max_size = self.config.max_header_bytes;

        let Some((line, line_len)) = self.scanner.next_line(buf) else {
            ensure!(buf.len() <= max_size, ParseError::too_large_header(buf.len(), max_size));
            return Ok(0);
        };
        ensure!(line_len <= max_size, ParseError::too_large_header(line_len, max_size));

        let request_line = parse_request_line(line)?;
        debug!(method = request_line.method(), target = request_line.target(), "parsed request line");

        self.request_line = Some(request_line);
        self.header_bytes = line_len;
        self.state = ParseState::Headers;
        Ok(line_len)
    }

    fn decode_headers(&mut self, buf: &[u8]) -> Result<usize, ParseError> {
        let max_size = self.config.max_header_bytes;
        let max_num = self.config.max_header_count;

        let progress = self.headers.parse(buf)?;
        self.header_bytes += progress.consumed;

        ensure!(self.headers.line_count() <= max_num, ParseError::too_many_headers(max_num));

        if !progress.complete {
            // everything after the consumed lines belongs to one unfinished header line
            let pending = self.header_bytes + (buf.len() - progress.consumed);
            ensure!(pending <= max_size, ParseError::too_large_header(pending, max_size));
            return Ok(progress.consumed);
        }
        ensure!(self.header_bytes <= max_size, ParseError::too_large_header(self.header_bytes, max_size));

        let length = self.body_length()?;
        trace!(header_count = self.headers.len(), body_size = length, "parsed request headers");

        if length > 0 {
            self.body = Some(LengthDecoder::new(length));
            self.state = ParseState::Body;
        } else {
            self.state = ParseState::Done;
        }

        Ok(progress.consumed)
    }

    fn decode_body(&mut self, buf: &[u8]) -> Result<usize, ParseError> {
        let Some(body) = self.body.as_mut() else {
            return Err(ParseError::not_implemented("body without a content-length"));
        };

        let taken = body.decode(buf);
        if body.is_complete() {
            trace!(body_size = body.received(), "parsed request body");
            self.state = ParseState::Done;
        }

        Ok(taken)
    }

    /// Resolves the body framing once the header section is complete.
    ///
    /// Only `Content-Length` framing is supported; any `Transfer-Encoding` fails
    /// rather than being read as a fixed-length body.
    fn body_length(&self) -> Result<usize, ParseError> {
        let headers = self.headers.as_map();

        if let Some(te) = headers.get(TRANSFER_ENCODING) {
            return Err(ParseError::not_implemented(format!("transfer-encoding: {}", String::from_utf8_lossy(te.as_bytes()))));
        }

        let Some(cl_value) = headers.get(CONTENT_LENGTH) else {
            return Ok(0);
        };

        let parsed = cl_value.to_str().ok().and_then(|value| value.trim().parse::<u64>().ok());
        let length = match (parsed, self.config.content_length) {
            (Some(length), _) => length,
            (None, ContentLengthPolicy::Lenient) => {
                warn!(value = ?cl_value, "unparsable content-length, treating request as bodiless");
                0
            }
            (None, ContentLengthPolicy::Strict) => {
                return Err(ParseError::invalid_content_length(format!(
                    "value {:?} is not a non-negative integer",
                    String::from_utf8_lossy(cl_value.as_bytes())
                )));
            }
        };

        let max_size = self.config.max_body_bytes;
        usize::try_from(length)
            .ok()
            .filter(|length| *length <= max_size)
            .ok_or_else(|| ParseError::body_too_large(length, max_size))
    }
}

impl Default for RequestDecoder {
    fn default() -> Self {
        Self::with_config(ParserConfig::default())
    }
}

/// Lets the state machine drive a `FramedRead` over any async reader.
///
/// The `BytesMut` plays the role of the working buffer: consumed bytes are
/// advanced past, and a request that still needs more data once
/// [`ParserConfig::buffer_capacity`] bytes are buffered fails with
/// [`ParseError::BufferExhausted`].
impl Decoder for RequestDecoder {
    type Item = Request;
    type Error = ParseError;

    /// Attempts to decode an HTTP request from the provided buffer
    ///
    /// # Returns
    ///
    /// - `Ok(Some(request))`: a complete request, the decoder is reset for reuse
    /// - `Ok(None)`: Need more data to proceed
    /// - `Err(_)`: Encountered a parsing error
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let consumed = self.parse(&src[..])?;
        src.advance(consumed);

        if self.state.is_done() {
            return self.take_request().map(Some);
        }

        let capacity = self.config.buffer_capacity;
        ensure!(src.len() < capacity, ParseError::buffer_exhausted(capacity));

        Ok(None)
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(request) => Ok(Some(request)),
            // connection closed between requests
            None if src.is_empty() && self.state == ParseState::Init => Ok(None),
            None => Err(ParseError::unexpected_eof(src.len())),
        }
    }
}
