use std::io::Read;

use tracing::{debug, trace};

use crate::codec::RequestDecoder;
use crate::config::ParserConfig;
use crate::connection::read_buffer::ReadBuffer;
use crate::ensure;
use crate::protocol::{ParseError, Request};

/// Reads requests from a blocking byte source.
///
/// `StreamReader` owns one bounded [`ReadBuffer`] that is reused for every
/// request it reads. Each request gets a fresh [`RequestDecoder`]; the loop reads
/// into the free tail of the buffer, hands the whole unconsumed region to the
/// decoder and shifts whatever the decoder left to the front, until the request
/// is done or fails.
///
/// Reads are never retried. Timeouts and cancellation belong to the source, e.g.
/// [`TcpStream::set_read_timeout`](std::net::TcpStream::set_read_timeout); their
/// errors surface as [`ParseError::ReadFailed`].
#[derive(Debug)]
pub struct StreamReader {
    config: ParserConfig,
    buffer: ReadBuffer,
}

impl StreamReader {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config, buffer: ReadBuffer::with_capacity(config.buffer_capacity) }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Reads exactly one request from `source`.
    ///
    /// Bytes received after the end of the request are discarded.
    ///
    /// # Errors
    ///
    /// - [`ParseError::ReadFailed`] if the source fails
    /// - [`ParseError::UnexpectedEof`] if the source ends before the request is complete
    /// - [`ParseError::BufferExhausted`] if the buffer fills up while the decoder
    ///   still needs more data
    /// - any protocol error reported by the [`RequestDecoder`]
    pub fn read_request<R: Read>(&mut self, source: &mut R) -> Result<Request, ParseError> {
        self.buffer.clear();
        let mut decoder = RequestDecoder::with_config(self.config);

        while !decoder.state().is_terminal() {
            let capacity = self.buffer.capacity();
            ensure!(!self.buffer.is_full(), ParseError::buffer_exhausted(capacity));

            let read = match source.read(self.buffer.unfilled_mut()) {
                Ok(0) => return Err(ParseError::unexpected_eof(self.buffer.len())),
                Ok(read) => read,
                Err(e) => {
                    debug!(cause = %e, state = %decoder.state(), "failed to read request bytes");
                    return Err(ParseError::read_failed(e));
                }
            };
            self.buffer.advance(read)?;

            let consumed = decoder.parse(self.buffer.filled())?;
            self.buffer.consume(consumed);
            trace!(read, consumed, buffered = self.buffer.len(), "refilled request buffer");
        }

        if !self.buffer.is_empty() {
            debug!(discarded = self.buffer.len(), "discarding bytes received after the request");
            self.buffer.clear();
        }

        decoder.finish()
    }
}

impl Default for StreamReader {
    fn default() -> Self {
        Self::with_config(ParserConfig::default())
    }
}

/// Reads one request from `source` with the default [`ParserConfig`].
///
/// ```
/// let mut source = &b"GET /coffee HTTP/1.1\r\nHost: localhost\r\n\r\n"[..];
/// let request = micro_http_parser::read_request(&mut source).unwrap();
///
/// assert_eq!(request.method(), "GET");
/// assert_eq!(request.headers().get("host"), Some("localhost"));
/// ```
///
/// # Errors
///
/// See [`StreamReader::read_request`].
pub fn read_request<R: Read>(source: &mut R) -> Result<Request, ParseError> {
    StreamReader::new().read_request(source)
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::protocol::RequestLine;

    /// Hands out at most `chunk_size` bytes per read.
    struct ChunkReader {
        data: Vec<u8>,
        pos: usize,
        chunk_size: usize,
    }

    impl ChunkReader {
        fn new(data: &[u8], chunk_size: usize) -> Self {
            Self { data: data.to_vec(), pos: 0, chunk_size }
        }
    }

    impl Read for ChunkReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let end = (self.pos + self.chunk_size).min(self.data.len());
            let n = (end - self.pos).min(buf.len());
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted"))
        }
    }

    #[test]
    fn good_get_request_line() {
        let mut reader = ChunkReader::new(b"GET / HTTP/1.1\r\nHost: localhost:42069\r\nUser-Agent: curl/7.81.0\r\nAccept: */*\r\n\r\n", 3);
        let request = read_request(&mut reader).unwrap();

        assert_eq!(request.request_line(), &RequestLine::new("GET", "/", "1.1"));
        assert_eq!(request.headers().get("host"), Some("localhost:42069"));
        assert_eq!(request.headers().get("user-agent"), Some("curl/7.81.0"));
        assert_eq!(request.headers().get("accept"), Some("*/*"));
    }

    #[test]
    fn good_get_request_line_with_path() {
        let mut reader = ChunkReader::new(b"GET /coffee HTTP/1.1\r\nHost: localhost:42069\r\n\r\n", 1);
        let request = read_request(&mut reader).unwrap();

        assert_eq!(request.target(), "/coffee");
        assert!(request.body().is_empty());
    }

    #[test]
    fn standard_body() {
        let mut reader = ChunkReader::new(
            b"POST /submit HTTP/1.1\r\nHost: localhost:42069\r\nContent-Length: 13\r\n\r\nhello world!\n",
            3,
        );
        let request = read_request(&mut reader).unwrap();

        assert_eq!(&request.body()[..], b"hello world!\n");
    }

    #[test]
    fn body_shorter_than_reported_content_length() {
        let mut reader = ChunkReader::new(b"POST /submit HTTP/1.1\r\nHost: localhost:42069\r\nContent-Length: 20\r\n\r\npartial content", 3);
        let result = read_request(&mut reader);

        assert!(matches!(result, Err(ParseError::UnexpectedEof { buffered: 0 })));
    }

    #[test]
    fn unexpected_eof_in_headers() {
        let mut reader = ChunkReader::new(b"GET / HTTP/1.1\r\nHost: loc", 64);
        let result = read_request(&mut reader);

        assert!(matches!(result, Err(ParseError::UnexpectedEof { buffered: 9 })));
    }

    #[test]
    fn invalid_number_of_parts_in_request_line() {
        let mut reader = ChunkReader::new(b"/coffee HTTP/1.1\r\nHost: localhost:42069\r\n\r\n", 3);
        assert!(matches!(read_request(&mut reader), Err(ParseError::BadRequestLine { .. })));
    }

    #[test]
    fn unsupported_version() {
        let mut reader = ChunkReader::new(b"GET /path HTTP/2.0\r\nHost: localhost\r\n\r\n", 7);
        assert!(matches!(read_request(&mut reader), Err(ParseError::UnsupportedVersion { .. })));
    }

    #[test]
    fn buffer_exhausted_by_long_line() {
        let config = ParserConfig { buffer_capacity: 32, ..ParserConfig::DEFAULT };
        let mut stream_reader = StreamReader::with_config(config);

        let mut reader = ChunkReader::new(b"GET / HTTP/1.1\r\nX-Long-Header: aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa\r\n\r\n", 5);
        let result = stream_reader.read_request(&mut reader);

        assert!(matches!(result, Err(ParseError::BufferExhausted { capacity: 32 })));
    }

    #[test]
    fn small_buffer_streams_large_body() {
        let body = vec![b'x'; 4096];
        let mut raw = format!("PUT /upload HTTP/1.1\r\nContent-Length: {}\r\n\r\n", body.len()).into_bytes();
        raw.extend_from_slice(&body);

        let config = ParserConfig { buffer_capacity: 64, ..ParserConfig::DEFAULT };
        let mut stream_reader = StreamReader::with_config(config);
        let request = stream_reader.read_request(&mut ChunkReader::new(&raw, 50)).unwrap();

        assert_eq!(&request.body()[..], &body[..]);
    }

    #[test]
    fn read_errors_are_not_retried() {
        let result = read_request(&mut FailingReader);

        match result {
            Err(ParseError::ReadFailed { source }) => assert_eq!(source.kind(), io::ErrorKind::Interrupted),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn reader_is_reusable() {
        let mut stream_reader = StreamReader::new();

        let first = stream_reader.read_request(&mut ChunkReader::new(b"GET /one HTTP/1.1\r\n\r\ntrailing", 4)).unwrap();
        let second = stream_reader.read_request(&mut ChunkReader::new(b"GET /two HTTP/1.1\r\n\r\n", 4)).unwrap();

        assert_eq!(first.target(), "/one");
        assert_eq!(second.target(), "/two");
    }
}
