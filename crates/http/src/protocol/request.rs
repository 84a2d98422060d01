//! Parsed request types.
//!
//! A [`Request`] is only built once the decoder reached
//! [`ParseState::Done`](crate::protocol::ParseState::Done), so every value of this
//! type holds a complete message.

use bytes::Bytes;
use http::{Method, Uri, Version};

use crate::codec::HeaderStore;
use crate::protocol::ParseError;

/// The first line of a request: `METHOD SP TARGET SP HTTP/1.1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    method: String,
    target: String,
    http_version: String,
}

impl RequestLine {
    pub fn new<M, T, V>(method: M, target: T, http_version: V) -> Self
    where
        M: Into<String>,
        T: Into<String>,
        V: Into<String>,
    {
        Self { method: method.into(), target: target.into(), http_version: http_version.into() }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// The request target, kept exactly as received.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Version number without the `HTTP/` prefix, always `"1.1"` for parsed requests.
    pub fn http_version(&self) -> &str {
        &self.http_version
    }
}

/// A complete HTTP/1.1 request.
#[derive(Debug, Clone)]
pub struct Request {
    request_line: RequestLine,
    headers: HeaderStore,
    body: Bytes,
}

impl Request {
    pub(crate) fn new(request_line: RequestLine, headers: HeaderStore, body: Bytes) -> Self {
        Self { request_line, headers, body }
    }

    pub fn request_line(&self) -> &RequestLine {
        &self.request_line
    }

    pub fn method(&self) -> &str {
        self.request_line.method()
    }

    pub fn target(&self) -> &str {
        self.request_line.target()
    }

    pub fn headers(&self) -> &HeaderStore {
        &self.headers
    }

    /// The body bytes, empty when the request declared no content length.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn into_parts(self) -> (RequestLine, HeaderStore, Bytes) {
        (self.request_line, self.headers, self.body)
    }

    /// Converts into an [`http::Request`], validating the method and target.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidMethod`] or [`ParseError::InvalidUri`] when the
    /// request line is not accepted by the `http` crate.
    pub fn into_http(self) -> Result<http::Request<Bytes>, ParseError> {
        let method = Method::from_bytes(self.request_line.method.as_bytes()).map_err(|_e| ParseError::InvalidMethod)?;
        let uri = self.request_line.target.parse::<Uri>().map_err(|_e| ParseError::InvalidUri)?;

        let mut request = http::Request::new(self.body);
        *request.method_mut() = method;
        *request.uri_mut() = uri;
        *request.version_mut() = Version::HTTP_11;
        *request.headers_mut() = self.headers.into_map();

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(raw: &[u8]) -> HeaderStore {
        let mut headers = HeaderStore::new();
        assert!(headers.parse(raw).unwrap().complete);
        headers
    }

    #[test]
    fn into_http() {
        let request = Request::new(
            RequestLine::new("POST", "/coffee?sugar=2", "1.1"),
            headers(b"Host: localhost:42069\r\nContent-Length: 4\r\n\r\n"),
            Bytes::from_static(b"brew"),
        );

        let request = request.into_http().unwrap();

        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.uri().path(), "/coffee");
        assert_eq!(request.uri().query(), Some("sugar=2"));
        assert_eq!(request.version(), Version::HTTP_11);
        assert_eq!(request.headers().get(http::header::HOST).unwrap(), "localhost:42069");
        assert_eq!(request.headers().get(http::header::CONTENT_LENGTH).unwrap(), "4");
        assert_eq!(&request.body()[..], b"brew");
    }

    #[test]
    fn into_http_rejects_bad_uri() {
        let request = Request::new(RequestLine::new("GET", "/a b", "1.1"), HeaderStore::new(), Bytes::new());
        assert!(matches!(request.into_http(), Err(ParseError::InvalidUri)));
    }

    #[test]
    fn accessors() {
        let request = Request::new(RequestLine::new("GET", "/", "1.1"), headers(b"Host: a\r\n\r\n"), Bytes::new());

        assert_eq!(request.method(), "GET");
        assert_eq!(request.target(), "/");
        assert_eq!(request.request_line().http_version(), "1.1");
        assert_eq!(request.headers().get("host"), Some("a"));
        assert!(request.body().is_empty());

        let (line, headers, body) = request.into_parts();
        assert_eq!(line, RequestLine::new("GET", "/", "1.1"));
        assert_eq!(headers.len(), 1);
        assert!(body.is_empty());
    }
}
