//! Request line parsing.
//!
//! The grammar is deliberately strict: tokens are separated by exactly one space
//! and the only accepted version is `HTTP/1.1`.
//!
//! ```text
//! METHOD SP TARGET SP "HTTP/1.1"
//! ```

use std::str;

use http::Method;

use crate::ensure;
use crate::protocol::{ParseError, RequestLine};

const HTTP_NAME: &str = "HTTP";
const HTTP_VERSION: &str = "1.1";

/// Parses a request line with its CRLF already stripped.
pub(crate) fn parse_request_line(line: &[u8]) -> Result<RequestLine, ParseError> {
    let parts: Vec<&[u8]> = line.split(|b| *b == b' ').collect();
    let [method, target, version] = parts[..] else {
        return Err(ParseError::bad_request_line(format!(
            "expected 3 space separated parts, found {} in {:?}",
            parts.len(),
            String::from_utf8_lossy(line)
        )));
    };

    ensure!(
        !method.is_empty() && !target.is_empty(),
        ParseError::bad_request_line(format!("empty token in {:?}", String::from_utf8_lossy(line)))
    );

    let mut version_parts = version.split(|b| *b == b'/');
    let supported = version_parts.next() == Some(HTTP_NAME.as_bytes())
        && version_parts.next() == Some(HTTP_VERSION.as_bytes())
        && version_parts.next().is_none();
    ensure!(supported, ParseError::unsupported_version(String::from_utf8_lossy(version)));

    // Method::from_bytes only accepts token characters
    Method::from_bytes(method).map_err(|e| ParseError::bad_request_line(format!("method: {e}")))?;
    let method = str::from_utf8(method).map_err(|e| ParseError::bad_request_line(format!("method: {e}")))?;
    let target = str::from_utf8(target).map_err(|e| ParseError::bad_request_line(format!("target: {e}")))?;

    Ok(RequestLine::new(method, target, HTTP_VERSION))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn good_get_request_line() {
        let line = parse_request_line(b"GET / HTTP/1.1").unwrap();
        assert_eq!(line, RequestLine::new("GET", "/", "1.1"));
    }

    #[test]
    fn good_request_line_with_path() {
        let line = parse_request_line(b"POST /coffee?milk=oat HTTP/1.1").unwrap();
        assert_eq!(line.method(), "POST");
        assert_eq!(line.target(), "/coffee?milk=oat");
        assert_eq!(line.http_version(), "1.1");
    }

    #[test]
    fn wrong_number_of_parts() {
        for line in [&b"GET /path"[..], b"/coffee HTTP/1.1", b"GET / HTTP/1.1 extra", b""] {
            assert!(matches!(parse_request_line(line), Err(ParseError::BadRequestLine { .. })), "{line:?}");
        }
    }

    #[test]
    fn repeated_spaces_and_tabs_are_not_separators() {
        for line in [&b"GET  /path HTTP/1.1"[..], b"GET\t/path\tHTTP/1.1", b" GET / HTTP/1.1"] {
            assert!(matches!(parse_request_line(line), Err(ParseError::BadRequestLine { .. })), "{line:?}");
        }
    }

    #[test]
    fn empty_tokens_are_rejected() {
        assert!(matches!(parse_request_line(b" / HTTP/1.1"), Err(ParseError::BadRequestLine { .. })));
        assert!(matches!(parse_request_line(b"GET  HTTP/1.1"), Err(ParseError::BadRequestLine { .. })));
    }

    #[test]
    fn unsupported_versions() {
        for line in [&b"GET /path HTTP/2.0"[..], b"GET / HTTP/1.0", b"GET / HTTPS/1.1", b"GET / HTTP/1.1/2", b"GET / 1.1", b"GET / http/1.1"] {
            assert!(matches!(parse_request_line(line), Err(ParseError::UnsupportedVersion { .. })), "{line:?}");
        }
    }

    #[test]
    fn unsupported_version_keeps_the_token() {
        match parse_request_line(b"GET /path HTTP/2.0") {
            Err(ParseError::UnsupportedVersion { version }) => assert_eq!(version, "HTTP/2.0"),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn invalid_method_characters() {
        assert!(matches!(parse_request_line(b"GE(T / HTTP/1.1"), Err(ParseError::BadRequestLine { .. })));
    }

    #[test]
    fn non_utf8_target() {
        assert!(matches!(parse_request_line(b"GET /\xff HTTP/1.1"), Err(ParseError::BadRequestLine { .. })));
    }
}
