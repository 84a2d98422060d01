//! Header storage and its incremental line parser.
//!
//! Header lines are parsed one CRLF terminated line at a time, so the store can be
//! fed whatever fraction of the header section has arrived so far:
//!
//! ```text
//! header-name ":" OWS header-value OWS CRLF
//! ```
//!
//! Names are validated as HTTP tokens and lower-cased by [`HeaderName`]. A name that
//! appears more than once keeps a single value, the later values joined to the
//! earlier ones with `", "`.

use http::header::Iter;
use http::{HeaderMap, HeaderName, HeaderValue};
use tracing::trace;

use crate::codec::line::LineScanner;
use crate::ensure;
use crate::protocol::ParseError;

/// Result of feeding bytes to [`HeaderStore::parse`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HeaderProgress {
    /// Bytes taken from the front of the input
    pub consumed: usize,
    /// Whether the empty line closing the header section was consumed
    pub complete: bool,
}

impl HeaderProgress {
    fn partial(consumed: usize) -> Self {
        Self { consumed, complete: false }
    }

    fn complete(consumed: usize) -> Self {
        Self { consumed, complete: true }
    }
}

/// Lower-cased header name to value mapping, filled line by line.
#[derive(Debug, Clone, Default)]
pub struct HeaderStore {
    map: HeaderMap,
    /// Header lines accepted so far, repeated names included
    lines: usize,
    scanner: LineScanner,
}

impl HeaderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses every complete header line at the front of `buf`.
    ///
    /// Returns how many bytes were consumed and whether the header section is
    /// complete. Zero bytes consumed without an error means more data is needed.
    /// Unconsumed bytes must be passed again, as the prefix of the next call.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidHeader`] if a line is not a valid header field.
    pub fn parse(&mut self, buf: &[u8]) -> Result<HeaderProgress, ParseError> {
        let mut consumed = 0;

        loop {
            let Some((line, line_len)) = self.scanner.next_line(&buf[consumed..]) else {
                return Ok(HeaderProgress::partial(consumed));
            };
            consumed += line_len;

            if line.is_empty() {
                trace!(header_count = self.lines, "header section complete");
                return Ok(HeaderProgress::complete(consumed));
            }

            self.insert_line(line)?;
        }
    }

    fn insert_line(&mut self, line: &[u8]) -> Result<(), ParseError> {
        let colon = memchr::memchr(b':', line)
            .ok_or_else(|| ParseError::invalid_header(format!("missing colon in {:?}", String::from_utf8_lossy(line))))?;
        let (raw_name, raw_value) = (&line[..colon], &line[colon + 1..]);

        ensure!(!raw_name.is_empty(), ParseError::invalid_header("empty header name"));
        ensure!(
            !is_ows(raw_name[0]) && !is_ows(raw_name[raw_name.len() - 1]),
            ParseError::invalid_header(format!("whitespace around header name {:?}", String::from_utf8_lossy(raw_name)))
        );

        let name = HeaderName::from_bytes(raw_name).map_err(ParseError::invalid_header)?;
        let value = trim_ows(raw_value);

        let value = match self.map.get(&name) {
            Some(existing) => {
                let mut joined = Vec::with_capacity(existing.len() + 2 + value.len());
                joined.extend_from_slice(existing.as_bytes());
                joined.extend_from_slice(b", ");
                joined.extend_from_slice(value);
                HeaderValue::from_bytes(&joined)
            }
            None => HeaderValue::from_bytes(value),
        }
        .map_err(ParseError::invalid_header)?;

        self.map.insert(name, value);
        self.lines += 1;
        Ok(())
    }

    /// Looks a header up by name, ignoring case.
    ///
    /// Returns `None` if the header is absent or its value is not visible ASCII.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Number of distinct header names.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Number of header lines parsed, counting repeated names once per line.
    pub fn line_count(&self) -> usize {
        self.lines
    }

    pub fn iter(&self) -> Iter<'_, HeaderValue> {
        self.map.iter()
    }

    pub fn as_map(&self) -> &HeaderMap {
        &self.map
    }

    pub fn into_map(self) -> HeaderMap {
        self.map
    }
}

impl<'a> IntoIterator for &'a HeaderStore {
    type Item = (&'a HeaderName, &'a HeaderValue);
    type IntoIter = Iter<'a, HeaderValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[inline]
fn is_ows(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

fn trim_ows(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| !is_ows(*b)).unwrap_or(bytes.len());
    let end = bytes.iter().rposition(|b| !is_ows(*b)).map_or(start, |pos| pos + 1);
    &bytes[start..end]
}
