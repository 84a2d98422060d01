//! HTTP codec module for decoding HTTP/1.1 requests
//!
//! This module holds the incremental request state machine and the pieces it
//! delegates to. Nothing here performs I/O: every parser takes a byte slice and
//! reports how much of it was consumed, which is what lets the
//! [`connection`](crate::connection) module feed it from arbitrarily fragmented
//! reads.
//!
//! # Architecture
//!
//! - [`RequestDecoder`]: the request state machine (`Init` → `Headers` → `Body` → `Done`)
//! - Header parsing via the [`header`] module ([`HeaderStore`])
//! - Payload accumulation via the [`body`] module ([`LengthDecoder`])
//!
//! # Example
//!
//! ```
//! use micro_http_parser::codec::RequestDecoder;
//! use tokio_util::codec::Decoder;
//! use bytes::BytesMut;
//!
//! let mut decoder = RequestDecoder::new();
//! let mut buffer = BytesMut::from(&b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n"[..]);
//! let request = decoder.decode(&mut buffer).unwrap().unwrap();
//! assert_eq!(request.method(), "GET");
//! ```

pub mod body;
pub mod header;
mod line;
mod request_decoder;
mod request_line;

pub use body::LengthDecoder;
pub use header::{HeaderProgress, HeaderStore};
pub use request_decoder::RequestDecoder;
