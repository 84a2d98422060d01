//! An incremental HTTP/1.1 request parser
//!
//! This crate parses requests as their bytes arrive, without waiting for the whole
//! message to be buffered. The request line, header section and body may be split
//! across any number of reads of any size; the parser keeps its progress between
//! calls and never scans a byte for a line terminator twice.
//!
//! # Features
//!
//! - Strict HTTP/1.1 request line parsing (`METHOD SP TARGET SP HTTP/1.1`)
//! - Incremental header parsing into a lower-cased header map
//! - `Content-Length` framed bodies, pre-allocated to the declared length
//! - A bounded, reusable read buffer that fails cleanly instead of overflowing
//! - Blocking readers via [`std::io::Read`], async readers via `tokio`
//! - Closed error enumeration, every failure terminal for the request
//!
//! # Example
//!
//! ```no_run
//! use std::net::TcpListener;
//! use micro_http_parser::connection::StreamReader;
//! use tracing::{error, info};
//!
//! let listener = TcpListener::bind("127.0.0.1:42069").unwrap();
//! for stream in listener.incoming() {
//!     let mut stream = stream.unwrap();
//!     let mut reader = StreamReader::new();
//!     match reader.read_request(&mut stream) {
//!         Ok(request) => info!(method = request.method(), target = request.target(), "request received"),
//!         Err(e) => error!(cause = %e, "bad request, closing connection"),
//!     }
//! }
//! ```
//!
//! # Architecture
//!
//! - [`codec`]: the request state machine and the parsers it delegates to
//! - [`connection`]: the refill loops feeding the state machine from byte sources
//! - [`protocol`]: request types, parse state and errors
//! - [`config`]: limits and policies
//!
//! # Limitations
//!
//! - HTTP/1.1 only
//! - No chunked transfer encoding; such requests fail with
//!   [`ParseError::NotImplemented`](protocol::ParseError::NotImplemented)
//! - One request per connection, bytes after it are discarded

pub mod codec;
pub mod config;
pub mod connection;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;

pub use codec::{HeaderStore, RequestDecoder};
pub use config::{ContentLengthPolicy, ParserConfig};
pub use connection::{StreamReader, read_request, read_request_async};
pub use protocol::{ParseError, ParseState, Request, RequestLine};
