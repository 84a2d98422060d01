//! Feeding the request decoder from byte streams
//!
//! This module owns the refill loop: it pulls bytes from a byte source into a
//! bounded buffer, hands the buffered region to the
//! [`RequestDecoder`](crate::codec::RequestDecoder) and compacts what the
//! decoder left unconsumed.
//!
//! # Components
//!
//! - [`StreamReader`]: blocking refill loop over [`std::io::Read`]
//! - [`ReadBuffer`]: the fixed-capacity working buffer it owns
//! - [`read_request_async`]: the same decoder driven by a `FramedRead` over
//!   [`tokio::io::AsyncRead`]
//!
//! Each connection gets its own reader; readers share nothing, so independent
//! connections can be served from independent threads or tasks without locking.

mod framed_reader;
mod read_buffer;
mod stream_reader;

pub use framed_reader::read_request_async;
pub use read_buffer::ReadBuffer;
pub use stream_reader::{StreamReader, read_request};
