//! Decoder for request bodies framed by a Content-Length header.
//!
//! See [RFC 7230 Section 3.3.2](https://tools.ietf.org/html/rfc7230#section-3.3.2).

use std::cmp;

use bytes::{Bytes, BytesMut};

/// Accumulates a body of known length.
///
/// The accumulator is allocated once with the declared length, so appending
/// fragments never reallocates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthDecoder {
    /// Declared content length
    length: usize,
    body: BytesMut,
}

impl LengthDecoder {
    /// Creates a new `LengthDecoder` instance.
    ///
    /// # Arguments
    /// * `length` - The total content length to decode, specified by Content-Length header
    pub fn new(length: usize) -> Self {
        Self { length, body: BytesMut::with_capacity(length) }
    }

    /// Takes at most the remaining body bytes from the front of `src`.
    ///
    /// Returns the number of bytes taken, zero when `src` is empty or the body is
    /// already complete.
    pub fn decode(&mut self, src: &[u8]) -> usize {
        let len = cmp::min(self.remaining(), src.len());
        self.body.extend_from_slice(&src[..len]);
        len
    }

    /// Bytes still missing from the body
    #[inline]
    pub fn remaining(&self) -> usize {
        self.length - self.body.len()
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.body.len() == self.length
    }

    #[inline]
    pub fn received(&self) -> usize {
        self.body.len()
    }

    pub fn into_bytes(self) -> Bytes {
        self.body.freeze()
    }
}
