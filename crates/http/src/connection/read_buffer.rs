//! Fixed-capacity working buffer for the refill loop.
//!
//! The buffer behaves like a queue: bytes read from the source are appended at
//! the tail, bytes the parser consumed are dropped from the head and the
//! remainder shifted forward. It never grows, so a request that keeps more
//! unconsumed bytes than the capacity cannot be parsed with it; the refill loop
//! reports that as [`ParseError::BufferExhausted`] instead of writing past the end.

use crate::ensure;
use crate::protocol::ParseError;

#[derive(Debug)]
pub struct ReadBuffer {
    buf: Box<[u8]>,
    filled: usize,
}

impl ReadBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { buf: vec![0; capacity].into_boxed_slice(), filled: 0 }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Bytes read but not consumed yet.
    pub fn filled(&self) -> &[u8] {
        &self.buf[..self.filled]
    }

    pub fn len(&self) -> usize {
        self.filled
    }

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    /// Free space at the tail, where the next read lands.
    pub fn unfilled_mut(&mut self) -> &mut [u8] {
        &mut self.buf[self.filled..]
    }

    pub fn is_full(&self) -> bool {
        self.filled == self.buf.len()
    }

    /// Marks `n` bytes of the tail as filled by a read.
    ///
    /// # Errors
    ///
    /// Fails if `n` exceeds the free space, which only a misbehaving reader reports.
    pub fn advance(&mut self, n: usize) -> Result<(), ParseError> {
        let free = self.buf.len() - self.filled;
        ensure!(
            n <= free,
            ParseError::read_failed(std::io::Error::other(format!("reader reported {n} bytes for a {free} byte buffer")))
        );
        self.filled += n;
        Ok(())
    }

    /// Drops `n` bytes from the head, shifting the rest to the front.
    pub fn consume(&mut self, n: usize) {
        debug_assert!(n <= self.filled, "consumed {n} of {} filled bytes", self.filled);
        let n = n.min(self.filled);
        self.buf.copy_within(n..self.filled, 0);
        self.filled -= n;
    }

    pub fn clear(&mut self) {
        self.filled = 0;
    }
}
