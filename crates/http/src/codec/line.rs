//! CRLF line scanning shared by the request line and header parsers.
//!
//! Both parsers are handed the same unconsumed prefix again and again while more
//! bytes are appended behind it. [`LineScanner`] remembers how far the previous
//! search got, so each byte is searched for a terminator only once no matter how
//! small the fragments are.

use memchr::memmem;

pub(crate) const CRLF: &[u8] = b"\r\n";

#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct LineScanner {
    /// Bytes at the front of the pending line already known to hold no CRLF
    searched: usize,
}

impl LineScanner {
    /// Finds the next CRLF terminated line at the start of `buf`.
    ///
    /// Returns the line without its terminator and the number of bytes the line
    /// occupies including the terminator, or `None` if no terminator has arrived yet.
    /// After a `None`, the next call must receive the same bytes again as its prefix.
    pub(crate) fn next_line<'a>(&mut self, buf: &'a [u8]) -> Option<(&'a [u8], usize)> {
        // step back one byte, the '\r' may already be there without its '\n'
        let from = self.searched.saturating_sub(1).min(buf.len());

        if let Some(pos) = memmem::find(&buf[from..], CRLF) {
            let end = from + pos;
            self.searched = 0;
            Some((&buf[..end], end + CRLF.len()))
        } else {
            self.searched = buf.len();
            None
        }
    }

    pub(crate) fn reset(&mut self) {
        self.searched = 0;
    }
}
