use std::fmt;

/// Progress of a single request through the decoder.
///
/// States only move forward (`Init` → `Headers` → `Body` → `Done`), except that any
/// state may fall into `Error`. Both `Done` and `Error` are terminal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ParseState {
    /// Waiting for the request line
    #[default]
    Init,
    /// Request line parsed, reading header lines
    Headers,
    /// Headers complete, accumulating a fixed-length body
    Body,
    /// A full request has been parsed
    Done,
    /// Parsing failed, the request is abandoned
    Error,
}

impl ParseState {
    /// Returns true when no further input can change the state.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, ParseState::Done | ParseState::Error)
    }

    #[inline]
    pub fn is_done(self) -> bool {
        matches!(self, ParseState::Done)
    }

    #[inline]
    pub fn is_error(self) -> bool {
        matches!(self, ParseState::Error)
    }
}

impl fmt::Display for ParseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParseState::Init => "init",
            ParseState::Headers => "headers",
            ParseState::Body => "body",
            ParseState::Done => "done",
            ParseState::Error => "error",
        };
        f.write_str(name)
    }
}
