//! Core protocol types.
//!
//! - **Requests** ([`request`]): [`RequestLine`] and the complete [`Request`]
//! - **Parse progress** ([`state`]): the five-state [`ParseState`] of a decoder
//! - **Error handling** ([`error`]): the closed [`ParseError`] enumeration
//!
//! The header map of a request is the [`HeaderStore`](crate::codec::HeaderStore),
//! which lives with the codec because it owns its own line parser.

mod request;
pub use request::Request;
pub use request::RequestLine;

mod state;
pub use state::ParseState;

mod error;
pub use error::ParseError;
