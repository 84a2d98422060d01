//! HTTP header section parsing
//!
//! - [`HeaderStore`]: owns the lower-cased name to value mapping of a request and
//!   fills it from raw bytes, one CRLF terminated line at a time
//! - [`HeaderProgress`]: bytes consumed and completion flag of one parse call

mod header_store;

pub use header_store::{HeaderProgress, HeaderStore};
