//! HTTP body handling
//!
//! Only bodies framed by `Content-Length` are decoded. Any other framing is
//! rejected by the request decoder before a body decoder is created.
//!
//! - [`LengthDecoder`]: accumulates a fixed-length payload into a pre-sized buffer

mod length_decoder;

pub use length_decoder::LengthDecoder;
