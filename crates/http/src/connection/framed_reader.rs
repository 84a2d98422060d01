use futures::StreamExt;
use tokio::io::AsyncRead;
use tokio_util::codec::FramedRead;
use tracing::{debug, info};

use crate::codec::RequestDecoder;
use crate::config::ParserConfig;
use crate::protocol::{ParseError, Request};

/// Reads exactly one request from an async reader.
///
/// The [`RequestDecoder`] is driven through a [`FramedRead`] whose buffer starts
/// at [`ParserConfig::buffer_capacity`]; the decoder refuses to let it hold more
/// unconsumed bytes than that.
///
/// # Errors
///
/// - [`ParseError::UnexpectedEof`] if the reader closes before a request arrived
/// - any error [`RequestDecoder`] reports while decoding
pub async fn read_request_async<R>(reader: R, config: ParserConfig) -> Result<Request, ParseError>
where
    R: AsyncRead + Unpin,
{
    let mut framed_read = FramedRead::with_capacity(reader, RequestDecoder::with_config(config), config.buffer_capacity);

    match framed_read.next().await {
        Some(Ok(request)) => {
            debug!(method = request.method(), target = request.target(), "received request");
            Ok(request)
        }
        Some(Err(e)) => Err(e),
        None => {
            info!("cant read any request, connection closed");
            Err(ParseError::unexpected_eof(0))
        }
    }
}
