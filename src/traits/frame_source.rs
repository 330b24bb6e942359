//! Frame source trait abstraction.
//!
//! A frame source opens one streaming exchange with the backend and yields the
//! decoded SSE frames. The controller only ever sees this trait, so the fetch
//! transport, the event-source transport and the test mock are interchangeable.

use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

use crate::error::TransportError;
use crate::models::StreamRequest;
use crate::sse::SseFrame;

/// Stream of decoded frames for one exchange.
///
/// An `Err` item is terminal for the exchange. The stream ending without a
/// `done` frame is a normal close.
pub type FrameStream = Pin<Box<dyn Stream<Item = Result<SseFrame, TransportError>> + Send>>;

/// Opens frame streams for chat exchanges.
///
/// # Example
///
/// ```ignore
/// use orbital::traits::FrameSource;
///
/// async fn first_frame(source: &dyn FrameSource) -> Result<(), TransportError> {
///     let mut frames = source.open(&StreamRequest::new("How many rows?")).await?;
///     if let Some(frame) = frames.next().await {
///         println!("{}", frame?.event_type);
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait FrameSource: Send + Sync {
    /// Issue the request and return the frame stream.
    ///
    /// Fails when the connection cannot be established or the server rejects
    /// the request.
    async fn open(&self, request: &StreamRequest) -> Result<FrameStream, TransportError>;

    /// Short transport name for logs
    fn name(&self) -> &'static str;
}
