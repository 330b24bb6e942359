//! Event-source transport.
//!
//! Opens the streaming endpoint with a GET through `eventsource-client`. The
//! client already splits the stream into events, so only the JSON bodies are
//! parsed here. Reconnection is disabled: one request is one exchange.

use async_trait::async_trait;
use eventsource_client as es;
use es::Client as _;
use futures_util::{future, StreamExt};
use tracing::{debug, warn};

use crate::config::ChatConfig;
use crate::error::TransportError;
use crate::models::StreamRequest;
use crate::sse::SseFrame;
use crate::traits::{FrameSource, FrameStream};

/// Frame source backed by an SSE client.
#[derive(Debug, Clone)]
pub struct EventSourceFrameSource {
    stream_url: String,
}

impl EventSourceFrameSource {
    pub fn new(config: &ChatConfig) -> Self {
        Self {
            stream_url: config.stream_url(),
        }
    }

    /// Full request URL with the question and session as query parameters
    pub fn request_url(&self, request: &StreamRequest) -> String {
        format!("{}?{}", self.stream_url, request.to_query_string())
    }
}

#[async_trait]
impl FrameSource for EventSourceFrameSource {
    async fn open(&self, request: &StreamRequest) -> Result<FrameStream, TransportError> {
        let url = self.request_url(request);
        debug!(url = %url, "Opening event-source stream");

        let invalid_url = |e: es::Error| TransportError::InvalidUrl {
            url: url.clone(),
            message: e.to_string(),
        };
        let client = es::ClientBuilder::for_url(&url)
            .map_err(invalid_url)?
            .header("Accept", "text/event-stream")
            .map_err(invalid_url)?
            .reconnect(es::ReconnectOptions::reconnect(false).build())
            .build();

        let frames = client
            .stream()
            // A close on an event boundary is the end of the exchange
            .take_while(|item| future::ready(!matches!(item, Err(es::Error::Eof))))
            .filter_map(|item| async move {
                match item {
                    Ok(es::SSE::Event(event)) => {
                        frame_from_event(&event.event_type, &event.data).map(Ok)
                    }
                    // Comments and connection notices carry no agent data
                    Ok(_) => None,
                    Err(err) => Some(Err(classify_event_source_error(&err))),
                }
            });

        Ok(Box::pin(frames))
    }

    fn name(&self) -> &'static str {
        "eventsource"
    }
}

/// Classify an SSE client error into a TransportError.
fn classify_event_source_error(err: &es::Error) -> TransportError {
    match err {
        es::Error::UnexpectedResponse(status) => TransportError::from_status_code(status.as_u16()),
        es::Error::TimedOut => TransportError::Timeout(err.to_string()),
        es::Error::HttpStream(_) => TransportError::ConnectionFailed(err.to_string()),
        es::Error::InvalidLine(_) | es::Error::InvalidEvent => {
            TransportError::InvalidResponse(err.to_string())
        }
        _ => TransportError::Stream(err.to_string()),
    }
}

/// Parse an event body into a frame, dropping it when the JSON is malformed.
fn frame_from_event(event_type: &str, data: &str) -> Option<SseFrame> {
    match serde_json::from_str(data) {
        Ok(value) => Some(SseFrame::new(event_type, value)),
        Err(e) => {
            warn!(event_type, error = %e, "Dropping event with malformed JSON");
            None
        }
    }
}
