//! Reqwest-based fetch transport.
//!
//! POSTs the question as JSON and decodes the streamed response body with the
//! frame decoder.

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::debug;

use crate::config::ChatConfig;
use crate::error::{classify_reqwest_error, TransportError};
use crate::models::StreamRequest;
use crate::sse::decode_frames;
use crate::traits::{FrameSource, FrameStream};

/// Frame source implementation using reqwest.
///
/// # Example
///
/// ```ignore
/// use orbital::adapters::ReqwestFrameSource;
/// use orbital::config::ChatConfig;
///
/// let source = ReqwestFrameSource::new(&ChatConfig::default());
/// let frames = source.open(&StreamRequest::new("Top 5 regions?")).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestFrameSource {
    client: reqwest::Client,
    stream_url: String,
}

impl ReqwestFrameSource {
    /// Create a new ReqwestFrameSource with default client settings.
    pub fn new(config: &ChatConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a new ReqwestFrameSource with a custom reqwest::Client.
    pub fn with_client(client: reqwest::Client, config: &ChatConfig) -> Self {
        Self {
            client,
            stream_url: config.stream_url(),
        }
    }

    pub fn stream_url(&self) -> &str {
        &self.stream_url
    }
}

#[async_trait]
impl FrameSource for ReqwestFrameSource {
    async fn open(&self, request: &StreamRequest) -> Result<FrameStream, TransportError> {
        debug!(url = %self.stream_url, "Opening fetch stream");

        let response = self
            .client
            .post(&self.stream_url)
            .header(ACCEPT, "text/event-stream")
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::from_status(status));
        }

        let chunks = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| TransportError::Stream(e.to_string())));

        Ok(Box::pin(decode_frames(Box::pin(chunks))))
    }

    fn name(&self) -> &'static str {
        "fetch"
    }
}
