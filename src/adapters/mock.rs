//! Mock frame source for testing.
//!
//! Replays scripted frames in place of a server, one script per opened
//! exchange, and records every request for verification.

use async_trait::async_trait;
use futures::stream;
use futures_util::StreamExt;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::TransportError;
use crate::models::StreamRequest;
use crate::sse::SseFrame;
use crate::traits::{FrameSource, FrameStream};

/// Scripted behaviour for one `open` call.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Yield the items, then end the stream
    Frames(Vec<Result<SseFrame, TransportError>>),
    /// Yield the items, then stay open until the consumer stops reading
    FramesThenHang(Vec<Result<SseFrame, TransportError>>),
    /// Fail to open
    Error(TransportError),
}

/// Mock frame source for testing.
///
/// # Example
///
/// ```ignore
/// use orbital::adapters::mock::{MockFrameSource, MockResponse};
///
/// let source = MockFrameSource::new();
/// source.push_response(MockResponse::Frames(vec![
///     Ok(SseFrame::new("text_delta", json!({"content": "Hi"}))),
///     Ok(SseFrame::new("done", json!({}))),
/// ]));
///
/// let mut controller = ChatController::new(Arc::new(source.clone()));
/// controller.send("Hello");
/// controller.run_until_idle().await;
/// assert_eq!(source.get_requests()[0].question, "Hello");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockFrameSource {
    /// Scripts consumed in order, one per `open`
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<StreamRequest>>>,
}

impl MockFrameSource {
    /// Create a new mock with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the response for the next `open`.
    pub fn push_response(&self, response: MockResponse) {
        lock(&self.responses).push_back(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<StreamRequest> {
        lock(&self.requests).clone()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        lock(&self.requests).clear();
    }

    /// Number of scripted responses not yet consumed
    pub fn remaining_responses(&self) -> usize {
        lock(&self.responses).len()
    }
}

/// A panicking test must not poison the mock for the rest of the suite
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl FrameSource for MockFrameSource {
    async fn open(&self, request: &StreamRequest) -> Result<FrameStream, TransportError> {
        lock(&self.requests).push(request.clone());

        let response = lock(&self.responses).pop_front();
        match response {
            Some(MockResponse::Frames(items)) => Ok(Box::pin(stream::iter(items))),
            Some(MockResponse::FramesThenHang(items)) => {
                Ok(Box::pin(stream::iter(items).chain(stream::pending())))
            }
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(TransportError::ConnectionFailed(
                "No mock response queued".to_string(),
            )),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_replays_frames_and_records_request() {
        let source = MockFrameSource::new();
        source.push_response(MockResponse::Frames(vec![Ok(SseFrame::new(
            "text_delta",
            json!({"content": "Hi"}),
        ))]));

        let frames: Vec<_> = source
            .open(&StreamRequest::new("q"))
            .await
            .unwrap()
            .collect()
            .await;

        assert_eq!(frames.len(), 1);
        assert_eq!(source.get_requests()[0].question, "q");
        assert_eq!(source.remaining_responses(), 0);
    }

    #[tokio::test]
    async fn test_open_error() {
        let source = MockFrameSource::new();
        source.push_response(MockResponse::Error(TransportError::HttpStatus {
            status: 502,
            reason: "Bad Gateway".to_string(),
        }));

        let result = source.open(&StreamRequest::new("q")).await;
        assert!(matches!(
            result,
            Err(TransportError::HttpStatus { status: 502, .. })
        ));
    }

    #[tokio::test]
    async fn test_unscripted_open_fails() {
        let source = MockFrameSource::new();
        assert!(source.open(&StreamRequest::new("q")).await.is_err());
        assert_eq!(source.get_requests().len(), 1);
    }
}
