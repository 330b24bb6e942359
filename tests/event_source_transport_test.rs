//! Event-source transport tests using wiremock.
//!
//! These tests verify that EventSourceFrameSource issues a GET with the
//! question and session as query parameters and yields typed frames.

mod common;

use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use orbital::adapters::EventSourceFrameSource;
use orbital::config::TransportKind;
use orbital::error::TransportError;
use orbital::models::{SessionId, StreamRequest};
use orbital::session::ChatController;
use orbital::sse::SseFrame;
use orbital::traits::FrameSource;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{analysis_events, analysis_frames, config_for, sse_body};

const TIMEOUT: Duration = Duration::from_secs(5);

fn sse_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.into_bytes(), "text/event-stream")
}

#[tokio::test]
async fn test_event_source_sends_query_and_yields_frames() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/chat/stream"))
        .and(query_param("question", "Top region?"))
        .and(query_param("session_id", "s-1"))
        .respond_with(sse_response(sse_body(&analysis_events())))
        .mount(&mock_server)
        .await;

    let source = EventSourceFrameSource::new(&config_for(&mock_server, TransportKind::EventSource));
    let request = StreamRequest::with_session("Top region?", SessionId::from("s-1".to_string()));
    let mut frames = source.open(&request).await.expect("stream should open");

    // Read up to the done frame; what follows is connection teardown
    let expected = analysis_frames();
    let mut received: Vec<SseFrame> = Vec::new();
    while received.len() < expected.len() {
        let item = tokio::time::timeout(TIMEOUT, frames.next())
            .await
            .expect("frame within timeout")
            .expect("stream ended early");
        received.push(item.expect("frame, not error"));
    }

    assert_eq!(received, expected);
}

#[tokio::test]
async fn test_event_source_drops_malformed_json() {
    let mock_server = MockServer::start().await;

    let body = concat!(
        "event: text_delta\ndata: {oops\n\n",
        "event: text_delta\ndata: {\"content\": \"fine\"}\n\n",
    );
    Mock::given(method("GET"))
        .and(path("/api/chat/stream"))
        .respond_with(sse_response(body.to_string()))
        .mount(&mock_server)
        .await;

    let source = EventSourceFrameSource::new(&config_for(&mock_server, TransportKind::EventSource));
    let mut frames = source
        .open(&StreamRequest::new("q"))
        .await
        .expect("stream should open");

    let first = tokio::time::timeout(TIMEOUT, frames.next())
        .await
        .expect("frame within timeout")
        .expect("stream ended early")
        .expect("frame, not error");
    assert_eq!(first, SseFrame::new("text_delta", json!({"content": "fine"})));
}

#[tokio::test]
async fn test_event_source_http_error_keeps_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/chat/stream"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let source = EventSourceFrameSource::new(&config_for(&mock_server, TransportKind::EventSource));
    let mut frames = source
        .open(&StreamRequest::new("q"))
        .await
        .expect("client should build");

    let first = tokio::time::timeout(TIMEOUT, frames.next())
        .await
        .expect("item within timeout")
        .expect("stream ended early");
    assert_eq!(
        first,
        Err(TransportError::HttpStatus {
            status: 500,
            reason: "Internal Server Error".to_string()
        })
    );
}

#[tokio::test]
async fn test_controller_surfaces_event_source_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/chat/stream"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server, TransportKind::EventSource);
    let mut controller = ChatController::new(Arc::new(EventSourceFrameSource::new(&config)));

    controller.send("q");
    tokio::time::timeout(TIMEOUT, controller.run_until_idle())
        .await
        .expect("exchange finishes");

    assert!(!controller.is_streaming());
    assert_eq!(controller.error(), Some("HTTP 503: Service Unavailable"));
    assert_eq!(controller.messages().len(), 1);
}

#[tokio::test]
async fn test_event_source_clean_close_without_done() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/chat/stream"))
        .respond_with(sse_response(sse_body(&[(
            "text_delta",
            json!({"content": "cut off"}),
        )])))
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server, TransportKind::EventSource);
    let mut controller = ChatController::new(Arc::new(EventSourceFrameSource::new(&config)));

    controller.send("q");
    tokio::time::timeout(TIMEOUT, controller.run_until_idle())
        .await
        .expect("exchange finishes");

    assert!(!controller.is_streaming());
    assert!(controller.error().is_none());
    assert_eq!(controller.messages()[1].content, "cut off");
}

#[tokio::test]
async fn test_controller_over_event_source() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/chat/stream"))
        .respond_with(sse_response(sse_body(&[
            ("text_delta", json!({"content": "Hel"})),
            ("text_delta", json!({"content": "lo"})),
            ("done", json!({"session_id": "s-1", "message_count": 2})),
        ])))
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server, TransportKind::EventSource);
    let mut controller = ChatController::new(Arc::new(EventSourceFrameSource::new(&config)));

    controller.send("Say hello");
    tokio::time::timeout(TIMEOUT, controller.run_until_idle())
        .await
        .expect("exchange finishes");

    assert!(controller.error().is_none());
    assert_eq!(controller.messages().len(), 2);
    assert_eq!(controller.messages()[1].content, "Hello");
}
