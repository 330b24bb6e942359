//! Shared helpers for integration tests.

#![allow(dead_code)]

use orbital::config::{ChatConfig, TransportKind};
use orbital::sse::SseFrame;
use serde_json::{json, Value};
use wiremock::MockServer;

/// Render events as an SSE body the way the backend writes them.
pub fn sse_body(events: &[(&str, Value)]) -> String {
    let mut body = String::from(": connected\n\n");
    for (event_type, data) in events {
        body.push_str(&format!("event: {}\ndata: {}\n\n", event_type, data));
    }
    body
}

/// Config pointing at the mock server.
pub fn config_for(server: &MockServer, transport: TransportKind) -> ChatConfig {
    ChatConfig::new()
        .with_base_url(server.uri())
        .with_transport(transport)
}

/// A realistic analysis exchange.
pub fn analysis_events() -> Vec<(&'static str, Value)> {
    vec![
        ("thinking_delta", json!({"content": "I should check "})),
        ("thinking_delta", json!({"content": "the sales table."})),
        (
            "tool_call",
            json!({"name": "query_data", "args": {"sql": "SELECT region, SUM(revenue) FROM sales GROUP BY region"}, "call_id": "call_1"}),
        ),
        (
            "tool_result",
            json!({"name": "query_data", "call_id": "call_1", "result": "2 rows", "success": true}),
        ),
        (
            "data_table",
            json!({"columns": ["region", "revenue"], "rows": [["north", 1200.5], ["south", null]], "total_rows": 2, "displayed_rows": 2}),
        ),
        (
            "visualization",
            json!({"type": "html", "filename": "revenue.html", "url": "/api/files/revenue.html"}),
        ),
        ("text_delta", json!({"content": "North leads "})),
        ("text_delta", json!({"content": "with 1200.5."})),
        ("done", json!({"session_id": "s-1", "message_count": 2})),
    ]
}

/// Frames matching [`analysis_events`].
pub fn analysis_frames() -> Vec<SseFrame> {
    analysis_events()
        .into_iter()
        .map(|(event_type, data)| SseFrame::new(event_type, data))
        .collect()
}
