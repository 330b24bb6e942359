//! SSE line classification and frame typing
//!
//! Contains the line classifier used by the frame decoder and the dispatch
//! that turns a decoded [`SseFrame`] into a typed [`AgentEvent`].

mod content;
mod misc;
mod tools;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::sse::events::{AgentEvent, SseFrame, SseLine, SseParseError};

use content::{parse_text_delta_event, parse_thinking_delta_event};
use misc::{
    parse_data_table_event, parse_done_event, parse_error_event, parse_visualization_event,
};
use tools::{parse_tool_call_event, parse_tool_result_event};

/// Classify a single SSE line (without its trailing newline).
///
/// Only the exact `event: ` and `data: ` prefixes are recognised; every other
/// shape is reported as [`SseLine::Other`] and ignored by the decoder.
pub fn parse_sse_line(line: &str) -> SseLine<'_> {
    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(rest) = line.strip_prefix("event: ") {
        return SseLine::Event(rest);
    }

    if let Some(rest) = line.strip_prefix("data: ") {
        return SseLine::Data(rest);
    }

    SseLine::Other(line)
}

/// Type a decoded frame according to its event name.
pub fn parse_agent_event(frame: SseFrame) -> Result<AgentEvent, SseParseError> {
    let SseFrame { event_type, data } = frame;
    match event_type.as_str() {
        "thinking_delta" => parse_thinking_delta_event(&event_type, data),
        "text_delta" => parse_text_delta_event(&event_type, data),
        "tool_call" => parse_tool_call_event(&event_type, data),
        "tool_result" => parse_tool_result_event(&event_type, data),
        "data_table" => parse_data_table_event(&event_type, data),
        "visualization" => parse_visualization_event(&event_type, data),
        "error" => parse_error_event(data),
        "done" => parse_done_event(&event_type, data),
        _ => Err(SseParseError::UnknownEventType(event_type)),
    }
}

/// Deserialize a frame's JSON value into its payload struct.
fn decode_payload<T: DeserializeOwned>(event_type: &str, data: Value) -> Result<T, SseParseError> {
    serde_json::from_value(data).map_err(|e| SseParseError::InvalidPayload {
        event_type: event_type.to_string(),
        message: e.to_string(),
    })
}
