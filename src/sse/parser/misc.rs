//! Data table, visualization, error and done parsers

use serde_json::Value;

use super::decode_payload;
use crate::sse::events::{AgentEvent, SseParseError};
use crate::sse::payloads::ErrorPayload;

/// Parse a `data_table` event
pub(super) fn parse_data_table_event(
    event_type: &str,
    data: Value,
) -> Result<AgentEvent, SseParseError> {
    decode_payload(event_type, data).map(AgentEvent::DataTable)
}

/// Parse a `visualization` event
pub(super) fn parse_visualization_event(
    event_type: &str,
    data: Value,
) -> Result<AgentEvent, SseParseError> {
    decode_payload(event_type, data).map(AgentEvent::Visualization)
}

/// Parse an `error` event
///
/// Never fails: a malformed error body is still an error.
pub(super) fn parse_error_event(data: Value) -> Result<AgentEvent, SseParseError> {
    Ok(AgentEvent::Error(ErrorPayload::from_value(&data)))
}

/// Parse a `done` event
///
/// Any JSON value is accepted; a non-object body (or one without the optional
/// fields) still completes the stream.
pub(super) fn parse_done_event(event_type: &str, data: Value) -> Result<AgentEvent, SseParseError> {
    if !data.is_object() {
        return Ok(AgentEvent::Done(Default::default()));
    }
    decode_payload(event_type, data).map(AgentEvent::Done)
}
