//! Tool-related event parsers

use serde_json::Value;

use super::decode_payload;
use crate::sse::events::{AgentEvent, SseParseError};

/// Parse a `tool_call` event
pub(super) fn parse_tool_call_event(
    event_type: &str,
    data: Value,
) -> Result<AgentEvent, SseParseError> {
    decode_payload(event_type, data).map(AgentEvent::ToolCall)
}

/// Parse a `tool_result` event
pub(super) fn parse_tool_result_event(
    event_type: &str,
    data: Value,
) -> Result<AgentEvent, SseParseError> {
    decode_payload(event_type, data).map(AgentEvent::ToolResult)
}
