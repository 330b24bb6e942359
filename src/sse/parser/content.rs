//! Text and thinking delta parsers

use serde_json::Value;

use super::decode_payload;
use crate::sse::events::{AgentEvent, SseParseError};

/// Parse a `text_delta` event
pub(super) fn parse_text_delta_event(
    event_type: &str,
    data: Value,
) -> Result<AgentEvent, SseParseError> {
    decode_payload(event_type, data).map(AgentEvent::TextDelta)
}

/// Parse a `thinking_delta` event
pub(super) fn parse_thinking_delta_event(
    event_type: &str,
    data: Value,
) -> Result<AgentEvent, SseParseError> {
    decode_payload(event_type, data).map(AgentEvent::ThinkingDelta)
}
