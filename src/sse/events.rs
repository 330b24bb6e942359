//! SSE event types and definitions
//!
//! Contains the decoded [`SseFrame`] produced by the frame decoder and the typed
//! [`AgentEvent`] enum with every event kind the analysis agent streams.

use serde_json::Value;
use thiserror::Error;

use super::payloads::{
    DataTablePayload, DeltaPayload, DonePayload, ErrorPayload, ToolCallPayload,
    ToolResultPayload, VisualizationPayload,
};

/// A single decoded SSE record: the `event:` type paired with its parsed `data:` JSON.
///
/// The decoder knows nothing about event semantics; typing happens in
/// [`parse_agent_event`](super::parse_agent_event).
#[derive(Debug, Clone, PartialEq)]
pub struct SseFrame {
    /// Value of the `event:` line
    pub event_type: String,
    /// JSON value of the `data:` line
    pub data: Value,
}

impl SseFrame {
    /// Create a new frame.
    pub fn new(event_type: impl Into<String>, data: Value) -> Self {
        Self {
            event_type: event_type.into(),
            data,
        }
    }
}

/// Typed events from the analysis agent stream
#[derive(Debug, Clone, PartialEq)]
pub enum AgentEvent {
    /// Reasoning text fragment
    ThinkingDelta(DeltaPayload),
    /// Answer text fragment
    TextDelta(DeltaPayload),
    /// Tool invocation, emitted before execution
    ToolCall(ToolCallPayload),
    /// Tool execution result
    ToolResult(ToolResultPayload),
    /// Tabular query result
    DataTable(DataTablePayload),
    /// Generated chart or export file
    Visualization(VisualizationPayload),
    /// Server-side failure, terminal for the exchange
    Error(ErrorPayload),
    /// Stream completed successfully
    Done(DonePayload),
}

impl AgentEvent {
    /// Returns the wire name of the event type.
    pub fn event_type_name(&self) -> &'static str {
        match self {
            AgentEvent::ThinkingDelta(_) => "thinking_delta",
            AgentEvent::TextDelta(_) => "text_delta",
            AgentEvent::ToolCall(_) => "tool_call",
            AgentEvent::ToolResult(_) => "tool_result",
            AgentEvent::DataTable(_) => "data_table",
            AgentEvent::Visualization(_) => "visualization",
            AgentEvent::Error(_) => "error",
            AgentEvent::Done(_) => "done",
        }
    }

    /// Whether this event carries an incremental text fragment.
    pub fn is_delta(&self) -> bool {
        matches!(self, AgentEvent::ThinkingDelta(_) | AgentEvent::TextDelta(_))
    }
}

/// Represents a classified SSE line
#[derive(Debug, Clone, PartialEq)]
pub enum SseLine<'a> {
    /// Event type declaration (`event: tool_call`)
    Event(&'a str),
    /// Data payload (`data: {"content": "hi"}`)
    Data(&'a str),
    /// Blank line between records
    Empty,
    /// Anything else, including `: keep-alive` comments
    Other(&'a str),
}

/// Errors that can occur while typing a decoded frame
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SseParseError {
    /// Unknown event type received
    #[error("Unknown SSE event type: {0}")]
    UnknownEventType(String),
    /// JSON parsed but did not match the event's payload shape
    #[error("Invalid payload for event '{event_type}': {message}")]
    InvalidPayload { event_type: String, message: String },
}
