//! SSE (Server-Sent Events) stream decoding
//!
//! Decodes the analysis agent's streaming API. The wire format consists of:
//! - `event: <type>` - event type line, consumed by the next data line
//! - `data: <json>` - data payload line
//! - Blank lines and anything else - ignored
//!
//! # Module structure
//! - `decoder` - Byte chunks to frames (FrameDecoder, decode_frames)
//! - `events` - Frame and event definitions (SseFrame, AgentEvent, SseParseError)
//! - `payloads` - Wire payload structs
//! - `parser` - Line classification and frame typing

mod decoder;
mod events;
mod parser;
mod payloads;

pub use decoder::{decode_frames, FrameDecoder};
pub use events::{AgentEvent, SseFrame, SseLine, SseParseError};
pub use parser::{parse_agent_event, parse_sse_line};
pub use payloads::{
    DataTablePayload, DeltaPayload, DonePayload, ErrorPayload, ToolCallPayload,
    ToolResultPayload, VisualizationPayload, UNKNOWN_ERROR_CODE,
};
