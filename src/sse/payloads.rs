//! SSE payload deserialization structs
//!
//! Wire payloads are snake_case JSON objects. Each struct mirrors one event
//! kind; the mapper copies these fields into message metadata verbatim.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::{CellValue, VisualizationType};

/// `thinking_delta` / `text_delta` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaPayload {
    pub content: String,
}

/// `tool_call` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallPayload {
    pub name: String,
    /// Tool arguments, passed through uninterpreted
    #[serde(default)]
    pub args: Map<String, Value>,
    pub call_id: String,
}

/// `tool_result` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResultPayload {
    pub name: String,
    pub call_id: String,
    pub result: String,
    pub success: bool,
}

/// `data_table` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataTablePayload {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
    pub total_rows: u64,
    pub displayed_rows: u64,
}

/// `visualization` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationPayload {
    #[serde(rename = "type")]
    pub visualization_type: VisualizationType,
    pub filename: String,
    /// Server-relative URL, e.g. `/api/files/chart.html`
    pub url: String,
}

/// Code used when an `error` event does not carry one
pub const UNKNOWN_ERROR_CODE: &str = "UNKNOWN_ERROR";

/// `error` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
    pub code: String,
}

impl ErrorPayload {
    /// Read an error body of any shape.
    ///
    /// An error always ends the exchange, so missing or mistyped fields fall
    /// back instead of failing: the code to [`UNKNOWN_ERROR_CODE`], the message
    /// to the raw body text.
    pub fn from_value(data: &Value) -> Self {
        let field = |name: &str| match data.get(name) {
            Some(Value::String(text)) => Some(text.clone()),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        };
        let message = field("message").unwrap_or_else(|| match data {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        });
        Self {
            message,
            code: field("code").unwrap_or_else(|| UNKNOWN_ERROR_CODE.to_string()),
        }
    }
}

/// `done` payload
///
/// The agent reports the session it ran under and the history length; both
/// are informational.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DonePayload {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub message_count: Option<u64>,
}
