use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use uuid::Uuid;

/// Placeholder shown for null table cells
pub const NULL_CELL_PLACEHOLDER: &str = "\u{2014}";

/// Unique identifier of a message within the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
    /// Allocate a fresh identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A single table cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl CellValue {
    /// Text shown for this cell; null renders as an em-dash, never as "null".
    pub fn display_text(&self) -> String {
        match self {
            CellValue::Null => NULL_CELL_PLACEHOLDER.to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Number(n) => n.to_string(),
            CellValue::String(s) => s.clone(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

/// Kind of generated file a visualization points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualizationType {
    Html,
    Csv,
}

impl fmt::Display for VisualizationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisualizationType::Html => write!(f, "html"),
            VisualizationType::Csv => write!(f, "csv"),
        }
    }
}

/// Message kind with its kind-specific metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "metadata", rename_all = "snake_case")]
pub enum MessageKind {
    User,
    Assistant,
    Thinking,
    #[serde(rename_all = "camelCase")]
    ToolCall {
        tool_name: String,
        tool_args: Map<String, Value>,
        call_id: String,
    },
    #[serde(rename_all = "camelCase")]
    ToolResult {
        tool_name: String,
        call_id: String,
        success: bool,
    },
    #[serde(rename_all = "camelCase")]
    DataTable {
        columns: Vec<String>,
        rows: Vec<Vec<CellValue>>,
        total_rows: u64,
        displayed_rows: u64,
    },
    #[serde(rename_all = "camelCase")]
    Visualization {
        visualization_type: VisualizationType,
        visualization_url: String,
    },
    #[serde(rename_all = "camelCase")]
    Error { error_code: String },
}

impl MessageKind {
    /// Short name of the kind, matching its serialized tag
    pub fn name(&self) -> &'static str {
        match self {
            MessageKind::User => "user",
            MessageKind::Assistant => "assistant",
            MessageKind::Thinking => "thinking",
            MessageKind::ToolCall { .. } => "tool_call",
            MessageKind::ToolResult { .. } => "tool_result",
            MessageKind::DataTable { .. } => "data_table",
            MessageKind::Visualization { .. } => "visualization",
            MessageKind::Error { .. } => "error",
        }
    }

    /// Whether messages of this kind may have their content replaced while streaming
    pub fn is_streamable(&self) -> bool {
        matches!(self, MessageKind::Assistant | MessageKind::Thinking)
    }
}

/// A message in the chat transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: MessageKind,
}

impl Message {
    /// Create a message with a fresh id and the current time
    pub fn new(kind: MessageKind, content: impl Into<String>) -> Self {
        Self::with_id(MessageId::new(), kind, content)
    }

    /// Create a message with a caller-chosen id
    pub fn with_id(id: MessageId, kind: MessageKind, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            created_at: Utc::now(),
            kind,
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageKind::User, content)
    }

    pub fn is_user(&self) -> bool {
        matches!(self.kind, MessageKind::User)
    }
}
