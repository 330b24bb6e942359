use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Conversation identity shared with the server across exchanges
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh session id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Request body for the streaming chat endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StreamRequest {
    /// The user's question
    pub question: String,
    /// Session to continue; `null` lets the server create one
    pub session_id: Option<SessionId>,
}

impl StreamRequest {
    /// Create a request with no session
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            session_id: None,
        }
    }

    /// Create a request continuing a session
    pub fn with_session(question: impl Into<String>, session_id: SessionId) -> Self {
        Self {
            question: question.into(),
            session_id: Some(session_id),
        }
    }

    /// Encode as URL query parameters for GET-based event-stream transports.
    ///
    /// `session_id` is omitted when absent.
    pub fn to_query_string(&self) -> String {
        let mut query = format!("question={}", urlencoding::encode(&self.question));
        if let Some(session_id) = &self.session_id {
            query.push_str("&session_id=");
            query.push_str(&urlencoding::encode(session_id.as_str()));
        }
        query
    }
}

/// Column schema entry of a dataset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnSchema {
    pub name: String,
    pub dtype: String,
}

/// A dataset the agent can query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatasetInfo {
    pub name: String,
    pub rows: u64,
    pub columns: u64,
    #[serde(default)]
    pub schema: Vec<ColumnSchema>,
}

/// Response of `GET /api/datasets`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatasetsResponse {
    pub datasets: Vec<DatasetInfo>,
}
