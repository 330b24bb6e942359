//! Transport error types.
//!
//! Errors raised while opening or reading a frame stream, or while calling the
//! plain JSON endpoints of the backend.

use thiserror::Error;

/// Fallback text shown when a failure carries no status information
pub const GENERIC_CONNECTION_ERROR: &str = "Connection error";

/// Failure of a frame source or API call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request URL could not be built.
    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// Connection to the server failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Server answered with a non-2xx status.
    #[error("HTTP {status}: {reason}")]
    HttpStatus { status: u16, reason: String },

    /// The byte or event stream failed after it was opened.
    #[error("Stream error: {0}")]
    Stream(String),

    /// The response body could not be decoded.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl TransportError {
    /// Text surfaced to the user as the controller's error string.
    ///
    /// Carries whatever the failure knows: the status line for HTTP errors,
    /// the underlying detail otherwise. A failure with no detail at all falls
    /// back to [`GENERIC_CONNECTION_ERROR`].
    pub fn user_message(&self) -> String {
        let detail = match self {
            TransportError::HttpStatus { .. } => return self.to_string(),
            TransportError::InvalidUrl { message, .. } => message,
            TransportError::ConnectionFailed(detail)
            | TransportError::Timeout(detail)
            | TransportError::Stream(detail)
            | TransportError::InvalidResponse(detail) => detail,
        };
        if detail.trim().is_empty() {
            GENERIC_CONNECTION_ERROR.to_string()
        } else {
            self.to_string()
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            TransportError::InvalidUrl { .. } => "E_TRANSPORT_URL",
            TransportError::ConnectionFailed(_) => "E_TRANSPORT_CONN",
            TransportError::Timeout(_) => "E_TRANSPORT_TIMEOUT",
            TransportError::HttpStatus { .. } => "E_TRANSPORT_HTTP",
            TransportError::Stream(_) => "E_TRANSPORT_STREAM",
            TransportError::InvalidResponse(_) => "E_TRANSPORT_INVALID",
        }
    }

    /// Build a status error, using the canonical reason phrase when the server gave none.
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        TransportError::HttpStatus {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }

    /// Build a status error from a bare status code
    pub fn from_status_code(status: u16) -> Self {
        match reqwest::StatusCode::from_u16(status) {
            Ok(status) => Self::from_status(status),
            Err(_) => TransportError::HttpStatus {
                status,
                reason: String::new(),
            },
        }
    }
}

/// Classify a reqwest error into a TransportError.
pub fn classify_reqwest_error(err: &reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(err.to_string())
    } else if err.is_connect() {
        TransportError::ConnectionFailed(err.to_string())
    } else if let Some(status) = err.status() {
        TransportError::from_status(status)
    } else if err.is_decode() {
        TransportError::InvalidResponse(err.to_string())
    } else if err.is_builder() {
        TransportError::InvalidUrl {
            url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            message: err.to_string(),
        }
    } else {
        TransportError::Stream(err.to_string())
    }
}
