//! Error types for the chat client.
//!
//! - [`TransportError`]: opening or reading a frame stream, and API calls
//! - [`ConfigError`]: invalid environment or command-line configuration
//!
//! Frame-level parse failures live with the parser as
//! [`SseParseError`](crate::sse::SseParseError); they are logged and dropped,
//! never surfaced to the user.

mod config;
mod transport;

pub use config::ConfigError;
pub use transport::{classify_reqwest_error, TransportError, GENERIC_CONNECTION_ERROR};
