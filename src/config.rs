//! Client configuration.
//!
//! Built with the `with_*` builder methods, or from the environment via
//! [`ChatConfig::from_env`]. Command-line flags are applied on top by `main`.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Backend used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable overriding the backend URL
pub const API_URL_ENV: &str = "ORBITAL_API_URL";

/// Environment variable selecting the transport
pub const TRANSPORT_ENV: &str = "ORBITAL_TRANSPORT";

/// Path of the streaming chat endpoint
pub const STREAM_PATH: &str = "/api/chat/stream";

/// Path prefix of generated files
pub const FILES_PATH: &str = "/api/files";

/// How the client talks to the streaming endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportKind {
    /// POST with a JSON body, response decoded by the frame decoder
    #[default]
    Fetch,
    /// GET with query parameters through an event-source client
    EventSource,
}

impl FromStr for TransportKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fetch" | "post" => Ok(TransportKind::Fetch),
            "eventsource" | "event-source" | "sse" => Ok(TransportKind::EventSource),
            _ => Err(ConfigError::UnknownTransport(s.to_string())),
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::Fetch => write!(f, "fetch"),
            TransportKind::EventSource => write!(f, "eventsource"),
        }
    }
}

/// Configuration for the chat client.
///
/// # Example
///
/// ```ignore
/// use orbital::config::{ChatConfig, TransportKind};
///
/// let config = ChatConfig::default()
///     .with_base_url("http://analysis.internal:8000")
///     .with_transport(TransportKind::EventSource);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Backend base URL without a trailing slash
    pub base_url: String,
    /// Transport used for the streaming endpoint
    pub transport: TransportKind,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            transport: TransportKind::default(),
        }
    }
}

impl ChatConfig {
    /// Create a new ChatConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend base URL. Trailing slashes are dropped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim().trim_end_matches('/').to_string();
        self
    }

    /// Set the transport.
    pub fn with_transport(mut self, transport: TransportKind) -> Self {
        self.transport = transport;
        self
    }

    /// Create config from `ORBITAL_API_URL` and `ORBITAL_TRANSPORT`.
    ///
    /// Unset or empty variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = read_env(API_URL_ENV) {
            config = config.with_base_url(url);
        }
        if let Some(transport) = read_env(TRANSPORT_ENV) {
            config = config.with_transport(transport.parse()?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the base URL is an http(s) URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let has_scheme =
            self.base_url.starts_with("http://") || self.base_url.starts_with("https://");
        let has_host = self
            .base_url
            .split_once("://")
            .is_some_and(|(_, rest)| !rest.is_empty());

        if has_scheme && has_host {
            Ok(())
        } else {
            Err(ConfigError::InvalidBaseUrl(self.base_url.clone()))
        }
    }

    /// Absolute URL for a backend path.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// URL of the streaming chat endpoint
    pub fn stream_url(&self) -> String {
        self.url(STREAM_PATH)
    }

    /// Resolve a URL sent by the server. Relative paths such as
    /// `/api/files/chart.html` are joined to the base URL; absolute URLs pass through.
    pub fn resolve_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            self.url(url)
        }
    }

    /// URL of a generated file by name
    pub fn file_url(&self, filename: &str) -> String {
        self.url(&format!("{}/{}", FILES_PATH, urlencoding::encode(filename)))
    }
}

fn read_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
