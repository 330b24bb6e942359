//! Configuration error types.

use thiserror::Error;

/// Invalid configuration value from the environment or the command line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Base URL is not an http(s) URL.
    #[error("Invalid base URL '{0}': expected an http:// or https:// URL")]
    InvalidBaseUrl(String),

    /// Transport name is not recognised.
    #[error("Unknown transport '{0}': expected 'fetch' or 'eventsource'")]
    UnknownTransport(String),

    /// A flag that needs a value was last on the command line.
    #[error("Missing value for '{0}'")]
    MissingValue(String),

    /// Unrecognised command-line argument.
    #[error("Unknown argument '{0}' (see --help)")]
    UnknownArgument(String),
}

impl ConfigError {
    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::InvalidBaseUrl(_) => "E_CONFIG_URL",
            ConfigError::UnknownTransport(_) => "E_CONFIG_TRANSPORT",
            ConfigError::MissingValue(_) => "E_CONFIG_MISSING",
            ConfigError::UnknownArgument(_) => "E_CONFIG_ARG",
        }
    }
}
