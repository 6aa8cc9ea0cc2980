//! Error types for the sidecar client

use reqwest::StatusCode;
use thiserror::Error;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Requested configuration file does not exist
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// Configuration could not be parsed
    #[error("Failed to parse configuration: {details}")]
    Parse { details: String },
}

/// Main error type for the sidecar client
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigurationError),

    /// Base URL or endpoint path could not be qualified
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Transport-level HTTP client error
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Api { status: StatusCode, message: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// HTTP status carried by this error, when there is one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::HttpClient(err) => err.status(),
            _ => None,
        }
    }

    /// Whether the failure was reported by the API rather than the transport
    pub fn is_api_error(&self) -> bool {
        matches!(self, Error::Api { .. })
    }
}
