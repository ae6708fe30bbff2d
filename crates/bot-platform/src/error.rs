//! Error types for message delivery

use thiserror::Error;

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;

/// Errors that can occur while talking to a messaging platform
#[derive(Error, Debug)]
pub enum PlatformError {
    /// API request failed
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Invalid access token or authentication failed
    #[error("Invalid access token or authentication failed")]
    AuthenticationFailed,

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// The platform rejected the request (expired reply token, bad payload, ...)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The platform answered with a 5xx status
    #[error("Server error (HTTP {status}): {body}")]
    ServerError {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// HTTP error
    #[cfg(feature = "line")]
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl PlatformError {
    /// Whether repeating the same request may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited(_) | Self::ServerError { .. } => true,
            #[cfg(feature = "line")]
            Self::HttpError(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}
