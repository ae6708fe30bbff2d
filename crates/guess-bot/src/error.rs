//! Error types for bot operations

use thiserror::Error;

/// Bot specific errors
#[derive(Debug, Error)]
pub enum BotError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Webhook signature missing or wrong
    #[error("Invalid webhook signature")]
    InvalidSignature,

    /// Webhook body could not be parsed
    #[error("Invalid webhook payload: {0}")]
    InvalidPayload(String),

    /// Message delivery failed
    #[error("Delivery error: {0}")]
    Platform(#[from] bot_platform::PlatformError),

    /// Session store failure
    #[error("Session store error: {0}")]
    SessionStore(String),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Server I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type alias for bot operations
pub type Result<T> = std::result::Result<T, BotError>;

impl From<bot_utils::EnvError> for BotError {
    fn from(err: bot_utils::EnvError) -> Self {
        BotError::ConfigError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bot_platform::PlatformError;

    #[test]
    fn test_error_display() {
        let err = BotError::ConfigError("PORT must be non-zero".to_string());
        assert_eq!(err.to_string(), "Configuration error: PORT must be non-zero");

        let err = BotError::InvalidSignature;
        assert_eq!(err.to_string(), "Invalid webhook signature");
    }

    #[test]
    fn test_error_conversion() {
        let err: BotError = PlatformError::InvalidRequest("Invalid reply token".to_string()).into();
        match err {
            BotError::Platform(inner) => {
                assert!(inner.to_string().contains("Invalid reply token"));
            }
            _ => panic!("Expected Platform variant"),
        }

        let err: BotError = bot_utils::EnvError::Missing("LINE_CHANNEL_SECRET".to_string()).into();
        assert!(matches!(err, BotError::ConfigError(msg) if msg.contains("LINE_CHANNEL_SECRET")));
    }
}
