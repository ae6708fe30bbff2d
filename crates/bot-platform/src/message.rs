//! Outbound message types

use crate::{PlatformError, Result};
use serde::Serialize;

/// Maximum number of message objects accepted in a single reply or push
pub const MAX_MESSAGES_PER_REQUEST: usize = 5;

/// A message object as sent to the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Plain text message
    Text {
        /// Message body
        text: String,
    },
}

impl OutboundMessage {
    /// Create a text message
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Convert a batch of texts into message objects, enforcing the batch limits
    pub fn batch(texts: &[String]) -> Result<Vec<Self>> {
        if texts.is_empty() {
            return Err(PlatformError::InvalidRequest(
                "At least one message is required".to_string(),
            ));
        }
        if texts.len() > MAX_MESSAGES_PER_REQUEST {
            return Err(PlatformError::InvalidRequest(format!(
                "At most {MAX_MESSAGES_PER_REQUEST} messages can be sent at once, got {}",
                texts.len()
            )));
        }
        Ok(texts.iter().map(Self::text).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_serialization() {
        let json = serde_json::to_value(OutboundMessage::text("500")).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "text", "text": "500" }));
    }

    #[test]
    fn test_batch_limits() {
        assert!(OutboundMessage::batch(&[]).is_err());

        let texts = vec!["a".to_string(); MAX_MESSAGES_PER_REQUEST];
        assert_eq!(OutboundMessage::batch(&texts).unwrap().len(), 5);

        let texts = vec!["a".to_string(); MAX_MESSAGES_PER_REQUEST + 1];
        assert!(matches!(
            OutboundMessage::batch(&texts),
            Err(PlatformError::InvalidRequest(_))
        ));
    }
}
