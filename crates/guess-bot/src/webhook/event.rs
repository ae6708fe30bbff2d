//! Webhook payload model

use serde::Deserialize;
use serde_json::Value;

/// Body of a webhook request
///
/// Events are kept as raw JSON so that one malformed or unsupported event
/// does not reject the whole batch.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    /// Bot user id the events were sent to
    #[serde(default)]
    pub destination: Option<String>,

    /// Events in delivery order
    #[serde(default)]
    pub events: Vec<Value>,
}

impl WebhookPayload {
    /// Parse a raw request body
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(body)
    }
}

/// A text message sent by a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMessageEvent {
    pub user_id: String,
    pub reply_token: String,
    pub text: String,
}

impl TextMessageEvent {
    /// Extract a text message event
    ///
    /// Returns `None` for other event types, non-text messages, and events
    /// missing a user id or reply token.
    pub fn from_value(event: &Value) -> Option<Self> {
        if event.get("type")?.as_str()? != "message" {
            return None;
        }

        let message = event.get("message")?;
        if message.get("type")?.as_str()? != "text" {
            return None;
        }

        let user_id = event.get("source")?.get("userId")?.as_str()?;
        let reply_token = event.get("replyToken")?.as_str()?;
        let text = message.get("text")?.as_str()?;

        if user_id.is_empty() || reply_token.is_empty() {
            return None;
        }

        Some(Self {
            user_id: user_id.to_string(),
            reply_token: reply_token.to_string(),
            text: text.trim().to_string(),
        })
    }
}
