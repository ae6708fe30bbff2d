//! Messaging platform trait definition

use crate::Result;
use async_trait::async_trait;

/// Trait for messaging platforms
///
/// Implementations deliver plain-text messages to end users, either in direct
/// response to an inbound event or out of band.
#[async_trait]
pub trait MessagingPlatform: Send + Sync {
    /// Answer an inbound event
    ///
    /// # Arguments
    ///
    /// * `reply_token` - One-time token taken from the inbound event
    /// * `texts` - Messages to deliver, in order
    ///
    /// Fails if the token has expired or was already used.
    async fn reply_message(&self, reply_token: &str, texts: &[String]) -> Result<()>;

    /// Send messages to a user outside any reply window
    ///
    /// Fails if the user is unreachable.
    async fn push_message(&self, user_id: &str, texts: &[String]) -> Result<()>;

    /// Get the platform name (e.g., "line")
    fn name(&self) -> &str;
}
