//! LINE Messaging API implementation
//!
//! This module implements the MessagingPlatform trait for LINE.
//! See: https://developers.line.biz/en/reference/messaging-api/
//!
//! # Example
//!
//! ```no_run
//! use bot_platform::MessagingPlatform;
//! use bot_platform::providers::{LineConfig, LinePlatform};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let platform = LinePlatform::with_config(LineConfig::new("channel-access-token"))?;
//!     platform
//!         .push_message("U4af4980629...", &["Hello!".to_string()])
//!         .await?;
//!     Ok(())
//! }
//! ```

use crate::{MessagingPlatform, OutboundMessage, PlatformError, Result, RetryPolicy};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_LINE_API_BASE: &str = "https://api.line.me";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const RETRY_KEY_HEADER: &str = "X-Line-Retry-Key";

/// Configuration for the LINE platform
#[derive(Debug, Clone)]
pub struct LineConfig {
    /// Long-lived channel access token
    pub channel_access_token: String,

    /// Base URL for the Messaging API (default: "https://api.line.me")
    pub api_base: String,

    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,

    /// Retry policy for push deliveries
    ///
    /// Replies are never retried: a reply token is consumed by the first
    /// request that reaches the platform.
    pub push_retry: RetryPolicy,
}

impl LineConfig {
    /// Create a new config with the given access token and default settings
    pub fn new(channel_access_token: impl Into<String>) -> Self {
        Self {
            channel_access_token: channel_access_token.into(),
            api_base: DEFAULT_LINE_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            push_retry: RetryPolicy::default(),
        }
    }

    /// Set custom API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Set request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set the retry policy used for push deliveries
    pub fn with_push_retry(mut self, policy: RetryPolicy) -> Self {
        self.push_retry = policy;
        self
    }
}

/// LINE Messaging API client
pub struct LinePlatform {
    client: Client,
    config: LineConfig,
}

impl LinePlatform {
    /// Create a new LINE platform with custom configuration
    pub fn with_config(config: LineConfig) -> Result<Self> {
        if config.channel_access_token.trim().is_empty() {
            return Err(PlatformError::ConfigurationError(
                "Channel access token must not be empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a new LINE platform with an access token and default settings
    pub fn new(channel_access_token: impl Into<String>) -> Result<Self> {
        Self::with_config(LineConfig::new(channel_access_token))
    }

    /// Get the current configuration
    pub fn config(&self) -> &LineConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/v2/bot/message/{path}", self.config.api_base)
    }

    async fn send_push(&self, body: &PushRequest<'_>, retry_key: &str) -> Result<()> {
        let response = self
            .client
            .post(self.endpoint("push"))
            .bearer_auth(&self.config.channel_access_token)
            .header(RETRY_KEY_HEADER, retry_key)
            .json(body)
            .send()
            .await?;

        // 409: a request with this retry key was already accepted
        if response.status() == StatusCode::CONFLICT {
            debug!("Push already accepted for retry key {}", retry_key);
            return Ok(());
        }

        check_response(response).await
    }
}

#[async_trait]
impl MessagingPlatform for LinePlatform {
    #[instrument(skip(self, reply_token, texts), fields(messages = texts.len()))]
    async fn reply_message(&self, reply_token: &str, texts: &[String]) -> Result<()> {
        let body = ReplyRequest {
            reply_token,
            messages: OutboundMessage::batch(texts)?,
        };

        debug!("Sending reply to LINE API at {}", self.config.api_base);

        let response = self
            .client
            .post(self.endpoint("reply"))
            .bearer_auth(&self.config.channel_access_token)
            .json(&body)
            .send()
            .await?;

        check_response(response).await
    }

    #[instrument(skip(self, texts), fields(messages = texts.len()))]
    async fn push_message(&self, user_id: &str, texts: &[String]) -> Result<()> {
        let body = PushRequest {
            to: user_id,
            messages: OutboundMessage::batch(texts)?,
        };

        // One key for every attempt so the platform can drop duplicates
        let retry_key = uuid::Uuid::new_v4().to_string();

        debug!("Sending push to LINE API at {}", self.config.api_base);

        self.config
            .push_retry
            .execute("line push", || self.send_push(&body, &retry_key))
            .await
    }

    fn name(&self) -> &'static str {
        "line"
    }
}

// ============================================================================
// LINE-specific request types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyRequest<'a> {
    reply_token: &'a str,
    messages: Vec<OutboundMessage>,
}

#[derive(Debug, Serialize)]
struct PushRequest<'a> {
    to: &'a str,
    messages: Vec<OutboundMessage>,
}

async fn check_response(response: Response) -> Result<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let error_text = response.text().await.unwrap_or_default();
    Err(map_status(status, error_text))
}

fn map_status(status: StatusCode, error_text: String) -> PlatformError {
    match status.as_u16() {
        401 | 403 => PlatformError::AuthenticationFailed,
        429 => PlatformError::RateLimited(error_text),
        400 => PlatformError::InvalidRequest(error_text),
        500..=599 => PlatformError::ServerError {
            status: status.as_u16(),
            body: error_text,
        },
        _ => PlatformError::RequestFailed(format!("HTTP {status}: {error_text}")),
    }
}
