//! Configuration for the bot

use crate::error::{BotError, Result};
use crate::game::GameRules;
use bot_platform::RetryPolicy;
use bot_platform::providers::LineConfig;
use bot_utils::EnvReader;
use std::net::IpAddr;
use std::time::Duration;

const DEFAULT_API_BASE: &str = "https://api.line.me";

/// Configuration for the webhook bot
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Channel secret used to verify webhook signatures
    pub channel_secret: String,

    /// Channel access token used for outbound calls
    pub channel_access_token: String,

    /// Address the HTTP server binds to
    pub bind_address: IpAddr,

    /// Port the HTTP server listens on
    pub port: u16,

    /// Messaging API base URL
    pub api_base: String,

    /// Outbound request timeout
    pub request_timeout: Duration,

    /// Attempts per push delivery
    pub push_max_attempts: u32,

    /// Delay between a win and the automatic restart
    pub restart_delay: Duration,

    /// Game parameters
    pub rules: GameRules,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            channel_secret: String::new(),
            channel_access_token: String::new(),
            bind_address: IpAddr::from([0, 0, 0, 0]),
            port: 3000,
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: Duration::from_secs(30),
            push_max_attempts: 3,
            restart_delay: Duration::from_secs(10),
            rules: GameRules::default(),
        }
    }
}

impl BotConfig {
    /// Create a new configuration builder
    pub fn builder() -> BotConfigBuilder {
        BotConfigBuilder::default()
    }

    /// Load configuration from the process environment
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `LINE_CHANNEL_SECRET` | required |
    /// | `LINE_CHANNEL_ACCESS_TOKEN` | required |
    /// | `HOST` | `0.0.0.0` |
    /// | `PORT` | `3000` |
    /// | `LINE_API_BASE` | `https://api.line.me` |
    /// | `LINE_REQUEST_TIMEOUT_SECS` | `30` |
    /// | `LINE_PUSH_MAX_ATTEMPTS` | `3` |
    /// | `RESTART_DELAY_SECS` | `10` |
    pub fn from_env() -> Result<Self> {
        Self::from_reader(&EnvReader::process())
    }

    /// Load configuration from an arbitrary environment source
    pub fn from_reader<F>(env: &EnvReader<F>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            channel_secret: env.required("LINE_CHANNEL_SECRET")?,
            channel_access_token: env.required("LINE_CHANNEL_ACCESS_TOKEN")?,
            bind_address: env.parse_or("HOST", defaults.bind_address)?,
            port: env.parse_or("PORT", defaults.port)?,
            api_base: env
                .optional("LINE_API_BASE")
                .unwrap_or(defaults.api_base),
            request_timeout: Duration::from_secs(env.parse_or(
                "LINE_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )?),
            push_max_attempts: env.parse_or("LINE_PUSH_MAX_ATTEMPTS", defaults.push_max_attempts)?,
            restart_delay: Duration::from_secs(
                env.parse_or("RESTART_DELAY_SECS", defaults.restart_delay.as_secs())?,
            ),
            rules: defaults.rules,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.channel_secret.trim().is_empty() {
            return Err(BotError::ConfigError(
                "Channel secret must not be empty".to_string(),
            ));
        }

        if self.channel_access_token.trim().is_empty() {
            return Err(BotError::ConfigError(
                "Channel access token must not be empty".to_string(),
            ));
        }

        if self.push_max_attempts == 0 {
            return Err(BotError::ConfigError(
                "push_max_attempts must be greater than 0".to_string(),
            ));
        }

        if self.rules.lower_bound > self.rules.upper_bound {
            return Err(BotError::ConfigError(format!(
                "Guessing range {}..={} is empty",
                self.rules.lower_bound, self.rules.upper_bound
            )));
        }

        Ok(())
    }

    /// Settings for the LINE client
    pub fn line_config(&self) -> LineConfig {
        LineConfig::new(self.channel_access_token.clone())
            .with_api_base(self.api_base.clone())
            .with_timeout(self.request_timeout.as_secs())
            .with_push_retry(RetryPolicy::default().with_max_attempts(self.push_max_attempts))
    }
}

/// Builder for BotConfig
#[derive(Debug, Default)]
pub struct BotConfigBuilder {
    channel_secret: Option<String>,
    channel_access_token: Option<String>,
    bind_address: Option<IpAddr>,
    port: Option<u16>,
    api_base: Option<String>,
    request_timeout: Option<Duration>,
    push_max_attempts: Option<u32>,
    restart_delay: Option<Duration>,
    rules: Option<GameRules>,
}

impl BotConfigBuilder {
    /// Set the channel secret
    pub fn channel_secret(mut self, secret: impl Into<String>) -> Self {
        self.channel_secret = Some(secret.into());
        self
    }

    /// Set the channel access token
    pub fn channel_access_token(mut self, token: impl Into<String>) -> Self {
        self.channel_access_token = Some(token.into());
        self
    }

    /// Set the bind address
    pub fn bind_address(mut self, address: IpAddr) -> Self {
        self.bind_address = Some(address);
        self
    }

    /// Set the listening port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the Messaging API base URL
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Set the outbound request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Set the push attempt budget
    pub fn push_max_attempts(mut self, attempts: u32) -> Self {
        self.push_max_attempts = Some(attempts);
        self
    }

    /// Set the restart delay
    pub fn restart_delay(mut self, delay: Duration) -> Self {
        self.restart_delay = Some(delay);
        self
    }

    /// Set the game rules
    pub fn rules(mut self, rules: GameRules) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<BotConfig> {
        let defaults = BotConfig::default();

        let config = BotConfig {
            channel_secret: self.channel_secret.unwrap_or(defaults.channel_secret),
            channel_access_token: self
                .channel_access_token
                .unwrap_or(defaults.channel_access_token),
            bind_address: self.bind_address.unwrap_or(defaults.bind_address),
            port: self.port.unwrap_or(defaults.port),
            api_base: self.api_base.unwrap_or(defaults.api_base),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            push_max_attempts: self.push_max_attempts.unwrap_or(defaults.push_max_attempts),
            restart_delay: self.restart_delay.unwrap_or(defaults.restart_delay),
            rules: self.rules.unwrap_or(defaults.rules),
        };

        config.validate()?;
        Ok(config)
    }
}
