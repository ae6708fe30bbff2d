//! Number-guessing bot for the LINE Messaging API
//!
//! The user thinks of a number and the bot finds it by binary search,
//! one guess per message. The user answers `Over` or `Under`, announces a
//! correct guess with a win marker, and can quit at any time.
//!
//! # Architecture
//!
//! - [`game`]: pure rules and state transitions
//! - [`session`]: per-user sessions and their restart timers
//! - [`service`]: applies transitions and runs the automatic restart
//! - [`webhook`]: payload model and the dispatcher that fans a batch out
//! - [`server`]: axum router with signature verification
//!
//! # Example
//!
//! ```rust,ignore
//! use bot_platform::providers::LinePlatform;
//! use guess_bot::{AppState, BotConfig, Dispatcher, GameService, SessionStore, create_router};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = BotConfig::from_env()?;
//!     let platform = Arc::new(LinePlatform::with_config(config.line_config())?);
//!
//!     let service = GameService::new(
//!         SessionStore::new(),
//!         platform,
//!         config.rules.clone(),
//!         config.restart_delay,
//!     );
//!     let app = create_router(AppState::new(Dispatcher::new(service), config.channel_secret));
//!
//!     let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod game;
pub mod server;
pub mod service;
pub mod session;
pub mod webhook;

#[cfg(test)]
mod test_support;

// Re-export main types for convenience
pub use config::{BotConfig, BotConfigBuilder};
pub use error::{BotError, Result};
pub use game::{Action, GameRules, GameSession};
pub use server::{AppState, create_router};
pub use service::GameService;
pub use session::SessionStore;
pub use webhook::{Dispatcher, EventOutcome};
