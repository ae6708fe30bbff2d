//! Shared utilities for guess-bot
//!
//! This crate provides common functionality used across the workspace,
//! including logging setup and environment-based configuration helpers.

pub mod config;
pub mod logging;

pub use config::{EnvError, EnvReader, load_dotenv};
pub use logging::{LogFormat, init_tracing};
