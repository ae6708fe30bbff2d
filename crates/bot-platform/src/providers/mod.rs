//! Concrete messaging platform implementations
//!
//! This module contains implementations of the MessagingPlatform trait for
//! specific chat services.

pub mod line;

pub use line::{LineConfig, LinePlatform};
