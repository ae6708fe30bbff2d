//! Messaging platform abstraction layer for guess-bot
//!
//! This crate provides platform-agnostic abstractions for delivering bot
//! messages. It includes:
//!
//! - The [`MessagingPlatform`] trait with reply and push delivery
//! - Outbound message types
//! - A retry policy with exponential backoff for out-of-band delivery
//! - Webhook signature verification
//! - Concrete platform implementations (behind feature flags)

pub mod error;
pub mod message;
pub mod platform;
pub mod retry;
pub mod signature;

// Re-export main types
pub use error::{PlatformError, Result};
pub use message::{MAX_MESSAGES_PER_REQUEST, OutboundMessage};
pub use platform::MessagingPlatform;
pub use retry::RetryPolicy;
pub use signature::{SIGNATURE_HEADER, sign_body, verify_signature};

// Platform implementations (feature-gated)
#[cfg(feature = "line")]
pub mod providers;
