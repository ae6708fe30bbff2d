//! Inbound webhook handling
//!
//! - [`event`]: the payload LINE posts and the text events extracted from it
//! - [`dispatcher`]: fans a batch out to the game and delivers replies

pub mod dispatcher;
pub mod event;

pub use dispatcher::{Dispatcher, EventOutcome};
pub use event::{TextMessageEvent, WebhookPayload};
