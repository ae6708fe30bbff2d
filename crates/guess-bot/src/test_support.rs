//! Fakes shared by unit tests

use async_trait::async_trait;
use bot_platform::{MessagingPlatform, PlatformError, Result};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// A message the fake was asked to deliver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Reply { reply_token: String, texts: Vec<String> },
    Push { user_id: String, texts: Vec<String> },
}

/// Platform that records successful deliveries
#[derive(Default)]
pub struct RecordingPlatform {
    deliveries: Mutex<Vec<Delivery>>,
    fail_replies: AtomicBool,
    fail_pushes: AtomicBool,
}

impl RecordingPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_replies(&self) {
        self.fail_replies.store(true, Ordering::SeqCst);
    }

    pub fn fail_pushes(&self) {
        self.fail_pushes.store(true, Ordering::SeqCst);
    }

    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().unwrap().clone()
    }

    fn record(&self, delivery: Delivery) {
        self.deliveries.lock().unwrap().push(delivery);
    }
}

#[async_trait]
impl MessagingPlatform for RecordingPlatform {
    async fn reply_message(&self, reply_token: &str, texts: &[String]) -> Result<()> {
        if self.fail_replies.load(Ordering::SeqCst) {
            return Err(PlatformError::InvalidRequest("Invalid reply token".to_string()));
        }
        self.record(Delivery::Reply {
            reply_token: reply_token.to_string(),
            texts: texts.to_vec(),
        });
        Ok(())
    }

    async fn push_message(&self, user_id: &str, texts: &[String]) -> Result<()> {
        if self.fail_pushes.load(Ordering::SeqCst) {
            return Err(PlatformError::ServerError {
                status: 500,
                body: "unavailable".to_string(),
            });
        }
        self.record(Delivery::Push {
            user_id: user_id.to_string(),
            texts: texts.to_vec(),
        });
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}
