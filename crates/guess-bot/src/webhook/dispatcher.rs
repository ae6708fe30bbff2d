//! Event dispatcher

use crate::error::{BotError, Result};
use crate::game::Action;
use crate::service::GameService;
use crate::webhook::{TextMessageEvent, WebhookPayload};
use futures::future::join_all;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info};

/// What happened to one event of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventOutcome {
    /// Messages were sent on the reply channel
    Replied,
    /// The game had nothing to say
    Ignored,
    /// Not a text message from a user
    Skipped,
}

/// Routes webhook events to the game and delivers the replies
#[derive(Clone)]
pub struct Dispatcher {
    service: GameService,
}

impl Dispatcher {
    /// Create a dispatcher for a service
    pub fn new(service: GameService) -> Self {
        Self { service }
    }

    /// Game service behind this dispatcher
    pub fn service(&self) -> &GameService {
        &self.service
    }

    /// Process every event of a batch concurrently
    ///
    /// Fails if any single event fails, after all of them have run.
    pub async fn dispatch(&self, payload: &WebhookPayload) -> Result<Vec<EventOutcome>> {
        info!(events = payload.events.len(), "Dispatching webhook batch");

        let results = join_all(
            payload
                .events
                .iter()
                .map(|event| self.handle_event(event)),
        )
        .await;

        let mut outcomes = Vec::with_capacity(results.len());
        let mut first_error: Option<BotError> = None;
        for result in results {
            match result {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    error!(error = %e, "Event handling failed");
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(outcomes),
        }
    }

    async fn handle_event(&self, event: &Value) -> Result<EventOutcome> {
        let Some(message) = TextMessageEvent::from_value(event) else {
            let event_type = event
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            debug!(event_type, "Skipping event");
            return Ok(EventOutcome::Skipped);
        };

        match self.service.handle_text(&message.user_id, &message.text)? {
            Action::Silent => Ok(EventOutcome::Ignored),
            Action::Send(texts) => {
                self.service
                    .platform()
                    .reply_message(&message.reply_token, &texts)
                    .await?;
                Ok(EventOutcome::Replied)
            }
        }
    }
}
