//! Webhook HTTP server
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | POST | `/webhook` | Signed LINE webhook batch |
//! | GET | `/health` | Health check with the number of live sessions |

use crate::error::{BotError, Result};
use crate::webhook::{Dispatcher, EventOutcome, WebhookPayload};
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use bot_platform::{SIGNATURE_HEADER, verify_signature};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

/// Shared state of the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    dispatcher: Arc<Dispatcher>,
    channel_secret: Arc<str>,
}

impl AppState {
    /// Create handler state
    pub fn new(dispatcher: Dispatcher, channel_secret: impl Into<Arc<str>>) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            channel_secret: channel_secret.into(),
        }
    }

    /// Dispatcher behind the webhook endpoint
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/webhook", post(handle_webhook))
        .route("/health", get(handle_health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handle_health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "OK",
        "active_sessions": state.dispatcher.service().store().len(),
    }))
}

async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Vec<EventOutcome>>> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or(BotError::InvalidSignature)?;

    if !verify_signature(&state.channel_secret, &body, signature) {
        return Err(BotError::InvalidSignature);
    }

    let payload = WebhookPayload::from_slice(&body)
        .map_err(|e| BotError::InvalidPayload(e.to_string()))?;

    let outcomes = state.dispatcher.dispatch(&payload).await?;
    Ok(Json(outcomes))
}

impl IntoResponse for BotError {
    fn into_response(self) -> Response {
        match self {
            BotError::InvalidSignature => {
                warn!("Rejected webhook with a bad signature");
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": self.to_string() })),
                )
                    .into_response()
            }
            BotError::InvalidPayload(_) => {
                warn!(error = %self, "Rejected malformed webhook");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": self.to_string() })),
                )
                    .into_response()
            }
            other => {
                error!(error = %other, "Webhook processing failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
