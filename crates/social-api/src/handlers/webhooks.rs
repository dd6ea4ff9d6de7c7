//! Identity-provider webhook
//!
//! Deliveries are verified before they are parsed. Any failure is answered
//! with a plain 400 so the provider retries.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use social_common::WebhookHeaders;
use social_service::{IdentityEvent, IdentitySyncService, SyncOutcome};
use tracing::{debug, warn};

use crate::state::AppState;

/// POST /webhooks/identity
pub async fn identity_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    match process(&state, &headers, &body).await {
        Ok(outcome) => {
            debug!(?outcome, "Identity webhook processed");
            StatusCode::OK.into_response()
        }
        Err(message) => {
            warn!(error = %message, "Identity webhook rejected");
            (StatusCode::BAD_REQUEST, message).into_response()
        }
    }
}

async fn process(state: &AppState, headers: &HeaderMap, body: &[u8]) -> Result<SyncOutcome, String> {
    let signature_headers =
        WebhookHeaders::from_lookup(|name| headers.get(name).and_then(|v| v.to_str().ok()))
            .map_err(|e| e.to_string())?;

    state
        .webhook_verifier()
        .verify(&signature_headers, body)
        .map_err(|e| e.to_string())?;

    let event: IdentityEvent =
        serde_json::from_slice(body).map_err(|e| format!("invalid payload: {e}"))?;

    IdentitySyncService::new(state.service_context())
        .handle(event)
        .await
        .map_err(|e| e.to_string())
}
