//! Contest trigger for an external scheduler

use axum::{extract::State, http::HeaderMap, Json};
use social_service::{ContestRunResponse, ContestService};
use tracing::info;

use crate::middleware::SCHEDULER_KEY_HEADER;
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Run the weekly contest now
///
/// POST /internal/contest/run
pub async fn run_contest(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<ContestRunResponse>> {
    // no configured key disables the trigger
    let expected = state
        .config()
        .contest
        .trigger_key
        .as_deref()
        .ok_or(ApiError::InvalidSchedulerKey)?;
    let presented = headers
        .get(SCHEDULER_KEY_HEADER)
        .and_then(|v| v.to_str().ok());
    if presented != Some(expected) {
        return Err(ApiError::InvalidSchedulerKey);
    }

    info!("Contest triggered by external scheduler");
    let outcome = ContestService::new(state.service_context()).run_contest().await?;
    Ok(Json(outcome.into()))
}
