//! Health check handlers
//!
//! Endpoints for liveness and readiness checks.

use axum::{extract::State, http::StatusCode, Json};
use social_service::{HealthResponse, ReadinessResponse};

use crate::state::AppState;

/// Basic health check (liveness)
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness check with dependency health
///
/// GET /health/ready
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    // The in-process store is always reachable
    let db_healthy = match state.db_pool() {
        Some(pool) => pool.acquire().await.is_ok(),
        None => true,
    };

    let media_healthy = tokio::fs::metadata(&state.config().media.upload_dir)
        .await
        .is_ok_and(|m| m.is_dir());

    let response = ReadinessResponse::ready(db_healthy, media_healthy);
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
