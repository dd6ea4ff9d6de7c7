//! Notification handlers

use axum::{extract::State, Json};
use social_service::{MarkAllReadResponse, NotificationListResponse, NotificationService};

use crate::extractors::{AuthUser, IdPath};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// The caller's notifications, newest first, with counts
///
/// GET /notifications
pub async fn get_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<NotificationListResponse>> {
    let service = NotificationService::new(state.service_context());
    Ok(Json(service.list(&auth.caller).await?))
}

/// POST /notifications/{notification_id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(notification_id): IdPath,
) -> ApiResult<NoContent> {
    let service = NotificationService::new(state.service_context());
    service.mark_read(&auth.caller, notification_id).await?;
    Ok(NoContent)
}

/// POST /notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<MarkAllReadResponse>> {
    let service = NotificationService::new(state.service_context());
    Ok(Json(service.mark_all_read(&auth.caller).await?))
}
