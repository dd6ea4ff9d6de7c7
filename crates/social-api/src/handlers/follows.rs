//! Follow handlers

use axum::{extract::State, Json};
use social_service::{FollowService, FollowStatusResponse};

use crate::extractors::{AuthUser, IdPath};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Follow a user
///
/// PUT /users/{user_id}/follow
pub async fn follow_user(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(user_id): IdPath,
) -> ApiResult<NoContent> {
    let service = FollowService::new(state.service_context());
    service.follow(&auth.caller, user_id).await?;
    Ok(NoContent)
}

/// Unfollow a user
///
/// DELETE /users/{user_id}/follow
pub async fn unfollow_user(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(user_id): IdPath,
) -> ApiResult<NoContent> {
    let service = FollowService::new(state.service_context());
    service.unfollow(&auth.caller, user_id).await?;
    Ok(NoContent)
}

/// Whether the caller follows a user
///
/// GET /users/{user_id}/follow
pub async fn get_follow_status(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<FollowStatusResponse>> {
    let service = FollowService::new(state.service_context());
    let following = service.is_following(&auth.caller, user_id).await?;
    Ok(Json(FollowStatusResponse { following }))
}
