//! Like handlers

use axum::{extract::State, Json};
use social_service::{LikeService, LikeStateResponse};

use crate::extractors::{AuthUser, IdPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// Like the post, or take the like back
///
/// POST /posts/{post_id}/like
pub async fn toggle_like(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath,
) -> ApiResult<Json<LikeStateResponse>> {
    let service = LikeService::new(state.service_context());
    Ok(Json(service.toggle_like(&auth.caller, post_id).await?))
}

/// Like count and whether the caller liked the post
///
/// GET /posts/{post_id}/likes
pub async fn get_like_state(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath,
) -> ApiResult<Json<LikeStateResponse>> {
    let service = LikeService::new(state.service_context());
    Ok(Json(service.like_state(&auth.caller, post_id).await?))
}
