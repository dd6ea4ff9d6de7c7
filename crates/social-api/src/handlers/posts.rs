//! Post handlers
//!
//! Endpoints for creating, listing and deleting posts.

use axum::{extract::State, Json};
use social_service::{CreatePostRequest, PostResponse, PostService, UploadUrlResponse};

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Create a post
///
/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let response = service.create_post(&auth.caller, request).await?;
    Ok(Created(Json(response)))
}

/// Feed: posts of followed users first, then everything else, newest first
///
/// GET /posts
pub async fn get_feed(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<PostResponse>>> {
    let service = PostService::new(state.service_context());
    Ok(Json(service.feed(&auth.caller).await?))
}

/// Delete a post along with its likes and comments
///
/// DELETE /posts/{post_id}
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath,
) -> ApiResult<NoContent> {
    let service = PostService::new(state.service_context());
    service.delete_post(&auth.caller, post_id).await?;
    Ok(NoContent)
}

/// Issue a location to upload post media to
///
/// POST /posts/upload-url
pub async fn create_upload_url(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UploadUrlResponse>> {
    let service = PostService::new(state.service_context());
    Ok(Json(service.generate_upload_url(&auth.caller).await?))
}
