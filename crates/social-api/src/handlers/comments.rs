//! Comment handlers

use axum::{extract::State, Json};
use social_service::{CommentResponse, CommentService, CreateCommentRequest};

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Comments of a post, oldest first
///
/// GET /posts/{post_id}/comments
pub async fn get_comments(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(post_id): IdPath,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    Ok(Json(service.list_comments(post_id).await?))
}

/// Comment on a post
///
/// POST /posts/{post_id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let response = service.create_comment(&auth.caller, post_id, request).await?;
    Ok(Created(Json(response)))
}

/// Delete one of the caller's comments
///
/// DELETE /comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(comment_id): IdPath,
) -> ApiResult<NoContent> {
    let service = CommentService::new(state.service_context());
    service.delete_comment(&auth.caller, comment_id).await?;
    Ok(NoContent)
}
