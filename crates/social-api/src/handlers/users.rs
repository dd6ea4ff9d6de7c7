//! User handlers
//!
//! Endpoints for profiles, a user's posts and their follow graph.

use axum::{extract::State, Json};
use social_service::{CurrentUserResponse, FollowService, PostResponse, PostService, UserResponse, UserService};

use crate::extractors::{AuthUser, IdPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// Get current user
///
/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.me(&auth.caller).await?;
    Ok(Json(response))
}

/// List every user by name
///
/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.list_users().await?))
}

/// Get user by ID (public profile)
///
/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.get_user(user_id).await?))
}

/// Posts created by a user, newest first
///
/// GET /users/{user_id}/posts
pub async fn get_user_posts(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<Vec<PostResponse>>> {
    let service = PostService::new(state.service_context());
    Ok(Json(service.user_posts(user_id).await?))
}

/// GET /users/{user_id}/followers
pub async fn get_followers(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let service = FollowService::new(state.service_context());
    Ok(Json(service.followers(user_id).await?))
}

/// GET /users/{user_id}/following
pub async fn get_following(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let service = FollowService::new(state.service_context());
    Ok(Json(service.following(user_id).await?))
}
