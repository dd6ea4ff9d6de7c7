//! Route definitions
//!
//! The request API is mounted under /api/v1. Media downloads, the identity
//! webhook, the contest trigger and health checks live outside it.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{
    comments, contest, follows, health, likes, media, notifications, posts, users, wall_of_fame,
    webhooks,
};
use crate::state::AppState;

/// Create the main router; uploads are capped at `max_upload_bytes`
pub fn create_router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .nest("/api/v1", api_v1_routes(max_upload_bytes))
        .route("/media/:storage_id", get(media::download_media))
        .route("/webhooks/identity", post(webhooks::identity_webhook))
        .route("/internal/contest/run", post(contest::run_contest))
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .merge(user_routes())
        .merge(post_routes())
        .merge(comment_routes())
        .merge(notification_routes())
        .route("/wall-of-fame", get(wall_of_fame::get_wall_of_fame))
        .route(
            "/media/:storage_id",
            put(media::upload_media).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
}

/// User, follow-graph and profile routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users))
        .route("/users/@me", get(users::get_current_user))
        .route("/users/:user_id", get(users::get_user))
        .route("/users/:user_id/posts", get(users::get_user_posts))
        .route("/users/:user_id/followers", get(users::get_followers))
        .route("/users/:user_id/following", get(users::get_following))
        .route(
            "/users/:user_id/follow",
            put(follows::follow_user)
                .delete(follows::unfollow_user)
                .get(follows::get_follow_status),
        )
}

/// Post, like and per-post comment routes
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", post(posts::create_post).get(posts::get_feed))
        .route("/posts/upload-url", post(posts::create_upload_url))
        .route("/posts/:post_id", delete(posts::delete_post))
        .route("/posts/:post_id/like", post(likes::toggle_like))
        .route("/posts/:post_id/likes", get(likes::get_like_state))
        .route(
            "/posts/:post_id/comments",
            get(comments::get_comments).post(comments::create_comment),
        )
}

fn comment_routes() -> Router<AppState> {
    Router::new().route("/comments/:comment_id", delete(comments::delete_comment))
}

fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(notifications::get_notifications))
        .route("/notifications/read-all", post(notifications::mark_all_read))
        .route("/notifications/:notification_id/read", post(notifications::mark_read))
}
