//! Test fixtures and data generators
//!
//! Request bodies and the response shapes the tests read back.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Create post request
#[derive(Debug, Serialize)]
pub struct CreatePostRequest {
    pub creator_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreatePostRequest {
    pub fn titled(creator_id: &str, title: &str) -> Self {
        Self {
            creator_id: creator_id.to_string(),
            title: title.to_string(),
            media_ref: None,
            description: None,
        }
    }
}

/// Create comment request
#[derive(Debug, Serialize)]
pub struct CreateCommentRequest {
    pub sender_id: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar_url: String,
    pub is_online: bool,
}

#[derive(Debug, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub is_online: bool,
}

#[derive(Debug, Deserialize)]
pub struct Post {
    pub id: String,
    pub creator_id: String,
    pub title: String,
    pub media_ref: Option<String>,
    pub media_url: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct LikeState {
    pub liked: bool,
    pub like_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub sender_id: String,
    pub content: String,
    pub sender_name: String,
}

#[derive(Debug, Deserialize)]
pub struct Notification {
    pub id: String,
    pub kind: String,
    pub post_id: Option<String>,
    pub actor_id: Option<String>,
    pub is_read: bool,
    pub post_title: Option<String>,
    pub actor_name: String,
}

#[derive(Debug, Deserialize)]
pub struct NotificationList {
    pub notifications: Vec<Notification>,
    pub count: usize,
    pub unread: usize,
}

#[derive(Debug, Deserialize)]
pub struct MarkAllRead {
    pub updated: u64,
}

#[derive(Debug, Deserialize)]
pub struct FollowStatus {
    pub following: bool,
}

#[derive(Debug, Deserialize)]
pub struct WallOfFameEntry {
    pub post_id: String,
    pub title: String,
    pub media_url: String,
    pub likes: i64,
}

#[derive(Debug, Deserialize)]
pub struct ContestRun {
    pub outcome: String,
    pub entry: Option<WallOfFameEntry>,
}

#[derive(Debug, Deserialize)]
pub struct UploadUrl {
    pub upload_url: String,
}

#[derive(Debug, Deserialize)]
pub struct MediaUpload {
    pub storage_id: String,
}
