//! Wall-of-Fame archive entry - a snapshot of a contest winner

use chrono::{DateTime, Utc};

use crate::entities::Post;
use crate::value_objects::Snowflake;

/// Snapshot that outlives the post it was taken from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallOfFameEntry {
    pub id: Snowflake,
    /// May refer to a post that no longer exists
    pub post_id: Snowflake,
    pub title: String,
    /// Resolved at archive time
    pub media_url: String,
    pub description: Option<String>,
    pub likes: i64,
    pub post_created_at: DateTime<Utc>,
    pub archived_at: DateTime<Utc>,
}

impl WallOfFameEntry {
    pub fn snapshot(id: Snowflake, post: &Post, likes: i64, media_url: String) -> Self {
        Self {
            id,
            post_id: post.id,
            title: post.title.clone(),
            media_url,
            description: post.description.clone(),
            likes,
            post_created_at: post.created_at,
            archived_at: Utc::now(),
        }
    }
}
