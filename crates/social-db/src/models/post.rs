//! Post database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for posts table
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: i64,
    pub creator_id: i64,
    pub title: String,
    pub media_ref: Option<String>,
    pub media_url: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Post row joined with its like count (from the tally query)
#[derive(Debug, Clone, FromRow)]
pub struct PostTallyModel {
    #[sqlx(flatten)]
    pub post: PostModel,
    pub likes: i64,
}
