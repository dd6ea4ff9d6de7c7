//! Wall-of-Fame database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for wall_of_fame table
#[derive(Debug, Clone, FromRow)]
pub struct WallOfFameModel {
    pub id: i64,
    pub post_id: i64,
    pub title: String,
    pub media_url: String,
    pub description: Option<String>,
    pub likes: i64,
    pub post_created_at: DateTime<Utc>,
    pub archived_at: DateTime<Utc>,
}
