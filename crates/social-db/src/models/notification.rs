//! Notification database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for notifications table
#[derive(Debug, Clone, FromRow)]
pub struct NotificationModel {
    pub id: i64,
    pub user_id: i64,
    /// `like` | `comment` | `follow` | `unfollow` | `wallOfFame`
    pub kind: String,
    pub post_id: Option<i64>,
    pub actor_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub is_read: bool,
}
