//! Comment entity - a message attached to a post

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Comment entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub post_id: Snowflake,
    pub sender_id: Snowflake,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Maximum comment length in characters
    pub const MAX_CONTENT_LENGTH: usize = 2000;

    pub fn new(id: Snowflake, post_id: Snowflake, sender_id: Snowflake, content: String) -> Self {
        Self {
            id,
            post_id,
            sender_id,
            content,
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_sent_by(&self, user_id: Snowflake) -> bool {
        self.sender_id == user_id
    }
}
