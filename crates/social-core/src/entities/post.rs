//! Post entity - a user-created entry that can hold media

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Post entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Snowflake,
    pub creator_id: Snowflake,
    pub title: String,
    /// Opaque storage id handed out by the media store
    pub media_ref: Option<String>,
    /// Advisory URL persisted by older clients; resolution goes through `media_ref`
    pub media_url: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Maximum title length
    pub const MAX_TITLE_LENGTH: usize = 200;
    /// Maximum description length
    pub const MAX_DESCRIPTION_LENGTH: usize = 2000;

    pub fn new(id: Snowflake, creator_id: Snowflake, title: String) -> Self {
        Self {
            id,
            creator_id,
            title,
            media_ref: None,
            media_url: String::new(),
            description: None,
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_created_by(&self, user_id: Snowflake) -> bool {
        self.creator_id == user_id
    }

    /// Stored URL, if any was persisted
    pub fn stored_media_url(&self) -> Option<&str> {
        Some(self.media_url.as_str()).filter(|u| !u.is_empty())
    }
}
