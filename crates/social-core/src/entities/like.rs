//! Like entity - one user's like on one post

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// At most one exists per `(post_id, user_id)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Like {
    pub post_id: Snowflake,
    pub user_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Like {
    pub fn new(post_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            post_id,
            user_id,
            created_at: Utc::now(),
        }
    }
}
