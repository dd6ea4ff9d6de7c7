//! Notification entity - created only as a side effect of other operations

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// What triggered a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationKind {
    Like,
    Comment,
    Follow,
    Unfollow,
    WallOfFame,
}

impl NotificationKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Comment => "comment",
            Self::Follow => "follow",
            Self::Unfollow => "unfollow",
            Self::WallOfFame => "wallOfFame",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Self::Like),
            "comment" => Ok(Self::Comment),
            "follow" => Ok(Self::Follow),
            "unfollow" => Ok(Self::Unfollow),
            "wallOfFame" => Ok(Self::WallOfFame),
            other => Err(DomainError::InternalError(format!(
                "unknown notification kind: {other}"
            ))),
        }
    }
}

/// Notification addressed to `user_id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub kind: NotificationKind,
    pub post_id: Option<Snowflake>,
    pub actor_id: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
    pub is_read: bool,
}

impl Notification {
    fn build(
        id: Snowflake,
        user_id: Snowflake,
        kind: NotificationKind,
        post_id: Option<Snowflake>,
        actor_id: Option<Snowflake>,
    ) -> Self {
        Self {
            id,
            user_id,
            kind,
            post_id,
            actor_id,
            created_at: Utc::now(),
            is_read: false,
        }
    }

    pub fn like(id: Snowflake, recipient: Snowflake, post_id: Snowflake, actor: Snowflake) -> Self {
        Self::build(id, recipient, NotificationKind::Like, Some(post_id), Some(actor))
    }

    pub fn comment(id: Snowflake, recipient: Snowflake, post_id: Snowflake, actor: Snowflake) -> Self {
        Self::build(id, recipient, NotificationKind::Comment, Some(post_id), Some(actor))
    }

    pub fn follow(id: Snowflake, recipient: Snowflake, actor: Snowflake) -> Self {
        Self::build(id, recipient, NotificationKind::Follow, None, Some(actor))
    }

    pub fn unfollow(id: Snowflake, recipient: Snowflake, actor: Snowflake) -> Self {
        Self::build(id, recipient, NotificationKind::Unfollow, None, Some(actor))
    }

    /// Contest win; no actor
    pub fn wall_of_fame(id: Snowflake, recipient: Snowflake, post_id: Snowflake) -> Self {
        Self::build(id, recipient, NotificationKind::WallOfFame, Some(post_id), None)
    }

    #[inline]
    pub fn is_addressed_to(&self, user_id: Snowflake) -> bool {
        self.user_id == user_id
    }

    /// The like notification a like/unlike pair shares
    pub fn matches_like(&self, recipient: Snowflake, post_id: Snowflake, actor: Snowflake) -> bool {
        self.kind == NotificationKind::Like
            && self.user_id == recipient
            && self.post_id == Some(post_id)
            && self.actor_id == Some(actor)
    }
}
