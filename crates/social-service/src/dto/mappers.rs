//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.
//! Responses that need data from other aggregates (resolved media, sender
//! names) are built with explicit constructors instead.

use social_core::entities::{Comment, Notification, Post, User, WallOfFameEntry};

use super::responses::{
    CommentResponse, CurrentUserResponse, NotificationResponse, PostResponse, UserResponse,
    WallOfFameResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.display_name().to_string(),
            avatar_url: user.avatar_url.clone(),
            is_online: user.is_online,
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.display_name().to_string(),
            email: user.email.clone(),
            avatar_url: user.avatar_url.clone(),
            is_online: user.is_online,
            created_at: user.created_at,
        }
    }
}

// ============================================================================
// Post Mappers
// ============================================================================

impl PostResponse {
    pub fn with_media(post: &Post, media_url: Option<String>) -> Self {
        Self {
            id: post.id.to_string(),
            creator_id: post.creator_id.to_string(),
            title: post.title.clone(),
            media_ref: post.media_ref.clone(),
            media_url,
            description: post.description.clone(),
            created_at: post.created_at,
        }
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

impl CommentResponse {
    /// `sender` is `None` when the sender record is missing
    pub fn with_sender(comment: &Comment, sender: Option<&User>) -> Self {
        Self {
            id: comment.id.to_string(),
            post_id: comment.post_id.to_string(),
            sender_id: comment.sender_id.to_string(),
            content: comment.content.clone(),
            created_at: comment.created_at,
            sender_name: sender
                .map_or(social_core::UNKNOWN_USER_NAME, User::display_name)
                .to_string(),
            sender_avatar_url: sender.map(|u| u.avatar_url.clone()).unwrap_or_default(),
        }
    }
}

// ============================================================================
// Notification Mappers
// ============================================================================

impl NotificationResponse {
    pub fn enriched(notification: &Notification, post: Option<&Post>, actor: Option<&User>) -> Self {
        Self {
            id: notification.id.to_string(),
            kind: notification.kind,
            post_id: notification.post_id.map(|id| id.to_string()),
            actor_id: notification.actor_id.map(|id| id.to_string()),
            created_at: notification.created_at,
            is_read: notification.is_read,
            post_title: post.map(|p| p.title.clone()),
            actor_name: actor
                .map_or(social_core::UNKNOWN_USER_NAME, User::display_name)
                .to_string(),
        }
    }
}

// ============================================================================
// Wall of Fame Mappers
// ============================================================================

impl From<&WallOfFameEntry> for WallOfFameResponse {
    fn from(entry: &WallOfFameEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            post_id: entry.post_id.to_string(),
            title: entry.title.clone(),
            media_url: entry.media_url.clone(),
            description: entry.description.clone(),
            likes: entry.likes,
            post_created_at: entry.post_created_at,
            archived_at: entry.archived_at,
        }
    }
}

impl From<WallOfFameEntry> for WallOfFameResponse {
    fn from(entry: WallOfFameEntry) -> Self {
        Self::from(&entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use social_core::Snowflake;

    #[test]
    fn test_user_response_uses_display_name() {
        let user = User::new(Snowflake::new(5), "app|u".into(), "a@b.c".into());
        let response = UserResponse::from(&user);
        assert_eq!(response.id, "5");
        assert_eq!(response.name, social_core::UNKNOWN_USER_NAME);
    }

    #[test]
    fn test_comment_without_sender() {
        let comment = Comment::new(Snowflake::new(1), Snowflake::new(2), Snowflake::new(3), "hi".into());
        let response = CommentResponse::with_sender(&comment, None);
        assert_eq!(response.sender_name, social_core::UNKNOWN_USER_NAME);
        assert_eq!(response.sender_avatar_url, "");
    }
}
