//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("No user is registered for identity {0}")]
    IdentityNotFound(String),

    #[error("Post not found: {0}")]
    PostNotFound(Snowflake),

    #[error("Comment not found: {0}")]
    CommentNotFound(Snowflake),

    #[error("Notification not found: {0}")]
    NotificationNotFound(Snowflake),

    #[error("Not following this user")]
    NotFollowing,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    #[error("Cannot follow yourself")]
    SelfFollow,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Caller does not match the sender of this request")]
    InvalidSender,

    #[error("Not the creator of this post")]
    NotPostCreator,

    #[error("Not the sender of this comment")]
    NotCommentSender,

    #[error("Notification belongs to another user")]
    NotNotificationOwner,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Already following this user")]
    AlreadyFollowing,

    #[error("Like changed concurrently, retry the request")]
    LikeConflict,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Media storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) | Self::IdentityNotFound(_) => "UNKNOWN_USER",
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::NotificationNotFound(_) => "UNKNOWN_NOTIFICATION",
            Self::NotFollowing => "NOT_FOLLOWING",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::SelfFollow => "CANNOT_FOLLOW_SELF",

            // Authorization
            Self::InvalidSender => "INVALID_SENDER",
            Self::NotPostCreator => "NOT_POST_CREATOR",
            Self::NotCommentSender => "NOT_COMMENT_SENDER",
            Self::NotNotificationOwner => "NOT_NOTIFICATION_OWNER",

            // Conflict
            Self::AlreadyFollowing => "ALREADY_FOLLOWING",
            Self::LikeConflict => "LIKE_CONFLICT",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::IdentityNotFound(_)
                | Self::PostNotFound(_)
                | Self::CommentNotFound(_)
                | Self::NotificationNotFound(_)
                | Self::NotFollowing
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::ContentTooLong { .. } | Self::SelfFollow
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::InvalidSender
                | Self::NotPostCreator
                | Self::NotCommentSender
                | Self::NotNotificationOwner
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadyFollowing | Self::LikeConflict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DomainError::PostNotFound(Snowflake::new(1)).code(), "UNKNOWN_POST");
        assert_eq!(DomainError::LikeConflict.code(), "LIKE_CONFLICT");
        assert_eq!(DomainError::NotFollowing.code(), "NOT_FOLLOWING");
    }

    #[test]
    fn test_classification() {
        assert!(DomainError::NotFollowing.is_not_found());
        assert!(DomainError::IdentityNotFound("app|x".into()).is_not_found());
        assert!(DomainError::SelfFollow.is_validation());
        assert!(DomainError::NotCommentSender.is_authorization());
        assert!(DomainError::LikeConflict.is_conflict());
        assert!(!DomainError::DatabaseError("boom".into()).is_conflict());
        assert!(!DomainError::AlreadyFollowing.is_not_found());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::PostNotFound(Snowflake::new(123));
        assert_eq!(err.to_string(), "Post not found: 123");

        let err = DomainError::ContentTooLong { max: 2000 };
        assert_eq!(err.to_string(), "Content too long: max 2000 characters");
    }
}
