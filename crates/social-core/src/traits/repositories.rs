//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Every method that writes more than one row
//! commits all of it or none of it.

use async_trait::async_trait;

use crate::contest::{PostTally, PurgeReport, RoundSettlement};
use crate::entities::{Comment, Follow, Like, Notification, Post, User, WallOfFameEntry};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by `<app-domain>|<external-id>`
    async fn find_by_token(&self, token_identifier: &str) -> RepoResult<Option<User>>;

    /// Fetch several users at once; unknown ids are skipped
    async fn find_many(&self, ids: &[Snowflake]) -> RepoResult<Vec<User>>;

    /// All users ordered by name
    async fn list(&self) -> RepoResult<Vec<User>>;

    /// Insert, or refresh the profile of the user holding the same token identifier.
    /// Returns the stored row.
    async fn upsert(&self, user: &User) -> RepoResult<User>;

    /// Overwrite name, email and avatar
    async fn update_profile(&self, user: &User) -> RepoResult<()>;

    /// Flip the online flag; `IdentityNotFound` when no user holds the token
    async fn set_online(&self, token_identifier: &str, online: bool) -> RepoResult<()>;
}

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>>;

    /// Every post, newest first
    async fn list_all(&self) -> RepoResult<Vec<Post>>;

    /// Posts of one creator, newest first
    async fn find_by_creator(&self, creator_id: Snowflake) -> RepoResult<Vec<Post>>;

    /// Create a new post
    async fn create(&self, post: &Post) -> RepoResult<()>;

    /// Remove a post with its likes and comments. Deleting a missing post is a no-op.
    async fn delete_cascade(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Like Repository
// ============================================================================

#[async_trait]
pub trait LikeRepository: Send + Sync {
    async fn find(&self, post_id: Snowflake, user_id: Snowflake) -> RepoResult<Option<Like>>;

    async fn count_by_post(&self, post_id: Snowflake) -> RepoResult<i64>;

    /// Insert a like and its notification together.
    /// A duplicate `(post_id, user_id)` fails with `LikeConflict`.
    async fn create_with_notification(
        &self,
        like: &Like,
        notification: Option<&Notification>,
    ) -> RepoResult<()>;

    /// Remove a like and at most one matching like notification for `recipient`.
    /// Returns whether a like was removed.
    async fn delete_with_notification(
        &self,
        post_id: Snowflake,
        user_id: Snowflake,
        recipient: Snowflake,
    ) -> RepoResult<bool>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>>;

    /// Comments of a post, oldest first
    async fn find_by_post(&self, post_id: Snowflake) -> RepoResult<Vec<Comment>>;

    async fn create_with_notification(
        &self,
        comment: &Comment,
        notification: Option<&Notification>,
    ) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Follow Repository
// ============================================================================

#[async_trait]
pub trait FollowRepository: Send + Sync {
    async fn find(&self, follower_id: Snowflake, followed_id: Snowflake) -> RepoResult<Option<Follow>>;

    /// Ids of users following `user_id`
    async fn follower_ids(&self, user_id: Snowflake) -> RepoResult<Vec<Snowflake>>;

    /// Ids of users `user_id` follows
    async fn following_ids(&self, user_id: Snowflake) -> RepoResult<Vec<Snowflake>>;

    /// A duplicate edge fails with `AlreadyFollowing`
    async fn create_with_notification(
        &self,
        follow: &Follow,
        notification: &Notification,
    ) -> RepoResult<()>;

    /// A missing edge fails with `NotFollowing` and leaves no notification behind
    async fn delete_with_notification(
        &self,
        follower_id: Snowflake,
        followed_id: Snowflake,
        notification: &Notification,
    ) -> RepoResult<()>;
}

// ============================================================================
// Notification Repository
// ============================================================================

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Notification>>;

    /// Notifications addressed to a user, newest first
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Notification>>;

    async fn mark_read(&self, id: Snowflake) -> RepoResult<()>;

    /// Returns how many notifications flipped to read
    async fn mark_all_read(&self, user_id: Snowflake) -> RepoResult<u64>;
}

// ============================================================================
// Wall of Fame Repository
// ============================================================================

#[async_trait]
pub trait WallOfFameRepository: Send + Sync {
    /// Most recently archived entry
    async fn latest(&self) -> RepoResult<Option<WallOfFameEntry>>;
}

// ============================================================================
// Contest Repository
// ============================================================================

#[async_trait]
pub trait ContestRepository: Send + Sync {
    /// Every post with its like count, in creation order
    async fn tally(&self) -> RepoResult<Vec<PostTally>>;

    /// Commit a round atomically: clear notifications and the archive, store the
    /// new entry and announcement, then purge every like, comment and post.
    ///
    /// Fails with `PostNotFound` if the winning post vanished since the tally.
    async fn settle(&self, settlement: &RoundSettlement) -> RepoResult<PurgeReport>;
}
