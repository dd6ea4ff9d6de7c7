//! Service context - dependency container for services
//!
//! Holds all repositories, the media store and other dependencies needed by services.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use social_core::traits::{
    CommentRepository, ContestRepository, FollowRepository, LikeRepository, MediaStore,
    NotificationRepository, PostRepository, UserRepository, WallOfFameRepository,
};
use social_core::{Snowflake, SnowflakeGenerator};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Repositories (PostgreSQL or in-process)
/// - The media store
/// - Snowflake generator for ID generation
/// - The contest single-flight flag
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    post_repo: Arc<dyn PostRepository>,
    like_repo: Arc<dyn LikeRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    follow_repo: Arc<dyn FollowRepository>,
    notification_repo: Arc<dyn NotificationRepository>,
    wall_of_fame_repo: Arc<dyn WallOfFameRepository>,
    contest_repo: Arc<dyn ContestRepository>,

    media_store: Arc<dyn MediaStore>,
    snowflake_generator: Arc<SnowflakeGenerator>,

    /// Identity-provider domain prefixing every token identifier
    app_domain: String,

    /// Set while a contest round is in flight
    contest_running: Arc<AtomicBool>,
}

impl ServiceContext {
    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the post repository
    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    /// Get the like repository
    pub fn like_repo(&self) -> &dyn LikeRepository {
        self.like_repo.as_ref()
    }

    /// Get the comment repository
    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    /// Get the follow repository
    pub fn follow_repo(&self) -> &dyn FollowRepository {
        self.follow_repo.as_ref()
    }

    /// Get the notification repository
    pub fn notification_repo(&self) -> &dyn NotificationRepository {
        self.notification_repo.as_ref()
    }

    /// Get the wall of fame repository
    pub fn wall_of_fame_repo(&self) -> &dyn WallOfFameRepository {
        self.wall_of_fame_repo.as_ref()
    }

    /// Get the contest repository
    pub fn contest_repo(&self) -> &dyn ContestRepository {
        self.contest_repo.as_ref()
    }

    // === Services ===

    /// Get the media store
    pub fn media_store(&self) -> &dyn MediaStore {
        self.media_store.as_ref()
    }

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }

    /// Domain part of `<app-domain>|<external-id>` identifiers
    pub fn app_domain(&self) -> &str {
        &self.app_domain
    }

    pub(crate) fn contest_flag(&self) -> &AtomicBool {
        &self.contest_running
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("media_store", &"...")
            .field("app_domain", &self.app_domain)
            .field("worker_id", &self.snowflake_generator.worker_id())
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    post_repo: Option<Arc<dyn PostRepository>>,
    like_repo: Option<Arc<dyn LikeRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    follow_repo: Option<Arc<dyn FollowRepository>>,
    notification_repo: Option<Arc<dyn NotificationRepository>>,
    wall_of_fame_repo: Option<Arc<dyn WallOfFameRepository>>,
    contest_repo: Option<Arc<dyn ContestRepository>>,
    media_store: Option<Arc<dyn MediaStore>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    app_domain: Option<String>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use one store for every repository port
    pub fn store<S>(self, store: Arc<S>) -> Self
    where
        S: UserRepository
            + PostRepository
            + LikeRepository
            + CommentRepository
            + FollowRepository
            + NotificationRepository
            + WallOfFameRepository
            + ContestRepository
            + 'static,
    {
        self.user_repo(store.clone())
            .post_repo(store.clone())
            .like_repo(store.clone())
            .comment_repo(store.clone())
            .follow_repo(store.clone())
            .notification_repo(store.clone())
            .wall_of_fame_repo(store.clone())
            .contest_repo(store)
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn like_repo(mut self, repo: Arc<dyn LikeRepository>) -> Self {
        self.like_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn follow_repo(mut self, repo: Arc<dyn FollowRepository>) -> Self {
        self.follow_repo = Some(repo);
        self
    }

    pub fn notification_repo(mut self, repo: Arc<dyn NotificationRepository>) -> Self {
        self.notification_repo = Some(repo);
        self
    }

    pub fn wall_of_fame_repo(mut self, repo: Arc<dyn WallOfFameRepository>) -> Self {
        self.wall_of_fame_repo = Some(repo);
        self
    }

    pub fn contest_repo(mut self, repo: Arc<dyn ContestRepository>) -> Self {
        self.contest_repo = Some(repo);
        self
    }

    pub fn media_store(mut self, store: Arc<dyn MediaStore>) -> Self {
        self.media_store = Some(store);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn app_domain(mut self, app_domain: impl Into<String>) -> Self {
        self.app_domain = Some(app_domain.into());
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::validation(format!("{name} is required")))
        }

        Ok(ServiceContext {
            user_repo: required(self.user_repo, "user_repo")?,
            post_repo: required(self.post_repo, "post_repo")?,
            like_repo: required(self.like_repo, "like_repo")?,
            comment_repo: required(self.comment_repo, "comment_repo")?,
            follow_repo: required(self.follow_repo, "follow_repo")?,
            notification_repo: required(self.notification_repo, "notification_repo")?,
            wall_of_fame_repo: required(self.wall_of_fame_repo, "wall_of_fame_repo")?,
            contest_repo: required(self.contest_repo, "contest_repo")?,
            media_store: required(self.media_store, "media_store")?,
            snowflake_generator: self
                .snowflake_generator
                .unwrap_or_else(|| Arc::new(SnowflakeGenerator::default())),
            app_domain: required(self.app_domain, "app_domain")?,
            contest_running: Arc::new(AtomicBool::new(false)),
        })
    }
}
