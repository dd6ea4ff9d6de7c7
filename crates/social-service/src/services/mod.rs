//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod comment;
pub mod contest;
pub mod context;
pub mod error;
pub mod follow;
pub mod identity;
pub mod like;
pub mod media;
pub mod notification;
pub mod post;
pub mod user;
pub mod wall_of_fame;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export all services for convenience
pub use comment::CommentService;
pub use contest::{ContestOutcome, ContestService, MAX_SETTLE_ATTEMPTS};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use follow::FollowService;
pub use identity::{IdentitySyncService, SyncOutcome};
pub use like::LikeService;
pub use media::MediaService;
pub use notification::NotificationService;
pub use post::PostService;
pub use user::UserService;
pub use wall_of_fame::WallOfFameService;
