//! # social-core
//!
//! Domain layer containing entities, value objects, the weekly contest rules and
//! the repository / media ports. This crate has zero dependencies on
//! infrastructure (database, web framework, etc.).

pub mod contest;
pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use contest::{select_winner, PostTally, PurgeReport, RoundSettlement};
pub use entities::{
    AuthenticatedCaller, Comment, Follow, Like, Notification, NotificationKind, Post, User,
    WallOfFameEntry, UNKNOWN_USER_NAME,
};
pub use error::DomainError;
pub use traits::{
    CommentRepository, ContestRepository, FollowRepository, LikeRepository, MediaStore,
    NotificationRepository, PostRepository, RepoResult, UserRepository, WallOfFameRepository,
};
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
