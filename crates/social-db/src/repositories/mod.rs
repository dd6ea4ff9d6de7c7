//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in social-core.
//! Each repository handles database operations for a specific domain entity.

mod comment;
mod contest;
mod error;
mod follow;
mod like;
mod notification;
mod post;
mod user;
mod wall_of_fame;

pub use comment::PgCommentRepository;
pub use contest::PgContestRepository;
pub use follow::PgFollowRepository;
pub use like::PgLikeRepository;
pub use notification::PgNotificationRepository;
pub use post::PgPostRepository;
pub use user::PgUserRepository;
pub use wall_of_fame::PgWallOfFameRepository;
