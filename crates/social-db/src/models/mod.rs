//! Database models - SQLx-compatible structs for PostgreSQL tables

mod comment;
mod follow;
mod like;
mod notification;
mod post;
mod user;
mod wall_of_fame;

pub use comment::CommentModel;
pub use follow::FollowModel;
pub use like::LikeModel;
pub use notification::NotificationModel;
pub use post::{PostModel, PostTallyModel};
pub use user::UserModel;
pub use wall_of_fame::WallOfFameModel;
