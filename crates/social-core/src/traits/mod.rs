//! Ports implemented by the infrastructure layer

mod media;
mod repositories;

pub use media::MediaStore;
pub use repositories::{
    CommentRepository, ContestRepository, FollowRepository, LikeRepository,
    NotificationRepository, PostRepository, RepoResult, UserRepository, WallOfFameRepository,
};
