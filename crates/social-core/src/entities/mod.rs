//! Domain entities - core business objects

mod caller;
mod comment;
mod follow;
mod like;
mod notification;
mod post;
mod user;
mod wall_of_fame;

pub use caller::AuthenticatedCaller;
pub use comment::Comment;
pub use follow::Follow;
pub use like::Like;
pub use notification::{Notification, NotificationKind};
pub use post::Post;
pub use user::{User, UNKNOWN_USER_NAME};
pub use wall_of_fame::WallOfFameEntry;
