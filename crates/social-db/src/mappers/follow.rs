//! Follow entity <-> model mapper

use social_core::entities::Follow;
use social_core::value_objects::Snowflake;

use crate::models::FollowModel;

impl From<FollowModel> for Follow {
    fn from(model: FollowModel) -> Self {
        Follow {
            follower_id: Snowflake::new(model.follower_id),
            followed_id: Snowflake::new(model.followed_id),
            created_at: model.created_at,
        }
    }
}
