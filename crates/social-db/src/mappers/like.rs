//! Like entity <-> model mapper

use social_core::entities::Like;
use social_core::value_objects::Snowflake;

use crate::models::LikeModel;

impl From<LikeModel> for Like {
    fn from(model: LikeModel) -> Self {
        Like {
            post_id: Snowflake::new(model.post_id),
            user_id: Snowflake::new(model.user_id),
            created_at: model.created_at,
        }
    }
}
