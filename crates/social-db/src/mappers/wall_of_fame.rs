//! Wall-of-Fame entity <-> model mapper

use social_core::entities::WallOfFameEntry;
use social_core::value_objects::Snowflake;

use crate::models::WallOfFameModel;

impl From<WallOfFameModel> for WallOfFameEntry {
    fn from(model: WallOfFameModel) -> Self {
        WallOfFameEntry {
            id: Snowflake::new(model.id),
            post_id: Snowflake::new(model.post_id),
            title: model.title,
            media_url: model.media_url,
            description: model.description,
            likes: model.likes,
            post_created_at: model.post_created_at,
            archived_at: model.archived_at,
        }
    }
}
