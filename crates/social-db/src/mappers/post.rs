//! Post entity <-> model mapper

use social_core::contest::PostTally;
use social_core::entities::Post;
use social_core::value_objects::Snowflake;

use crate::models::{PostModel, PostTallyModel};

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: Snowflake::new(model.id),
            creator_id: Snowflake::new(model.creator_id),
            title: model.title,
            media_ref: model.media_ref,
            media_url: model.media_url,
            description: model.description,
            created_at: model.created_at,
        }
    }
}

impl From<PostTallyModel> for PostTally {
    fn from(model: PostTallyModel) -> Self {
        PostTally {
            post: Post::from(model.post),
            likes: model.likes,
        }
    }
}
