//! User entity <-> model mapper

use social_core::entities::User;
use social_core::value_objects::Snowflake;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            token_identifier: model.token_identifier,
            name: model.name,
            email: model.email,
            avatar_url: model.avatar_url,
            is_online: model.is_online,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
