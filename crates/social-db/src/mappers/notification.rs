//! Notification entity <-> model mapper

use social_core::entities::{Notification, NotificationKind};
use social_core::error::DomainError;
use social_core::value_objects::Snowflake;

use crate::models::NotificationModel;

impl TryFrom<NotificationModel> for Notification {
    type Error = DomainError;

    fn try_from(model: NotificationModel) -> Result<Self, Self::Error> {
        Ok(Notification {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            kind: model.kind.parse::<NotificationKind>()?,
            post_id: model.post_id.map(Snowflake::new),
            actor_id: model.actor_id.map(Snowflake::new),
            created_at: model.created_at,
            is_read: model.is_read,
        })
    }
}

/// Map a batch of rows, failing on the first row with an unknown kind
pub fn notifications_from_models(
    models: Vec<NotificationModel>,
) -> Result<Vec<Notification>, DomainError> {
    models.into_iter().map(Notification::try_from).collect()
}
