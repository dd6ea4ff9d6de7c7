//! Notification service
//!
//! Notifications are written as side effects by the other services; this
//! service only reads them and tracks read state.

use std::collections::HashMap;

use social_core::entities::{AuthenticatedCaller, Post};
use social_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{MarkAllReadResponse, NotificationListResponse, NotificationResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Notification service
pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    /// Create a new NotificationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Caller's notifications, newest first, with post title and actor name
    #[instrument(skip(self, caller), fields(user_id = %caller.id))]
    pub async fn list(&self, caller: &AuthenticatedCaller) -> ServiceResult<NotificationListResponse> {
        let notifications = self.ctx.notification_repo().find_by_user(caller.id).await?;

        let mut posts: HashMap<Snowflake, Option<Post>> = HashMap::new();
        for post_id in notifications.iter().filter_map(|n| n.post_id) {
            if !posts.contains_key(&post_id) {
                let post = self.ctx.post_repo().find_by_id(post_id).await?;
                posts.insert(post_id, post);
            }
        }

        let mut actor_ids: Vec<Snowflake> = notifications.iter().filter_map(|n| n.actor_id).collect();
        actor_ids.sort_unstable();
        actor_ids.dedup();
        let actors: HashMap<_, _> = self
            .ctx
            .user_repo()
            .find_many(&actor_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let items = notifications
            .iter()
            .map(|n| {
                let post = n.post_id.and_then(|id| posts.get(&id)).and_then(Option::as_ref);
                let actor = n.actor_id.and_then(|id| actors.get(&id));
                NotificationResponse::enriched(n, post, actor)
            })
            .collect();

        Ok(NotificationListResponse::new(items))
    }

    /// Mark one of the caller's notifications as read
    #[instrument(skip(self, caller), fields(user_id = %caller.id))]
    pub async fn mark_read(&self, caller: &AuthenticatedCaller, notification_id: Snowflake) -> ServiceResult<()> {
        let notification = self
            .ctx
            .notification_repo()
            .find_by_id(notification_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Notification", notification_id.to_string()))?;

        if !notification.is_addressed_to(caller.id) {
            return Err(DomainError::NotNotificationOwner.into());
        }
        if notification.is_read {
            return Ok(());
        }

        self.ctx.notification_repo().mark_read(notification_id).await?;
        Ok(())
    }

    #[instrument(skip(self, caller), fields(user_id = %caller.id))]
    pub async fn mark_all_read(&self, caller: &AuthenticatedCaller) -> ServiceResult<MarkAllReadResponse> {
        let updated = self.ctx.notification_repo().mark_all_read(caller.id).await?;
        info!(updated, "Notifications marked read");
        Ok(MarkAllReadResponse { updated })
    }
}
