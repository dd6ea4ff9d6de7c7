//! Like service
//!
//! Toggles likes and keeps each like paired with the notification it raised.

use social_core::entities::{AuthenticatedCaller, Like, Notification};
use social_core::Snowflake;
use tracing::{info, instrument};

use crate::dto::LikeStateResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Like service
pub struct LikeService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LikeService<'a> {
    /// Create a new LikeService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Like the post, or take the like back if the caller already liked it
    ///
    /// The like and its notification are written together. A concurrent toggle
    /// by the same caller surfaces as `LikeConflict`.
    #[instrument(skip(self, caller), fields(user_id = %caller.id))]
    pub async fn toggle_like(
        &self,
        caller: &AuthenticatedCaller,
        post_id: Snowflake,
    ) -> ServiceResult<LikeStateResponse> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))?;

        let likes = self.ctx.like_repo();
        let liked = if likes.find(post_id, caller.id).await?.is_some() {
            likes
                .delete_with_notification(post_id, caller.id, post.creator_id)
                .await?;
            false
        } else {
            // no notification for liking your own post
            let notification = (!post.is_created_by(caller.id)).then(|| {
                Notification::like(self.ctx.generate_id(), post.creator_id, post_id, caller.id)
            });
            likes
                .create_with_notification(&Like::new(post_id, caller.id), notification.as_ref())
                .await?;
            true
        };

        let like_count = likes.count_by_post(post_id).await?;

        info!(post_id = %post_id, liked, like_count, "Like toggled");

        Ok(LikeStateResponse { liked, like_count })
    }

    /// Number of likes; 0 for unknown posts
    #[instrument(skip(self))]
    pub async fn like_count(&self, post_id: Snowflake) -> ServiceResult<i64> {
        Ok(self.ctx.like_repo().count_by_post(post_id).await?)
    }

    #[instrument(skip(self, caller), fields(user_id = %caller.id))]
    pub async fn has_liked(
        &self,
        caller: &AuthenticatedCaller,
        post_id: Snowflake,
    ) -> ServiceResult<bool> {
        Ok(self.ctx.like_repo().find(post_id, caller.id).await?.is_some())
    }

    /// Count plus whether the caller liked the post
    pub async fn like_state(
        &self,
        caller: &AuthenticatedCaller,
        post_id: Snowflake,
    ) -> ServiceResult<LikeStateResponse> {
        Ok(LikeStateResponse {
            liked: self.has_liked(caller, post_id).await?,
            like_count: self.like_count(post_id).await?,
        })
    }
}
