//! Comment service
//!
//! Handles comments on posts (create, list, delete).

use std::collections::HashMap;

use social_core::entities::{AuthenticatedCaller, Comment, Notification};
use social_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{CommentResponse, CreateCommentRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Comment on a post as the caller
    #[instrument(skip(self, caller, request), fields(user_id = %caller.id))]
    pub async fn create_comment(
        &self,
        caller: &AuthenticatedCaller,
        post_id: Snowflake,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        if !caller.is(request.sender_id) {
            return Err(DomainError::InvalidSender.into());
        }

        let length = request.content.chars().count();
        if length == 0 {
            return Err(ServiceError::validation("Comment cannot be empty"));
        }
        if length > Comment::MAX_CONTENT_LENGTH {
            return Err(DomainError::ContentTooLong {
                max: Comment::MAX_CONTENT_LENGTH,
            }
            .into());
        }

        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))?;

        let comment = Comment::new(self.ctx.generate_id(), post_id, caller.id, request.content);
        let notification = (!post.is_created_by(caller.id)).then(|| {
            Notification::comment(self.ctx.generate_id(), post.creator_id, post_id, caller.id)
        });

        self.ctx
            .comment_repo()
            .create_with_notification(&comment, notification.as_ref())
            .await?;

        info!(comment_id = %comment.id, post_id = %post_id, "Comment created");

        let sender = self.ctx.user_repo().find_by_id(caller.id).await?;
        Ok(CommentResponse::with_sender(&comment, sender.as_ref()))
    }

    /// Comments of a post, oldest first, with sender name and avatar
    #[instrument(skip(self))]
    pub async fn list_comments(&self, post_id: Snowflake) -> ServiceResult<Vec<CommentResponse>> {
        let comments = self.ctx.comment_repo().find_by_post(post_id).await?;

        let mut sender_ids: Vec<Snowflake> = comments.iter().map(|c| c.sender_id).collect();
        sender_ids.sort_unstable();
        sender_ids.dedup();
        let senders: HashMap<_, _> = self
            .ctx
            .user_repo()
            .find_many(&sender_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        Ok(comments
            .iter()
            .map(|c| CommentResponse::with_sender(c, senders.get(&c.sender_id)))
            .collect())
    }

    /// Delete one of the caller's comments. Its notification stays.
    #[instrument(skip(self, caller), fields(user_id = %caller.id))]
    pub async fn delete_comment(
        &self,
        caller: &AuthenticatedCaller,
        comment_id: Snowflake,
    ) -> ServiceResult<()> {
        let comment = self
            .ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Comment", comment_id.to_string()))?;

        if !comment.is_sent_by(caller.id) {
            return Err(DomainError::NotCommentSender.into());
        }

        self.ctx.comment_repo().delete(comment_id).await?;

        info!(comment_id = %comment_id, "Comment deleted");
        Ok(())
    }
}
