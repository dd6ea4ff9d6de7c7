//! Post service
//!
//! Handles post creation, deletion, the feed and media upload locations.

use std::collections::HashSet;

use social_core::entities::{AuthenticatedCaller, Post};
use social_core::{DomainError, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{CreatePostRequest, PostResponse, UploadUrlResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Current URL of a post's media
///
/// Goes through the media store when the post holds a reference and falls
/// back to the URL persisted on the post.
pub(crate) async fn resolve_media_url(ctx: &ServiceContext, post: &Post) -> ServiceResult<Option<String>> {
    if let Some(storage_id) = post.media_ref.as_deref() {
        if let Some(url) = ctx.media_store().resolve_url(storage_id).await? {
            return Ok(Some(url));
        }
        warn!(post_id = %post.id, storage_id, "Media reference does not resolve");
    }
    Ok(post.stored_media_url().map(str::to_string))
}

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a post; media is kept as a reference and not resolved here
    #[instrument(skip(self, caller, request), fields(user_id = %caller.id))]
    pub async fn create_post(
        &self,
        caller: &AuthenticatedCaller,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        if !caller.is(request.creator_id) {
            return Err(DomainError::InvalidSender.into());
        }

        let title_length = request.title.chars().count();
        if title_length == 0 || title_length > Post::MAX_TITLE_LENGTH {
            return Err(ServiceError::validation(format!(
                "Title must be 1-{} characters",
                Post::MAX_TITLE_LENGTH
            )));
        }
        if let Some(description) = &request.description {
            if description.chars().count() > Post::MAX_DESCRIPTION_LENGTH {
                return Err(DomainError::ContentTooLong {
                    max: Post::MAX_DESCRIPTION_LENGTH,
                }
                .into());
            }
        }

        let mut post = Post::new(self.ctx.generate_id(), caller.id, request.title);
        post.media_ref = request.media_ref.filter(|r| !r.trim().is_empty());
        post.description = request.description;

        self.ctx.post_repo().create(&post).await?;

        info!(post_id = %post.id, has_media = post.media_ref.is_some(), "Post created");

        Ok(PostResponse::with_media(&post, post.stored_media_url().map(str::to_string)))
    }

    /// Delete one of the caller's posts with its likes and comments
    #[instrument(skip(self, caller), fields(user_id = %caller.id))]
    pub async fn delete_post(&self, caller: &AuthenticatedCaller, post_id: Snowflake) -> ServiceResult<()> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))?;

        if !post.is_created_by(caller.id) {
            return Err(DomainError::NotPostCreator.into());
        }

        self.ctx.post_repo().delete_cascade(post_id).await?;

        info!(post_id = %post_id, "Post deleted");
        Ok(())
    }

    /// Every post, authors the caller follows first, then newest first
    #[instrument(skip(self, caller), fields(user_id = %caller.id))]
    pub async fn feed(&self, caller: &AuthenticatedCaller) -> ServiceResult<Vec<PostResponse>> {
        let followed: HashSet<Snowflake> = self
            .ctx
            .follow_repo()
            .following_ids(caller.id)
            .await?
            .into_iter()
            .collect();

        let mut posts = self.ctx.post_repo().list_all().await?;
        // list_all is newest first and sort_by_key is stable
        posts.sort_by_key(|p| !followed.contains(&p.creator_id));

        self.with_media(&posts).await
    }

    /// Posts of one user, newest first
    #[instrument(skip(self))]
    pub async fn user_posts(&self, creator_id: Snowflake) -> ServiceResult<Vec<PostResponse>> {
        if self.ctx.user_repo().find_by_id(creator_id).await?.is_none() {
            return Err(ServiceError::not_found("User", creator_id.to_string()));
        }
        let posts = self.ctx.post_repo().find_by_creator(creator_id).await?;
        self.with_media(&posts).await
    }

    /// Location the caller uploads post media to
    #[instrument(skip(self, caller), fields(user_id = %caller.id))]
    pub async fn generate_upload_url(&self, caller: &AuthenticatedCaller) -> ServiceResult<UploadUrlResponse> {
        let upload_url = self.ctx.media_store().generate_upload_url().await?;
        Ok(UploadUrlResponse { upload_url })
    }

    async fn with_media(&self, posts: &[Post]) -> ServiceResult<Vec<PostResponse>> {
        let mut responses = Vec::with_capacity(posts.len());
        for post in posts {
            let media_url = resolve_media_url(self.ctx, post).await?;
            responses.push(PostResponse::with_media(post, media_url));
        }
        Ok(responses)
    }
}
