//! Follow service
//!
//! The social graph: follow, unfollow and the follower/following reads.

use std::collections::HashMap;

use social_core::entities::{AuthenticatedCaller, Follow, Notification};
use social_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::UserResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Follow service
pub struct FollowService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FollowService<'a> {
    /// Create a new FollowService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, caller), fields(user_id = %caller.id))]
    pub async fn follow(&self, caller: &AuthenticatedCaller, followed_id: Snowflake) -> ServiceResult<()> {
        if caller.is(followed_id) {
            return Err(DomainError::SelfFollow.into());
        }
        self.require_user(followed_id).await?;

        let follows = self.ctx.follow_repo();
        if follows.find(caller.id, followed_id).await?.is_some() {
            return Err(DomainError::AlreadyFollowing.into());
        }

        let notification = Notification::follow(self.ctx.generate_id(), followed_id, caller.id);
        follows
            .create_with_notification(&Follow::new(caller.id, followed_id), &notification)
            .await?;

        info!(followed_id = %followed_id, "User followed");
        Ok(())
    }

    #[instrument(skip(self, caller), fields(user_id = %caller.id))]
    pub async fn unfollow(&self, caller: &AuthenticatedCaller, followed_id: Snowflake) -> ServiceResult<()> {
        let notification = Notification::unfollow(self.ctx.generate_id(), followed_id, caller.id);
        self.ctx
            .follow_repo()
            .delete_with_notification(caller.id, followed_id, &notification)
            .await?;

        info!(followed_id = %followed_id, "User unfollowed");
        Ok(())
    }

    #[instrument(skip(self, caller), fields(user_id = %caller.id))]
    pub async fn is_following(&self, caller: &AuthenticatedCaller, followed_id: Snowflake) -> ServiceResult<bool> {
        Ok(self
            .ctx
            .follow_repo()
            .find(caller.id, followed_id)
            .await?
            .is_some())
    }

    /// Profiles of the users following `user_id`
    #[instrument(skip(self))]
    pub async fn followers(&self, user_id: Snowflake) -> ServiceResult<Vec<UserResponse>> {
        self.require_user(user_id).await?;
        let ids = self.ctx.follow_repo().follower_ids(user_id).await?;
        self.profiles(&ids).await
    }

    /// Profiles of the users `user_id` follows
    #[instrument(skip(self))]
    pub async fn following(&self, user_id: Snowflake) -> ServiceResult<Vec<UserResponse>> {
        self.require_user(user_id).await?;
        let ids = self.ctx.follow_repo().following_ids(user_id).await?;
        self.profiles(&ids).await
    }

    async fn require_user(&self, user_id: Snowflake) -> ServiceResult<()> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }

    /// Keeps the order of `ids`
    async fn profiles(&self, ids: &[Snowflake]) -> ServiceResult<Vec<UserResponse>> {
        let mut users: HashMap<_, _> = self
            .ctx
            .user_repo()
            .find_many(ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();
        Ok(ids
            .iter()
            .filter_map(|id| users.remove(id))
            .map(UserResponse::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::fixture;
    use social_core::traits::NotificationRepository;
    use social_core::NotificationKind;

    #[tokio::test]
    async fn test_follow_then_duplicate_conflicts() {
        let f = fixture();
        let ada = f.user("Ada").await;
        let bob = f.user("Bob").await;
        let service = FollowService::new(&f.ctx);

        service.follow(&ada, bob.id).await.unwrap();
        assert!(service.is_following(&ada, bob.id).await.unwrap());

        let err = service.follow(&ada, bob.id).await.unwrap_err();
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "ALREADY_FOLLOWING");

        let followers = service.followers(bob.id).await.unwrap();
        assert_eq!(followers.len(), 1);
        assert_eq!(followers[0].name, "Ada");
        assert_eq!(service.following(ada.id).await.unwrap()[0].name, "Bob");

        let inbox = f.store.find_by_user(bob.id).await.unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].kind, NotificationKind::Follow);
    }

    #[tokio::test]
    async fn test_unfollow_without_follow_is_not_found() {
        let f = fixture();
        let ada = f.user("Ada").await;
        let bob = f.user("Bob").await;
        let service = FollowService::new(&f.ctx);

        let err = service.unfollow(&ada, bob.id).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOLLOWING");
        assert!(f.store.find_by_user(bob.id).await.unwrap().is_empty());

        service.follow(&ada, bob.id).await.unwrap();
        service.unfollow(&ada, bob.id).await.unwrap();
        assert!(!service.is_following(&ada, bob.id).await.unwrap());

        let kinds: Vec<_> = f
            .store
            .find_by_user(bob.id)
            .await
            .unwrap()
            .iter()
            .map(|n| n.kind)
            .collect();
        assert!(kinds.contains(&NotificationKind::Unfollow));
        assert_eq!(kinds.len(), 2);
    }

    #[tokio::test]
    async fn test_follow_rules() {
        let f = fixture();
        let ada = f.user("Ada").await;
        let service = FollowService::new(&f.ctx);

        let err = service.follow(&ada, ada.id).await.unwrap_err();
        assert_eq!(err.status_code(), 400);

        let err = service.follow(&ada, Snowflake::new(404)).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }
}
