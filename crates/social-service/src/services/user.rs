//! User service
//!
//! Read access to synced user profiles and caller resolution.

use social_core::entities::AuthenticatedCaller;
use social_core::Snowflake;
use tracing::{debug, instrument};

use crate::dto::{CurrentUserResponse, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Map a verified token identifier to the synced user behind it
    ///
    /// # Errors
    /// `Unauthenticated` when no user was synced for the identifier yet
    #[instrument(skip(self))]
    pub async fn resolve_caller(&self, token_identifier: &str) -> ServiceResult<AuthenticatedCaller> {
        let user = self
            .ctx
            .user_repo()
            .find_by_token(token_identifier)
            .await?
            .ok_or_else(|| {
                debug!("Token identifier has no synced user");
                ServiceError::Unauthenticated
            })?;
        Ok(AuthenticatedCaller::new(user.id, user.token_identifier))
    }

    /// Caller's own profile
    #[instrument(skip(self, caller), fields(user_id = %caller.id))]
    pub async fn me(&self, caller: &AuthenticatedCaller) -> ServiceResult<CurrentUserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(caller.id)
            .await?
            .ok_or(ServiceError::Unauthenticated)?;

        Ok(CurrentUserResponse::from(&user))
    }

    /// All users by name
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> ServiceResult<Vec<UserResponse>> {
        let users = self.ctx.user_repo().list().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Get user by ID (public profile)
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: Snowflake) -> ServiceResult<UserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        Ok(UserResponse::from(&user))
    }
}
