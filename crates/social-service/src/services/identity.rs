//! Identity sync service
//!
//! Applies identity-provider webhook events to the user table. Signature
//! checks happen before events reach this service.

use serde::de::DeserializeOwned;
use social_core::entities::User;
use social_core::Snowflake;
use tracing::{info, instrument};

use crate::dto::{IdentityEvent, IdentitySession, IdentityUser};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// What an event changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    UserUpserted(Snowflake),
    ProfileUpdated(Snowflake),
    PresenceChanged { online: bool },
    /// Event type this backend does not handle
    Ignored(String),
}

/// Identity sync service
pub struct IdentitySyncService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> IdentitySyncService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, event), fields(event_type = %event.event_type))]
    pub async fn handle(&self, event: IdentityEvent) -> ServiceResult<SyncOutcome> {
        match event.event_type.as_str() {
            "user.created" => self.user_created(payload(event.data)?).await,
            "user.updated" => self.user_updated(payload(event.data)?).await,
            "session.created" => self.set_presence(payload(event.data)?, true).await,
            "session.ended" | "session.removed" => {
                self.set_presence(payload(event.data)?, false).await
            }
            other => {
                info!(event_type = other, "Ignoring identity event");
                Ok(SyncOutcome::Ignored(other.to_string()))
            }
        }
    }

    async fn user_created(&self, data: IdentityUser) -> ServiceResult<SyncOutcome> {
        let token_identifier = self.token_identifier(&data.id);
        let mut user = User::new(self.ctx.generate_id(), token_identifier, String::new());
        user.apply_profile(
            Some(data.display_name()),
            data.primary_email(),
            data.image_url.clone().unwrap_or_default(),
        );

        let stored = self.ctx.user_repo().upsert(&user).await?;

        info!(user_id = %stored.id, "User synced");
        Ok(SyncOutcome::UserUpserted(stored.id))
    }

    async fn user_updated(&self, data: IdentityUser) -> ServiceResult<SyncOutcome> {
        let token_identifier = self.token_identifier(&data.id);
        let mut user = self
            .ctx
            .user_repo()
            .find_by_token(&token_identifier)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", token_identifier.clone()))?;

        user.apply_profile(
            Some(data.display_name()),
            data.primary_email(),
            data.image_url.clone().unwrap_or_default(),
        );
        self.ctx.user_repo().update_profile(&user).await?;

        info!(user_id = %user.id, "User profile updated");
        Ok(SyncOutcome::ProfileUpdated(user.id))
    }

    async fn set_presence(&self, data: IdentitySession, online: bool) -> ServiceResult<SyncOutcome> {
        let token_identifier = self.token_identifier(&data.user_id);
        self.ctx
            .user_repo()
            .set_online(&token_identifier, online)
            .await?;

        info!(online, "User presence changed");
        Ok(SyncOutcome::PresenceChanged { online })
    }

    fn token_identifier(&self, external_id: &str) -> String {
        User::token_identifier_for(self.ctx.app_domain(), external_id)
    }
}

fn payload<T: DeserializeOwned>(data: serde_json::Value) -> ServiceResult<T> {
    serde_json::from_value(data)
        .map_err(|e| ServiceError::validation(format!("Malformed event payload: {e}")))
}
