//! Authentication extractor
//!
//! Verifies the identity-provider session token in the Authorization header
//! and resolves it to a synced user.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use social_core::AuthenticatedCaller;
use social_service::UserService;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated caller extracted from the session token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub caller: AuthenticatedCaller,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        let claims = app_state.jwt_service().verify(bearer.token()).map_err(|e| {
            tracing::warn!(error = %e, "Rejected session token");
            ApiError::from(e)
        })?;

        let token_identifier = claims.token_identifier(app_state.service_context().app_domain());
        let caller = UserService::new(app_state.service_context())
            .resolve_caller(&token_identifier)
            .await
            .map_err(|e| {
                tracing::warn!(token_identifier = %token_identifier, "Session token for an unsynced user");
                ApiError::from(e)
            })?;

        Ok(Self { caller })
    }
}
