//! Session tokens issued by the identity provider
//!
//! The provider signs short-lived HS256 JWTs whose `sub` is the external user
//! id. The backend only verifies them; [`JwtService::issue`] exists for local
//! tooling and tests.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use social_core::User;

use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// External user id at the identity provider
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// `<app-domain>|<sub>`, the key users are synced under
    #[must_use]
    pub fn token_identifier(&self, app_domain: &str) -> String {
        User::token_identifier_for(app_domain, &self.sub)
    }
}

/// Verifies identity-provider session tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: Option<String>,
    leeway_secs: u64,
}

impl JwtService {
    /// `issuer` is enforced only when non-empty
    #[must_use]
    pub fn new(secret: &str, issuer: &str, leeway_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer: Some(issuer.to_string()).filter(|i| !i.is_empty()),
            leeway_secs,
        }
    }

    /// Decode and validate a session token
    ///
    /// # Errors
    /// `TokenExpired` for stale tokens, `InvalidToken` for anything else that fails
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.leeway_secs;
        validation.set_required_spec_claims(&["exp", "sub"]);
        if let Some(issuer) = &self.issuer {
            validation.set_issuer(&[issuer]);
        }

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })
    }

    /// Mint a token the way the identity provider would
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue(&self, external_id: &str, ttl_secs: i64) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: external_id.to_string(),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl_secs)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(anyhow::anyhow!("failed to encode JWT: {e}")))
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.issuer)
            .field("leeway_secs", &self.leeway_secs)
            .finish_non_exhaustive()
    }
}
