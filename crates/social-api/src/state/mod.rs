//! Application state
//!
//! Holds the shared state for the Axum application including
//! the service context, configuration and the credential verifiers.

use std::sync::Arc;

use social_common::{AppConfig, JwtService, WebhookVerifier};
use social_db::PgPool;
use social_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Application configuration
    config: Arc<AppConfig>,
    jwt_service: Arc<JwtService>,
    webhook_verifier: Arc<WebhookVerifier>,
    /// `None` when running on the in-process store
    db_pool: Option<PgPool>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(
        service_context: ServiceContext,
        config: AppConfig,
        jwt_service: JwtService,
        webhook_verifier: WebhookVerifier,
        db_pool: Option<PgPool>,
    ) -> Self {
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
            jwt_service: Arc::new(jwt_service),
            webhook_verifier: Arc::new(webhook_verifier),
            db_pool,
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Verifier for identity-provider session tokens
    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    pub fn webhook_verifier(&self) -> &WebhookVerifier {
        &self.webhook_verifier
    }

    pub fn db_pool(&self) -> Option<&PgPool> {
        self.db_pool.as_ref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("config", &"AppConfig")
            .field("in_memory", &self.db_pool.is_none())
            .finish()
    }
}
