//! # social-common
//!
//! Shared utilities including configuration, error handling, identity-provider
//! token verification, webhook signature checks and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod webhook;

// Re-export commonly used types at crate root
pub use auth::{Claims, JwtService};
pub use config::{
    AppConfig, AppSettings, AuthConfig, ConfigError, ContestConfig, CorsConfig, DatabaseConfig,
    Environment, MediaConfig, RateLimitConfig, ServerConfig, SnowflakeConfig, WebhookConfig,
};
pub use error::{AppError, AppResult};
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
pub use webhook::{WebhookError, WebhookHeaders, WebhookVerifier};
