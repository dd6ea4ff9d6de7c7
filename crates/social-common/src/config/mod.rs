//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, AuthConfig, ConfigError, ContestConfig, CorsConfig, DatabaseConfig,
    Environment, MediaConfig, RateLimitConfig, ServerConfig, SnowflakeConfig, WebhookConfig,
};
