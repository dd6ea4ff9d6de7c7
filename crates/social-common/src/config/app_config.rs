//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use std::env;

use chrono::Weekday;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub webhook: WebhookConfig,
    pub media: MediaConfig,
    pub contest: ContestConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub snowflake: SnowflakeConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// `postgres://…` or `memory://` for the in-process store
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.url.starts_with("memory://")
    }
}

/// Identity-provider session token settings
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared HS256 secret used by the identity provider to sign session tokens
    pub jwt_secret: String,
    /// Expected `iss` claim; unchecked when empty
    pub issuer: String,
    /// Prefix of every token identifier
    pub app_domain: String,
    /// Clock skew tolerated on `exp`, seconds
    pub leeway_secs: u64,
}

/// Identity webhook settings
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// `whsec_<base64>` signing secret
    pub secret: String,
    pub tolerance_secs: i64,
}

/// Local media storage settings
#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub upload_dir: String,
    /// Origin used when building upload and download URLs
    pub public_base_url: String,
    pub max_file_size_mb: u32,
}

impl MediaConfig {
    #[must_use]
    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb as usize * 1024 * 1024
    }
}

/// Weekly contest scheduling
#[derive(Debug, Clone)]
pub struct ContestConfig {
    pub scheduler_enabled: bool,
    pub weekday: Weekday,
    pub hour: u32,
    pub minute: u32,
    /// Key an external scheduler presents in `x-scheduler-key`; trigger endpoint disabled when unset
    pub trigger_key: Option<String>,
}

/// Rate limiting configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub requests_per_second: u32,
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Default)]
pub struct SnowflakeConfig {
    pub worker_id: u16,
}

// Default value functions
fn default_app_name() -> String {
    "social-server".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    2
}

fn default_leeway() -> u64 {
    60
}

fn default_webhook_tolerance() -> i64 {
    300 // 5 minutes
}

fn default_upload_dir() -> String {
    "./uploads".to_string()
}

fn default_max_file_size() -> u32 {
    10
}

fn default_contest_weekday() -> Weekday {
    Weekday::Fri
}

fn default_contest_hour() -> u32 {
    14
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key/value source
    ///
    /// # Errors
    /// Returns an error if a required key is missing or a value does not parse
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::MissingVar(key));
        let parsed = |key: &'static str| -> Result<Option<u64>, ConfigError> {
            lookup(key)
                .map(|v| v.trim().parse().map_err(|_| ConfigError::InvalidValue(key, v)))
                .transpose()
        };
        let invalid = |key: &'static str| ConfigError::InvalidValue(key, lookup(key).unwrap_or_default());

        let host = lookup("API_HOST").unwrap_or_else(default_host);
        let port = parsed("API_PORT")?.map_or(Ok(default_port()), |p| {
            u16::try_from(p).map_err(|_| ConfigError::InvalidValue("API_PORT", p.to_string()))
        })?;

        let weekday = match lookup("CONTEST_SCHEDULE_DAY") {
            Some(day) => day
                .trim()
                .parse::<Weekday>()
                .map_err(|_| ConfigError::InvalidValue("CONTEST_SCHEDULE_DAY", day))?,
            None => default_contest_weekday(),
        };
        let hour = parsed("CONTEST_SCHEDULE_HOUR")?
            .map_or(Some(default_contest_hour()), |h| u32::try_from(h).ok())
            .filter(|h| *h <= 23)
            .ok_or_else(|| invalid("CONTEST_SCHEDULE_HOUR"))?;
        let minute = parsed("CONTEST_SCHEDULE_MINUTE")?
            .map_or(Some(0), |m| u32::try_from(m).ok())
            .filter(|m| *m <= 59)
            .ok_or_else(|| invalid("CONTEST_SCHEDULE_MINUTE"))?;

        let public_base_url = lookup("MEDIA_PUBLIC_BASE_URL")
            .unwrap_or_else(|| format!("http://{host}:{port}"))
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .as_deref()
                    .and_then(Environment::parse)
                    .unwrap_or_default(),
            },
            api: ServerConfig { host, port },
            database: DatabaseConfig {
                url: required("DATABASE_URL")?,
                max_connections: parsed("DATABASE_MAX_CONNECTIONS")?
                    .map_or_else(default_max_connections, |v| v as u32),
                min_connections: parsed("DATABASE_MIN_CONNECTIONS")?
                    .map_or_else(default_min_connections, |v| v as u32),
            },
            auth: AuthConfig {
                jwt_secret: required("AUTH_JWT_SECRET")?,
                issuer: lookup("AUTH_ISSUER").unwrap_or_default(),
                app_domain: required("AUTH_APP_DOMAIN")?,
                leeway_secs: parsed("AUTH_LEEWAY_SECS")?.unwrap_or_else(default_leeway),
            },
            webhook: WebhookConfig {
                secret: required("WEBHOOK_SECRET")?,
                tolerance_secs: parsed("WEBHOOK_TOLERANCE_SECS")?
                    .map_or_else(default_webhook_tolerance, |v| v as i64),
            },
            media: MediaConfig {
                upload_dir: lookup("UPLOAD_DIR").unwrap_or_else(default_upload_dir),
                public_base_url,
                max_file_size_mb: parsed("MAX_FILE_SIZE_MB")?
                    .map_or_else(default_max_file_size, |v| v as u32),
            },
            contest: ContestConfig {
                scheduler_enabled: lookup("CONTEST_SCHEDULER_ENABLED")
                    .map_or(true, |v| parse_flag(&v)),
                weekday,
                hour,
                minute,
                trigger_key: lookup("CONTEST_TRIGGER_KEY").filter(|k| !k.is_empty()),
            },
            rate_limit: RateLimitConfig {
                enabled: lookup("RATE_LIMIT_ENABLED").map_or(true, |v| parse_flag(&v)),
                requests_per_second: parsed("RATE_LIMIT_REQUESTS_PER_SECOND")?
                    .map_or_else(default_requests_per_second, |v| v as u32),
                burst: parsed("RATE_LIMIT_BURST")?.map_or_else(default_burst, |v| v as u32),
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            snowflake: SnowflakeConfig {
                worker_id: parsed("WORKER_ID")?.map_or(0, |v| v as u16),
            },
        })
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: &[(&str, &str)] = &[
        ("DATABASE_URL", "memory://"),
        ("AUTH_JWT_SECRET", "secret"),
        ("AUTH_APP_DOMAIN", "clerk.example.dev"),
        ("WEBHOOK_SECRET", "whsec_c2VjcmV0"),
    ];

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(REQUIRED)).unwrap();
        assert_eq!(config.app.name, "social-server");
        assert!(config.app.env.is_development());
        assert_eq!(config.api.address(), "127.0.0.1:8080");
        assert!(config.database.is_in_memory());
        assert_eq!(config.webhook.tolerance_secs, 300);
        assert_eq!(config.contest.weekday, Weekday::Fri);
        assert_eq!(config.contest.hour, 14);
        assert_eq!(config.contest.minute, 0);
        assert!(config.contest.scheduler_enabled);
        assert!(config.contest.trigger_key.is_none());
        assert_eq!(config.media.public_base_url, "http://127.0.0.1:8080");
        assert_eq!(config.media.max_file_size_bytes(), 10 * 1024 * 1024);
    }

    #[test]
    fn test_missing_required_var() {
        let err = AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "memory://")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("AUTH_JWT_SECRET")));
    }

    #[test]
    fn test_contest_schedule_overrides() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("CONTEST_SCHEDULE_DAY", "monday"),
            ("CONTEST_SCHEDULE_HOUR", "9"),
            ("CONTEST_SCHEDULE_MINUTE", "30"),
            ("CONTEST_SCHEDULER_ENABLED", "false"),
            ("CONTEST_TRIGGER_KEY", "cron-key"),
        ]);
        let config = AppConfig::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.contest.weekday, Weekday::Mon);
        assert_eq!(config.contest.hour, 9);
        assert_eq!(config.contest.minute, 30);
        assert!(!config.contest.scheduler_enabled);
        assert_eq!(config.contest.trigger_key.as_deref(), Some("cron-key"));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("CONTEST_SCHEDULE_HOUR", "25"));
        assert!(matches!(
            AppConfig::from_lookup(lookup_from(&pairs)),
            Err(ConfigError::InvalidValue("CONTEST_SCHEDULE_HOUR", _))
        ));

        // would truncate to 14 as a u32
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("CONTEST_SCHEDULE_HOUR", "4294967310"));
        assert!(matches!(
            AppConfig::from_lookup(lookup_from(&pairs)),
            Err(ConfigError::InvalidValue("CONTEST_SCHEDULE_HOUR", v)) if v == "4294967310"
        ));

        let mut pairs = REQUIRED.to_vec();
        pairs.push(("CONTEST_SCHEDULE_MINUTE", "4294967326"));
        assert!(matches!(
            AppConfig::from_lookup(lookup_from(&pairs)),
            Err(ConfigError::InvalidValue("CONTEST_SCHEDULE_MINUTE", _))
        ));

        let mut pairs = REQUIRED.to_vec();
        pairs.push(("API_PORT", "eighty"));
        assert!(matches!(
            AppConfig::from_lookup(lookup_from(&pairs)),
            Err(ConfigError::InvalidValue("API_PORT", _))
        ));
    }

    #[test]
    fn test_cors_origins_split() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example,"));
        let config = AppConfig::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(
            config.cors.allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn test_environment_flags() {
        assert!(Environment::Production.is_production());
        assert!(!Environment::Staging.is_development());
        assert_eq!(Environment::parse("PRODUCTION"), Some(Environment::Production));
        assert_eq!(Environment::parse("qa"), None);
    }
}
