//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;

use axum::Router;
use social_common::{AppConfig, AppError, JwtService, WebhookVerifier};
use social_core::SnowflakeGenerator;
use social_db::{
    bootstrap_schema, create_pool, DatabaseConfig, LocalMediaStore, MemoryStore,
    PgCommentRepository, PgContestRepository, PgFollowRepository, PgLikeRepository,
    PgNotificationRepository, PgPostRepository, PgUserRepository, PgWallOfFameRepository,
};
use social_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::scheduler::spawn_weekly_contest;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let router = apply_middleware(
        create_router(config.media.max_file_size_bytes()),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    router.merge(health_routes()).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let jwt_service = JwtService::new(
        &config.auth.jwt_secret,
        &config.auth.issuer,
        config.auth.leeway_secs,
    );
    let webhook_verifier = WebhookVerifier::new(&config.webhook.secret, config.webhook.tolerance_secs)
        .map_err(|e| AppError::Config(format!("WEBHOOK_SECRET: {e}")))?;

    tokio::fs::create_dir_all(&config.media.upload_dir)
        .await
        .map_err(|e| AppError::Storage(format!("cannot create {}: {e}", config.media.upload_dir)))?;
    let media_store = Arc::new(LocalMediaStore::new(
        config.media.upload_dir.clone(),
        config.media.public_base_url.clone(),
    ));

    let builder = ServiceContextBuilder::new()
        .media_store(media_store)
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id)))
        .app_domain(config.auth.app_domain.clone());

    let (builder, db_pool) = if config.database.is_in_memory() {
        warn!("Using the in-process store; data is lost on restart");
        (builder.store(Arc::new(MemoryStore::new())), None)
    } else {
        info!("Connecting to PostgreSQL...");
        let pool = create_pool(&DatabaseConfig::from(&config.database))
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        bootstrap_schema(&pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        info!("PostgreSQL connection established");

        let builder = builder
            .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
            .post_repo(Arc::new(PgPostRepository::new(pool.clone())))
            .like_repo(Arc::new(PgLikeRepository::new(pool.clone())))
            .comment_repo(Arc::new(PgCommentRepository::new(pool.clone())))
            .follow_repo(Arc::new(PgFollowRepository::new(pool.clone())))
            .notification_repo(Arc::new(PgNotificationRepository::new(pool.clone())))
            .wall_of_fame_repo(Arc::new(PgWallOfFameRepository::new(pool.clone())))
            .contest_repo(Arc::new(PgContestRepository::new(pool.clone())));
        (builder, Some(pool))
    };

    let service_context = builder
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(
        service_context,
        config,
        jwt_service,
        webhook_verifier,
        db_pool,
    ))
}

/// Serve `app` on an already bound listener until Ctrl-C
pub async fn run_server(app: Router, listener: TcpListener) -> Result<(), AppError> {
    if let Ok(addr) = listener.local_addr() {
        info!("Server listening on http://{}", addr);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();
    let scheduler_enabled = config.contest.scheduler_enabled;

    let state = create_app_state(config).await?;

    if scheduler_enabled {
        spawn_weekly_contest(state.clone());
    } else {
        info!("Weekly contest timer disabled");
    }

    let app = create_app(state);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    run_server(app, listener).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    async fn app(upload_dir: &std::path::Path, trigger_key: Option<&str>) -> Router {
        let upload_dir = upload_dir.to_string_lossy().into_owned();
        let config = AppConfig::from_lookup(|key| match key {
            "DATABASE_URL" => Some("memory://".to_string()),
            "AUTH_JWT_SECRET" => Some("router-test-secret".to_string()),
            "AUTH_APP_DOMAIN" => Some("auth.test".to_string()),
            "WEBHOOK_SECRET" => Some("whsec_c2VjcmV0".to_string()),
            "RATE_LIMIT_ENABLED" => Some("false".to_string()),
            "UPLOAD_DIR" => Some(upload_dir.clone()),
            "CONTEST_TRIGGER_KEY" => trigger_key.map(str::to_string),
            _ => None,
        })
        .unwrap();
        create_app(create_app_state(config).await.unwrap())
    }

    async fn status_of(app: Router, method: &str, uri: &str) -> StatusCode {
        app.oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
        .status()
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path(), None).await;

        assert_eq!(status_of(app.clone(), "GET", "/health").await, StatusCode::OK);
        assert_eq!(status_of(app, "GET", "/health/ready").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_api_requires_a_session_token() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path(), None).await;

        assert_eq!(
            status_of(app.clone(), "GET", "/api/v1/users/@me").await,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(app, "POST", "/api/v1/posts/1/like").await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn test_unsigned_webhook_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path(), None).await;

        assert_eq!(
            status_of(app, "POST", "/webhooks/identity").await,
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_contest_trigger_needs_the_configured_key() {
        let dir = tempfile::tempdir().unwrap();

        let disabled = app(dir.path(), None).await;
        assert_eq!(
            status_of(disabled, "POST", "/internal/contest/run").await,
            StatusCode::FORBIDDEN
        );

        let enabled = app(dir.path(), Some("cron-key")).await;
        assert_eq!(
            status_of(enabled.clone(), "POST", "/internal/contest/run").await,
            StatusCode::FORBIDDEN
        );

        let response = enabled
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/internal/contest/run")
                    .header("x-scheduler-key", "cron-key")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_media_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path(), None).await;

        assert_eq!(
            status_of(app, "GET", "/media/0b5f6c64-3f57-4a8e-9a53-0d1c3f1f2b77").await,
            StatusCode::NOT_FOUND
        );
    }
}
