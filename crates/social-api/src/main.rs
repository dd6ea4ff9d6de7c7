//! Social API Server entry point
//!
//! Run with:
//! ```bash
//! DATABASE_URL=memory:// cargo run -p social-api
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use social_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    let log_format = std::env::var("LOG_FORMAT").ok();
    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(
        config.app.env,
        log_format.as_deref(),
    )) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        name = %config.app.name,
        env = ?config.app.env,
        address = %config.api.address(),
        in_memory = config.database.is_in_memory(),
        "Starting Social API Server"
    );

    social_api::run(config).await?;

    Ok(())
}
