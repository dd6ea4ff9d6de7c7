//! # social-db
//!
//! Storage layer implementing the repository ports of `social-core`.
//!
//! ## Overview
//!
//! - PostgreSQL repositories via SQLx, with connection pool management and
//!   schema bootstrap
//! - Database models with SQLx `FromRow` derives and entity mappers
//! - [`MemoryStore`], an in-process store used for `DATABASE_URL=memory://`
//!   and in tests
//! - Media stores holding uploaded post media
//!
//! ## Usage
//!
//! ```rust,ignore
//! use social_db::{bootstrap_schema, create_pool, DatabaseConfig, PgUserRepository};
//!
//! async fn example(config: &social_common::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::from(&config.database)).await?;
//!     bootstrap_schema(&pool).await?;
//!     let user_repo = PgUserRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod media;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use media::{LocalMediaStore, MemoryMediaStore};
pub use memory::MemoryStore;
pub use pool::{bootstrap_schema, create_pool, DatabaseConfig, PgPool};
pub use repositories::{
    PgCommentRepository, PgContestRepository, PgFollowRepository, PgLikeRepository,
    PgNotificationRepository, PgPostRepository, PgUserRepository, PgWallOfFameRepository,
};
