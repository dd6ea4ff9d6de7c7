//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod comments;
pub mod contest;
pub mod follows;
pub mod health;
pub mod likes;
pub mod media;
pub mod notifications;
pub mod posts;
pub mod users;
pub mod wall_of_fame;
pub mod webhooks;
