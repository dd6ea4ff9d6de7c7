//! Entity to model mappers
//!
//! Conversions from database rows (models) into domain entities (`social-core`).
//! Notification rows carry their kind as text, so that mapping is fallible.

mod comment;
mod follow;
mod like;
mod notification;
mod post;
mod user;
mod wall_of_fame;

pub use notification::notifications_from_models;
