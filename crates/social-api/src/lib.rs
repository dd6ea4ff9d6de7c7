//! # social-api
//!
//! REST API server built with the Axum framework, plus the identity webhook,
//! media routes and the weekly contest timer.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod scheduler;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, run_server};
pub use state::AppState;
