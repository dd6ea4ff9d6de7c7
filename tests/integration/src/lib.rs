//! Integration test utilities for the social server
//!
//! Spawns the real API on the in-process store and drives it over HTTP.
//! Users are created the way the identity provider creates them: through a
//! signed webhook delivery.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
