//! # social-service
//!
//! Application layer containing business logic, services, and DTOs.
//!
//! Every service borrows a [`ServiceContext`] and takes the
//! [`AuthenticatedCaller`](social_core::AuthenticatedCaller) explicitly
//! where an operation acts on behalf of a user.

pub mod dto;
pub mod services;

pub use dto::*;
pub use services::*;
