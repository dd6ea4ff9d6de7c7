//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Identity-provider webhook payloads
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    CreateCommentRequest, CreatePostRequest, EmailAddress, IdentityEvent, IdentitySession,
    IdentityUser,
};

// Re-export commonly used response types
pub use responses::{
    ApiResponse, CommentResponse, ContestRunResponse, CurrentUserResponse, FollowStatusResponse,
    HealthChecks, HealthResponse, LikeStateResponse, MarkAllReadResponse, MediaUploadResponse, NotificationListResponse,
    NotificationResponse, PostResponse, ReadinessResponse, UploadUrlResponse, UserResponse,
    WallOfFameResponse,
};
