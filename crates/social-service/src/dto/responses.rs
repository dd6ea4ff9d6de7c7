//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;
use social_core::{NotificationKind, PurgeReport};

// ============================================================================
// Common Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Public user profile
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub avatar_url: String,
    pub is_online: bool,
    pub created_at: DateTime<Utc>,
}

/// Caller's own profile, with email
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar_url: String,
    pub is_online: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FollowStatusResponse {
    pub following: bool,
}

// ============================================================================
// Post Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub creator_id: String,
    pub title: String,
    pub media_ref: Option<String>,
    /// Resolved at read time; null when nothing is stored
    pub media_url: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadUrlResponse {
    pub upload_url: String,
}

/// Returned for a stored upload; `storage_id` goes into `media_ref`
#[derive(Debug, Clone, Serialize)]
pub struct MediaUploadResponse {
    pub storage_id: String,
}

/// State after a like toggle, also returned by the like read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LikeStateResponse {
    pub liked: bool,
    pub like_count: i64,
}

// ============================================================================
// Comment Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub sender_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub sender_name: String,
    pub sender_avatar_url: String,
}

// ============================================================================
// Notification Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub id: String,
    pub kind: NotificationKind,
    pub post_id: Option<String>,
    pub actor_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub is_read: bool,
    /// Null once the post is gone
    pub post_title: Option<String>,
    pub actor_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotificationListResponse {
    pub notifications: Vec<NotificationResponse>,
    pub count: usize,
    pub unread: usize,
}

impl NotificationListResponse {
    pub fn new(notifications: Vec<NotificationResponse>) -> Self {
        let unread = notifications.iter().filter(|n| !n.is_read).count();
        Self {
            count: notifications.len(),
            unread,
            notifications,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MarkAllReadResponse {
    pub updated: u64,
}

// ============================================================================
// Contest Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct WallOfFameResponse {
    pub id: String,
    pub post_id: String,
    pub title: String,
    pub media_url: String,
    pub description: Option<String>,
    pub likes: i64,
    pub post_created_at: DateTime<Utc>,
    pub archived_at: DateTime<Utc>,
}

/// Result of a manually triggered contest run
#[derive(Debug, Clone, Serialize)]
pub struct ContestRunResponse {
    /// `noWinner`, `winner` or `alreadyRunning`
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<WallOfFameResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purged: Option<PurgeReport>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub media: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, media_healthy: bool) -> Self {
        let status = |ok: bool| if ok { "healthy" } else { "unhealthy" }.to_string();
        Self {
            status: if database_healthy && media_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: status(database_healthy),
                media: status(media_healthy),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
