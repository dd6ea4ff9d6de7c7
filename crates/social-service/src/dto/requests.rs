//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Ids accept both JSON strings and numbers.

use serde::Deserialize;
use social_core::Snowflake;
use validator::Validate;

// ============================================================================
// Post Requests
// ============================================================================

/// Create post request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    /// Must be the caller
    pub creator_id: Snowflake,

    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    /// Storage id returned by the media upload
    #[serde(default)]
    pub media_ref: Option<String>,

    #[serde(default)]
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Create comment request; the post comes from the path
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    /// Must be the caller
    pub sender_id: Snowflake,

    #[validate(length(min = 1, max = 2000, message = "Comment must be 1-2000 characters"))]
    pub content: String,
}

// ============================================================================
// Identity Webhook Payloads
// ============================================================================

/// Envelope of an identity-provider delivery
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// `data` of `user.created` / `user.updated`
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityUser {
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email_addresses: Vec<EmailAddress>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailAddress {
    pub email_address: String,
}

impl IdentityUser {
    /// `"<first name or Guest> <last name>"`, trimmed
    pub fn display_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or("Guest");
        let last = self.last_name.as_deref().unwrap_or("");
        format!("{first} {last}").trim().to_string()
    }

    pub fn primary_email(&self) -> String {
        self.email_addresses
            .first()
            .map(|e| e.email_address.clone())
            .unwrap_or_default()
    }
}

/// `data` of `session.*`
#[derive(Debug, Clone, Deserialize)]
pub struct IdentitySession {
    pub user_id: String,
}
