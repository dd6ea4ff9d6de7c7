//! User entity - a member synced from the identity provider

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Display name used when a user record is missing or has no name
pub const UNKNOWN_USER_NAME: &str = "Unknown User";

/// User profile mirrored from the identity provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    /// `<app-domain>|<external-id>`, unique per user
    pub token_identifier: String,
    pub name: Option<String>,
    pub email: String,
    pub avatar_url: String,
    pub is_online: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: Snowflake, token_identifier: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            token_identifier,
            name: None,
            email,
            avatar_url: String::new(),
            is_online: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Build the token identifier the identity provider's tokens resolve to
    pub fn token_identifier_for(app_domain: &str, external_id: &str) -> String {
        format!("{app_domain}|{external_id}")
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(UNKNOWN_USER_NAME)
    }

    /// Replace the provider-owned profile fields
    pub fn apply_profile(&mut self, name: Option<String>, email: String, avatar_url: String) {
        self.name = name;
        self.email = email;
        self.avatar_url = avatar_url;
        self.updated_at = Utc::now();
    }
}
