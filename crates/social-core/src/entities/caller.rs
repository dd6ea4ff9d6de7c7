//! Authenticated caller passed explicitly into every service operation

use crate::value_objects::Snowflake;

/// Identity of the user performing an operation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthenticatedCaller {
    pub id: Snowflake,
    pub token_identifier: String,
}

impl AuthenticatedCaller {
    pub fn new(id: Snowflake, token_identifier: impl Into<String>) -> Self {
        Self {
            id,
            token_identifier: token_identifier.into(),
        }
    }

    #[inline]
    pub fn is(&self, user_id: Snowflake) -> bool {
        self.id == user_id
    }
}
