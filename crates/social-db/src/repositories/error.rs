//! Error handling utilities for repositories

use social_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    map_db_error(e)
}

/// Map a failed insert whose row references other rows: unique violations go
/// through `on_unique`, dangling references through `on_missing_parent`
pub fn map_insert_error<U, M>(e: SqlxError, on_unique: U, on_missing_parent: M) -> DomainError
where
    U: FnOnce() -> DomainError,
    M: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
        if db_err.is_foreign_key_violation() {
            return on_missing_parent();
        }
    }
    map_db_error(e)
}
