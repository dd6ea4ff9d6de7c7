//! Media store adapters
//!
//! Clients upload to `PUT {base}/api/v1/media/{storage_id}` and media is served
//! from `GET {base}/media/{storage_id}`. Storage ids are v4 UUIDs.

mod local;
mod memory;

pub use local::LocalMediaStore;
pub use memory::MemoryMediaStore;

use social_core::error::DomainError;
use uuid::Uuid;

/// Location a client uploads an object to
pub fn upload_url(base_url: &str, storage_id: &str) -> String {
    format!("{base_url}/api/v1/media/{storage_id}")
}

/// Public location an object is served from
pub fn download_url(base_url: &str, storage_id: &str) -> String {
    format!("{base_url}/media/{storage_id}")
}

pub(crate) fn new_storage_id() -> String {
    Uuid::new_v4().to_string()
}

/// Reject ids that are not canonical UUIDs (this also keeps them path-safe)
pub(crate) fn check_storage_id(storage_id: &str) -> Result<(), DomainError> {
    match Uuid::parse_str(storage_id) {
        Ok(id) if id.hyphenated().to_string() == storage_id => Ok(()),
        _ => Err(DomainError::ValidationError(format!(
            "invalid storage id: {storage_id}"
        ))),
    }
}
