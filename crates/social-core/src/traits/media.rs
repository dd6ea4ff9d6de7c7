//! Binary media storage port

use async_trait::async_trait;

use super::repositories::RepoResult;

/// Where post media lives. Posts only keep the opaque storage id.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Issue a one-shot location the client uploads a file to
    async fn generate_upload_url(&self) -> RepoResult<String>;

    /// Public URL for a stored object, `None` when nothing is stored under `storage_id`
    async fn resolve_url(&self, storage_id: &str) -> RepoResult<Option<String>>;

    /// Accept the bytes uploaded to an issued location.
    /// Storing twice under one id fails with a validation error.
    async fn put(&self, storage_id: &str, content_type: &str, bytes: Vec<u8>) -> RepoResult<()>;

    /// Stored bytes and content type
    async fn get(&self, storage_id: &str) -> RepoResult<Option<(String, Vec<u8>)>>;
}
