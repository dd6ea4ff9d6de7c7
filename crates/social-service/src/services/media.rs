//! Media upload service
//!
//! Accepts the bytes sent to an issued upload location and serves them back.

use social_core::AuthenticatedCaller;
use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use crate::dto::MediaUploadResponse;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Media service
pub struct MediaService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MediaService<'a> {
    /// Create a new MediaService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Store an upload under the id of its issued location
    #[instrument(skip(self, caller, bytes), fields(user_id = %caller.id, size = bytes.len()))]
    pub async fn upload(
        &self,
        caller: &AuthenticatedCaller,
        storage_id: &str,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> ServiceResult<MediaUploadResponse> {
        if bytes.is_empty() {
            return Err(ServiceError::validation("Upload body is empty"));
        }

        let content_type = content_type
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE);

        self.ctx
            .media_store()
            .put(storage_id, content_type, bytes)
            .await?;

        info!(storage_id, content_type, "Media uploaded");

        Ok(MediaUploadResponse {
            storage_id: storage_id.to_string(),
        })
    }

    /// Content type and bytes of a stored object
    #[instrument(skip(self))]
    pub async fn download(&self, storage_id: &str) -> ServiceResult<(String, Vec<u8>)> {
        self.ctx
            .media_store()
            .get(storage_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Media", storage_id))
    }
}
