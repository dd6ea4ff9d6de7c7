//! Local filesystem implementation of `MediaStore`

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, instrument};

use social_core::error::DomainError;
use social_core::traits::{MediaStore, RepoResult};

use super::{check_storage_id, download_url, new_storage_id, upload_url};

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Stores each object as `{root}/{first two chars}/{storage_id}` with its
/// content type in a `.type` sidecar
#[derive(Debug, Clone)]
pub struct LocalMediaStore {
    root_path: PathBuf,
    public_base_url: String,
}

impl LocalMediaStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root_path: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn object_path(&self, storage_id: &str) -> PathBuf {
        let mut path = self.root_path.clone();
        path.push(&storage_id[0..2]);
        path.push(storage_id);
        path
    }

    fn type_path(&self, storage_id: &str) -> PathBuf {
        self.object_path(storage_id).with_extension("type")
    }
}

fn io_error(e: std::io::Error) -> DomainError {
    DomainError::StorageError(e.to_string())
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn generate_upload_url(&self) -> RepoResult<String> {
        Ok(upload_url(&self.public_base_url, &new_storage_id()))
    }

    #[instrument(skip(self))]
    async fn resolve_url(&self, storage_id: &str) -> RepoResult<Option<String>> {
        if check_storage_id(storage_id).is_err() {
            return Ok(None);
        }
        let exists = fs::try_exists(self.object_path(storage_id))
            .await
            .map_err(io_error)?;
        Ok(exists.then(|| download_url(&self.public_base_url, storage_id)))
    }

    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn put(&self, storage_id: &str, content_type: &str, bytes: Vec<u8>) -> RepoResult<()> {
        check_storage_id(storage_id)?;
        let path = self.object_path(storage_id);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(io_error)?;
        }

        // create_new: an issued location accepts exactly one upload
        let file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await;
        let mut file = match file {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(DomainError::ValidationError(format!(
                    "media {storage_id} was already uploaded"
                )));
            }
            Err(e) => return Err(io_error(e)),
        };

        tokio::io::AsyncWriteExt::write_all(&mut file, &bytes)
            .await
            .map_err(io_error)?;
        fs::write(self.type_path(storage_id), content_type)
            .await
            .map_err(io_error)?;

        debug!(storage_id, "Media stored");
        Ok(())
    }

    async fn get(&self, storage_id: &str) -> RepoResult<Option<(String, Vec<u8>)>> {
        if check_storage_id(storage_id).is_err() {
            return Ok(None);
        }
        let bytes = match fs::read(self.object_path(storage_id)).await {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(e)),
        };
        let content_type = fs::read_to_string(self.type_path(storage_id))
            .await
            .unwrap_or_else(|_| DEFAULT_CONTENT_TYPE.to_string());
        Ok(Some((content_type, bytes)))
    }
}
