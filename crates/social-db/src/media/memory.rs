//! In-process implementation of `MediaStore`

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use social_core::error::DomainError;
use social_core::traits::{MediaStore, RepoResult};

use super::{check_storage_id, download_url, new_storage_id, upload_url};

#[derive(Debug, Default)]
pub struct MemoryMediaStore {
    public_base_url: String,
    objects: RwLock<HashMap<String, (String, Vec<u8>)>>,
}

impl MemoryMediaStore {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            objects: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl MediaStore for MemoryMediaStore {
    async fn generate_upload_url(&self) -> RepoResult<String> {
        Ok(upload_url(&self.public_base_url, &new_storage_id()))
    }

    async fn resolve_url(&self, storage_id: &str) -> RepoResult<Option<String>> {
        Ok(self
            .objects
            .read()
            .contains_key(storage_id)
            .then(|| download_url(&self.public_base_url, storage_id)))
    }

    async fn put(&self, storage_id: &str, content_type: &str, bytes: Vec<u8>) -> RepoResult<()> {
        check_storage_id(storage_id)?;
        let mut objects = self.objects.write();
        if objects.contains_key(storage_id) {
            return Err(DomainError::ValidationError(format!(
                "media {storage_id} was already uploaded"
            )));
        }
        objects.insert(storage_id.to_string(), (content_type.to_string(), bytes));
        Ok(())
    }

    async fn get(&self, storage_id: &str) -> RepoResult<Option<(String, Vec<u8>)>> {
        Ok(self.objects.read().get(storage_id).cloned())
    }
}
