//! In-memory blob backend.

use crate::BlobBackend;
use coffer_error::{CofferResult, StorageError, StorageErrorKind};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

type Containers = HashMap<String, HashMap<String, Vec<u8>>>;

/// Blob backend holding every container in process memory.
///
/// Clones share the same underlying store. Behaves like a hosted blob
/// service: uploads into a container that was never created fail.
///
/// # Example
///
/// ```rust
/// use coffer_storage::{BlobBackend, InMemoryBlobBackend};
///
/// # async fn example() -> coffer_error::CofferResult<()> {
/// let backend = InMemoryBlobBackend::new();
/// backend.ensure_container_exists("media").await?;
/// backend.upload_or_replace("media", "docs/a.txt", b"hello").await?;
/// assert!(backend.exists("media", "docs/a.txt").await?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryBlobBackend {
    containers: Arc<RwLock<Containers>>,
}

impl InMemoryBlobBackend {
    /// Create an empty backend with no containers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys currently stored in `container`, sorted.
    pub async fn keys(&self, container: &str) -> Vec<String> {
        let containers = self.containers.read().await;
        let mut keys: Vec<String> = containers
            .get(container)
            .map(|objects| objects.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }

    /// Whether `container` has been created.
    pub async fn has_container(&self, container: &str) -> bool {
        self.containers.read().await.contains_key(container)
    }
}

#[async_trait::async_trait]
impl BlobBackend for InMemoryBlobBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    #[tracing::instrument(skip(self))]
    async fn ensure_container_exists(&self, container: &str) -> CofferResult<()> {
        let mut containers = self.containers.write().await;
        if !containers.contains_key(container) {
            containers.insert(container.to_string(), HashMap::new());
            tracing::debug!("Created container");
        }
        Ok(())
    }

    #[tracing::instrument(skip(self, data), fields(size = data.len()))]
    async fn upload_or_replace(
        &self,
        container: &str,
        key: &str,
        data: &[u8],
    ) -> CofferResult<()> {
        let mut containers = self.containers.write().await;
        let objects = containers.get_mut(container).ok_or_else(|| {
            StorageError::new(StorageErrorKind::ContainerNotFound(container.to_string()))
        })?;

        let replaced = objects.insert(key.to_string(), data.to_vec()).is_some();
        tracing::debug!(replaced, "Stored object");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn exists(&self, container: &str, key: &str) -> CofferResult<bool> {
        let containers = self.containers.read().await;
        Ok(containers
            .get(container)
            .is_some_and(|objects| objects.contains_key(key)))
    }

    #[tracing::instrument(skip(self))]
    async fn download_all(&self, container: &str, key: &str) -> CofferResult<Vec<u8>> {
        let containers = self.containers.read().await;
        containers
            .get(container)
            .and_then(|objects| objects.get(key))
            .cloned()
            .ok_or_else(|| {
                StorageError::new(StorageErrorKind::NotFound(format!("{}/{}", container, key)))
                    .into()
            })
    }

    #[tracing::instrument(skip(self))]
    async fn delete_if_exists(&self, container: &str, key: &str) -> CofferResult<bool> {
        let mut containers = self.containers.write().await;
        let deleted = containers
            .get_mut(container)
            .and_then(|objects| objects.remove(key))
            .is_some();
        tracing::debug!(deleted, "Delete requested");
        Ok(deleted)
    }
}
