//! Content repository over a blob backend.

use crate::{BlobBackend, BlobStorageConfig, ContentRepository};
use coffer_core::{
    ContentItem, FileTypeInfo, StorageDescriptor, StorageLocation, file_name_of,
    normalize_path, resolve_file_type, scope_name,
};
use coffer_error::CofferResult;
use std::sync::Arc;

/// Content repository storing items in one container of a blob backend.
///
/// Handles are immutable: switching to another container produces a new
/// handle via [`with_container`](Self::with_container). Clones share the
/// backend.
///
/// # Example
///
/// ```rust
/// use coffer_core::ContentItem;
/// use coffer_storage::{
///     BlobStorageConfig, BlobStorageContentRepository, ContentRepository, InMemoryBlobBackend,
/// };
/// use std::sync::Arc;
///
/// # async fn example() -> coffer_error::CofferResult<()> {
/// let config = BlobStorageConfig::new("memory://", "media").with_create_if_not_exists(true);
/// let repository =
///     BlobStorageContentRepository::new(Arc::new(InMemoryBlobBackend::new()), config).await?;
///
/// let mut item = ContentItem::builder()
///     .storage_path("docs/testfile.txt")
///     .data(b"Test content".to_vec())
///     .build()
///     .unwrap();
///
/// let descriptor = repository.try_create(&mut item).await?;
/// assert_eq!(descriptor.file_size, 12);
///
/// let fetched = repository.try_get(&descriptor).await?.unwrap();
/// assert_eq!(fetched.data, b"Test content");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct BlobStorageContentRepository {
    backend: Arc<dyn BlobBackend>,
    config: BlobStorageConfig,
    container: String,
}

impl BlobStorageContentRepository {
    /// Create a repository bound to the configured default container.
    ///
    /// # Errors
    ///
    /// Returns error if `create_if_not_exists` is set and the container
    /// cannot be created.
    pub async fn new(
        backend: Arc<dyn BlobBackend>,
        config: BlobStorageConfig,
    ) -> CofferResult<Self> {
        let container = config.default_container.clone();
        Self::bind(backend, config, &container).await
    }

    /// New handle on the same backend, bound to `container`.
    ///
    /// The name is lower-cased. The container is created first when the
    /// configuration asks for it.
    pub async fn with_container(&self, container: &str) -> CofferResult<Self> {
        Self::bind(self.backend.clone(), self.config.clone(), container).await
    }

    #[tracing::instrument(skip(backend, config), fields(backend = backend.name()))]
    async fn bind(
        backend: Arc<dyn BlobBackend>,
        config: BlobStorageConfig,
        container: &str,
    ) -> CofferResult<Self> {
        let container = scope_name(container);

        if config.create_if_not_exists {
            backend.ensure_container_exists(&container).await?;
        }

        tracing::debug!(container = %container, "Bound content repository");
        Ok(Self {
            backend,
            config,
            container,
        })
    }

    /// Active container name.
    pub fn container_name(&self) -> &str {
        &self.container
    }

    /// Configuration this repository was built from.
    pub fn config(&self) -> &BlobStorageConfig {
        &self.config
    }

    /// Storage key for a logical path in the active container.
    pub fn storage_key<'a>(&self, storage_path: &'a str) -> &'a str {
        normalize_path(storage_path, &self.container)
    }
}

impl std::fmt::Debug for BlobStorageContentRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobStorageContentRepository")
            .field("backend", &self.backend.name())
            .field("container", &self.container)
            .finish()
    }
}

#[async_trait::async_trait]
impl ContentRepository for BlobStorageContentRepository {
    #[tracing::instrument(
        skip(self, item),
        fields(container = %self.container, storage_path = %item.storage_path, size = item.data.len())
    )]
    async fn try_create(&self, item: &mut ContentItem) -> CofferResult<StorageDescriptor> {
        let key = self.storage_key(&item.storage_path).to_string();
        item.file_name = key.clone();

        self.backend
            .upload_or_replace(&self.container, &key, &item.data)
            .await?;

        // Extension does not depend on the container prefix
        let file_type = FileTypeInfo::from(resolve_file_type(&item.storage_path));

        tracing::info!(
            key = %key,
            mime_type = %file_type.mime_type,
            "Stored content item"
        );

        Ok(StorageDescriptor {
            file_name: file_name_of(&item.storage_path).to_string(),
            location: StorageLocation::Blob,
            created: None,
            storage_path: item.storage_path.clone(),
            file_type,
            file_size: item.size(),
        })
    }

    #[tracing::instrument(
        skip(self, descriptor),
        fields(container = %self.container, storage_path = %descriptor.storage_path)
    )]
    async fn try_get(&self, descriptor: &StorageDescriptor) -> CofferResult<Option<ContentItem>> {
        let key = self.storage_key(&descriptor.storage_path);

        if !self.backend.exists(&self.container, key).await? {
            tracing::info!(key, "Content item does not exist");
            return Ok(None);
        }

        let data = self.backend.download_all(&self.container, key).await?;
        tracing::debug!(key, size = data.len(), "Retrieved content item");

        Ok(Some(ContentItem {
            file_name: format!("{}/{}", self.container, key),
            storage_path: descriptor.storage_path.clone(),
            data,
            mime_type: descriptor.file_type.mime_type.clone(),
            ..ContentItem::default()
        }))
    }

    #[tracing::instrument(
        skip(self, descriptor),
        fields(container = %self.container, storage_path = %descriptor.storage_path)
    )]
    async fn try_delete(&self, descriptor: &StorageDescriptor) -> CofferResult<()> {
        let key = self.storage_key(&descriptor.storage_path);
        let deleted = self.backend.delete_if_exists(&self.container, key).await?;
        tracing::debug!(key, deleted, "Deleted content item");
        Ok(())
    }
}
