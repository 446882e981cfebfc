//! Startup wiring from configuration to a ready repository.

use crate::{
    BackendKind, BlobBackend, BlobStorageConfig, BlobStorageContentRepository, ContentRepository,
    FileSystemBlobBackend, InMemoryBlobBackend,
};
use coffer_error::CofferResult;
use std::sync::Arc;

/// Build the backend a configuration selects.
///
/// # Errors
///
/// Returns error if the configuration is invalid or the backend cannot be
/// initialized.
pub fn backend_from_config(config: &BlobStorageConfig) -> CofferResult<Arc<dyn BlobBackend>> {
    config.validate()?;

    let backend: Arc<dyn BlobBackend> = match config.backend_kind()? {
        BackendKind::InMemory => Arc::new(InMemoryBlobBackend::new()),
        BackendKind::FileSystem(root) => Arc::new(FileSystemBlobBackend::new(root)?),
    };
    Ok(backend)
}

/// Build a content repository for `config`.
///
/// # Example
///
/// ```rust
/// use coffer_core::StorageDescriptor;
/// use coffer_storage::{connect, BlobStorageConfig};
///
/// # async fn example() -> coffer_error::CofferResult<()> {
/// let config = BlobStorageConfig::new("memory://", "media").with_create_if_not_exists(true);
/// let repository = connect(&config).await?;
///
/// let missing = repository.get(&StorageDescriptor::for_path("docs/missing.txt")).await;
/// assert!(missing.is_none());
/// # Ok(())
/// # }
/// ```
#[tracing::instrument(skip(config), fields(container = %config.default_container))]
pub async fn connect(config: &BlobStorageConfig) -> CofferResult<Arc<dyn ContentRepository>> {
    let backend = backend_from_config(config)?;
    tracing::info!(backend = backend.name(), "Connecting content repository");

    let repository = BlobStorageContentRepository::new(backend, config.clone()).await?;
    Ok(Arc::new(repository))
}
