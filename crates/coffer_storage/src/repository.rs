//! Content repository trait definition.

use coffer_core::{ContentItem, StorageDescriptor};
use coffer_error::CofferResult;

/// Create, fetch and delete content items independent of the backend.
///
/// Implementors provide the `try_*` operations, which report failures as
/// errors. The provided `create`, `get` and `delete` wrap them for callers
/// that only care whether a value came back: every failure is logged and
/// collapsed into `None` (or nothing, for `delete`).
#[async_trait::async_trait]
pub trait ContentRepository: Send + Sync {
    /// Store `item` and describe where it landed.
    ///
    /// Sets `item.file_name` to the storage key. Any existing object at the
    /// same key is overwritten.
    async fn try_create(&self, item: &mut ContentItem) -> CofferResult<StorageDescriptor>;

    /// Fetch the item a descriptor points to.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when no object exists at the descriptor's path
    async fn try_get(&self, descriptor: &StorageDescriptor) -> CofferResult<Option<ContentItem>>;

    /// Remove the object a descriptor points to. Missing objects are not an error.
    async fn try_delete(&self, descriptor: &StorageDescriptor) -> CofferResult<()>;

    /// Store `item`, returning `None` on any failure.
    async fn create(&self, item: &mut ContentItem) -> Option<StorageDescriptor> {
        match self.try_create(item).await {
            Ok(descriptor) => Some(descriptor),
            Err(e) => {
                tracing::error!(
                    storage_path = %item.storage_path,
                    error = %e,
                    "Failed to create content item"
                );
                None
            }
        }
    }

    /// Fetch an item, returning `None` when it is missing or on any failure.
    async fn get(&self, descriptor: &StorageDescriptor) -> Option<ContentItem> {
        match self.try_get(descriptor).await {
            Ok(item) => item,
            Err(e) => {
                tracing::error!(
                    storage_path = %descriptor.storage_path,
                    error = %e,
                    "Failed to get content item"
                );
                None
            }
        }
    }

    /// Best-effort delete; failures are logged and otherwise ignored.
    async fn delete(&self, descriptor: &StorageDescriptor) {
        if let Err(e) = self.try_delete(descriptor).await {
            tracing::warn!(
                storage_path = %descriptor.storage_path,
                error = %e,
                "Failed to delete content item"
            );
        }
    }
}
