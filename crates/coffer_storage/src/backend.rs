//! Blob backend trait definition.

use coffer_error::CofferResult;

/// Primitive operations of a blob-style object store.
///
/// Objects are addressed by a container name and a backend-relative key.
/// Implementations wrap a concrete storage client; retries, timeouts and
/// authentication are their concern, not the repository's.
#[async_trait::async_trait]
pub trait BlobBackend: Send + Sync {
    /// Short backend name for diagnostics (e.g. "memory", "filesystem").
    fn name(&self) -> &'static str;

    /// Create the container if it does not exist yet.
    async fn ensure_container_exists(&self, container: &str) -> CofferResult<()>;

    /// Store `data` at `key`, replacing any existing object.
    ///
    /// # Errors
    ///
    /// Fails with `ContainerNotFound` when the container does not exist.
    async fn upload_or_replace(&self, container: &str, key: &str, data: &[u8])
    -> CofferResult<()>;

    /// Check whether an object exists at `key`.
    ///
    /// A missing container is reported as `false`, not as an error.
    async fn exists(&self, container: &str, key: &str) -> CofferResult<bool>;

    /// Download the full contents of the object at `key`.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` when no object exists at `key`.
    async fn download_all(&self, container: &str, key: &str) -> CofferResult<Vec<u8>>;

    /// Delete the object at `key` if present.
    ///
    /// # Returns
    ///
    /// `true` if an object was deleted, `false` if there was nothing to delete
    async fn delete_if_exists(&self, container: &str, key: &str) -> CofferResult<bool>;
}
