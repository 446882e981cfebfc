//! Filesystem-based blob backend.
//!
//! Containers are directories under a root, and keys are relative paths
//! inside them. Suitable for development and single-host deployments.

use crate::BlobBackend;
use coffer_error::{CofferResult, StorageError, StorageErrorKind};
use std::path::{Component, Path, PathBuf};
use uuid::Uuid;

const TEMP_DIR: &str = ".tmp";

/// Filesystem blob backend.
///
/// Objects live at `{base_path}/{container}/{key}`:
///
/// ```text
/// /var/coffer/
/// ├── .tmp/                  (in-flight uploads)
/// ├── media/
/// │   ├── testfile.txt
/// │   └── docs/
/// │       └── report.pdf
/// └── invoices/
///     └── 2024/
///         └── 0001.xml
/// ```
///
/// # Features
///
/// - **Atomic writes**: uploads go to a temp file and are renamed into place
/// - **Overwrite semantics**: uploading an existing key replaces it
/// - **Confined keys**: absolute keys and `..` segments are rejected
pub struct FileSystemBlobBackend {
    base_path: PathBuf,
}

impl FileSystemBlobBackend {
    /// Create a new filesystem backend.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Arguments
    ///
    /// * `base_path` - Root directory holding one directory per container
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or accessed.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> CofferResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(base_path.join(TEMP_DIR)).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Created filesystem blob backend");
        Ok(Self { base_path })
    }

    /// Root directory of this backend.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Directory for a container.
    fn container_path(&self, container: &str) -> CofferResult<PathBuf> {
        if container.is_empty()
            || container.starts_with('.')
            || container.contains(['/', '\\'])
        {
            return Err(StorageError::new(StorageErrorKind::InvalidPath(format!(
                "container name {:?}",
                container
            )))
            .into());
        }
        Ok(self.base_path.join(container))
    }

    /// Path of an object, refusing keys that escape the container.
    fn object_path(&self, container: &str, key: &str) -> CofferResult<PathBuf> {
        let container_path = self.container_path(container)?;
        let relative = Path::new(key);

        let confined = !key.is_empty()
            && !key.contains('\\')
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));
        if !confined {
            return Err(StorageError::new(StorageErrorKind::InvalidPath(format!(
                "key {:?}",
                key
            )))
            .into());
        }

        Ok(container_path.join(relative))
    }

    /// Fail with `Unavailable` when the root directory is gone, e.g. an
    /// unmounted volume.
    async fn check_available(&self) -> CofferResult<()> {
        match tokio::fs::metadata(&self.base_path).await {
            Ok(metadata) if metadata.is_dir() => Ok(()),
            Ok(_) => Err(StorageError::new(StorageErrorKind::Unavailable(format!(
                "{} is not a directory",
                self.base_path.display()
            )))
            .into()),
            Err(e) => Err(StorageError::new(StorageErrorKind::Unavailable(format!(
                "{}: {}",
                self.base_path.display(),
                e
            )))
            .into()),
        }
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        self.base_path.join(TEMP_DIR).join(Uuid::new_v4().to_string())
    }
}

#[async_trait::async_trait]
impl BlobBackend for FileSystemBlobBackend {
    fn name(&self) -> &'static str {
        "filesystem"
    }

    #[tracing::instrument(skip(self))]
    async fn ensure_container_exists(&self, container: &str) -> CofferResult<()> {
        let path = self.container_path(container)?;
        self.check_available().await?;
        tokio::fs::create_dir_all(&path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        Ok(())
    }

    #[tracing::instrument(skip(self, data), fields(size = data.len()))]
    async fn upload_or_replace(
        &self,
        container: &str,
        key: &str,
        data: &[u8],
    ) -> CofferResult<()> {
        let path = self.object_path(container, key)?;
        self.check_available().await?;

        if !tokio::fs::try_exists(self.container_path(container)?)
            .await
            .unwrap_or(false)
        {
            return Err(
                StorageError::new(StorageErrorKind::ContainerNotFound(container.to_string()))
                    .into(),
            );
        }

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        // Write to temp file first, then rename for atomicity
        let temp_path = self.temp_path();
        if let Err(e) = tokio::fs::write(&temp_path, data).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
            .into());
        }

        if let Err(e) = tokio::fs::rename(&temp_path, &path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
            .into());
        }

        tracing::debug!(path = %path.display(), "Stored object");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn exists(&self, container: &str, key: &str) -> CofferResult<bool> {
        let path = self.object_path(container, key)?;
        self.check_available().await?;
        match tokio::fs::metadata(&path).await {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
            .into()),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn download_all(&self, container: &str, key: &str) -> CofferResult<Vec<u8>> {
        let path = self.object_path(container, key)?;
        self.check_available().await?;

        let data = tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(format!("{}/{}", container, key)))
            } else {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        })?;

        tracing::debug!(path = %path.display(), size = data.len(), "Read object");
        Ok(data)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_if_exists(&self, container: &str, key: &str) -> CofferResult<bool> {
        let path = self.object_path(container, key)?;
        self.check_available().await?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Deleted object");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                "delete {}: {}",
                path.display(),
                e
            )))
            .into()),
        }
    }
}
