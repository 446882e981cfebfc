//! Storage descriptor types.

use crate::FileTypeInfo;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of backend an object lives in.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[non_exhaustive]
pub enum StorageLocation {
    /// Blob-style object store (containers of keyed objects)
    #[default]
    #[display("BLOB")]
    Blob,
}

/// Durable reference to a stored object.
///
/// Returned by `create`, required by `get` and `delete`. The
/// `storage_path` is kept exactly as the caller supplied it so the
/// descriptor can be persisted and handed back later.
///
/// # Examples
///
/// ```
/// use coffer_core::{StorageDescriptor, StorageLocation};
///
/// let descriptor = StorageDescriptor::for_path("uploads/docs/missing.txt");
/// assert_eq!(descriptor.location, StorageLocation::Blob);
/// assert_eq!(descriptor.file_name, "missing.txt");
/// assert!(descriptor.file_type.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StorageDescriptor {
    /// Last path segment of `storage_path`
    pub file_name: String,
    /// Backend kind holding the object
    pub location: StorageLocation,
    /// Creation time, when the backend reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// Logical path as supplied at creation, scope prefix included
    pub storage_path: String,
    /// Resolved classification and MIME type (empty when unresolved)
    #[serde(default)]
    pub file_type: FileTypeInfo,
    /// Payload length in bytes at write time
    pub file_size: u64,
}

impl StorageDescriptor {
    /// Descriptor addressing `storage_path` with no other metadata.
    ///
    /// Useful for looking up or deleting an object whose descriptor was
    /// not persisted.
    pub fn for_path(storage_path: impl Into<String>) -> Self {
        let storage_path = storage_path.into();
        Self {
            file_name: crate::file_name_of(&storage_path).to_string(),
            storage_path,
            ..Self::default()
        }
    }
}
