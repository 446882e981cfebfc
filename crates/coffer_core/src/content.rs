//! Content item type.

use serde::{Deserialize, Serialize};

/// A logical file to store, or a file that was retrieved.
///
/// Callers build one before `create`; repositories rebuild one on `get`
/// with `data` filled from the backend.
///
/// # Examples
///
/// ```
/// use coffer_core::ContentItem;
///
/// let item = ContentItem::builder()
///     .storage_path("docs/report.pdf")
///     .data(b"%PDF-1.7".to_vec())
///     .display_name("Quarterly report")
///     .build()
///     .unwrap();
///
/// assert_eq!(item.storage_path, "docs/report.pdf");
/// assert!(!item.is_public);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct ContentItem {
    /// Friendly name shown to users; never used for addressing.
    #[builder(default)]
    #[serde(default)]
    pub display_name: String,

    /// Identity of the object in the backend.
    ///
    /// Assigned by the repository: the storage key after `create`,
    /// `{container}/{key}` after `get`.
    #[builder(default)]
    #[serde(default)]
    pub file_name: String,

    /// Logical path used to address the object. May carry the container
    /// name as its first segment.
    pub storage_path: String,

    /// Raw payload.
    #[builder(default)]
    #[serde(default)]
    pub data: Vec<u8>,

    /// Optional free-form description.
    #[builder(default)]
    #[serde(default)]
    pub description: String,

    /// MIME type of the payload.
    #[builder(default)]
    #[serde(default)]
    pub mime_type: String,

    /// Whether the item should be publicly visible. Stored, not enforced.
    #[builder(default)]
    #[serde(default)]
    pub is_public: bool,
}

impl ContentItem {
    /// Creates a new content item builder.
    pub fn builder() -> ContentItemBuilder {
        ContentItemBuilder::default()
    }

    /// Payload size in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}
