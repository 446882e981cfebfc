//! Content repository and pluggable blob storage for Coffer.
//!
//! This crate maps logical content paths onto a blob-style object store and
//! back. Callers work with [`ContentItem`](coffer_core::ContentItem)s and
//! [`StorageDescriptor`](coffer_core::StorageDescriptor)s; the concrete
//! store sits behind the [`BlobBackend`] trait.
//!
//! # Features
//!
//! - **Backend-neutral contract**: [`ContentRepository`] with fallible
//!   `try_*` operations and `Option`-returning wrappers
//! - **Pluggable backends**: in-memory and filesystem backends ship here;
//!   hosted stores implement [`BlobBackend`]
//! - **Config-driven startup**: [`connect`] picks the backend from the
//!   connection string
//!
//! # Example
//!
//! ```rust
//! use coffer_core::ContentItem;
//! use coffer_storage::{connect, BlobStorageConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BlobStorageConfig::new("memory://", "media").with_create_if_not_exists(true);
//! let repository = connect(&config).await?;
//!
//! let mut item = ContentItem::builder()
//!     .storage_path("media/reports/q3.csv")
//!     .data(b"region,total".to_vec())
//!     .build()?;
//!
//! let descriptor = repository.create(&mut item).await.expect("stored");
//! assert_eq!(descriptor.file_type.mime_type, "text/csv");
//!
//! let fetched = repository.get(&descriptor).await.expect("present");
//! assert_eq!(fetched.file_name, "media/reports/q3.csv");
//!
//! repository.delete(&descriptor).await;
//! assert!(repository.get(&descriptor).await.is_none());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod blob;
mod config;
mod connect;
mod filesystem;
mod memory;
mod repository;

pub use backend::BlobBackend;
pub use blob::BlobStorageContentRepository;
pub use config::{BackendKind, BlobStorageConfig, CofferConfig};
pub use connect::{backend_from_config, connect};
pub use filesystem::FileSystemBlobBackend;
pub use memory::InMemoryBlobBackend;
pub use repository::ContentRepository;

pub use coffer_error::{StorageError, StorageErrorKind};
