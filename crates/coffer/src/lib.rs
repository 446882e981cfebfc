//! Coffer - storage-agnostic content repository
//!
//! Coffer stores, retrieves and deletes opaque binary content (documents,
//! images, spreadsheets) by logical path while keeping the storage backend
//! behind a uniform contract.
//!
//! # Features
//!
//! - **Uniform contract**: `create`, `get` and `delete` over any backend
//! - **Path normalization**: container-qualified and bare paths address the same object
//! - **File type resolution**: classification and MIME type from the file name
//! - **Config-driven startup**: backend chosen from a connection string
//!
//! # Quick Start
//!
//! ```rust
//! use coffer::{BlobStorageConfig, ContentItem, connect};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BlobStorageConfig::new("memory://", "uploads").with_create_if_not_exists(true);
//! let repository = connect(&config).await?;
//!
//! let mut item = ContentItem::builder()
//!     .storage_path("uploads/invoices/0001.pdf")
//!     .data(b"%PDF-1.7".to_vec())
//!     .display_name("Invoice 0001")
//!     .build()?;
//!
//! if let Some(descriptor) = repository.create(&mut item).await {
//!     let fetched = repository.get(&descriptor).await;
//!     assert!(fetched.is_some());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - `coffer_core` - content item, descriptor and file type model
//! - `coffer_error` - error types
//! - `coffer_storage` - repository, backends and configuration
//!
//! This crate re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod observability;

pub use coffer_core::*;
pub use coffer_error::*;
pub use coffer_storage::{
    BackendKind, BlobBackend, BlobStorageConfig, BlobStorageContentRepository, CofferConfig,
    ContentRepository, FileSystemBlobBackend, InMemoryBlobBackend, backend_from_config, connect,
};

pub use observability::{
    ObservabilityConfig, init_observability, init_observability_with_config,
};
