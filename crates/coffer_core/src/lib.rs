//! Core data types for the Coffer content repository.
//!
//! This crate holds the value objects that flow between callers and storage
//! backends, plus the two pure helpers every backend shares: mapping a
//! logical path onto a storage key and resolving file type metadata from a
//! file name.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod content;
mod descriptor;
mod file_type;
mod path;

pub use content::{ContentItem, ContentItemBuilder, ContentItemBuilderError};
pub use descriptor::{StorageDescriptor, StorageLocation};
pub use file_type::{
    FileClassification, FileTypeInfo, ResolvedFileType, mime_types_for, resolve_file_type,
};
pub use path::{file_name_of, normalize_path, scope_name};
