//! Error types for the Coffer content repository.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use coffer_error::{CofferResult, StorageError, StorageErrorKind};
//!
//! fn download() -> CofferResult<Vec<u8>> {
//!     Err(StorageError::new(StorageErrorKind::NotFound("docs/a.txt".to_string())))?
//! }
//!
//! match download() {
//!     Ok(bytes) => println!("Got {} bytes", bytes.len()),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod config;
mod error;
mod storage;

pub use backend::BackendError;
pub use config::ConfigError;
pub use error::{CofferError, CofferErrorKind, CofferResult};
pub use storage::{StorageError, StorageErrorKind};
