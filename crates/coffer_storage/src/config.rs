//! Configuration for blob-backed content repositories.
//!
//! Configuration is read from TOML with a precedence system:
//! - User config in the home directory (`~/.config/coffer/coffer.toml`)
//! - User config in the current directory (`./coffer.toml`)
//! - Environment variables prefixed with `COFFER__`
//!
//! ```toml
//! [blob_storage]
//! connection_string = "file:///var/coffer"
//! default_container = "media"
//! create_if_not_exists = true
//! ```

use coffer_error::{CofferError, CofferResult, ConfigError};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Settings for a blob-backed content repository.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobStorageConfig {
    /// Backend locator and credentials (e.g. `memory://`, `file:///var/coffer`)
    pub connection_string: String,

    /// Container used until a caller switches to another one
    pub default_container: String,

    /// Create containers on demand when binding a repository
    #[serde(default)]
    pub create_if_not_exists: bool,
}

impl BlobStorageConfig {
    /// Configuration for `connection_string` using `default_container`.
    pub fn new(connection_string: impl Into<String>, default_container: impl Into<String>) -> Self {
        Self {
            connection_string: connection_string.into(),
            default_container: default_container.into(),
            create_if_not_exists: false,
        }
    }

    /// Set whether containers are created on demand.
    pub fn with_create_if_not_exists(mut self, create: bool) -> Self {
        self.create_if_not_exists = create;
        self
    }

    /// Check the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns error if the connection string or default container is blank.
    pub fn validate(&self) -> CofferResult<()> {
        if self.connection_string.trim().is_empty() {
            return Err(ConfigError::new("Invalid blob storage connection string").into());
        }
        if self.default_container.trim().is_empty() {
            return Err(ConfigError::new("Default container name must not be empty").into());
        }
        Ok(())
    }

    /// Backend selected by the connection string.
    pub fn backend_kind(&self) -> CofferResult<BackendKind> {
        BackendKind::parse(&self.connection_string)
    }
}

// Connection strings carry credentials for hosted backends.
impl std::fmt::Debug for BlobStorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobStorageConfig")
            .field("connection_string", &"<redacted>")
            .field("default_container", &self.default_container)
            .field("create_if_not_exists", &self.create_if_not_exists)
            .finish()
    }
}

/// Backend a connection string points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Process-local in-memory store (`memory://`)
    InMemory,
    /// Directory tree rooted at the given path (`file://<dir>`)
    FileSystem(PathBuf),
}

impl BackendKind {
    /// Parse a connection string.
    ///
    /// # Examples
    ///
    /// ```
    /// use coffer_storage::BackendKind;
    /// use std::path::PathBuf;
    ///
    /// assert_eq!(BackendKind::parse("memory://").unwrap(), BackendKind::InMemory);
    /// assert_eq!(
    ///     BackendKind::parse("file:///var/coffer").unwrap(),
    ///     BackendKind::FileSystem(PathBuf::from("/var/coffer"))
    /// );
    /// assert!(BackendKind::parse("UseDevelopmentStorage=true").is_err());
    /// ```
    pub fn parse(connection_string: &str) -> CofferResult<Self> {
        let connection_string = connection_string.trim();

        if connection_string.eq_ignore_ascii_case("memory://")
            || connection_string.eq_ignore_ascii_case("memory:")
        {
            return Ok(BackendKind::InMemory);
        }

        if let Some(root) = connection_string.strip_prefix("file://") {
            if root.is_empty() {
                return Err(ConfigError::new("file:// connection string needs a directory").into());
            }
            return Ok(BackendKind::FileSystem(PathBuf::from(root)));
        }

        let scheme = connection_string
            .split_once("://")
            .map(|(scheme, _)| scheme)
            .unwrap_or("<none>");
        Err(ConfigError::new(format!(
            "Unsupported blob storage connection string (scheme: {})",
            scheme
        ))
        .into())
    }
}

/// Top-level Coffer configuration.
///
/// # Example
///
/// ```no_run
/// use coffer_storage::CofferConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = CofferConfig::load()?;
/// println!("Default container: {}", config.blob_storage.default_container);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CofferConfig {
    /// Blob storage settings
    pub blob_storage: BlobStorageConfig,
}

impl CofferConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> CofferResult<Self> {
        debug!("Loading configuration from file");

        Self::build(Config::builder().add_source(File::from(path.as_ref())))
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(toml: &str) -> CofferResult<Self> {
        Self::build(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    /// Load configuration with precedence: environment > current dir > home dir.
    ///
    /// Config files are optional and silently skipped if not found.
    /// Environment variables use `__` as separator, e.g.
    /// `COFFER__BLOB_STORAGE__DEFAULT_CONTAINER=media`.
    #[instrument]
    pub fn load() -> CofferResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir");

        let mut builder = Config::builder();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/coffer/coffer.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("coffer").required(false))
            .add_source(
                Environment::with_prefix("COFFER")
                    .prefix_separator("__")
                    .separator("__"),
            );

        Self::build(builder)
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> CofferResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                CofferError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                CofferError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.blob_storage.validate()?;
        Ok(config)
    }
}
