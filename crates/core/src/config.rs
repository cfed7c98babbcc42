//! Store configuration.
//!
//! [`StoreConfig`] carries everything the store consumes from its
//! environment: the durable file path, the backup directory, and the
//! validation/pagination limits. The store never invents these — the
//! composition root constructs a config and hands it in.

use std::path::{Path, PathBuf};

/// Default maximum key length, in characters.
pub const DEFAULT_MAX_KEY_LENGTH: usize = 100;

/// Default maximum value length, in characters.
pub const DEFAULT_MAX_VALUE_LENGTH: usize = 10_000;

/// Default number of records per listing page.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Default number of retained backup files.
pub const DEFAULT_MAX_BACKUPS: usize = 10;

/// Configuration for a record store.
///
/// # Example
///
/// ```
/// use tagstore_core::config::StoreConfig;
///
/// let config = StoreConfig::new("data/store.json", "data/backups")
///     .with_max_key_length(64)
///     .with_default_page_size(25);
/// assert_eq!(config.max_key_length, 64);
/// assert_eq!(config.max_backups, 10);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path of the durable JSON document
    pub data_file: PathBuf,
    /// Directory holding rotated backup copies
    pub backup_dir: PathBuf,
    /// Maximum key length in characters
    pub max_key_length: usize,
    /// Maximum value length in characters
    pub max_value_length: usize,
    /// Page size used when a listing does not specify one
    pub default_page_size: usize,
    /// Number of backup files retained after rotation
    pub max_backups: usize,
}

impl StoreConfig {
    /// Create a config with the given paths and default limits.
    pub fn new(data_file: impl Into<PathBuf>, backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
            backup_dir: backup_dir.into(),
            max_key_length: DEFAULT_MAX_KEY_LENGTH,
            max_value_length: DEFAULT_MAX_VALUE_LENGTH,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_backups: DEFAULT_MAX_BACKUPS,
        }
    }

    /// Set the maximum key length in characters.
    pub fn with_max_key_length(mut self, chars: usize) -> Self {
        self.max_key_length = chars;
        self
    }

    /// Set the maximum value length in characters.
    pub fn with_max_value_length(mut self, chars: usize) -> Self {
        self.max_value_length = chars;
        self
    }

    /// Set the page size used when a listing does not specify one.
    pub fn with_default_page_size(mut self, size: usize) -> Self {
        self.default_page_size = size;
        self
    }

    /// Set the number of backup files retained after rotation.
    pub fn with_max_backups(mut self, count: usize) -> Self {
        self.max_backups = count;
        self
    }

    /// The durable file path.
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// The backup directory path.
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }
}
