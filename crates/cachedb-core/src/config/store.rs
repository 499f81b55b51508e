use crate::error::{CacheError, Result};
use crate::types::{DEFAULT_DATA_TYPE, DEFAULT_OBJECT_TYPE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a cache store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Path to the database file, or a directory that will hold it
    pub path: PathBuf,

    /// Delete the backing file when the store is closed
    /// Default: false
    #[serde(default)]
    pub ephemeral: bool,

    /// Object type used when a locator leaves it unset
    #[serde(default = "default_object_type")]
    pub default_object_type: String,

    /// Data type used when a locator leaves it unset
    #[serde(default = "default_data_type")]
    pub default_data_type: String,

    /// Enable WAL mode
    /// Default: true
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,

    /// SQLite synchronous mode
    #[serde(default)]
    pub synchronous: SynchronousMode,

    /// SQLite cache size (in pages, negative = KB)
    /// Default: -64000 (64MB)
    #[serde(default = "default_cache_size")]
    pub cache_size: i32,

    /// How long the engine waits on a locked database file before failing
    /// Default: 5000ms
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SynchronousMode {
    /// Full fsync (safest, slowest)
    Full,
    /// fsync at critical moments (good balance)
    #[default]
    Normal,
    /// No fsync (fastest, least safe)
    Off,
}

impl SynchronousMode {
    pub fn as_pragma(&self) -> &'static str {
        match self {
            SynchronousMode::Full => "FULL",
            SynchronousMode::Normal => "NORMAL",
            SynchronousMode::Off => "OFF",
        }
    }
}

fn default_object_type() -> String {
    DEFAULT_OBJECT_TYPE.to_string()
}

fn default_data_type() -> String {
    DEFAULT_DATA_TYPE.to_string()
}

fn default_wal_mode() -> bool {
    true
}

fn default_cache_size() -> i32 {
    -64000 // 64MB
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

impl CacheConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ephemeral: false,
            default_object_type: default_object_type(),
            default_data_type: default_data_type(),
            wal_mode: default_wal_mode(),
            synchronous: SynchronousMode::default(),
            cache_size: default_cache_size(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }

    pub fn with_ephemeral(mut self, ephemeral: bool) -> Self {
        self.ephemeral = ephemeral;
        self
    }

    pub fn with_default_object_type(mut self, name: impl Into<String>) -> Self {
        self.default_object_type = name.into();
        self
    }

    pub fn with_default_data_type(mut self, name: impl Into<String>) -> Self {
        self.default_data_type = name.into();
        self
    }

    pub fn with_synchronous(mut self, synchronous: SynchronousMode) -> Self {
        self.synchronous = synchronous;
        self
    }

    pub fn with_wal_mode(mut self, wal_mode: bool) -> Self {
        self.wal_mode = wal_mode;
        self
    }

    pub fn with_cache_size(mut self, cache_size: i32) -> Self {
        self.cache_size = cache_size;
        self
    }

    pub fn with_busy_timeout_ms(mut self, busy_timeout_ms: u64) -> Self {
        self.busy_timeout_ms = busy_timeout_ms;
        self
    }

    /// Reject settings no store can be opened with
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(CacheError::Config("database path is empty".into()));
        }
        validate_default_names(&self.default_object_type, &self.default_data_type)
    }
}

/// Default names stand in for unset locator levels, so they must be non-empty
pub fn validate_default_names(object_type: &str, data_type: &str) -> Result<()> {
    if object_type.is_empty() {
        return Err(CacheError::Config("default object type is empty".into()));
    }
    if data_type.is_empty() {
        return Err(CacheError::Config("default data type is empty".into()));
    }
    Ok(())
}
