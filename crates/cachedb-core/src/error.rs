use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Store is closed")]
    Closed,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl CacheError {
    /// True when the backing store could not be reached at all
    /// (closed instance or engine failure), as opposed to a bad value.
    pub fn is_storage_unavailable(&self) -> bool {
        matches!(self, CacheError::Closed | CacheError::Storage(_))
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;

// Caller-defined errors:
//
// Fallible computations passed to the memoizer return `cachedb::Result<T>`.
// Any error implementing `std::error::Error + Send + Sync + 'static` converts
// into `CacheError::Other` through `anyhow`:
//
// let value = db.try_get_or_compute(&locator, None, || {
//     let body = fetch_remote().map_err(anyhow::Error::from)?;
//     Ok(body)
// })?;
