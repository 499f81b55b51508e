//! cachedb core: types, configuration and traits for the cachedb cache
//!
//! The cache is a four-level hierarchy:
//! object type → data type / object → keyed entry.
//!
//! This crate holds everything that does not depend on a storage engine:
//! - [`CacheStore`]: the contract an engine implements
//! - [`CacheConfig`]: store configuration
//! - [`codec`]: value encoding and argument hashing
//! - [`Clock`]: the time source used for expiry

pub mod clock;
pub mod codec;
pub mod config;
pub mod error;
pub mod observe;
pub mod traits;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use codec::CallArgs;
pub use config::{CacheConfig, SynchronousMode};
pub use error::{CacheError, Result};
pub use traits::CacheStore;
pub use types::{
    EntryAddress, EntryMeta, HierarchyIds, KeyedEntry, Locator, RowId, ScanOptions, StoreStats,
    Timestamp, DEFAULT_DATA_TYPE, DEFAULT_KEY, DEFAULT_OBJECT, DEFAULT_OBJECT_TYPE,
};
