//! cachedb: a persistent, hierarchically-namespaced key-value cache
//!
//! Entries live in a four-level hierarchy:
//! - **Object type**: top-level namespace (an application or module)
//! - **Data type**: the kind of cached artifact (for memoized functions, the function)
//! - **Object**: the entity that owns entries (a resource instance)
//! - **Key**: discriminates entries of one (object, data type) pair
//!
//! Values are any serde-serializable type, stored as bincode in an embedded
//! SQLite database, optionally with a time-to-live.
//!
//! # Quick Start
//!
//! ```no_run
//! use cachedb::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let db = CacheDb::open("./cache")?;
//!
//! let loc = Locator::new()
//!     .object_type("proj")
//!     .object_name("objA")
//!     .data_type("meta");
//! db.set_data(&vec![1u32, 2, 3], &loc, Some(3600))?;
//!
//! let cached: Option<Vec<u32>> = db.get_data(&loc)?;
//! assert_eq!(cached, Some(vec![1, 2, 3]));
//!
//! // Remove whatever has expired
//! db.purge_expired()?;
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod memoize;
pub mod prelude;

// Re-export core types
pub use cachedb_core::{
    clock::{Clock, ManualClock, SystemClock},
    codec::{self, CallArgs},
    config::{CacheConfig, SynchronousMode},
    error::{CacheError, Result},
    traits::CacheStore,
    types::{
        EntryAddress, EntryMeta, HierarchyIds, KeyedEntry, Locator, ScanOptions, StoreStats,
        DEFAULT_DATA_TYPE, DEFAULT_KEY, DEFAULT_OBJECT, DEFAULT_OBJECT_TYPE,
    },
};

// Re-export implementations
pub use cachedb_sqlite::SqliteCacheStore;

// Re-export main types from this crate
pub use db::CacheDb;
pub use memoize::{MemoizeOptions, Memoized};
