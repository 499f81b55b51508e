//! Common imports for working with the cache
//!
//! ```no_run
//! use cachedb::prelude::*;
//! ```

pub use crate::{
    CacheConfig, CacheDb, CacheError, CacheStore, CallArgs, Locator, MemoizeOptions, Memoized,
    Result, ScanOptions,
};
