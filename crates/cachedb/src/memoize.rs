//! Function memoization on top of [`CacheDb`]
//!
//! A [`Memoized`] wraps a function and caches its result per argument value:
//!
//! 1. derive a key from the arguments (SHA-256 of their encoding, or a
//!    caller-supplied key function used verbatim);
//! 2. return the live cached value if there is one, without calling the
//!    function;
//! 3. otherwise call the function, store the result with the configured TTL
//!    and return it.
//!
//! Concurrent misses on the same key are not de-duplicated: each caller runs
//! the function and the last write wins.
//!
//! # Example
//!
//! ```no_run
//! use cachedb::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let db = CacheDb::open("./cache")?;
//!
//! let add = db.memoize_with(
//!     "add",
//!     MemoizeOptions::new().object_type("math").ttl_secs(60),
//!     |(x, y): &(i64, i64)| x + y,
//! );
//!
//! assert_eq!(add.call(&(5, 7))?, 12);
//! assert_eq!(add.call(&(5, 7))?, 12); // served from the cache
//! # Ok(())
//! # }
//! ```

use crate::db::CacheDb;
use cachedb_core::{
    codec,
    error::Result,
    observe,
    traits::CacheStore,
    types::Locator,
};
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;

/// Namespace and expiry for a memoized function
///
/// Unset levels fall back to the cache defaults, except the data type, which
/// falls back to the function's name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoizeOptions {
    pub object_type: Option<String>,
    pub object_name: Option<String>,
    pub data_type: Option<String>,
    pub ttl_secs: Option<u64>,
}

impl MemoizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object_type(mut self, name: impl Into<String>) -> Self {
        self.object_type = Some(name.into());
        self
    }

    pub fn object_name(mut self, name: impl Into<String>) -> Self {
        self.object_name = Some(name.into());
        self
    }

    pub fn data_type(mut self, name: impl Into<String>) -> Self {
        self.data_type = Some(name.into());
        self
    }

    pub fn ttl_secs(mut self, ttl_secs: u64) -> Self {
        self.ttl_secs = Some(ttl_secs);
        self
    }
}

/// How a call's arguments become its cache key
enum KeyDerivation<A> {
    /// SHA-256 of the encoded arguments
    Hashed(fn(&A) -> Result<String>),
    /// Caller-supplied key, used verbatim
    Custom(Box<dyn Fn(&A) -> String + Send + Sync>),
}

/// A function whose results are cached in a [`CacheDb`]
pub struct Memoized<'db, S, A, R, F>
where
    S: CacheStore,
    F: Fn(&A) -> R,
{
    db: &'db CacheDb<S>,
    name: String,
    locator: Locator,
    ttl_secs: Option<u64>,
    key: KeyDerivation<A>,
    func: F,
    _marker: PhantomData<fn(&A) -> R>,
}

impl<'db, S, A, R, F> Memoized<'db, S, A, R, F>
where
    S: CacheStore,
    F: Fn(&A) -> R,
{
    fn new(
        db: &'db CacheDb<S>,
        name: String,
        options: MemoizeOptions,
        key: KeyDerivation<A>,
        func: F,
    ) -> Self {
        let data_type = options
            .data_type
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| name.clone());
        let locator = Locator {
            object_type: options.object_type,
            object_name: options.object_name,
            data_type: Some(data_type),
            key: None,
        };

        Self {
            db,
            name,
            locator,
            ttl_secs: options.ttl_secs,
            key,
            func,
            _marker: PhantomData,
        }
    }

    /// Memoize with argument hashing
    pub(crate) fn hashed(db: &'db CacheDb<S>, name: String, options: MemoizeOptions, func: F) -> Self
    where
        A: Serialize,
    {
        Self::new(db, name, options, KeyDerivation::Hashed(codec::hash_inputs::<A>), func)
    }

    /// Memoize with a caller-supplied key; the arguments are never encoded
    pub(crate) fn keyed(
        db: &'db CacheDb<S>,
        name: String,
        options: MemoizeOptions,
        key_fn: impl Fn(&A) -> String + Send + Sync + 'static,
        func: F,
    ) -> Self {
        Self::new(db, name, options, KeyDerivation::Custom(Box::new(key_fn)), func)
    }

    /// Derive cache keys with `key_fn` instead of hashing the arguments
    ///
    /// The returned string is used as the key verbatim, so arguments that map
    /// to the same string share one cached result.
    pub fn with_key_fn(mut self, key_fn: impl Fn(&A) -> String + Send + Sync + 'static) -> Self {
        self.key = KeyDerivation::Custom(Box::new(key_fn));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where results are stored, without the key
    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    pub fn ttl_secs(&self) -> Option<u64> {
        self.ttl_secs
    }

    /// Cache key for `args`
    pub fn key_for(&self, args: &A) -> Result<String> {
        match &self.key {
            KeyDerivation::Hashed(hash) => hash(args),
            KeyDerivation::Custom(key_fn) => Ok(key_fn(args)),
        }
    }

    /// Drop the cached result for `args`; returns whether one existed
    pub fn invalidate(&self, args: &A) -> Result<bool> {
        let locator = self.locator.clone().key(self.key_for(args)?);
        self.db.delete_data(&locator)
    }
}

impl<'db, S, A, R, F> Memoized<'db, S, A, R, F>
where
    S: CacheStore,
    R: Serialize + DeserializeOwned,
    F: Fn(&A) -> R,
{
    /// Return the cached result for `args`, computing and storing it on a miss
    ///
    /// Store failures are returned as errors, including a failure to store a
    /// freshly computed result.
    pub fn call(&self, args: &A) -> Result<R> {
        let locator = self.locator.clone().key(self.key_for(args)?);
        let (value, hit) = self
            .db
            .fetch_or_compute(&locator, self.ttl_secs, || Ok((self.func)(args)))?;

        tracing::trace!(function = %self.name, hit, "Memoized call");
        observe::record_memo_call(&self.name, hit);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cachedb_core::config::CacheConfig;
    use std::cell::Cell;
    use tempfile::TempDir;

    fn setup() -> (CacheDb, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db: CacheDb = CacheDb::open_with_config(
            CacheConfig::new(temp_dir.path().join("memo.sqlite")).with_default_object_type("C"),
        )
        .unwrap();
        (db, temp_dir)
    }

    #[test]
    fn test_data_type_defaults_to_name() {
        let (db, _temp) = setup();
        let square = db.memoize("square", |x: &i64| x * x);
        assert_eq!(square.locator().data_type.as_deref(), Some("square"));
        assert_eq!(square.call(&4).unwrap(), 16);
        assert_eq!(db.list_data_types("C").unwrap(), vec!["square"]);
    }

    #[test]
    fn test_two_functions_do_not_collide() {
        let (db, _temp) = setup();
        let double = db.memoize("double", |x: &i64| x * 2);
        let triple = db.memoize("triple", |x: &i64| x * 3);
        assert_eq!(double.call(&5).unwrap(), 10);
        assert_eq!(triple.call(&5).unwrap(), 15);
        assert_eq!(double.call(&5).unwrap(), 10);
    }

    #[test]
    fn test_invalidate_forces_recompute() {
        let (db, _temp) = setup();
        let calls = Cell::new(0);
        let f = db.memoize("f", |x: &u32| {
            calls.set(calls.get() + 1);
            *x
        });

        f.call(&1).unwrap();
        assert!(f.invalidate(&1).unwrap());
        assert!(!f.invalidate(&1).unwrap());
        f.call(&1).unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_key_fn_is_used_verbatim() {
        let (db, _temp) = setup();
        let f = db
            .memoize_with("h", MemoizeOptions::new().object_name("b"), |x: &u32| *x)
            .with_key_fn(|x| format!("id:{}", x % 2));
        assert_eq!(f.key_for(&3).unwrap(), "id:1");
        f.call(&3).unwrap();
        assert_eq!(db.list_keys("C", "b", "h").unwrap(), vec!["id:1"]);
    }
}
