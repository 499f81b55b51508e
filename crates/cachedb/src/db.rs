//! Unified cache interface
//!
//! [`CacheDb`] wraps a [`CacheStore`] with the store-wide defaults, typed
//! encode/decode of values and the compute-or-fetch cycle used by the
//! memoizer.

use crate::memoize::{MemoizeOptions, Memoized};
use cachedb_core::{
    codec,
    clock::Clock,
    config::{validate_default_names, CacheConfig},
    error::Result,
    traits::CacheStore,
    types::{EntryAddress, EntryMeta, KeyedEntry, Locator, ScanOptions, StoreStats},
};
use cachedb_sqlite::SqliteCacheStore;
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Persistent hierarchical cache
///
/// All operations are synchronous and may be called from many threads; the
/// underlying store serializes them.
pub struct CacheDb<S: CacheStore = SqliteCacheStore> {
    store: S,
    default_object_type: String,
    default_data_type: String,
}

impl CacheDb<SqliteCacheStore> {
    /// Open a cache at `path` (a file, or a directory to hold `cachedb.sqlite`)
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_config(CacheConfig::new(path.as_ref()))
    }

    /// Open a cache whose expiry decisions read from `clock`
    pub fn open_with_clock(cfg: CacheConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let default_object_type = cfg.default_object_type.clone();
        let default_data_type = cfg.default_data_type.clone();
        let store = SqliteCacheStore::open_with_clock(cfg, clock)?;
        Self::from_store(store, default_object_type, default_data_type)
    }

    /// Resolved path of the database file
    pub fn path(&self) -> &Path {
        self.store.path()
    }
}

impl<S: CacheStore> CacheDb<S> {
    /// Open with custom configuration
    pub fn open_with_config(cfg: CacheConfig) -> Result<Self> {
        cfg.validate()?;
        let default_object_type = cfg.default_object_type.clone();
        let default_data_type = cfg.default_data_type.clone();
        let store = S::open(cfg)?;
        Self::from_store(store, default_object_type, default_data_type)
    }

    /// Wrap an already opened store
    ///
    /// Fails with [`CacheError::Config`](cachedb_core::CacheError::Config) if either default name is empty.
    pub fn from_store(
        store: S,
        default_object_type: impl Into<String>,
        default_data_type: impl Into<String>,
    ) -> Result<Self> {
        let default_object_type = default_object_type.into();
        let default_data_type = default_data_type.into();
        validate_default_names(&default_object_type, &default_data_type)?;
        Ok(Self {
            store,
            default_object_type,
            default_data_type,
        })
    }

    /// Get reference to the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn default_object_type(&self) -> &str {
        &self.default_object_type
    }

    pub fn default_data_type(&self) -> &str {
        &self.default_data_type
    }

    /// Fill in the defaults for every unset level of `locator`
    pub fn address(&self, locator: &Locator) -> EntryAddress {
        locator.resolve(&self.default_object_type, &self.default_data_type)
    }

    /// Store `value`, replacing any entry at the same address
    ///
    /// The value is encoded before the store is touched, so an encoding
    /// failure leaves no row behind.
    pub fn set_data<T: Serialize + ?Sized>(
        &self,
        value: &T,
        locator: &Locator,
        ttl_secs: Option<u64>,
    ) -> Result<()> {
        let bytes = codec::encode(value)?;
        self.store.put(&self.address(locator), &bytes, ttl_secs)
    }

    /// Read a live value; expired entries read as `None`
    pub fn get_data<T: DeserializeOwned>(&self, locator: &Locator) -> Result<Option<T>> {
        self.read(locator, false)
    }

    /// Read a value even if it has expired but not been purged yet
    pub fn get_data_including_expired<T: DeserializeOwned>(
        &self,
        locator: &Locator,
    ) -> Result<Option<T>> {
        self.read(locator, true)
    }

    fn read<T: DeserializeOwned>(&self, locator: &Locator, include_expired: bool) -> Result<Option<T>> {
        match self.store.get(&self.address(locator), include_expired)? {
            Some(bytes) => codec::decode(&bytes).map(Some),
            None => Ok(None),
        }
    }

    /// Delete the single entry at `locator`; returns whether it existed
    pub fn delete_data(&self, locator: &Locator) -> Result<bool> {
        self.store.delete_entry(&self.address(locator))
    }

    pub fn delete_object_type(&self, object_type: &str) -> Result<()> {
        self.store.delete_object_type(object_type)
    }

    pub fn delete_object(&self, object_type: &str, object_name: &str) -> Result<()> {
        self.store.delete_object(object_type, object_name)
    }

    pub fn delete_data_type(&self, object_type: &str, data_type: &str) -> Result<()> {
        self.store.delete_data_type(object_type, data_type)
    }

    /// Physically remove expired entries; returns how many were removed
    pub fn purge_expired(&self) -> Result<u64> {
        self.store.purge_expired()
    }

    pub fn list_object_types(&self) -> Result<Vec<String>> {
        self.store.list_object_types()
    }

    pub fn list_objects(&self, object_type: &str) -> Result<Vec<String>> {
        self.store.list_objects(object_type)
    }

    pub fn list_data_types(&self, object_type: &str) -> Result<Vec<String>> {
        self.store.list_data_types(object_type)
    }

    pub fn list_keys(
        &self,
        object_type: &str,
        object_name: &str,
        data_type: &str,
    ) -> Result<Vec<String>> {
        self.store.list_keys(object_type, object_name, data_type)
    }

    /// Metadata (and optionally raw values) for every entry under an object type
    pub fn scan_object_type(&self, object_type: &str, opts: ScanOptions) -> Result<Vec<EntryMeta>> {
        self.store.scan_object_type(object_type, opts)
    }

    /// Entries of one (object, data type) pair with their stored bytes
    pub fn scan_object_raw(
        &self,
        object_type: &str,
        object_name: &str,
        data_type: &str,
        include_expired: bool,
    ) -> Result<Vec<KeyedEntry<Vec<u8>>>> {
        self.store
            .scan_object(object_type, object_name, data_type, include_expired)
    }

    /// Entries of one (object, data type) pair, decoded
    pub fn scan_object<T: DeserializeOwned>(
        &self,
        object_type: &str,
        object_name: &str,
        data_type: &str,
        include_expired: bool,
    ) -> Result<Vec<KeyedEntry<T>>> {
        self.scan_object_raw(object_type, object_name, data_type, include_expired)?
            .into_iter()
            .map(|entry| entry.try_map(|bytes| codec::decode(&bytes)))
            .collect()
    }

    pub fn stats(&self) -> Result<StoreStats> {
        self.store.stats()
    }

    /// Close the store. Idempotent; ephemeral stores delete their file.
    pub fn close(&self) -> Result<()> {
        self.store.close()
    }

    pub fn is_closed(&self) -> bool {
        self.store.is_closed()
    }

    /// Return the live value at `locator`, or compute, store and return it
    ///
    /// `compute` does not run on a hit. If storing the computed value fails,
    /// the error is returned and the value is dropped.
    pub fn get_or_compute<T, F>(&self, locator: &Locator, ttl_secs: Option<u64>, compute: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> T,
    {
        self.try_get_or_compute(locator, ttl_secs, || Ok(compute()))
    }

    /// Like [`get_or_compute`](Self::get_or_compute) for computations that can fail
    ///
    /// A failed computation stores nothing.
    pub fn try_get_or_compute<T, F>(
        &self,
        locator: &Locator,
        ttl_secs: Option<u64>,
        compute: F,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Result<T>,
    {
        self.fetch_or_compute(locator, ttl_secs, compute)
            .map(|(value, _hit)| value)
    }

    /// Compute-or-fetch cycle; the flag reports whether the value was cached
    pub(crate) fn fetch_or_compute<T, F>(
        &self,
        locator: &Locator,
        ttl_secs: Option<u64>,
        compute: F,
    ) -> Result<(T, bool)>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Result<T>,
    {
        let addr = self.address(locator);
        if let Some(bytes) = self.store.get(&addr, false)? {
            return Ok((codec::decode(&bytes)?, true));
        }

        let value = compute()?;
        let bytes = codec::encode(&value)?;
        self.store.put(&addr, &bytes, ttl_secs)?;
        Ok((value, false))
    }

    /// Wrap `func` so results are cached per argument value
    ///
    /// `name` identifies the computation and becomes its data type, so two
    /// memoized functions under the same object never share entries.
    pub fn memoize<A, R, F>(&self, name: impl Into<String>, func: F) -> Memoized<'_, S, A, R, F>
    where
        A: Serialize,
        F: Fn(&A) -> R,
    {
        Memoized::hashed(self, name.into(), MemoizeOptions::default(), func)
    }

    /// Like [`memoize`](Self::memoize) with an explicit namespace and TTL
    pub fn memoize_with<A, R, F>(
        &self,
        name: impl Into<String>,
        options: MemoizeOptions,
        func: F,
    ) -> Memoized<'_, S, A, R, F>
    where
        A: Serialize,
        F: Fn(&A) -> R,
    {
        Memoized::hashed(self, name.into(), options, func)
    }

    /// Like [`memoize_with`](Self::memoize_with), keyed by `key_fn` alone
    ///
    /// The arguments are never encoded, so they need not be serializable.
    pub fn memoize_keyed<A, R, F>(
        &self,
        name: impl Into<String>,
        options: MemoizeOptions,
        key_fn: impl Fn(&A) -> String + Send + Sync + 'static,
        func: F,
    ) -> Memoized<'_, S, A, R, F>
    where
        F: Fn(&A) -> R,
    {
        Memoized::keyed(self, name.into(), options, key_fn, func)
    }
}
