use crate::{
    config::CacheConfig,
    error::Result,
    types::{EntryAddress, EntryMeta, KeyedEntry, ScanOptions, StoreStats},
};

/// Storage engine for the hierarchical cache
///
/// Values cross this boundary already encoded. Names are never empty; callers
/// resolve defaults before reaching the store.
///
/// Lookups that mention names the store has never seen return empty results
/// and must not create hierarchy rows. Deletes of unknown names are no-ops.
pub trait CacheStore: Send + Sync {
    /// Open or create a store
    fn open(cfg: CacheConfig) -> Result<Self>
    where
        Self: Sized;

    /// Release the underlying connection. Idempotent.
    fn close(&self) -> Result<()>;

    fn is_closed(&self) -> bool;

    /// Insert or fully replace the entry at `addr`
    ///
    /// `ttl_secs` of `None` means the entry never expires.
    fn put(&self, addr: &EntryAddress, value: &[u8], ttl_secs: Option<u64>) -> Result<()>;

    /// Fetch the raw value at `addr`
    ///
    /// Entries whose expiry is strictly before now are treated as absent unless
    /// `include_expired` is set. Reads never delete.
    fn get(&self, addr: &EntryAddress, include_expired: bool) -> Result<Option<Vec<u8>>>;

    /// Remove a single entry; returns whether a row was removed
    fn delete_entry(&self, addr: &EntryAddress) -> Result<bool>;

    /// Remove an object and every entry under it
    fn delete_object(&self, object_type: &str, object_name: &str) -> Result<()>;

    /// Remove a data type and every entry of that type
    fn delete_data_type(&self, object_type: &str, data_type: &str) -> Result<()>;

    /// Remove an object type with all its data types, objects and entries
    fn delete_object_type(&self, object_type: &str) -> Result<()>;

    /// Delete entries whose expiry is strictly before now; returns the count
    fn purge_expired(&self) -> Result<u64>;

    fn list_object_types(&self) -> Result<Vec<String>>;

    fn list_objects(&self, object_type: &str) -> Result<Vec<String>>;

    fn list_data_types(&self, object_type: &str) -> Result<Vec<String>>;

    fn list_keys(&self, object_type: &str, object_name: &str, data_type: &str) -> Result<Vec<String>>;

    /// All entries under an object type, ordered by (object, data type, key)
    fn scan_object_type(&self, object_type: &str, opts: ScanOptions) -> Result<Vec<EntryMeta>>;

    /// All entries of one (object, data type) pair, ordered by key
    fn scan_object(
        &self,
        object_type: &str,
        object_name: &str,
        data_type: &str,
        include_expired: bool,
    ) -> Result<Vec<KeyedEntry<Vec<u8>>>>;

    fn stats(&self) -> Result<StoreStats>;
}
