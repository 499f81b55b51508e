use cachedb_core::{
    clock::{Clock, SystemClock},
    config::CacheConfig,
    error::{CacheError, Result},
    observe,
    traits::CacheStore,
    types::{EntryAddress, EntryMeta, HierarchyIds, KeyedEntry, RowId, ScanOptions, StoreStats, Timestamp},
};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, TransactionBehavior};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::hierarchy;
use crate::lifecycle::{self, EphemeralFile};
use crate::schema;

/// SQLite-backed cache store
///
/// A single connection serves every operation. Each public method takes the
/// store lock once and holds it for the whole operation, so operations on one
/// instance never interleave.
pub struct SqliteCacheStore {
    conn: Mutex<Option<Connection>>,
    config: CacheConfig,
    path: PathBuf,
    ephemeral: Option<EphemeralFile>,
    clock: Arc<dyn Clock>,
}

/// Failure of one resolve-and-upsert attempt
enum WriteError {
    /// The hierarchy rows were removed under us
    ForeignKey(rusqlite::Error),
    Other(CacheError),
}

impl From<CacheError> for WriteError {
    fn from(e: CacheError) -> Self {
        WriteError::Other(e)
    }
}

impl WriteError {
    fn from_sqlite(e: rusqlite::Error) -> Self {
        if is_foreign_key_violation(&e) {
            WriteError::ForeignKey(e)
        } else {
            WriteError::Other(CacheError::Storage(e.to_string()))
        }
    }

    fn into_cache_error(self) -> CacheError {
        match self {
            WriteError::ForeignKey(e) => CacheError::Conflict(e.to_string()),
            WriteError::Other(e) => e,
        }
    }
}

fn is_foreign_key_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
    )
}

fn expiry(now: Timestamp, ttl_secs: Option<u64>) -> Option<Timestamp> {
    ttl_secs.map(|ttl| now.saturating_add(i64::try_from(ttl).unwrap_or(i64::MAX)))
}

impl SqliteCacheStore {
    /// Open a store that reads time from `clock`
    pub fn open_with_clock(cfg: CacheConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        cfg.validate()?;
        let path = lifecycle::resolve_db_path(&cfg.path, cfg.ephemeral)?;

        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )
        .map_err(|e| CacheError::Config(format!("cannot open {}: {}", path.display(), e)))?;

        Self::configure_connection(&conn, &cfg)?;
        schema::init_schema(&conn)?;

        let ephemeral = cfg.ephemeral.then(|| EphemeralFile::new(&path));
        tracing::info!(ephemeral = cfg.ephemeral, "Opened cache store at {}", path.display());

        Ok(Self {
            conn: Mutex::new(Some(conn)),
            config: cfg,
            path,
            ephemeral,
            clock,
        })
    }

    /// Configure SQLite connection
    fn configure_connection(conn: &Connection, cfg: &CacheConfig) -> Result<()> {
        if cfg.wal_mode {
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
                row.get::<_, String>(0)
            })
            .map_err(|e| CacheError::Config(e.to_string()))?;
        }

        conn.pragma_update(None, "synchronous", cfg.synchronous.as_pragma())
            .map_err(|e| CacheError::Config(e.to_string()))?;

        // Cascading deletes depend on this
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(|e| CacheError::Config(e.to_string()))?;

        conn.pragma_update(None, "temp_store", "MEMORY")
            .map_err(|e| CacheError::Config(e.to_string()))?;

        conn.pragma_update(None, "cache_size", cfg.cache_size)
            .map_err(|e| CacheError::Config(e.to_string()))?;

        conn.busy_timeout(Duration::from_millis(cfg.busy_timeout_ms))
            .map_err(|e| CacheError::Config(e.to_string()))?;

        Ok(())
    }

    /// Run `f` against the connection while holding the store lock
    fn with_conn<T>(&self, f: impl FnOnce(&mut Connection) -> Result<T>) -> Result<T> {
        let mut guard = self.conn.lock();
        let conn = guard.as_mut().ok_or(CacheError::Closed)?;
        f(conn)
    }

    /// Resolved path of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_ephemeral(&self) -> bool {
        self.ephemeral.is_some()
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn schema_version(&self) -> Result<u32> {
        self.with_conn(|conn| schema::schema_version(conn))
    }

    /// Id of the object type `name`, creating it if needed
    pub fn ensure_object_type(&self, name: &str) -> Result<RowId> {
        self.with_conn(|conn| hierarchy::ensure_object_type(conn, name))
    }

    /// Ids for every level of `addr`, creating rows as needed
    pub fn resolve_ids(&self, addr: &EntryAddress) -> Result<HierarchyIds> {
        self.with_conn(|conn| {
            let tx = conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(|e| CacheError::Storage(e.to_string()))?;
            let ids = hierarchy::ensure_ids(&tx, addr)?;
            tx.commit().map_err(|e| CacheError::Storage(e.to_string()))?;
            Ok(ids)
        })
    }

    /// Ids for every level of `addr`, or `None` if any level is unknown
    pub fn lookup_ids(&self, addr: &EntryAddress) -> Result<Option<HierarchyIds>> {
        self.with_conn(|conn| hierarchy::lookup_ids(conn, addr))
    }

    /// Upsert by ids obtained from [`resolve_ids`](Self::resolve_ids)
    ///
    /// If the rows behind `ids` were deleted in the meantime the write fails
    /// with [`CacheError::Conflict`] and nothing is stored.
    pub fn put_at(
        &self,
        ids: HierarchyIds,
        key: &str,
        value: &[u8],
        ttl_secs: Option<u64>,
    ) -> Result<()> {
        let start = Instant::now();
        let now = self.clock.now();
        let expires_at = expiry(now, ttl_secs);
        self.with_conn(|conn| {
            Self::upsert_entry(conn, ids, key, value, now, expires_at)
                .map_err(|e| WriteError::from_sqlite(e).into_cache_error())
        })?;
        observe::record_write(start.elapsed());
        Ok(())
    }

    /// Point lookup by ids
    pub fn get_at(
        &self,
        ids: HierarchyIds,
        key: &str,
        include_expired: bool,
    ) -> Result<Option<Vec<u8>>> {
        let now = self.clock.now();
        let value = self.with_conn(|conn| Self::fetch_entry(conn, ids, key, now, include_expired))?;
        observe::record_lookup(value.is_some());
        Ok(value)
    }

    fn upsert_entry(
        conn: &Connection,
        ids: HierarchyIds,
        key: &str,
        value: &[u8],
        now: Timestamp,
        expires_at: Option<Timestamp>,
    ) -> rusqlite::Result<()> {
        conn.execute(
            "INSERT INTO data (object_id, data_type_id, key_hash, value_blob, created_at, expires_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(object_id, data_type_id, key_hash) DO UPDATE SET
                value_blob = excluded.value_blob,
                created_at = excluded.created_at,
                expires_at = excluded.expires_at",
            params![ids.object_id, ids.data_type_id, key, value, now, expires_at],
        )?;
        Ok(())
    }

    fn fetch_entry(
        conn: &Connection,
        ids: HierarchyIds,
        key: &str,
        now: Timestamp,
        include_expired: bool,
    ) -> Result<Option<Vec<u8>>> {
        conn.query_row(
            "SELECT value_blob FROM data
             WHERE object_id = ?1 AND data_type_id = ?2 AND key_hash = ?3
               AND (?4 OR expires_at IS NULL OR expires_at >= ?5)",
            params![ids.object_id, ids.data_type_id, key, include_expired, now],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| CacheError::Storage(e.to_string()))
    }

    /// Resolve and upsert inside one immediate transaction
    fn resolve_and_upsert(
        conn: &mut Connection,
        addr: &EntryAddress,
        value: &[u8],
        now: Timestamp,
        expires_at: Option<Timestamp>,
    ) -> std::result::Result<(), WriteError> {
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(WriteError::from_sqlite)?;
        let ids = hierarchy::ensure_ids(&tx, addr)?;
        Self::upsert_entry(&tx, ids, &addr.key, value, now, expires_at)
            .map_err(WriteError::from_sqlite)?;
        tx.commit().map_err(WriteError::from_sqlite)
    }
}

impl CacheStore for SqliteCacheStore {
    fn open(cfg: CacheConfig) -> Result<Self> {
        Self::open_with_clock(cfg, Arc::new(SystemClock))
    }

    fn close(&self) -> Result<()> {
        let mut guard = self.conn.lock();
        let mut outcome = Ok(());

        if let Some(conn) = guard.take() {
            if let Err((_conn, e)) = conn.close() {
                // The connection is released when `_conn` drops
                tracing::warn!("Error closing cache store: {}", e);
                outcome = Err(CacheError::Storage(e.to_string()));
            }
            tracing::info!("Closed cache store at {}", self.path.display());
        }

        if let Some(file) = &self.ephemeral {
            file.remove();
        }

        outcome
    }

    fn is_closed(&self) -> bool {
        self.conn.lock().is_none()
    }

    fn put(&self, addr: &EntryAddress, value: &[u8], ttl_secs: Option<u64>) -> Result<()> {
        let start = Instant::now();
        let now = self.clock.now();
        let expires_at = expiry(now, ttl_secs);

        self.with_conn(|conn| {
            match Self::resolve_and_upsert(conn, addr, value, now, expires_at) {
                Err(WriteError::ForeignKey(e)) => {
                    tracing::debug!(
                        object_type = %addr.object_type,
                        object = %addr.object_name,
                        "Hierarchy changed during write, retrying once: {}",
                        e
                    );
                    Self::resolve_and_upsert(conn, addr, value, now, expires_at)
                        .map_err(WriteError::into_cache_error)
                }
                other => other.map_err(WriteError::into_cache_error),
            }
        })?;

        tracing::debug!(
            object_type = %addr.object_type,
            object = %addr.object_name,
            data_type = %addr.data_type,
            key = %addr.key,
            bytes = value.len(),
            "Stored entry"
        );
        observe::record_write(start.elapsed());
        Ok(())
    }

    fn get(&self, addr: &EntryAddress, include_expired: bool) -> Result<Option<Vec<u8>>> {
        let now = self.clock.now();
        let value = self.with_conn(|conn| match hierarchy::lookup_ids(conn, addr)? {
            Some(ids) => Self::fetch_entry(conn, ids, &addr.key, now, include_expired),
            None => Ok(None),
        })?;
        observe::record_lookup(value.is_some());
        Ok(value)
    }

    fn delete_entry(&self, addr: &EntryAddress) -> Result<bool> {
        self.with_conn(|conn| {
            let Some(ids) = hierarchy::lookup_ids(conn, addr)? else {
                return Ok(false);
            };
            let removed = conn
                .execute(
                    "DELETE FROM data WHERE object_id = ?1 AND data_type_id = ?2 AND key_hash = ?3",
                    params![ids.object_id, ids.data_type_id, addr.key],
                )
                .map_err(|e| CacheError::Storage(e.to_string()))?;
            Ok(removed > 0)
        })
    }

    fn delete_object(&self, object_type: &str, object_name: &str) -> Result<()> {
        let removed = self.with_conn(|conn| {
            conn.execute(
                "DELETE FROM object
                 WHERE name = ?2
                   AND object_type_id = (SELECT id FROM object_type WHERE name = ?1)",
                params![object_type, object_name],
            )
            .map_err(|e| CacheError::Storage(e.to_string()))
        })?;
        tracing::debug!(object_type, object = object_name, removed, "Deleted object");
        Ok(())
    }

    fn delete_data_type(&self, object_type: &str, data_type: &str) -> Result<()> {
        let removed = self.with_conn(|conn| {
            conn.execute(
                "DELETE FROM data_type
                 WHERE name = ?2
                   AND object_type_id = (SELECT id FROM object_type WHERE name = ?1)",
                params![object_type, data_type],
            )
            .map_err(|e| CacheError::Storage(e.to_string()))
        })?;
        tracing::debug!(object_type, data_type, removed, "Deleted data type");
        Ok(())
    }

    fn delete_object_type(&self, object_type: &str) -> Result<()> {
        let removed = self.with_conn(|conn| {
            conn.execute("DELETE FROM object_type WHERE name = ?1", [object_type])
                .map_err(|e| CacheError::Storage(e.to_string()))
        })?;
        tracing::debug!(object_type, removed, "Deleted object type");
        Ok(())
    }

    fn purge_expired(&self) -> Result<u64> {
        let now = self.clock.now();
        let removed = self.with_conn(|conn| {
            conn.execute(
                "DELETE FROM data WHERE expires_at IS NOT NULL AND expires_at < ?1",
                [now],
            )
            .map_err(|e| CacheError::Storage(e.to_string()))
        })? as u64;

        if removed > 0 {
            tracing::debug!(removed, now, "Purged expired entries");
        }
        observe::record_purge(removed);
        Ok(removed)
    }

    fn list_object_types(&self) -> Result<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT name FROM object_type ORDER BY name")
                .map_err(|e| CacheError::Storage(e.to_string()))?;
            let names = stmt
                .query_map([], |row| row.get(0))
                .map_err(|e| CacheError::Storage(e.to_string()))?;
            names
                .collect::<std::result::Result<Vec<String>, _>>()
                .map_err(|e| CacheError::Storage(e.to_string()))
        })
    }

    fn list_objects(&self, object_type: &str) -> Result<Vec<String>> {
        self.with_conn(|conn| {
            let Some(object_type_id) = hierarchy::lookup_object_type_id(conn, object_type)? else {
                return Ok(Vec::new());
            };
            let mut stmt = conn
                .prepare("SELECT name FROM object WHERE object_type_id = ?1 ORDER BY name")
                .map_err(|e| CacheError::Storage(e.to_string()))?;
            let names = stmt
                .query_map([object_type_id], |row| row.get(0))
                .map_err(|e| CacheError::Storage(e.to_string()))?;
            names
                .collect::<std::result::Result<Vec<String>, _>>()
                .map_err(|e| CacheError::Storage(e.to_string()))
        })
    }

    fn list_data_types(&self, object_type: &str) -> Result<Vec<String>> {
        self.with_conn(|conn| {
            let Some(object_type_id) = hierarchy::lookup_object_type_id(conn, object_type)? else {
                return Ok(Vec::new());
            };
            let mut stmt = conn
                .prepare("SELECT name FROM data_type WHERE object_type_id = ?1 ORDER BY name")
                .map_err(|e| CacheError::Storage(e.to_string()))?;
            let names = stmt
                .query_map([object_type_id], |row| row.get(0))
                .map_err(|e| CacheError::Storage(e.to_string()))?;
            names
                .collect::<std::result::Result<Vec<String>, _>>()
                .map_err(|e| CacheError::Storage(e.to_string()))
        })
    }

    fn list_keys(&self, object_type: &str, object_name: &str, data_type: &str) -> Result<Vec<String>> {
        self.with_conn(|conn| {
            let Some(ids) = hierarchy::lookup_pair_ids(conn, object_type, object_name, data_type)?
            else {
                return Ok(Vec::new());
            };
            let mut stmt = conn
                .prepare(
                    "SELECT key_hash FROM data
                     WHERE object_id = ?1 AND data_type_id = ?2
                     ORDER BY key_hash",
                )
                .map_err(|e| CacheError::Storage(e.to_string()))?;
            let keys = stmt
                .query_map(params![ids.object_id, ids.data_type_id], |row| row.get(0))
                .map_err(|e| CacheError::Storage(e.to_string()))?;
            keys.collect::<std::result::Result<Vec<String>, _>>()
                .map_err(|e| CacheError::Storage(e.to_string()))
        })
    }

    fn scan_object_type(&self, object_type: &str, opts: ScanOptions) -> Result<Vec<EntryMeta>> {
        let now = self.clock.now();
        self.with_conn(|conn| {
            let Some(object_type_id) = hierarchy::lookup_object_type_id(conn, object_type)? else {
                return Ok(Vec::new());
            };
            let mut stmt = conn
                .prepare(
                    "SELECT o.name, dt.name, d.key_hash,
                            CASE WHEN ?2 THEN d.value_blob END,
                            d.created_at, d.expires_at
                     FROM data d
                     JOIN object o ON o.id = d.object_id
                     JOIN data_type dt ON dt.id = d.data_type_id
                     WHERE o.object_type_id = ?1
                       AND (?3 OR d.expires_at IS NULL OR d.expires_at >= ?4)
                     ORDER BY o.name, dt.name, d.key_hash",
                )
                .map_err(|e| CacheError::Storage(e.to_string()))?;
            let rows = stmt
                .query_map(
                    params![object_type_id, opts.with_values, opts.include_expired, now],
                    |row| {
                        Ok(EntryMeta {
                            object_name: row.get(0)?,
                            data_type: row.get(1)?,
                            key_hash: row.get(2)?,
                            value: row.get(3)?,
                            created_at: row.get(4)?,
                            expires_at: row.get(5)?,
                        })
                    },
                )
                .map_err(|e| CacheError::Storage(e.to_string()))?;
            rows.collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| CacheError::Storage(e.to_string()))
        })
    }

    fn scan_object(
        &self,
        object_type: &str,
        object_name: &str,
        data_type: &str,
        include_expired: bool,
    ) -> Result<Vec<KeyedEntry<Vec<u8>>>> {
        let now = self.clock.now();
        self.with_conn(|conn| {
            let Some(ids) = hierarchy::lookup_pair_ids(conn, object_type, object_name, data_type)?
            else {
                return Ok(Vec::new());
            };
            let mut stmt = conn
                .prepare(
                    "SELECT key_hash, value_blob, created_at, expires_at
                     FROM data
                     WHERE object_id = ?1 AND data_type_id = ?2
                       AND (?3 OR expires_at IS NULL OR expires_at >= ?4)
                     ORDER BY key_hash",
                )
                .map_err(|e| CacheError::Storage(e.to_string()))?;
            let rows = stmt
                .query_map(
                    params![ids.object_id, ids.data_type_id, include_expired, now],
                    |row| {
                        Ok(KeyedEntry {
                            key_hash: row.get(0)?,
                            value: row.get(1)?,
                            created_at: row.get(2)?,
                            expires_at: row.get(3)?,
                        })
                    },
                )
                .map_err(|e| CacheError::Storage(e.to_string()))?;
            rows.collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| CacheError::Storage(e.to_string()))
        })
    }

    fn stats(&self) -> Result<StoreStats> {
        let now = self.clock.now();
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT
                    (SELECT COUNT(*) FROM object_type),
                    (SELECT COUNT(*) FROM data_type),
                    (SELECT COUNT(*) FROM object),
                    (SELECT COUNT(*) FROM data),
                    (SELECT COUNT(*) FROM data WHERE expires_at IS NOT NULL AND expires_at < ?1)",
                [now],
                |row| {
                    Ok(StoreStats {
                        object_types: row.get::<_, i64>(0)? as u64,
                        data_types: row.get::<_, i64>(1)? as u64,
                        objects: row.get::<_, i64>(2)? as u64,
                        entries: row.get::<_, i64>(3)? as u64,
                        expired_entries: row.get::<_, i64>(4)? as u64,
                    })
                },
            )
            .map_err(|e| CacheError::Storage(e.to_string()))
        })
    }
}

impl Drop for SqliteCacheStore {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cachedb_core::clock::ManualClock;
    use tempfile::TempDir;

    fn setup() -> (SqliteCacheStore, ManualClock, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let clock = ManualClock::new(1_000);
        let cfg = CacheConfig::new(temp_dir.path().join("cache.sqlite"));
        let store = SqliteCacheStore::open_with_clock(cfg, Arc::new(clock.clone())).unwrap();
        (store, clock, temp_dir)
    }

    fn addr(key: &str) -> EntryAddress {
        EntryAddress::new("T", "o", "D", key)
    }

    #[test]
    fn test_put_get_roundtrip() {
        let (store, _clock, _temp) = setup();
        store.put(&addr("k"), b"hello", None).unwrap();
        assert_eq!(store.get(&addr("k"), false).unwrap(), Some(b"hello".to_vec()));
        assert_eq!(store.get(&addr("other"), false).unwrap(), None);
    }

    #[test]
    fn test_expiry_boundary() {
        let (store, clock, _temp) = setup();
        store.put(&addr("k"), b"v", Some(30)).unwrap();

        clock.set(1_030);
        assert_eq!(store.get(&addr("k"), false).unwrap(), Some(b"v".to_vec()));
        assert_eq!(store.purge_expired().unwrap(), 0);

        clock.set(1_031);
        assert_eq!(store.get(&addr("k"), false).unwrap(), None);
        // Reads do not delete
        assert_eq!(store.get(&addr("k"), true).unwrap(), Some(b"v".to_vec()));
        assert_eq!(store.purge_expired().unwrap(), 1);
        assert_eq!(store.get(&addr("k"), true).unwrap(), None);
    }

    #[test]
    fn test_id_level_put_and_get() {
        let (store, _clock, _temp) = setup();
        let ids = store.resolve_ids(&addr("k")).unwrap();
        assert_eq!(store.lookup_ids(&addr("k")).unwrap(), Some(ids));

        store.put_at(ids, "k", b"one", None).unwrap();
        store.put_at(ids, "k", b"two", Some(5)).unwrap();
        assert_eq!(store.get_at(ids, "k", false).unwrap(), Some(b"two".to_vec()));
        assert_eq!(store.list_keys("T", "o", "D").unwrap(), vec!["k".to_string()]);
    }

    #[test]
    fn test_put_at_with_stale_ids_is_conflict() {
        let (store, _clock, _temp) = setup();
        let ids = store.resolve_ids(&addr("k")).unwrap();
        store.delete_object_type("T").unwrap();

        let err = store.put_at(ids, "k", b"v", None).unwrap_err();
        assert!(matches!(err, CacheError::Conflict(_)));
        assert_eq!(store.stats().unwrap().entries, 0);
    }

    #[test]
    fn test_lookups_leave_no_rows() {
        let (store, _clock, _temp) = setup();
        assert_eq!(store.get(&addr("k"), false).unwrap(), None);
        assert!(store.list_objects("T").unwrap().is_empty());
        assert!(store.list_keys("T", "o", "D").unwrap().is_empty());
        assert!(!store.delete_entry(&addr("k")).unwrap());
        assert_eq!(store.stats().unwrap(), StoreStats::default());
    }

    #[test]
    fn test_closed_store_is_unavailable() {
        let (store, _clock, temp) = setup();
        store.close().unwrap();
        store.close().unwrap();
        assert!(store.is_closed());

        let err = store.get(&addr("k"), false).unwrap_err();
        assert!(matches!(err, CacheError::Closed));
        assert!(err.is_storage_unavailable());
        // Not ephemeral: the file stays
        assert!(temp.path().join("cache.sqlite").exists());
    }

    #[test]
    fn test_empty_default_names_fail_before_touching_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cache.sqlite");

        for cfg in [
            CacheConfig::new(&path).with_default_object_type(""),
            CacheConfig::new(&path).with_default_data_type(""),
        ] {
            let err = SqliteCacheStore::open_with_clock(cfg, Arc::new(ManualClock::new(0)))
                .err()
                .unwrap();
            assert!(matches!(err, CacheError::Config(_)));
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_schema_version() {
        let (store, _clock, _temp) = setup();
        assert_eq!(store.schema_version().unwrap(), schema::SCHEMA_VERSION);
    }
}
