use cachedb_core::error::{CacheError, Result};
use rusqlite::Connection;

/// Version written into `cache_meta` by this build
pub const SCHEMA_VERSION: u32 = 1;

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS object_type (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS data_type (
    id INTEGER PRIMARY KEY,
    object_type_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    UNIQUE(object_type_id, name),
    FOREIGN KEY(object_type_id) REFERENCES object_type(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS object (
    id INTEGER PRIMARY KEY,
    object_type_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    UNIQUE(object_type_id, name),
    FOREIGN KEY(object_type_id) REFERENCES object_type(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS data (
    id INTEGER PRIMARY KEY,
    object_id INTEGER NOT NULL,
    data_type_id INTEGER NOT NULL,
    key_hash TEXT NOT NULL,
    value_blob BLOB NOT NULL,
    created_at INTEGER NOT NULL,
    expires_at INTEGER,
    UNIQUE(object_id, data_type_id, key_hash),
    FOREIGN KEY(object_id) REFERENCES object(id) ON DELETE CASCADE,
    FOREIGN KEY(data_type_id) REFERENCES data_type(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_data_lookup
    ON data(object_id, data_type_id, key_hash);

CREATE INDEX IF NOT EXISTS idx_data_expires
    ON data(expires_at) WHERE expires_at IS NOT NULL;

CREATE TABLE IF NOT EXISTS cache_meta (
    id INTEGER PRIMARY KEY CHECK (id = 0),
    schema_version INTEGER NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);
";

/// Create tables and indexes if they do not exist yet
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA_SQL)
        .map_err(|e| CacheError::Storage(e.to_string()))?;

    conn.execute(
        "INSERT OR IGNORE INTO cache_meta (id, schema_version) VALUES (0, ?1)",
        [SCHEMA_VERSION as i64],
    )
    .map_err(|e| CacheError::Storage(e.to_string()))?;

    let stored = schema_version(conn)?;
    if stored > SCHEMA_VERSION {
        return Err(CacheError::Config(format!(
            "Database schema version {} is newer than supported version {}",
            stored, SCHEMA_VERSION
        )));
    }

    Ok(())
}

/// Schema version recorded in the database
pub fn schema_version(conn: &Connection) -> Result<u32> {
    conn.query_row(
        "SELECT schema_version FROM cache_meta WHERE id = 0",
        [],
        |row| {
            let v: i64 = row.get(0)?;
            Ok(v as u32)
        },
    )
    .map_err(|e| CacheError::Storage(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();
        assert_eq!(schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_newer_schema_is_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn.execute("UPDATE cache_meta SET schema_version = 99 WHERE id = 0", [])
            .unwrap();
        let err = init_schema(&conn).unwrap_err();
        assert!(matches!(err, CacheError::Config(_)));
    }
}
