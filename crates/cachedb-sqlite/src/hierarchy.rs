//! Hierarchy resolver
//!
//! Maps (object type, data type, object) names to row ids. The `ensure_*`
//! functions create missing rows and are only used on write paths; the
//! `lookup_*` functions never write, so reads of unknown names leave the
//! hierarchy untouched.
//!
//! Every function takes the connection the caller already holds under the
//! store lock.

use cachedb_core::{
    error::{CacheError, Result},
    types::{EntryAddress, HierarchyIds, RowId},
};
use rusqlite::{params, Connection, OptionalExtension};

pub fn lookup_object_type_id(conn: &Connection, name: &str) -> Result<Option<RowId>> {
    conn.query_row("SELECT id FROM object_type WHERE name = ?1", [name], |row| {
        row.get(0)
    })
    .optional()
    .map_err(|e| CacheError::Storage(e.to_string()))
}

pub fn lookup_data_type_id(
    conn: &Connection,
    object_type_id: RowId,
    name: &str,
) -> Result<Option<RowId>> {
    conn.query_row(
        "SELECT id FROM data_type WHERE object_type_id = ?1 AND name = ?2",
        params![object_type_id, name],
        |row| row.get(0),
    )
    .optional()
    .map_err(|e| CacheError::Storage(e.to_string()))
}

pub fn lookup_object_id(
    conn: &Connection,
    object_type_id: RowId,
    name: &str,
) -> Result<Option<RowId>> {
    conn.query_row(
        "SELECT id FROM object WHERE object_type_id = ?1 AND name = ?2",
        params![object_type_id, name],
        |row| row.get(0),
    )
    .optional()
    .map_err(|e| CacheError::Storage(e.to_string()))
}

/// Id of the object type `name`, inserting it if missing
pub fn ensure_object_type(conn: &Connection, name: &str) -> Result<RowId> {
    if let Some(id) = lookup_object_type_id(conn, name)? {
        return Ok(id);
    }

    let inserted = conn
        .execute(
            "INSERT INTO object_type (name) VALUES (?1) ON CONFLICT(name) DO NOTHING",
            [name],
        )
        .map_err(|e| CacheError::Storage(e.to_string()))?;
    if inserted > 0 {
        tracing::debug!(object_type = name, "Created object type");
    }

    lookup_object_type_id(conn, name)?
        .ok_or_else(|| CacheError::Storage(format!("object type '{}' vanished after insert", name)))
}

/// Id of data type `name` under `object_type_id`, inserting it if missing
pub fn ensure_data_type(conn: &Connection, object_type_id: RowId, name: &str) -> Result<RowId> {
    if let Some(id) = lookup_data_type_id(conn, object_type_id, name)? {
        return Ok(id);
    }

    let inserted = conn
        .execute(
            "INSERT INTO data_type (object_type_id, name) VALUES (?1, ?2)
             ON CONFLICT(object_type_id, name) DO NOTHING",
            params![object_type_id, name],
        )
        .map_err(|e| CacheError::Storage(e.to_string()))?;
    if inserted > 0 {
        tracing::debug!(object_type_id, data_type = name, "Created data type");
    }

    lookup_data_type_id(conn, object_type_id, name)?
        .ok_or_else(|| CacheError::Storage(format!("data type '{}' vanished after insert", name)))
}

/// Id of object `name` under `object_type_id`, inserting it if missing
pub fn ensure_object(conn: &Connection, object_type_id: RowId, name: &str) -> Result<RowId> {
    if let Some(id) = lookup_object_id(conn, object_type_id, name)? {
        return Ok(id);
    }

    let inserted = conn
        .execute(
            "INSERT INTO object (object_type_id, name) VALUES (?1, ?2)
             ON CONFLICT(object_type_id, name) DO NOTHING",
            params![object_type_id, name],
        )
        .map_err(|e| CacheError::Storage(e.to_string()))?;
    if inserted > 0 {
        tracing::debug!(object_type_id, object = name, "Created object");
    }

    lookup_object_id(conn, object_type_id, name)?
        .ok_or_else(|| CacheError::Storage(format!("object '{}' vanished after insert", name)))
}

/// Resolve every level of `addr`, creating rows as needed
///
/// Data type and object are resolved independently under the same object type.
pub fn ensure_ids(conn: &Connection, addr: &EntryAddress) -> Result<HierarchyIds> {
    let object_type_id = ensure_object_type(conn, &addr.object_type)?;
    let data_type_id = ensure_data_type(conn, object_type_id, &addr.data_type)?;
    let object_id = ensure_object(conn, object_type_id, &addr.object_name)?;
    Ok(HierarchyIds {
        object_type_id,
        data_type_id,
        object_id,
    })
}

/// Resolve every level of `addr` without writing; `None` if any level is unknown
pub fn lookup_ids(conn: &Connection, addr: &EntryAddress) -> Result<Option<HierarchyIds>> {
    lookup_pair_ids(conn, &addr.object_type, &addr.object_name, &addr.data_type)
}

pub(crate) fn lookup_pair_ids(
    conn: &Connection,
    object_type: &str,
    object_name: &str,
    data_type: &str,
) -> Result<Option<HierarchyIds>> {
    let Some(object_type_id) = lookup_object_type_id(conn, object_type)? else {
        return Ok(None);
    };
    let Some(object_id) = lookup_object_id(conn, object_type_id, object_name)? else {
        return Ok(None);
    };
    let Some(data_type_id) = lookup_data_type_id(conn, object_type_id, data_type)? else {
        return Ok(None);
    };
    Ok(Some(HierarchyIds {
        object_type_id,
        data_type_id,
        object_id,
    }))
}
