//! SQLite-backed cache store
//!
//! Stores the cache hierarchy in four tables:
//! `object_type` → `data_type` / `object` → `data`.
//!
//! Key features:
//! - Foreign keys with cascading deletes
//! - Conflict-resolving upserts keyed by (object, data type, key)
//! - Lazy, read-time expiry plus an explicit purge
//! - WAL mode for durability without blocking readers
//! - Optional ephemeral mode that deletes the file on close

pub mod hierarchy;
pub mod lifecycle;
pub mod schema;
pub mod store;

pub use lifecycle::{resolve_db_path, EphemeralFile, DEFAULT_FILE_NAME};
pub use store::SqliteCacheStore;
