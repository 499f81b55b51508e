pub mod entry;
pub mod locator;

pub use entry::{EntryMeta, KeyedEntry, ScanOptions, StoreStats};
pub use locator::{EntryAddress, HierarchyIds, Locator};

/// Row identifier assigned by the storage engine
pub type RowId = i64;

/// Unix timestamp in whole seconds
pub type Timestamp = i64;

pub const DEFAULT_OBJECT_TYPE: &str = "default_objecttype";
pub const DEFAULT_DATA_TYPE: &str = "default_datatype";
pub const DEFAULT_OBJECT: &str = "default_object";
pub const DEFAULT_KEY: &str = "singleton";
