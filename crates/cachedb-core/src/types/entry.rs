use super::Timestamp;

/// Row returned by an object-type scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMeta {
    pub object_name: String,
    pub data_type: String,
    pub key_hash: String,
    /// Raw encoded value, present only when the scan asked for values
    pub value: Option<Vec<u8>>,
    pub created_at: Timestamp,
    pub expires_at: Option<Timestamp>,
}

/// Row returned by a scan of one (object, data type) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedEntry<V> {
    pub key_hash: String,
    pub value: V,
    pub created_at: Timestamp,
    pub expires_at: Option<Timestamp>,
}

impl<V> KeyedEntry<V> {
    /// Replace the value, keeping key and timestamps.
    pub fn try_map<U, E>(self, f: impl FnOnce(V) -> Result<U, E>) -> Result<KeyedEntry<U>, E> {
        Ok(KeyedEntry {
            key_hash: self.key_hash,
            value: f(self.value)?,
            created_at: self.created_at,
            expires_at: self.expires_at,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Return rows whose expiry has passed
    pub include_expired: bool,
    /// Attach the raw value bytes to each row
    pub with_values: bool,
}

impl ScanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_expired(mut self, include: bool) -> Self {
        self.include_expired = include;
        self
    }

    pub fn with_values(mut self, with_values: bool) -> Self {
        self.with_values = with_values;
        self
    }
}

/// Row counts for a store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub object_types: u64,
    pub data_types: u64,
    pub objects: u64,
    pub entries: u64,
    /// Entries a purge would remove right now
    pub expired_entries: u64,
}
