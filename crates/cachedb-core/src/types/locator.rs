//! Addressing of cache entries
//!
//! A [`Locator`] is what callers hand in: every level is optional. Resolving it
//! against the store defaults yields an [`EntryAddress`], which never contains
//! an empty name.

use super::{RowId, DEFAULT_KEY, DEFAULT_OBJECT};

/// Caller-facing, partially specified entry address
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Locator {
    pub object_type: Option<String>,
    pub object_name: Option<String>,
    pub data_type: Option<String>,
    pub key: Option<String>,
}

impl Locator {
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

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Fill unset or empty levels with defaults.
    pub fn resolve(&self, default_object_type: &str, default_data_type: &str) -> EntryAddress {
        EntryAddress {
            object_type: or_default(&self.object_type, default_object_type),
            object_name: or_default(&self.object_name, DEFAULT_OBJECT),
            data_type: or_default(&self.data_type, default_data_type),
            key: or_default(&self.key, DEFAULT_KEY),
        }
    }
}

fn or_default(value: &Option<String>, default: &str) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

/// Fully resolved address of a single cache entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryAddress {
    pub object_type: String,
    pub object_name: String,
    pub data_type: String,
    pub key: String,
}

impl EntryAddress {
    pub fn new(
        object_type: impl Into<String>,
        object_name: impl Into<String>,
        data_type: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            object_type: object_type.into(),
            object_name: object_name.into(),
            data_type: data_type.into(),
            key: key.into(),
        }
    }
}

/// Engine identifiers for the hierarchy rows an entry hangs off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HierarchyIds {
    pub object_type_id: RowId,
    pub data_type_id: RowId,
    pub object_id: RowId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_levels_fall_back() {
        let addr = Locator::new().resolve("proj", "misc");
        assert_eq!(addr, EntryAddress::new("proj", "default_object", "misc", "singleton"));
    }

    #[test]
    fn test_empty_names_fall_back() {
        let addr = Locator::new()
            .object_type("")
            .object_name("")
            .data_type("meta")
            .key("")
            .resolve("proj", "misc");
        assert_eq!(addr.object_type, "proj");
        assert_eq!(addr.object_name, "default_object");
        assert_eq!(addr.data_type, "meta");
        assert_eq!(addr.key, "singleton");
    }
}
