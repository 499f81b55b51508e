//! Value encoding and argument hashing
//!
//! Values are stored as bincode. Keys for memoized calls are the SHA-256 of
//! the bincode encoding of the call's arguments, hex encoded.

use crate::{CacheError, Result};
use serde::{de::DeserializeOwned, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Encode a value for storage
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    bincode::serialize(value).map_err(|e| CacheError::Serialization(e.to_string()))
}

/// Decode a stored value
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    bincode::deserialize(bytes).map_err(|e| CacheError::Serialization(e.to_string()))
}

/// Derive a stable key from call arguments
///
/// Equal argument values always hash to the same 64-character hex string,
/// across processes and runs.
pub fn hash_inputs<A: Serialize + ?Sized>(args: &A) -> Result<String> {
    let bytes = encode(args)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Positional and keyword arguments of a call
///
/// Arguments are encoded as they are added, so differently typed arguments can
/// sit in one bundle. Keyword arguments are kept sorted by name: the order in
/// which they are supplied does not affect the hash.
///
/// ```
/// use cachedb_core::codec::CallArgs;
///
/// # fn main() -> cachedb_core::Result<()> {
/// let a = CallArgs::new().arg(&5)?.kwarg("y", &7)?.kwarg("z", &"label")?;
/// let b = CallArgs::new().arg(&5)?.kwarg("z", &"label")?.kwarg("y", &7)?;
/// assert_eq!(a.key_hash()?, b.key_hash()?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CallArgs {
    positional: Vec<Vec<u8>>,
    keyword: BTreeMap<String, Vec<u8>>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument
    pub fn arg<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self> {
        self.positional.push(encode(value)?);
        Ok(self)
    }

    /// Set a keyword argument, replacing an earlier one with the same name
    pub fn kwarg<T: Serialize + ?Sized>(mut self, name: impl Into<String>, value: &T) -> Result<Self> {
        self.keyword.insert(name.into(), encode(value)?);
        Ok(self)
    }

    /// Decode the positional argument at `index`
    pub fn get<T: DeserializeOwned>(&self, index: usize) -> Result<Option<T>> {
        self.positional.get(index).map(|b| decode(b)).transpose()
    }

    /// Decode the keyword argument `name`
    pub fn get_kw<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        self.keyword.get(name).map(|b| decode(b)).transpose()
    }

    pub fn len(&self) -> usize {
        self.positional.len() + self.keyword.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn key_hash(&self) -> Result<String> {
        hash_inputs(self)
    }
}
