//! Backing-file resolution and cleanup
//!
//! [`resolve_db_path`] turns the configured path into a concrete database file,
//! creating parent directories. [`EphemeralFile`] removes that file (and the
//! SQLite sidecar files next to it) when an ephemeral store is closed.

use cachedb_core::error::{CacheError, Result};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

/// File name used when the configured path is a directory
pub const DEFAULT_FILE_NAME: &str = "cachedb.sqlite";

const SIDECAR_SUFFIXES: [&str; 3] = ["-wal", "-shm", "-journal"];

/// Resolve the configured path to a database file
///
/// - An existing directory holds `cachedb.sqlite`, or a uniquely named
///   `cachedb-*.sqlite` file when `ephemeral` is set, so that several
///   ephemeral stores can share a directory.
/// - Anything else is taken as the file path; its parent directories are
///   created.
pub fn resolve_db_path(path: &Path, ephemeral: bool) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(CacheError::Config("database path is empty".into()));
    }

    if path.is_dir() {
        if !ephemeral {
            return Ok(path.join(DEFAULT_FILE_NAME));
        }
        let file = tempfile::Builder::new()
            .prefix("cachedb-")
            .suffix(".sqlite")
            .tempfile_in(path)
            .map_err(|e| {
                CacheError::Config(format!(
                    "cannot create temporary database in {}: {}",
                    path.display(),
                    e
                ))
            })?;
        return file
            .into_temp_path()
            .keep()
            .map_err(|e| CacheError::Config(e.to_string()));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            CacheError::Config(format!(
                "cannot create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    Ok(path.to_path_buf())
}

/// Database file owned by an ephemeral store
#[derive(Debug, Clone)]
pub struct EphemeralFile {
    path: PathBuf,
}

impl EphemeralFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the database file and its sidecars
    ///
    /// Missing files are fine; calling this twice is a no-op the second time.
    /// Other failures are logged and otherwise ignored.
    pub fn remove(&self) {
        remove_quietly(&self.path);
        for suffix in SIDECAR_SUFFIXES {
            remove_quietly(&sidecar(&self.path, suffix));
        }
    }
}

fn sidecar(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

fn remove_quietly(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => tracing::debug!("Removed {}", path.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("Failed to remove {}: {}", path.display(), e),
    }
}
