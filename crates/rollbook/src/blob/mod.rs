//! Key-value blob stores for rollbook.
//!
//! The record store treats persistence as an opaque synchronous key-value
//! store holding whole serialized values. This module defines that contract
//! and provides in-memory, file-backed and `SQLite`-backed implementations.

mod file;
pub mod schema;
mod sqlite;

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};

pub use file::FileBlobStore;
pub use sqlite::SqliteBlobStore;

/// A synchronous key-value store of string blobs.
///
/// Writes replace the whole value for a key; there are no partial updates.
pub trait BlobStore: std::fmt::Debug {
    /// The name of this backend (for logging/debugging).
    fn name(&self) -> &'static str;

    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying medium cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Returns `true` if a value was present.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying medium cannot be written.
    fn remove(&mut self, key: &str) -> Result<bool>;

    /// When `key` was last written, if the backend tracks it.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying medium cannot be read.
    fn updated_at(&self, _key: &str) -> Result<Option<DateTime<Utc>>> {
        Ok(None)
    }
}

impl<S: BlobStore + ?Sized> BlobStore for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        (**self).remove(key)
    }

    fn updated_at(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        (**self).updated_at(key)
    }
}

/// Blob store that lives only as long as the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryBlobStore {
    entries: HashMap<String, String>,
}

impl MemoryBlobStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding a single entry.
    #[must_use]
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self { entries }
    }
}

impl BlobStore for MemoryBlobStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        Ok(self.entries.remove(key).is_some())
    }
}

/// Check that `key` is usable by every backend.
///
/// Keys become file names in [`FileBlobStore`], so they are restricted to
/// ASCII letters, digits, `.`, `_` and `-`, and may not start with a dot.
///
/// # Errors
///
/// Returns [`Error::InvalidKey`] describing the first problem found.
pub fn check_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::invalid_key(key, "key is empty"));
    }
    if key.starts_with('.') {
        return Err(Error::invalid_key(key, "key starts with a dot"));
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return Err(Error::invalid_key(
            key,
            "only ASCII letters, digits, '.', '_' and '-' are allowed",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_get_missing() {
        let store = MemoryBlobStore::new();
        assert_eq!(store.get("nothing").unwrap(), None);
    }

    #[test]
    fn test_memory_set_and_get() {
        let mut store = MemoryBlobStore::new();
        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn test_memory_remove() {
        let mut store = MemoryBlobStore::with_entry("k", "v");
        assert!(store.remove("k").unwrap());
        assert!(!store.remove("k").unwrap());
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn test_memory_does_not_track_writes() {
        let store = MemoryBlobStore::with_entry("k", "v");
        assert!(store.updated_at("k").unwrap().is_none());
    }

    #[test]
    fn test_boxed_store_delegates() {
        let mut store: Box<dyn BlobStore> = Box::new(MemoryBlobStore::new());
        store.set("k", "v").unwrap();
        assert_eq!(store.name(), "memory");
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_check_key_accepts_default_key() {
        assert!(check_key("student-records").is_ok());
        assert!(check_key("records_v1.backup").is_ok());
    }

    #[test]
    fn test_check_key_rejects_bad_keys() {
        for key in ["", ".hidden", "../escape", "a/b", "with space", "ünï"] {
            assert!(
                matches!(check_key(key), Err(Error::InvalidKey { .. })),
                "key {key:?} should be rejected"
            );
        }
    }
}
