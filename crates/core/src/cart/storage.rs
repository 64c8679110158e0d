//! Durable key-value storage seam for the cart.
//!
//! The cart only needs string values under string keys, the same contract a
//! browser's local storage offers. Reads never fail: a value that cannot be
//! read is reported as absent, which the store then treats as an empty cart.

use std::collections::HashMap;

use thiserror::Error;

/// Errors a storage backend can report on write.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed (disk full, permissions, ...).
    #[error("I/O error: {0}")]
    Io(String),

    /// The backend refused the write (quota exceeded, read-only, ...).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Key-scoped durable storage.
pub trait CartStorage {
    /// Read the value under `key`. Missing or unreadable values are `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Insert or replace the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend could not write the value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value under `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend could not delete the value.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: CartStorage + ?Sized> CartStorage for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-memory storage. Nothing survives the process; used for tests and
/// throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with one value, e.g. a cart left by a previous
    /// session.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.entries.insert(key.to_owned(), value.to_owned());
        storage
    }
}

impl CartStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_set_get_remove() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("k"), None);

        storage.set("k", "v").ok();
        assert_eq!(storage.get("k").as_deref(), Some("v"));

        storage.remove("k").ok();
        storage.remove("k").ok();
        assert_eq!(storage.get("k"), None);
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::Unavailable("quota exceeded".to_string());
        assert_eq!(err.to_string(), "Storage unavailable: quota exceeded");
    }
}
