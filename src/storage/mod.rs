//! Durable key-value storage collaborator
//!
//! History is serialized as one JSON blob under a fixed key, so the backing
//! store only needs string get/set:
//! - [`MemoryStore`]: process-local map, nothing survives a restart
//! - [`FileStore`]: one file per key inside a directory
//! - [`SqliteStore`]: single `kv` table (requires `rusqlite-support`)

pub mod file;
pub mod memory;
#[cfg(feature = "rusqlite-support")]
pub mod sqlite;

pub use file::FileStore;
pub use memory::MemoryStore;
#[cfg(feature = "rusqlite-support")]
pub use sqlite::SqliteStore;

use crate::error::Result;

/// Trait for string key-value stores
pub trait KeyValueStore {
    /// Read the value under `key`, `None` if absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; absent keys are not an error
    fn remove(&mut self, key: &str) -> Result<()> {
        self.set(key, "")
    }

    /// Check if a non-empty value is stored under `key`
    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some_and(|v| !v.is_empty()))
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
