//! Flat local key-value storage shared by the stores.
//!
//! Each store owns a fixed set of keys (`species`, `sightings`, `user`,
//! `accounts`) and writes a JSON-serialized value under each. Nothing here
//! enforces that ownership; callers keep to one writer per key.

use anyhow::{Context, Result};
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;

mod sqlite;


pub use sqlite::SqliteKvStore;

/// Key holding the cached species catalog
pub const SPECIES_KEY: &str = "species";
/// Key holding the sighting log (newest first)
pub const SIGHTINGS_KEY: &str = "sightings";
/// Key holding the signed-in user
pub const USER_KEY: &str = "user";
/// Key holding the account registry
pub const ACCOUNTS_KEY: &str = "accounts";

/// String key-value store with async-storage semantics.
///
/// Implementations must be safe to share between stores.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Succeeds whether or not the key exists.
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// Reads and deserializes the JSON value stored under `key`.
pub fn read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get_item(key)? {
        Some(raw) => {
            let value = serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse stored value for key '{}'", key))?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

/// Serializes `value` to JSON and stores it under `key`.
pub fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let raw = serde_json::to_string(value)
        .with_context(|| format!("Failed to serialize value for key '{}'", key))?;
    store.set_item(key, &raw)
}

/// In-memory store, used when persistence is disabled and in tests.
pub struct MemoryKvStore {
    items: DashMap<String, String>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self {
            items: DashMap::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for MemoryKvStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).map(|v| v.value().clone()))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}
