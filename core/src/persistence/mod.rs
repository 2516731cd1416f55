// storefront/src/persistence/mod.rs

//! The local key-value substrate every collection is persisted to.
//!
//! Raw values are strings; [`JsonStore`] layers typed JSON access on top of any
//! [`KeyValueStore`]. Reads never fail: absent, unreadable or malformed entries
//! resolve to the caller's fallback. Writes replace the whole value of a key and
//! no write spans more than one key.

mod file_store;
pub mod keys;
mod memory_store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

use crate::error::{StoreError, StoreResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

/// Raw string storage keyed by name.
pub trait KeyValueStore {
  /// Returns the stored value, or `None` if the key was never written or was removed.
  fn read(&self, key: &str) -> std::io::Result<Option<String>>;

  /// Stores `raw` under `key`, replacing any previous value.
  fn write(&mut self, key: &str, raw: &str) -> std::io::Result<()>;

  /// Deletes the entry. Deleting an absent key succeeds.
  fn delete(&mut self, key: &str) -> std::io::Result<()>;
}

/// Typed JSON access over a [`KeyValueStore`].
pub trait JsonStore: KeyValueStore {
  /// Deserialized value for `key`, or `fallback` if it is absent or corrupt.
  fn get<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
    self.try_get(key).unwrap_or(fallback)
  }

  /// Deserialized value for `key`, `None` if it is absent or corrupt.
  fn try_get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
    let raw = match self.read(key) {
      Ok(Some(raw)) => raw,
      Ok(None) => {
        debug!(key, "No stored value.");
        return None;
      }
      Err(e) => {
        warn!(key, error = %e, "Stored value unreadable, using fallback.");
        return None;
      }
    };
    match serde_json::from_str(&raw) {
      Ok(value) => Some(value),
      Err(e) => {
        warn!(key, error = %e, "Stored value is malformed, using fallback.");
        None
      }
    }
  }

  /// Serializes `value` and stores it under `key`.
  fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> StoreResult<()> {
    let raw = serde_json::to_string(value).map_err(|source| StoreError::Serialization {
      key: key.to_string(),
      source,
    })?;
    self.write(key, &raw).map_err(|source| StoreError::Storage {
      key: key.to_string(),
      source,
    })?;
    debug!(key, bytes = raw.len(), "Stored value.");
    Ok(())
  }

  fn remove(&mut self, key: &str) -> StoreResult<()> {
    self.delete(key).map_err(|source| StoreError::Storage {
      key: key.to_string(),
      source,
    })
  }
}

impl<S: KeyValueStore + ?Sized> JsonStore for S {}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
  fn read(&self, key: &str) -> std::io::Result<Option<String>> {
    (**self).read(key)
  }

  fn write(&mut self, key: &str, raw: &str) -> std::io::Result<()> {
    (**self).write(key, raw)
  }

  fn delete(&mut self, key: &str) -> std::io::Result<()> {
    (**self).delete(key)
  }
}
