// storefront/src/persistence/memory_store.rs

use super::KeyValueStore;
use std::collections::BTreeMap;

/// In-process store. Contents vanish with the value; used by tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  entries: BTreeMap<String, String>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Plants a raw value without going through JSON serialization.
  pub fn insert_raw(&mut self, key: impl Into<String>, raw: impl Into<String>) {
    self.entries.insert(key.into(), raw.into());
  }

  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.entries.keys().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl KeyValueStore for MemoryStore {
  fn read(&self, key: &str) -> std::io::Result<Option<String>> {
    Ok(self.entries.get(key).cloned())
  }

  fn write(&mut self, key: &str, raw: &str) -> std::io::Result<()> {
    self.entries.insert(key.to_string(), raw.to_string());
    Ok(())
  }

  fn delete(&mut self, key: &str) -> std::io::Result<()> {
    self.entries.remove(key);
    Ok(())
  }
}
