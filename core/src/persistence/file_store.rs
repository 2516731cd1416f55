// storefront/src/persistence/file_store.rs

use super::KeyValueStore;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Durable store keeping one `<key>.json` file per key inside a directory.
///
/// Writes go straight to the target file. A crash mid-write can leave a
/// truncated value behind, which later reads treat as corrupt.
#[derive(Debug, Clone)]
pub struct FileStore {
  root: PathBuf,
}

impl FileStore {
  /// Opens (and creates if needed) the data directory.
  #[instrument(name = "FileStore::open", skip_all, fields(root = %root.as_ref().display()))]
  pub fn open(root: impl AsRef<Path>) -> std::io::Result<Self> {
    let root = root.as_ref().to_path_buf();
    fs::create_dir_all(&root)?;
    info!("Data directory ready.");
    Ok(Self { root })
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Path of the file backing `key`.
  pub fn path_for(&self, key: &str) -> PathBuf {
    self.root.join(format!("{}.json", escape_key(key)))
  }
}

impl KeyValueStore for FileStore {
  fn read(&self, key: &str) -> std::io::Result<Option<String>> {
    match fs::read_to_string(self.path_for(key)) {
      Ok(raw) => Ok(Some(raw)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e),
    }
  }

  fn write(&mut self, key: &str, raw: &str) -> std::io::Result<()> {
    let path = self.path_for(key);
    fs::write(&path, raw)?;
    debug!(path = %path.display(), "Wrote value file.");
    Ok(())
  }

  fn delete(&mut self, key: &str) -> std::io::Result<()> {
    match fs::remove_file(self.path_for(key)) {
      Err(e) if e.kind() != ErrorKind::NotFound => Err(e),
      _ => Ok(()),
    }
  }
}

/// Keeps `[A-Za-z0-9_.-]` and percent-escapes every other byte so a key can
/// never name a path outside the data directory.
fn escape_key(key: &str) -> String {
  let mut out = String::with_capacity(key.len());
  for byte in key.bytes() {
    match byte {
      b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' => out.push(byte as char),
      // A leading dot would hide the file or form `..`.
      b'.' if !out.is_empty() => out.push('.'),
      _ => out.push_str(&format!("%{:02X}", byte)),
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::escape_key;

  #[test]
  fn escape_key_keeps_plain_names() {
    assert_eq!(escape_key("demo_cart_alice"), "demo_cart_alice");
  }

  #[test]
  fn escape_key_neutralizes_path_characters() {
    assert_eq!(escape_key("demo_cart_../x"), "demo_cart_..%2Fx");
    assert_eq!(escape_key("../etc"), "%2E.%2Fetc");
    assert_eq!(escape_key("a b"), "a%20b");
  }
}
