// storefront/app/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = "./storefront-data";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
  /// Directory holding one JSON file per stored key.
  pub data_dir: PathBuf,
  /// Write the sample catalog and users when those collections are missing.
  pub seed: bool,
  pub log_json: bool,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let data_dir = lookup("STOREFRONT_DATA_DIR")
      .filter(|v| !v.trim().is_empty())
      .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());

    let get_bool = |var_name: &str, default: bool| -> Result<bool> {
      match lookup(var_name) {
        None => Ok(default),
        Some(raw) => parse_bool(&raw).ok_or_else(|| AppError::Config(format!("Invalid {} value: '{}'", var_name, raw))),
      }
    };

    Ok(Self {
      data_dir: PathBuf::from(data_dir),
      seed: get_bool("STOREFRONT_SEED", true)?,
      log_json: get_bool("STOREFRONT_LOG_JSON", false)?,
    })
  }
}

fn parse_bool(raw: &str) -> Option<bool> {
  match raw.trim().to_ascii_lowercase().as_str() {
    "1" | "true" | "yes" | "on" => Some(true),
    "0" | "false" | "no" | "off" => Some(false),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig> {
    let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    AppConfig::from_lookup(|name| vars.get(name).cloned())
  }

  #[test]
  fn defaults_apply_when_nothing_is_set() {
    let config = config_from(&[]).unwrap();
    assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
    assert!(config.seed);
    assert!(!config.log_json);
  }

  #[test]
  fn variables_override_defaults() {
    let config = config_from(&[
      ("STOREFRONT_DATA_DIR", "/tmp/shop"),
      ("STOREFRONT_SEED", "false"),
      ("STOREFRONT_LOG_JSON", "1"),
    ])
    .unwrap();
    assert_eq!(config.data_dir, PathBuf::from("/tmp/shop"));
    assert!(!config.seed);
    assert!(config.log_json);
  }

  #[test]
  fn malformed_booleans_are_rejected() {
    let err = config_from(&[("STOREFRONT_SEED", "maybe")]).unwrap_err();
    assert!(matches!(err, AppError::Config(ref m) if m.contains("STOREFRONT_SEED")));
  }
}
