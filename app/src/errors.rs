// storefront/app/src/errors.rs

use std::path::PathBuf;
use storefront::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("{0}")]
  Input(String),

  #[error("Cannot open data directory '{}': {source}", path.display())]
  DataDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error(transparent)]
  Store(#[from] StoreError),
}

impl AppError {
  /// Rejections are reported to the user as-is; everything else is a failure.
  pub fn is_rejection(&self) -> bool {
    match self {
      AppError::Input(_) => true,
      AppError::Store(e) => e.is_rejection(),
      AppError::Config(_) | AppError::DataDir { .. } => false,
    }
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
