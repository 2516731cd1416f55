// storefront/src/error.rs
use thiserror::Error;

/// Errors raised by the step pipeline engine itself, independent of any domain.
#[derive(Debug, Error)]
pub enum PipelineError {
  #[error("Step not found: {step_name}")]
  StepNotFound { step_name: String },

  #[error("Step already defined: {step_name}")]
  DuplicateStep { step_name: String },

  #[error("Handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },
}

/// Every failure a storefront operation can surface to its caller.
///
/// Rejections (`Validation`, `Forbidden`, `NotFound`, `InvalidTransition`) are
/// raised before any mutation and carry a message meant for the end user.
/// Stored data that fails to parse never shows up here: it is recovered by
/// the persistence layer with the caller's fallback.
#[derive(Debug, Error)]
pub enum StoreError {
  #[error("{0}")]
  Validation(String),

  #[error("{0}")]
  Forbidden(String),

  #[error("Not found: {0}")]
  NotFound(String),

  #[error("Cannot move {entity} from '{from}' to '{to}'")]
  InvalidTransition {
    entity: &'static str,
    from: String,
    to: String,
  },

  #[error("Storage failure for key '{key}': {source}")]
  Storage {
    key: String,
    #[source]
    source: std::io::Error,
  },

  #[error("Could not serialize value for key '{key}': {source}")]
  Serialization {
    key: String,
    #[source]
    source: serde_json::Error,
  },

  #[error("Pipeline error: {0}")]
  Pipeline(#[from] PipelineError),
}

impl StoreError {
  /// True for the rejections that block an operation before it mutates anything.
  pub fn is_rejection(&self) -> bool {
    matches!(
      self,
      StoreError::Validation(_) | StoreError::Forbidden(_) | StoreError::NotFound(_) | StoreError::InvalidTransition { .. }
    )
  }
}

pub type StoreResult<T, E = StoreError> = std::result::Result<T, E>;
