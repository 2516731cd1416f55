// storefront/src/models/notification.rs

use super::{check_non_empty, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
  pub id: u64,
  pub title: String,
  pub message: String,
  pub posted_at: DateTime<Utc>,
}

impl Record for Notification {
  fn validate(&self) -> Result<(), String> {
    check_non_empty("notification title", &self.title)?;
    check_non_empty("notification message", &self.message)
  }

  fn unique_key(&self) -> Option<String> {
    Some(self.id.to_string())
  }
}
