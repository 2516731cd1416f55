// storefront/src/ids.rs

use crate::error::{StoreError, StoreResult};
use chrono::{DateTime, Utc};

/// Issues creation-time identifiers that never repeat.
///
/// Each id is the creation time in milliseconds, bumped past the last id
/// handed out when several records are created within the same millisecond
/// (or the clock goes backwards).
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
  last: u64,
}

impl IdAllocator {
  /// Starts above every id already in use.
  pub fn starting_after(existing: impl IntoIterator<Item = u64>) -> Self {
    Self {
      last: existing.into_iter().max().unwrap_or(0),
    }
  }

  /// Fails once `u64::MAX` has been handed out.
  pub fn next(&mut self, now: DateTime<Utc>) -> StoreResult<u64> {
    let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    let bumped = self
      .last
      .checked_add(1)
      .ok_or_else(|| StoreError::Validation("No identifiers left to allocate.".to_string()))?;
    self.last = millis.max(bumped);
    Ok(self.last)
  }

  pub fn last(&self) -> u64 {
    self.last
  }
}
