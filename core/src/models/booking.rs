// storefront/src/models/booking.rs

use super::{check_non_empty, Record};
use crate::error::StoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
  Requested,
  Confirmed,
  Cancelled,
}

impl BookingStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      BookingStatus::Requested => "requested",
      BookingStatus::Confirmed => "confirmed",
      BookingStatus::Cancelled => "cancelled",
    }
  }

  /// Only a requested booking can move, and only to a terminal state.
  pub fn can_transition_to(self, next: BookingStatus) -> bool {
    matches!(
      (self, next),
      (BookingStatus::Requested, BookingStatus::Confirmed) | (BookingStatus::Requested, BookingStatus::Cancelled)
    )
  }
}

impl fmt::Display for BookingStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for BookingStatus {
  type Err = StoreError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "requested" => Ok(BookingStatus::Requested),
      "confirmed" => Ok(BookingStatus::Confirmed),
      "cancelled" => Ok(BookingStatus::Cancelled),
      other => Err(StoreError::Validation(format!("Unknown booking status '{other}'."))),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
  pub id: u64,
  pub service: String,
  pub date: DateTime<Utc>,
  pub customer: String,
  pub customer_name: String,
  pub status: BookingStatus,
  pub created_at: DateTime<Utc>,
}

impl Record for Booking {
  fn validate(&self) -> Result<(), String> {
    check_non_empty("booking service", &self.service)?;
    check_non_empty("booking customer", &self.customer)
  }

  fn unique_key(&self) -> Option<String> {
    Some(self.id.to_string())
  }
}
