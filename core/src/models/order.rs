// storefront/src/models/order.rs

use super::{check_non_empty, check_price, CartItem, Record};
use crate::error::StoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest difference tolerated between a stored total and the sum of its lines.
const TOTAL_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
  Pending,
  Shipped,
  Delivered,
  Cancelled,
}

impl OrderStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      OrderStatus::Pending => "pending",
      OrderStatus::Shipped => "shipped",
      OrderStatus::Delivered => "delivered",
      OrderStatus::Cancelled => "cancelled",
    }
  }

  /// Returns true if moving from `self` to `next` is allowed.
  pub fn can_transition_to(self, next: OrderStatus) -> bool {
    matches!(
      (self, next),
      (OrderStatus::Pending, OrderStatus::Shipped)
        | (OrderStatus::Pending, OrderStatus::Cancelled)
        | (OrderStatus::Shipped, OrderStatus::Delivered)
        | (OrderStatus::Shipped, OrderStatus::Cancelled)
    )
  }

  pub fn is_terminal(self) -> bool {
    matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
  }
}

impl fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for OrderStatus {
  type Err = StoreError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "pending" => Ok(OrderStatus::Pending),
      "shipped" => Ok(OrderStatus::Shipped),
      "delivered" => Ok(OrderStatus::Delivered),
      "cancelled" => Ok(OrderStatus::Cancelled),
      other => Err(StoreError::Validation(format!("Unknown order status '{other}'."))),
    }
  }
}

/// A purchased line, decoupled from the live product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
  pub id: u64,
  pub name: String,
  pub price: f64,
  pub qty: u32,
}

impl From<&CartItem> for OrderItem {
  fn from(line: &CartItem) -> Self {
    Self {
      id: line.product.id,
      name: line.product.name.clone(),
      price: line.product.price,
      qty: line.qty,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  pub id: u64,
  pub customer: String,
  pub customer_name: String,
  pub items: Vec<OrderItem>,
  pub total: f64,
  pub status: OrderStatus,
  pub created_at: DateTime<Utc>,
  #[serde(default)]
  pub details: serde_json::Map<String, serde_json::Value>,
}

impl Order {
  /// Σ price × qty over the given lines.
  pub fn total_of(items: &[OrderItem]) -> f64 {
    items.iter().map(|it| it.price * f64::from(it.qty)).sum()
  }
}

impl Record for Order {
  fn validate(&self) -> Result<(), String> {
    check_non_empty("order customer", &self.customer)?;
    check_price("order total", self.total)?;
    for item in &self.items {
      check_price("order line price", item.price)?;
      if item.qty == 0 {
        return Err(format!("order {} has a zero-quantity line", self.id));
      }
    }
    let expected = Order::total_of(&self.items);
    if (expected - self.total).abs() > TOTAL_TOLERANCE * expected.abs().max(1.0) {
      return Err(format!(
        "order {} total {} does not match its lines ({})",
        self.id, self.total, expected
      ));
    }
    Ok(())
  }

  fn unique_key(&self) -> Option<String> {
    Some(self.id.to_string())
  }
}
