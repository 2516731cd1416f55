// storefront/src/operations/reports.rs

//! Read-only views over the catalog and order book.

use crate::error::StoreError;
use crate::models::{Order, OrderStatus, Product};
use crate::persistence::KeyValueStore;
use crate::storefront::Storefront;
use serde::Serialize;
use std::str::FromStr;

/// Stock bands the catalog can be narrowed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StockFilter {
  #[default]
  All,
  /// Between 1 and 5 units left.
  LowStock,
  OutOfStock,
}

impl StockFilter {
  pub fn matches(self, product: &Product) -> bool {
    match self {
      StockFilter::All => true,
      StockFilter::LowStock => (1..=5).contains(&product.stock),
      StockFilter::OutOfStock => product.stock == 0,
    }
  }
}

impl FromStr for StockFilter {
  type Err = StoreError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "all" => Ok(StockFilter::All),
      "low-stock" | "low" => Ok(StockFilter::LowStock),
      "out-of-stock" | "out" => Ok(StockFilter::OutOfStock),
      other => Err(StoreError::Validation(format!("Unknown stock filter '{other}'."))),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
  /// Sum of order totals, cancelled orders excluded.
  pub total_sales: f64,
  pub total_orders: usize,
  pub total_products: usize,
  pub recent_orders: Vec<Order>,
}

impl<S: KeyValueStore> Storefront<S> {
  /// Case-insensitive substring search over name and description.
  pub fn search_products(&self, query: &str, filter: StockFilter) -> Vec<&Product> {
    let needle = query.trim().to_lowercase();
    self
      .state
      .products
      .iter()
      .filter(|p| filter.matches(p))
      .filter(|p| needle.is_empty() || format!("{} {}", p.name, p.description).to_lowercase().contains(&needle))
      .collect()
  }

  pub fn dashboard(&self) -> DashboardSummary {
    let total_sales = self
      .state
      .orders
      .iter()
      .filter(|o| o.status != OrderStatus::Cancelled)
      .map(|o| o.total)
      .sum();
    DashboardSummary {
      total_sales,
      total_orders: self.state.orders.len(),
      total_products: self.state.products.len(),
      recent_orders: self.recent_orders(5).to_vec(),
    }
  }
}
