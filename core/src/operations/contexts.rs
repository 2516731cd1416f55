// storefront/src/operations/contexts.rs

//! Context data the storefront pipelines operate on.
//!
//! Every context owns copies of the collections its pipeline reads or
//! rewrites, so a rejected run leaves the storefront untouched.

use crate::ids::IdAllocator;
use crate::models::{CartItem, Order, Product, User};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct RegisterCtxData {
  pub username: String,
  pub name: String,
  pub users: Vec<User>,
  pub created_user: Option<User>,
}

#[derive(Debug, Clone)]
pub struct SignInCtxData {
  pub username: String,
  pub users: Vec<User>,
  pub signed_in_user: Option<User>,
}

#[derive(Debug, Clone)]
pub struct AddToCartCtxData {
  pub username: String,
  pub product_id: u64,
  pub quantity: u32,
  pub catalog: Vec<Product>,
  pub fetched_product: Option<Product>,
  pub cart: Vec<CartItem>,
  pub updated_cart_item: Option<CartItem>,
}

#[derive(Debug, Clone)]
pub struct CheckoutCtxData {
  pub customer: User,
  pub cart: Vec<CartItem>,
  pub catalog: Vec<Product>,
  pub orders: Vec<Order>,
  pub details: serde_json::Map<String, serde_json::Value>,
  /// Copy of the storefront's allocator; kept only if the run completes.
  pub ids: IdAllocator,
  pub placed_at: DateTime<Utc>,
  pub placed_order: Option<Order>,
}
