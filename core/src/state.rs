// storefront/src/state.rs

use crate::models::{Booking, CartItem, Notification, Order, Product, User};

/// In-memory copies of every persisted collection, owned by the storefront.
///
/// Each field mirrors its store key and is only replaced after the matching
/// write succeeded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
  pub products: Vec<Product>,
  pub users: Vec<User>,
  /// Newest first.
  pub orders: Vec<Order>,
  /// Newest first.
  pub notifications: Vec<Notification>,
  /// Newest first.
  pub bookings: Vec<Booking>,
  /// Cart of the signed-in user; empty while anonymous.
  pub cart: Vec<CartItem>,
}

impl AppState {
  pub fn product(&self, id: u64) -> Option<&Product> {
    self.products.iter().find(|p| p.id == id)
  }

  pub fn user(&self, username: &str) -> Option<&User> {
    self.users.iter().find(|u| u.username == username)
  }
}
