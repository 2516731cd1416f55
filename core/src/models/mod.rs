// storefront/src/models/mod.rs

//! Typed records persisted by the storefront.

pub mod booking;
pub mod cart_item;
pub mod notification;
pub mod order;
pub mod product;
pub mod user;

pub use booking::{Booking, BookingStatus};
pub use cart_item::CartItem;
pub use notification::Notification;
pub use order::{Order, OrderItem, OrderStatus};
pub use product::{Product, ProductDraft, ProductPatch};
pub use user::{User, UserRole};

/// Shape checks applied to every record read back from storage.
///
/// Serde already enforces field presence and types; `validate` covers the
/// constraints the type system does not express. Returning `Err` marks the
/// whole stored collection as corrupt.
pub trait Record {
  fn validate(&self) -> Result<(), String>;

  /// Identity that must be unique within a stored collection, if the record has one.
  fn unique_key(&self) -> Option<String> {
    None
  }
}

pub(crate) fn check_price(label: &str, price: f64) -> Result<(), String> {
  if price.is_finite() && price >= 0.0 {
    Ok(())
  } else {
    Err(format!("{label} must be a finite, non-negative amount (got {price})"))
  }
}

pub(crate) fn check_non_empty(label: &str, value: &str) -> Result<(), String> {
  if value.trim().is_empty() {
    Err(format!("{label} must not be empty"))
  } else {
    Ok(())
  }
}
