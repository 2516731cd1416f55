// storefront/src/persistence/keys.rs

//! Names of the persisted collections.

pub const PRODUCTS: &str = "demo_products";
pub const USERS: &str = "demo_users";
pub const ORDERS: &str = "demo_orders";
pub const NOTIFICATIONS: &str = "demo_notifications";
pub const BOOKINGS: &str = "demo_bookings";

const CART_PREFIX: &str = "demo_cart_";

/// Key of the cart owned by `username`.
pub fn cart(username: &str) -> String {
  format!("{CART_PREFIX}{username}")
}
