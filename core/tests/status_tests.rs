// tests/status_tests.rs
mod common;

use chrono::{TimeZone, Utc};
use common::*;
use storefront::{BookingStatus, MemoryStore, OrderStatus, StoreError, Storefront};

/// Alice places one order, then the storefront is handed to `who`.
fn with_order_as(who: &str) -> (Storefront<MemoryStore>, u64) {
  let mut sf = logged_in_as("alice");
  sf.add_to_cart(1, 1).unwrap();
  let id = sf.checkout(serde_json::Map::new()).unwrap().id;
  sf.logout();
  sf.login(who).unwrap();
  (sf, id)
}

#[test]
fn admin_moves_an_order_through_shipping() {
  let (mut sf, id) = with_order_as("admin");
  assert_eq!(sf.update_order_status(id, OrderStatus::Shipped).unwrap().status, OrderStatus::Shipped);
  assert_eq!(sf.update_order_status(id, OrderStatus::Delivered).unwrap().status, OrderStatus::Delivered);
  assert_eq!(sf.orders()[0].status, OrderStatus::Delivered);
}

#[test]
fn pending_order_cannot_jump_to_delivered() {
  let (mut sf, id) = with_order_as("admin");
  let err = sf.update_order_status(id, OrderStatus::Delivered).unwrap_err();
  assert!(matches!(
    err,
    StoreError::InvalidTransition { entity: "order", ref from, ref to } if from == "pending" && to == "delivered"
  ));
  assert_eq!(sf.orders()[0].status, OrderStatus::Pending);
}

#[test]
fn terminal_orders_do_not_move() {
  let (mut sf, id) = with_order_as("admin");
  sf.update_order_status(id, OrderStatus::Cancelled).unwrap();
  assert!(sf.update_order_status(id, OrderStatus::Shipped).is_err());
  assert!(sf.update_order_status(id, OrderStatus::Pending).is_err());
}

#[test]
fn customers_cannot_set_order_status() {
  let (mut sf, id) = with_order_as("alice");
  assert!(matches!(sf.update_order_status(id, OrderStatus::Shipped), Err(StoreError::Forbidden(_))));
  assert!(matches!(sf.update_order_status(id + 1, OrderStatus::Shipped), Err(StoreError::Forbidden(_))));
}

#[test]
fn owner_cancels_own_pending_order_only() {
  let (mut sf, id) = with_order_as("admin");
  sf.update_order_status(id, OrderStatus::Shipped).unwrap();
  sf.logout();
  sf.login("alice").unwrap();
  assert!(matches!(sf.cancel_order(id), Err(StoreError::InvalidTransition { .. })));

  sf.add_to_cart(2, 1).unwrap();
  let second = sf.checkout(serde_json::Map::new()).unwrap().id;
  assert_eq!(sf.cancel_order(second).unwrap().status, OrderStatus::Cancelled);
}

#[test]
fn customers_cannot_cancel_someone_elses_order() {
  let (mut sf, id) = with_order_as("alice");
  sf.logout();
  sf.register("bob", "Bob").unwrap();
  assert!(matches!(sf.cancel_order(id), Err(StoreError::Forbidden(_))));
  assert!(matches!(sf.cancel_order(12345), Err(StoreError::NotFound(_))));
}

#[test]
fn admins_cancel_through_the_status_table() {
  let (mut sf, id) = with_order_as("admin");
  sf.update_order_status(id, OrderStatus::Shipped).unwrap();
  assert_eq!(sf.cancel_order(id).unwrap().status, OrderStatus::Cancelled);
}

#[test]
fn order_listing_follows_the_role() {
  let (mut sf, _) = with_order_as("admin");
  assert_eq!(sf.visible_orders().len(), 1);
  sf.logout();
  assert!(sf.visible_orders().is_empty());
  sf.register("bob", "Bob").unwrap();
  assert!(sf.visible_orders().is_empty());
  sf.logout();
  sf.login("alice").unwrap();
  assert_eq!(sf.visible_orders().len(), 1);
}

#[test]
fn customers_request_bookings_and_admins_confirm_them() {
  let mut sf = logged_in_as("alice");
  let date = Utc.with_ymd_and_hms(2024, 6, 3, 9, 30, 0).unwrap();
  let booking = sf.create_booking("  Screen repair ", date).unwrap();
  assert_eq!(booking.service, "Screen repair");
  assert_eq!(booking.status, BookingStatus::Requested);
  assert_eq!(booking.customer_name, "Alice Customer");
  assert!(matches!(sf.update_booking_status(booking.id, BookingStatus::Confirmed), Err(StoreError::Forbidden(_))));
  sf.logout();

  sf.login("admin").unwrap();
  let confirmed = sf.update_booking_status(booking.id, BookingStatus::Confirmed).unwrap();
  assert_eq!(confirmed.status, BookingStatus::Confirmed);
  assert!(matches!(
    sf.update_booking_status(booking.id, BookingStatus::Cancelled),
    Err(StoreError::InvalidTransition { entity: "booking", .. })
  ));
  assert!(matches!(sf.update_booking_status(1, BookingStatus::Cancelled), Err(StoreError::NotFound(_))));
}

#[test]
fn bookings_need_a_session_and_a_service() {
  let mut sf = seeded_storefront();
  let date = Utc.with_ymd_and_hms(2024, 6, 3, 9, 30, 0).unwrap();
  assert_eq!(sf.create_booking("Setup", date).unwrap_err().to_string(), "Login to create booking.");
  sf.login("alice").unwrap();
  assert_eq!(sf.create_booking(" ", date).unwrap_err().to_string(), "Fill service and date.");
  assert!(sf.bookings().is_empty());
}

#[test]
fn booking_listing_follows_the_role() {
  let mut sf = logged_in_as("alice");
  let date = Utc.with_ymd_and_hms(2024, 6, 3, 9, 30, 0).unwrap();
  let first = sf.create_booking("Setup", date).unwrap();
  let second = sf.create_booking("Repair", date).unwrap();
  assert!(second.id > first.id);
  assert_eq!(sf.visible_bookings()[0].id, second.id);
  sf.logout();
  assert!(sf.visible_bookings().is_empty());

  sf.register("bob", "Bob").unwrap();
  sf.create_booking("Cleaning", date).unwrap();
  assert_eq!(sf.visible_bookings().len(), 1);
  sf.logout();

  sf.login("admin").unwrap();
  assert_eq!(sf.visible_bookings().len(), 3);
}
