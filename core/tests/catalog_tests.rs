// tests/catalog_tests.rs
mod common;

use chrono::Duration;
use common::*;
use storefront::{OrderStatus, ProductDraft, ProductPatch, StockFilter, StoreError};

fn draft(name: &str, price: f64, stock: u32) -> ProductDraft {
  ProductDraft {
    name: name.to_string(),
    description: "Fresh stock".to_string(),
    price,
    stock,
    image: String::new(),
  }
}

#[test]
fn admin_creates_products_with_the_next_id() {
  let mut sf = logged_in_as("admin");
  let tablet = sf.create_product(draft("Tablet", 300.0, 4)).unwrap();
  assert_eq!(tablet.id, 4);
  assert_eq!(sf.products().last(), Some(&tablet));

  sf.delete_product(2).unwrap();
  assert_eq!(sf.create_product(draft("Watch", 120.0, 2)).unwrap().id, 5);
}

#[test]
fn product_drafts_are_validated() {
  let mut sf = logged_in_as("admin");
  assert!(matches!(sf.create_product(draft("  ", 10.0, 1)), Err(StoreError::Validation(_))));
  assert!(matches!(sf.create_product(draft("Cable", -1.0, 1)), Err(StoreError::Validation(_))));
  assert!(matches!(sf.create_product(draft("Cable", f64::INFINITY, 1)), Err(StoreError::Validation(_))));
  assert_eq!(sf.products().len(), 3);
}

#[test]
fn catalog_changes_are_admin_only() {
  let mut sf = logged_in_as("alice");
  assert!(matches!(sf.create_product(draft("Tablet", 1.0, 1)), Err(StoreError::Forbidden(_))));
  assert!(matches!(sf.delete_product(1), Err(StoreError::Forbidden(_))));
  assert!(matches!(sf.reset_products(), Err(StoreError::Forbidden(_))));
  sf.logout();
  assert!(matches!(sf.update_product(1, ProductPatch::default()), Err(StoreError::Forbidden(_))));
  assert_eq!(sf.products().len(), 3);
}

#[test]
fn update_merges_the_patch_and_rejects_unknown_ids() {
  let mut sf = logged_in_as("admin");
  let patch = ProductPatch {
    stock: Some(0),
    description: Some("Refurbished".to_string()),
    ..Default::default()
  };
  let updated = sf.update_product(3, patch.clone()).unwrap();
  assert_eq!(updated.name, "Laptop");
  assert_eq!(updated.stock, 0);
  assert_eq!(updated.description, "Refurbished");
  assert!(matches!(sf.update_product(99, patch), Err(StoreError::NotFound(_))));
  assert!(matches!(
    sf.update_product(
      3,
      ProductPatch {
        price: Some(f64::NAN),
        ..Default::default()
      }
    ),
    Err(StoreError::Validation(_))
  ));
}

#[test]
fn reset_restores_the_sample_catalog() {
  let mut sf = logged_in_as("admin");
  sf.delete_product(1).unwrap();
  sf.create_product(draft("Tablet", 300.0, 4)).unwrap();
  sf.reset_products().unwrap();
  let names: Vec<&str> = sf.products().iter().map(|p| p.name.as_str()).collect();
  assert_eq!(names, vec!["Smartphone", "Headphones", "Laptop"]);
  assert!(matches!(sf.delete_product(42), Err(StoreError::NotFound(_))));
}

#[test]
fn search_matches_name_and_description_case_insensitively() {
  let sf = seeded_storefront();
  let ids = |q: &str, f: StockFilter| sf.search_products(q, f).iter().map(|p| p.id).collect::<Vec<_>>();
  assert_eq!(ids("LAPTOP", StockFilter::All), vec![3]);
  assert_eq!(ids("noise", StockFilter::All), vec![2]);
  assert_eq!(ids("", StockFilter::All), vec![1, 2, 3]);
  assert_eq!(ids("", StockFilter::LowStock), vec![3]);
  assert!(ids("", StockFilter::OutOfStock).is_empty());
}

#[test]
fn stock_filters_parse_from_their_cli_names() {
  assert_eq!("low-stock".parse::<StockFilter>().unwrap(), StockFilter::LowStock);
  assert_eq!("Out-Of-Stock".parse::<StockFilter>().unwrap(), StockFilter::OutOfStock);
  assert_eq!("all".parse::<StockFilter>().unwrap(), StockFilter::All);
  assert!("plenty".parse::<StockFilter>().is_err());
}

#[test]
fn dashboard_excludes_cancelled_orders_from_sales() {
  let mut sf = logged_in_as("alice");
  sf.add_to_cart(1, 1).unwrap();
  sf.checkout(serde_json::Map::new()).unwrap();
  sf.add_to_cart(2, 2).unwrap();
  let cancelled = sf.checkout(serde_json::Map::new()).unwrap();
  sf.cancel_order(cancelled.id).unwrap();

  let summary = sf.dashboard();
  assert_eq!(summary.total_sales, 250.0);
  assert_eq!(summary.total_orders, 2);
  assert_eq!(summary.total_products, 3);
  assert_eq!(summary.recent_orders.len(), 2);
  assert_eq!(summary.recent_orders[0].status, OrderStatus::Cancelled);
}

#[test]
fn recent_orders_caps_at_the_requested_count() {
  let mut sf = logged_in_as("alice");
  for _ in 0..7 {
    sf.add_to_cart(2, 1).unwrap();
    sf.checkout(serde_json::Map::new()).unwrap();
  }
  assert_eq!(sf.recent_orders(5).len(), 5);
  assert_eq!(sf.recent_orders(50).len(), 7);
  assert_eq!(sf.dashboard().recent_orders.len(), 5);
}

#[test]
fn admin_posts_and_removes_notifications() {
  let mut sf = logged_in_as("admin");
  let first = sf.post_notification("Sale", "20% off headphones").unwrap();
  let mut clock = test_clock();
  clock.advance(Duration::minutes(5));
  sf.set_clock(Box::new(clock));
  let second = sf.post_notification("Closed", "Back on Monday").unwrap();

  assert_eq!(sf.notifications()[0].id, second.id);
  assert_eq!(second.posted_at, clock.0);
  assert!(matches!(sf.post_notification("", "x"), Err(StoreError::Validation(_))));

  sf.remove_notification(first.id).unwrap();
  assert_eq!(sf.notifications().len(), 1);
  assert!(matches!(sf.remove_notification(first.id), Err(StoreError::NotFound(_))));
}

#[test]
fn customers_cannot_post_notifications() {
  let mut sf = logged_in_as("alice");
  assert!(matches!(sf.post_notification("Hi", "there"), Err(StoreError::Forbidden(_))));
  assert!(sf.notifications().is_empty());
}
