// tests/persistence_tests.rs
mod common;

use common::*;
use storefront::persistence::keys;
use storefront::{
  CartItem, FileStore, JsonStore, KeyValueStore, MemoryStore, Product, SeedPolicy, StoreError, Storefront,
};

#[test]
fn first_open_seeds_products_and_users() {
  let sf = seeded_storefront();
  assert_eq!(sf.products().len(), 3);
  assert_eq!(sf.users().len(), 2);
  assert!(sf.orders().is_empty());
  let stored: Vec<Product> = sf.store().get(keys::PRODUCTS, Vec::new());
  assert_eq!(stored.len(), 3);
}

#[test]
fn empty_seed_policy_leaves_collections_empty() {
  setup_tracing();
  let sf = Storefront::open(MemoryStore::new(), SeedPolicy::Empty).unwrap();
  assert!(sf.products().is_empty());
  assert!(sf.users().is_empty());
  assert!(sf.store().is_empty());
}

#[test]
fn corrupt_collections_fall_back_silently() {
  let mut store = MemoryStore::new();
  store.insert_raw(keys::PRODUCTS, "{not json");
  store.insert_raw(keys::ORDERS, r#"[{"id": "oops"}]"#);
  store.insert_raw(keys::NOTIFICATIONS, r#"[{"id": 1, "title": "", "message": "m", "postedAt": "2024-05-01T12:00:00Z"}]"#);

  let sf = open_on(store);
  assert_eq!(sf.products().len(), 3);
  assert!(sf.orders().is_empty());
  assert!(sf.notifications().is_empty());
}

#[test]
fn corrupt_cart_loads_as_empty() {
  let mut store = MemoryStore::new();
  store.insert_raw(keys::cart("alice"), r#"[{"id": 1, "qty": 2}]"#);
  let mut sf = open_on(store);
  sf.login("alice").unwrap();
  assert!(sf.cart().is_empty());
}

#[test]
fn cart_lines_are_stored_flattened() {
  let mut sf = logged_in_as("alice");
  sf.add_to_cart(1, 2).unwrap();
  let raw = sf.store().read(&keys::cart("alice")).unwrap().unwrap();
  let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
  assert_eq!(value[0]["id"], 1);
  assert_eq!(value[0]["name"], "Smartphone");
  assert_eq!(value[0]["qty"], 2);
}

#[test]
fn state_survives_a_restart_on_disk() {
  let dir = tempfile::tempdir().unwrap();
  let order_id = {
    let mut sf = open_on(FileStore::open(dir.path()).unwrap());
    sf.login("alice").unwrap();
    sf.add_to_cart(1, 3).unwrap();
    sf.add_to_cart(2, 1).unwrap();
    sf.remove_from_cart(2).unwrap();
    sf.checkout(serde_json::Map::new()).unwrap().id
  };

  let mut sf = open_on(FileStore::open(dir.path()).unwrap());
  assert_eq!(stock_of(&sf, 1), 7);
  assert_eq!(sf.orders()[0].id, order_id);
  assert_eq!(sf.orders()[0].total, 750.0);
  sf.login("alice").unwrap();
  assert!(sf.cart().is_empty());

  sf.add_to_cart(3, 1).unwrap();
  let sf = open_on(FileStore::open(dir.path()).unwrap());
  let cart: Vec<CartItem> = sf.store().get(&keys::cart("alice"), Vec::new());
  assert_eq!(cart.len(), 1);
}

#[test]
fn ids_stay_above_persisted_ids_after_reopen() {
  let mut sf = logged_in_as("admin");
  let first = sf.post_notification("One", "first").unwrap();
  let mut sf = open_on(sf.into_store());
  sf.login("admin").unwrap();
  let second = sf.post_notification("Two", "second").unwrap();
  assert!(second.id > first.id);
}

#[test]
fn failed_writes_leave_memory_state_untouched() {
  let store = FlakyStore::default();
  let fail_writes = store.fail_writes.clone();
  let mut sf = open_on(store);
  sf.login("admin").unwrap();
  fail_writes.set(true);

  let err = sf.delete_product(1).unwrap_err();
  assert!(matches!(err, StoreError::Storage { ref key, .. } if key == keys::PRODUCTS));
  assert!(!err.is_rejection());
  assert_eq!(sf.products().len(), 3);
}

#[test]
fn collections_with_repeated_ids_are_treated_as_corrupt() {
  let mut store = MemoryStore::new();
  let phone = product(1, "Smartphone", 250.0, 10);
  store
    .set(&keys::cart("alice"), &vec![CartItem::new(phone.clone(), 10), CartItem::new(phone.clone(), 10)])
    .unwrap();
  store.set(keys::PRODUCTS, &vec![phone.clone(), phone]).unwrap();

  let mut sf = open_on(store);
  assert_eq!(sf.products().len(), 3);
  sf.login("alice").unwrap();
  assert!(sf.cart().is_empty());
  let err = sf.checkout(serde_json::Map::new()).unwrap_err();
  assert_eq!(err.to_string(), "Cart is empty.");
  assert_eq!(stock_of(&sf, 1), 10);
}
