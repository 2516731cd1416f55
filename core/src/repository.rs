// storefront/src/repository.rs

//! One repository per persisted collection.
//!
//! Repositories hold no state: `load` reads a collection out of a store and
//! `replace` writes one back. The caller owns the in-memory copy.

use crate::error::StoreResult;
use crate::models::booking::Booking;
use crate::models::cart_item::CartItem;
use crate::models::notification::Notification;
use crate::models::order::Order;
use crate::models::product::{sample_products, Product};
use crate::models::user::{sample_users, User};
use crate::models::Record;
use crate::persistence::{keys, JsonStore, KeyValueStore};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{error, info, warn};

/// Maps a collection of `E` to one key of the store.
#[derive(Debug, Clone)]
pub struct Repository<E> {
  key: String,
  seed: Option<fn() -> Vec<E>>,
}

impl<E> Repository<E>
where
  E: Record + Serialize + DeserializeOwned,
{
  /// `seed`, when given, is written the first time the key is found missing or corrupt.
  pub fn new(key: impl Into<String>, seed: Option<fn() -> Vec<E>>) -> Self {
    Self { key: key.into(), seed }
  }

  pub fn key(&self) -> &str {
    &self.key
  }

  /// Reads the collection. Missing or corrupt data yields the seed (persisted
  /// on the spot) or an empty sequence.
  pub fn load<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Vec<E> {
    if let Some(records) = self.read_valid(store) {
      return records;
    }
    let Some(seed) = self.seed else {
      return Vec::new();
    };
    let records = seed();
    match store.set(&self.key, &records) {
      Ok(()) => info!(key = %self.key, count = records.len(), "Seeded collection."),
      Err(e) => error!(key = %self.key, error = %e, "Could not persist seed data."),
    }
    records
  }

  /// Overwrites the stored collection with `next`.
  pub fn replace<S: KeyValueStore + ?Sized>(&self, store: &mut S, next: &[E]) -> StoreResult<()> {
    store.set(&self.key, next)
  }

  fn read_valid<S: KeyValueStore + ?Sized>(&self, store: &S) -> Option<Vec<E>> {
    let records: Vec<E> = store.try_get(&self.key)?;
    let mut seen = HashSet::new();
    for (idx, record) in records.iter().enumerate() {
      if let Err(reason) = record.validate() {
        warn!(key = %self.key, index = idx, %reason, "Stored collection failed validation, using fallback.");
        return None;
      }
      if let Some(unique_key) = record.unique_key() {
        if !seen.insert(unique_key) {
          warn!(key = %self.key, index = idx, "Stored collection repeats an id, using fallback.");
          return None;
        }
      }
    }
    Some(records)
  }
}

impl Repository<Product> {
  pub fn products(seeded: bool) -> Self {
    Self::new(keys::PRODUCTS, seeded.then_some(sample_products as fn() -> Vec<Product>))
  }
}

impl Repository<User> {
  pub fn users(seeded: bool) -> Self {
    Self::new(keys::USERS, seeded.then_some(sample_users as fn() -> Vec<User>))
  }
}

impl Repository<Order> {
  pub fn orders() -> Self {
    Self::new(keys::ORDERS, None)
  }
}

impl Repository<Notification> {
  pub fn notifications() -> Self {
    Self::new(keys::NOTIFICATIONS, None)
  }
}

impl Repository<Booking> {
  pub fn bookings() -> Self {
    Self::new(keys::BOOKINGS, None)
  }
}

impl Repository<CartItem> {
  /// The cart namespace of one user.
  pub fn cart(username: &str) -> Self {
    Self::new(keys::cart(username), None)
  }
}
