// storefront/src/storefront.rs

//! The controller every caller goes through.
//!
//! A `Storefront` owns the store, the in-memory [`AppState`], the transient
//! [`Session`], the clock and the id allocator. Operations live in
//! `crate::operations`, one `impl` block per area.

use crate::clock::{Clock, SystemClock};
use crate::error::StoreResult;
use crate::ids::IdAllocator;
use crate::models::{Booking, CartItem, Notification, Order, Product, User};
use crate::operations::Pipelines;
use crate::persistence::KeyValueStore;
use crate::repository::Repository;
use crate::session::{Session, View};
use crate::state::AppState;
use tracing::{info, instrument};

/// Whether missing products/users collections are filled with sample data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedPolicy {
  #[default]
  SampleData,
  Empty,
}

/// One repository per collection. The cart repository follows the session.
pub(crate) struct Repositories {
  pub(crate) products: Repository<Product>,
  pub(crate) users: Repository<User>,
  pub(crate) orders: Repository<Order>,
  pub(crate) notifications: Repository<Notification>,
  pub(crate) bookings: Repository<Booking>,
}

pub struct Storefront<S: KeyValueStore> {
  pub(crate) store: S,
  pub(crate) clock: Box<dyn Clock>,
  pub(crate) ids: IdAllocator,
  pub(crate) repos: Repositories,
  pub(crate) state: AppState,
  pub(crate) session: Session,
  pub(crate) pipelines: Pipelines,
}

impl<S: KeyValueStore> Storefront<S> {
  /// Opens a storefront on `store` with the system clock.
  pub fn open(store: S, seed: SeedPolicy) -> StoreResult<Self> {
    Self::open_with_clock(store, seed, Box::new(SystemClock))
  }

  /// Loads every collection, seeding products and users when allowed.
  #[instrument(name = "Storefront::open", skip_all, fields(seed = ?seed))]
  pub fn open_with_clock(mut store: S, seed: SeedPolicy, clock: Box<dyn Clock>) -> StoreResult<Self> {
    let seeded = seed == SeedPolicy::SampleData;
    let repos = Repositories {
      products: Repository::products(seeded),
      users: Repository::users(seeded),
      orders: Repository::orders(),
      notifications: Repository::notifications(),
      bookings: Repository::bookings(),
    };

    let state = AppState {
      products: repos.products.load(&mut store),
      users: repos.users.load(&mut store),
      orders: repos.orders.load(&mut store),
      notifications: repos.notifications.load(&mut store),
      bookings: repos.bookings.load(&mut store),
      cart: Vec::new(),
    };

    let ids = IdAllocator::starting_after(
      state
        .orders
        .iter()
        .map(|o| o.id)
        .chain(state.notifications.iter().map(|n| n.id))
        .chain(state.bookings.iter().map(|b| b.id)),
    );

    info!(
      products = state.products.len(),
      users = state.users.len(),
      orders = state.orders.len(),
      notifications = state.notifications.len(),
      bookings = state.bookings.len(),
      "Storefront state loaded."
    );

    Ok(Self {
      store,
      clock,
      ids,
      repos,
      state,
      session: Session::default(),
      pipelines: Pipelines::build()?,
    })
  }

  pub fn state(&self) -> &AppState {
    &self.state
  }

  pub fn session(&self) -> &Session {
    &self.session
  }

  pub fn current_user(&self) -> Option<&User> {
    self.session.current_user()
  }

  pub fn set_view(&mut self, view: View) {
    self.session.set_view(view);
  }

  pub fn products(&self) -> &[Product] {
    &self.state.products
  }

  pub fn users(&self) -> &[User] {
    &self.state.users
  }

  pub fn cart(&self) -> &[CartItem] {
    &self.state.cart
  }

  /// All orders, newest first.
  pub fn orders(&self) -> &[Order] {
    &self.state.orders
  }

  /// All notifications, newest first.
  pub fn notifications(&self) -> &[Notification] {
    &self.state.notifications
  }

  /// All bookings, newest first.
  pub fn bookings(&self) -> &[Booking] {
    &self.state.bookings
  }

  /// Swaps the timestamp source, e.g. to replay a scenario at a fixed time.
  pub fn set_clock(&mut self, clock: Box<dyn Clock>) {
    self.clock = clock;
  }

  pub fn store(&self) -> &S {
    &self.store
  }

  /// Hands the store back, e.g. to reopen it in a later session.
  pub fn into_store(self) -> S {
    self.store
  }

  pub(crate) fn cart_repository(&self) -> Option<Repository<CartItem>> {
    self.session.current_user().map(|u| Repository::cart(&u.username))
  }
}
