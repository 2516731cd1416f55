// storefront/src/lib.rs

//! Storefront: a single-user shop engine over a local key-value store.
//!
//! It covers the product catalog, per-user carts, checkout, order tracking,
//! notifications and service bookings. Every collection is stored as a JSON
//! document under a fixed key of a [`KeyValueStore`].
//!
//! Multi-step operations (register, add to cart, checkout) are [`Pipeline`]s
//! of named steps with before/on/after hooks. A pipeline works on an owned
//! context, and the [`Storefront`] persists the outcome once it completes.

/*
    Typical flow:
    1. Open a store, e.g. `FileStore::open("./storefront-data")?`.
    2. `Storefront::open(store, SeedPolicy::SampleData)?` loads every collection.
    3. `login("alice")`, then `add_to_cart(1, 2)` and `checkout(details)`.
    4. Rejections come back as `StoreError` and leave state untouched.
*/

pub mod clock;
pub mod error;
pub mod ids;
pub mod models;
pub mod operations;
pub mod persistence;
pub mod pipeline;
pub mod repository;
pub mod session;
pub mod state;
pub mod storefront;

pub use crate::clock::{Clock, FixedClock, SystemClock};
pub use crate::error::{PipelineError, StoreError, StoreResult};
pub use crate::ids::IdAllocator;
pub use crate::models::{
  Booking, BookingStatus, CartItem, Notification, Order, OrderItem, OrderStatus, Product, ProductDraft, ProductPatch,
  User, UserRole,
};
pub use crate::operations::{DashboardSummary, StockFilter};
pub use crate::persistence::{FileStore, JsonStore, KeyValueStore, MemoryStore};
pub use crate::pipeline::{Pipeline, PipelineControl, PipelineResult, StepDef};
pub use crate::repository::Repository;
pub use crate::session::{Session, View};
pub use crate::state::AppState;
pub use crate::storefront::{SeedPolicy, Storefront};
