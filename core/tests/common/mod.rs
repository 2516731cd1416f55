// tests/common/mod.rs
#![allow(dead_code)] // Each test binary uses a different subset.

use chrono::{TimeZone, Utc};
use std::cell::Cell;
use std::rc::Rc;
use storefront::persistence::keys;
use storefront::{
  FixedClock, JsonStore, KeyValueStore, MemoryStore, PipelineControl, PipelineError, Product, SeedPolicy, Storefront,
};
use tracing::Level;

// --- Pipeline test context ---
#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  pub message: String,
  pub steps_executed: Vec<String>,
  pub should_stop_at: Option<String>,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Pipeline engine error: {0}")]
  Engine(String),

  #[error("Test handler failed: {0}")]
  Handler(String),
}

impl From<PipelineError> for TestError {
  fn from(e: PipelineError) -> Self {
    TestError::Engine(format!("{:?}", e))
  }
}

pub fn create_simple_handler(
  step_name: &'static str,
  message_to_append: &'static str,
) -> storefront::pipeline::Handler<TestContext, TestError> {
  Box::new(move |ctx: &mut TestContext| -> Result<PipelineControl, TestError> {
    ctx.counter += 1;
    ctx.message.push_str(message_to_append);
    ctx.steps_executed.push(step_name.to_string());
    tracing::debug!(target: "test_handlers", step = %step_name, "executed, counter: {}, message: '{}'", ctx.counter, ctx.message);
    if ctx.should_stop_at.as_deref() == Some(step_name) {
      return Ok(PipelineControl::Stop);
    }
    Ok(PipelineControl::Continue)
  })
}

pub fn create_failing_handler(
  step_name: &'static str,
  error_message: &'static str,
) -> storefront::pipeline::Handler<TestContext, TestError> {
  Box::new(move |ctx: &mut TestContext| -> Result<PipelineControl, TestError> {
    ctx.steps_executed.push(step_name.to_string());
    tracing::warn!(target: "test_handlers", step = %step_name, "failing with: '{}'", error_message);
    Err(TestError::Handler(error_message.to_string()))
  })
}

// --- Tracing setup, once per test binary ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Storefront fixtures ---
pub fn test_clock() -> FixedClock {
  FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
}

pub fn open_on<S: KeyValueStore>(store: S) -> Storefront<S> {
  setup_tracing();
  Storefront::open_with_clock(store, SeedPolicy::SampleData, Box::new(test_clock())).unwrap()
}

/// A storefront on a fresh in-memory store with the sample catalog and users.
pub fn seeded_storefront() -> Storefront<MemoryStore> {
  open_on(MemoryStore::new())
}

pub fn logged_in_as(username: &str) -> Storefront<MemoryStore> {
  let mut sf = seeded_storefront();
  sf.login(username).unwrap();
  sf
}

pub fn product(id: u64, name: &str, price: f64, stock: u32) -> Product {
  Product {
    id,
    name: name.to_string(),
    description: format!("{name} description"),
    price,
    stock,
    image: String::new(),
  }
}

/// An in-memory store whose catalog is exactly `products`.
pub fn store_with_products(products: &[Product]) -> MemoryStore {
  let mut store = MemoryStore::new();
  store.set(keys::PRODUCTS, products).unwrap();
  store
}

pub fn stock_of<S: KeyValueStore>(sf: &Storefront<S>, id: u64) -> u32 {
  sf.state().product(id).map(|p| p.stock).unwrap()
}

/// Reads behave like `MemoryStore`; writes fail once `fail_writes` is set.
#[derive(Debug, Default)]
pub struct FlakyStore {
  pub inner: MemoryStore,
  pub fail_writes: Rc<Cell<bool>>,
}

impl KeyValueStore for FlakyStore {
  fn read(&self, key: &str) -> std::io::Result<Option<String>> {
    self.inner.read(key)
  }

  fn write(&mut self, key: &str, raw: &str) -> std::io::Result<()> {
    if self.fail_writes.get() {
      return Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "store is read-only"));
    }
    self.inner.write(key, raw)
  }

  fn delete(&mut self, key: &str) -> std::io::Result<()> {
    self.inner.delete(key)
  }
}
