// storefront/src/operations/mod.rs

//! Domain operations of the storefront.
//!
//! Multi-step operations (sign in, register, add to cart, checkout) run as pipelines
//! over an owned context: the pipeline decides, then the storefront persists
//! what changed. Single-step operations are plain methods.

pub mod contexts;

mod auth;
mod bookings;
mod cart;
mod catalog;
mod checkout;
mod notifications;
mod orders;
mod reports;

pub use reports::{DashboardSummary, StockFilter};

use crate::error::{PipelineError, StoreError, StoreResult};
use crate::models::{Booking, CartItem, Notification, Order, Product, User};
use crate::persistence::KeyValueStore;
use crate::pipeline::Pipeline;
use crate::storefront::Storefront;
use contexts::{AddToCartCtxData, CheckoutCtxData, RegisterCtxData, SignInCtxData};

/// The pipelines a storefront runs, built once when it opens.
pub struct Pipelines {
  pub(crate) sign_in: Pipeline<SignInCtxData, StoreError>,
  pub(crate) register: Pipeline<RegisterCtxData, StoreError>,
  pub(crate) add_to_cart: Pipeline<AddToCartCtxData, StoreError>,
  pub(crate) checkout: Pipeline<CheckoutCtxData, StoreError>,
}

impl Pipelines {
  pub fn build() -> Result<Self, PipelineError> {
    let pipelines = Self {
      sign_in: auth::sign_in_pipeline()?,
      register: auth::register_pipeline()?,
      add_to_cart: cart::add_to_cart_pipeline()?,
      checkout: checkout::checkout_pipeline()?,
    };
    tracing::debug!("Storefront pipelines built.");
    Ok(pipelines)
  }
}

// Each save writes the collection first and only then swaps the in-memory copy.
impl<S: KeyValueStore> Storefront<S> {
  pub(crate) fn save_products(&mut self, next: Vec<Product>) -> StoreResult<()> {
    self.repos.products.replace(&mut self.store, &next)?;
    self.state.products = next;
    Ok(())
  }

  pub(crate) fn save_users(&mut self, next: Vec<User>) -> StoreResult<()> {
    self.repos.users.replace(&mut self.store, &next)?;
    self.state.users = next;
    Ok(())
  }

  pub(crate) fn save_orders(&mut self, next: Vec<Order>) -> StoreResult<()> {
    self.repos.orders.replace(&mut self.store, &next)?;
    self.state.orders = next;
    Ok(())
  }

  pub(crate) fn save_notifications(&mut self, next: Vec<Notification>) -> StoreResult<()> {
    self.repos.notifications.replace(&mut self.store, &next)?;
    self.state.notifications = next;
    Ok(())
  }

  pub(crate) fn save_bookings(&mut self, next: Vec<Booking>) -> StoreResult<()> {
    self.repos.bookings.replace(&mut self.store, &next)?;
    self.state.bookings = next;
    Ok(())
  }

  /// Writes the cart of the signed-in user.
  pub(crate) fn save_cart(&mut self, next: Vec<CartItem>) -> StoreResult<()> {
    let repo = self
      .cart_repository()
      .ok_or_else(|| StoreError::Forbidden("Please login to use the cart.".to_string()))?;
    repo.replace(&mut self.store, &next)?;
    self.state.cart = next;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn checkout_runs_its_steps_in_order() {
    let pipelines = Pipelines::build().unwrap();
    assert_eq!(
      pipelines.checkout.step_names(),
      vec!["ensure_cart_not_empty", "revalidate_stock", "decrement_stock", "record_order", "clear_cart"]
    );
    assert_eq!(
      pipelines.add_to_cart.step_names(),
      vec![
        "validate_cart_input",
        "fetch_product_for_cart",
        "check_product_stock_for_cart",
        "add_or_update_cart_item"
      ]
    );
  }
}
