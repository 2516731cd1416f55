// storefront/src/operations/checkout.rs

use crate::error::{PipelineError, StoreError, StoreResult};
use crate::models::{CartItem, Order, OrderItem, OrderStatus};
use crate::operations::contexts::CheckoutCtxData;
use crate::persistence::KeyValueStore;
use crate::pipeline::{Pipeline, PipelineControl};
use crate::session::View;
use crate::storefront::Storefront;
use std::collections::BTreeMap;
use tracing::{info, instrument, warn};

pub(crate) fn checkout_pipeline() -> Result<Pipeline<CheckoutCtxData, StoreError>, PipelineError> {
  let mut p = Pipeline::<CheckoutCtxData, StoreError>::new(&[
    ("ensure_cart_not_empty", false, None),
    ("revalidate_stock", false, None),
    ("decrement_stock", false, None),
    ("record_order", false, None),
    ("clear_cart", false, None),
  ]);

  p.on_root("ensure_cart_not_empty", |ctx: &mut CheckoutCtxData| -> Result<PipelineControl, StoreError> {
    if ctx.cart.is_empty() {
      return Err(StoreError::Validation("Cart is empty.".to_string()));
    }
    Ok(PipelineControl::Continue)
  })?;

  // Stock may have dropped since the lines were added.
  p.on_root("revalidate_stock", |ctx: &mut CheckoutCtxData| -> Result<PipelineControl, StoreError> {
    let requested = requested_units(&ctx.cart);
    for line in &ctx.cart {
      let wanted = requested.get(&line.id()).copied().unwrap_or(line.qty);
      let available = ctx.catalog.iter().find(|p| p.id == line.id()).map(|p| p.stock);
      if available.map_or(true, |stock| stock < wanted) {
        warn!(
          product_id = line.id(),
          ?available,
          requested = wanted,
          "Checkout rejected: insufficient stock."
        );
        return Err(StoreError::Validation(format!("Not enough stock for {}", line.product.name)));
      }
    }
    Ok(PipelineControl::Continue)
  })?;

  p.on_root("decrement_stock", |ctx: &mut CheckoutCtxData| -> Result<PipelineControl, StoreError> {
    let requested = requested_units(&ctx.cart);
    for product in ctx.catalog.iter_mut() {
      if let Some(&units) = requested.get(&product.id) {
        product.stock = product
          .stock
          .checked_sub(units)
          .ok_or_else(|| StoreError::Validation(format!("Not enough stock for {}", product.name)))?;
      }
    }
    Ok(PipelineControl::Continue)
  })?;

  p.on_root("record_order", |ctx: &mut CheckoutCtxData| -> Result<PipelineControl, StoreError> {
    let items: Vec<OrderItem> = ctx.cart.iter().map(OrderItem::from).collect();
    let order = Order {
      id: ctx.ids.next(ctx.placed_at)?,
      customer: ctx.customer.username.clone(),
      customer_name: ctx.customer.name.clone(),
      total: Order::total_of(&items),
      items,
      status: OrderStatus::Pending,
      created_at: ctx.placed_at,
      details: ctx.details.clone(),
    };
    ctx.orders.insert(0, order.clone());
    ctx.placed_order = Some(order);
    Ok(PipelineControl::Continue)
  })?;

  p.on_root("clear_cart", |ctx: &mut CheckoutCtxData| -> Result<PipelineControl, StoreError> {
    ctx.cart.clear();
    Ok(PipelineControl::Continue)
  })?;

  Ok(p)
}

/// Units asked for per product id, summed over every line naming it.
fn requested_units(cart: &[CartItem]) -> BTreeMap<u64, u32> {
  let mut units = BTreeMap::new();
  for line in cart {
    let total: &mut u32 = units.entry(line.id()).or_insert(0);
    *total = total.saturating_add(line.qty);
  }
  units
}

impl<S: KeyValueStore> Storefront<S> {
  /// Turns the signed-in user's cart into a pending order.
  ///
  /// Stock, orders and cart are written one after the other. A storage
  /// failure after the stock write leaves stock decremented with no recorded
  /// order; nothing rolls it back.
  #[instrument(name = "Storefront::checkout", skip(self, details))]
  pub fn checkout(&mut self, details: serde_json::Map<String, serde_json::Value>) -> StoreResult<Order> {
    let customer = self.session.require_user("Please login to checkout.")?.clone();
    let placed_at = self.clock.now();
    let mut ctx = CheckoutCtxData {
      customer,
      cart: self.state.cart.clone(),
      catalog: self.state.products.clone(),
      orders: self.state.orders.clone(),
      details,
      ids: self.ids.clone(),
      placed_at,
      placed_order: None,
    };
    self.pipelines.checkout.run(&mut ctx)?;

    let order = ctx
      .placed_order
      .ok_or_else(|| StoreError::Validation("Checkout did not complete.".to_string()))?;
    self.ids = ctx.ids;
    self.save_products(ctx.catalog)?;
    self.save_orders(ctx.orders)?;
    self.save_cart(ctx.cart)?;
    self.session.set_view(View::Orders);
    info!(order_id = order.id, total = order.total, lines = order.items.len(), "Order placed.");
    Ok(order)
  }
}
