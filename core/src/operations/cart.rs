// storefront/src/operations/cart.rs

use crate::error::{PipelineError, StoreError, StoreResult};
use crate::models::CartItem;
use crate::operations::contexts::AddToCartCtxData;
use crate::persistence::KeyValueStore;
use crate::pipeline::{Pipeline, PipelineControl};
use crate::storefront::Storefront;
use tracing::{info, instrument, warn};

pub(crate) fn add_to_cart_pipeline() -> Result<Pipeline<AddToCartCtxData, StoreError>, PipelineError> {
  let mut p = Pipeline::<AddToCartCtxData, StoreError>::new(&[
    ("validate_cart_input", false, None),
    ("fetch_product_for_cart", false, None),
    ("check_product_stock_for_cart", false, None),
    ("add_or_update_cart_item", false, None),
  ]);

  p.on_root("validate_cart_input", |ctx: &mut AddToCartCtxData| -> Result<PipelineControl, StoreError> {
    if ctx.quantity == 0 {
      warn!("Add to cart rejected: quantity must be positive.");
      return Err(StoreError::Validation("Quantity must be at least 1.".to_string()));
    }
    Ok(PipelineControl::Continue)
  })?;

  p.on_root("fetch_product_for_cart", |ctx: &mut AddToCartCtxData| -> Result<PipelineControl, StoreError> {
    let product = ctx
      .catalog
      .iter()
      .find(|p| p.id == ctx.product_id)
      .cloned()
      .ok_or_else(|| StoreError::NotFound(format!("product {}", ctx.product_id)))?;
    ctx.fetched_product = Some(product);
    Ok(PipelineControl::Continue)
  })?;

  // Only the requested quantity is checked here; checkout checks the cart total per line.
  p.on_root("check_product_stock_for_cart", |ctx: &mut AddToCartCtxData| -> Result<PipelineControl, StoreError> {
    let available = ctx.fetched_product.as_ref().map_or(0, |p| p.stock);
    if available < ctx.quantity {
      warn!(
        product_id = ctx.product_id,
        available,
        requested = ctx.quantity,
        "Add to cart rejected: insufficient stock."
      );
      return Err(StoreError::Validation("Not enough stock.".to_string()));
    }
    Ok(PipelineControl::Continue)
  })?;

  p.on_root("add_or_update_cart_item", |ctx: &mut AddToCartCtxData| -> Result<PipelineControl, StoreError> {
    let line = match ctx.cart.iter().position(|c| c.id() == ctx.product_id) {
      Some(idx) => {
        let line = &mut ctx.cart[idx];
        line.qty = line
          .qty
          .checked_add(ctx.quantity)
          .ok_or_else(|| StoreError::Validation("Quantity is too large.".to_string()))?;
        line.clone()
      }
      None => {
        let product = ctx
          .fetched_product
          .clone()
          .ok_or_else(|| StoreError::NotFound(format!("product {}", ctx.product_id)))?;
        let line = CartItem::new(product, ctx.quantity);
        ctx.cart.push(line.clone());
        line
      }
    };
    ctx.updated_cart_item = Some(line);
    Ok(PipelineControl::Continue)
  })?;

  Ok(p)
}

impl<S: KeyValueStore> Storefront<S> {
  /// Adds `qty` of a product to the signed-in user's cart, merging into an
  /// existing line. Returns the updated line.
  #[instrument(name = "Storefront::add_to_cart", skip(self))]
  pub fn add_to_cart(&mut self, product_id: u64, qty: u32) -> StoreResult<CartItem> {
    let username = self
      .session
      .require_user("Please login as a customer to add to cart.")?
      .username
      .clone();
    let mut ctx = AddToCartCtxData {
      username,
      product_id,
      quantity: qty,
      catalog: self.state.products.clone(),
      fetched_product: None,
      cart: self.state.cart.clone(),
      updated_cart_item: None,
    };
    self.pipelines.add_to_cart.run(&mut ctx)?;

    let line = ctx
      .updated_cart_item
      .ok_or_else(|| StoreError::Validation("Cart was not updated.".to_string()))?;
    self.save_cart(ctx.cart)?;
    info!(username = %ctx.username, product_id, qty = line.qty, "Cart line updated.");
    Ok(line)
  }

  /// Sets the quantity of a cart line; zero or less removes it.
  ///
  /// Live stock is not consulted here.
  #[instrument(name = "Storefront::update_cart_qty", skip(self))]
  pub fn update_cart_qty(&mut self, product_id: u64, qty: i64) -> StoreResult<()> {
    self.session.require_user("Please login to use the cart.")?;
    let mut next = self.state.cart.clone();
    let idx = next
      .iter()
      .position(|c| c.id() == product_id)
      .ok_or_else(|| StoreError::NotFound(format!("cart line for product {product_id}")))?;
    if qty <= 0 {
      next.remove(idx);
    } else {
      next[idx].qty = u32::try_from(qty).map_err(|_| StoreError::Validation(format!("Quantity {qty} is too large.")))?;
    }
    self.save_cart(next)
  }

  pub fn remove_from_cart(&mut self, product_id: u64) -> StoreResult<()> {
    self.update_cart_qty(product_id, 0)
  }

  /// Σ price × qty over the cart, at the prices captured when the lines were added.
  pub fn cart_total(&self) -> f64 {
    self.state.cart.iter().map(CartItem::line_total).sum()
  }
}
