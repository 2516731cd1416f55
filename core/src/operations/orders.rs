// storefront/src/operations/orders.rs

use crate::error::{StoreError, StoreResult};
use crate::models::{Order, OrderStatus};
use crate::persistence::KeyValueStore;
use crate::storefront::Storefront;
use tracing::{info, instrument, warn};

impl<S: KeyValueStore> Storefront<S> {
  /// Moves an order along its status table. Admin only.
  #[instrument(name = "Storefront::update_order_status", skip(self))]
  pub fn update_order_status(&mut self, id: u64, status: OrderStatus) -> StoreResult<Order> {
    self.session.require_admin()?;
    self.transition_order(id, status)
  }

  /// Lets a customer cancel one of their own pending orders.
  ///
  /// Admins are routed through [`Storefront::update_order_status`].
  #[instrument(name = "Storefront::cancel_order", skip(self))]
  pub fn cancel_order(&mut self, id: u64) -> StoreResult<Order> {
    let user = self.session.require_user("Please login to manage orders.")?;
    if user.is_admin() {
      return self.update_order_status(id, OrderStatus::Cancelled);
    }
    let username = user.username.clone();
    let order = self.order(id)?;
    if order.customer != username {
      warn!(order_id = id, %username, "Cancel rejected: order belongs to another customer.");
      return Err(StoreError::Forbidden("You can only cancel your own orders.".to_string()));
    }
    if order.status != OrderStatus::Pending {
      return Err(StoreError::InvalidTransition {
        entity: "order",
        from: order.status.to_string(),
        to: OrderStatus::Cancelled.to_string(),
      });
    }
    self.transition_order(id, OrderStatus::Cancelled)
  }

  /// Orders the signed-in user may see, newest first.
  pub fn visible_orders(&self) -> Vec<&Order> {
    match self.session.current_user() {
      Some(user) if user.is_admin() => self.state.orders.iter().collect(),
      Some(user) => self.state.orders.iter().filter(|o| o.customer == user.username).collect(),
      None => Vec::new(),
    }
  }

  pub fn recent_orders(&self, n: usize) -> &[Order] {
    &self.state.orders[..n.min(self.state.orders.len())]
  }

  fn order(&self, id: u64) -> StoreResult<&Order> {
    self
      .state
      .orders
      .iter()
      .find(|o| o.id == id)
      .ok_or_else(|| StoreError::NotFound(format!("order {id}")))
  }

  fn transition_order(&mut self, id: u64, status: OrderStatus) -> StoreResult<Order> {
    let current = self.order(id)?.status;
    if !current.can_transition_to(status) {
      return Err(StoreError::InvalidTransition {
        entity: "order",
        from: current.to_string(),
        to: status.to_string(),
      });
    }
    let mut next = self.state.orders.clone();
    let mut updated = None;
    for order in next.iter_mut().filter(|o| o.id == id) {
      order.status = status;
      updated = Some(order.clone());
    }
    let updated = updated.ok_or_else(|| StoreError::NotFound(format!("order {id}")))?;
    self.save_orders(next)?;
    info!(order_id = id, from = %current, to = %status, "Order status changed.");
    Ok(updated)
  }
}
