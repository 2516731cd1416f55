// storefront/src/operations/notifications.rs

use crate::error::{StoreError, StoreResult};
use crate::models::Notification;
use crate::persistence::KeyValueStore;
use crate::storefront::Storefront;
use tracing::{info, instrument};

impl<S: KeyValueStore> Storefront<S> {
  /// Posts a notice to every visitor. Admin only; the newest notice comes first.
  #[instrument(name = "Storefront::post_notification", skip(self, message))]
  pub fn post_notification(&mut self, title: &str, message: &str) -> StoreResult<Notification> {
    self.session.require_admin()?;
    let (title, message) = (title.trim(), message.trim());
    if title.is_empty() || message.is_empty() {
      return Err(StoreError::Validation("Fill both title and message.".to_string()));
    }
    let posted_at = self.clock.now();
    let notification = Notification {
      id: self.ids.next(posted_at)?,
      title: title.to_string(),
      message: message.to_string(),
      posted_at,
    };

    let mut next = self.state.notifications.clone();
    next.insert(0, notification.clone());
    self.save_notifications(next)?;
    info!(notification_id = notification.id, "Notification posted.");
    Ok(notification)
  }

  #[instrument(name = "Storefront::remove_notification", skip(self))]
  pub fn remove_notification(&mut self, id: u64) -> StoreResult<Notification> {
    self.session.require_admin()?;
    let mut next = self.state.notifications.clone();
    let idx = next
      .iter()
      .position(|n| n.id == id)
      .ok_or_else(|| StoreError::NotFound(format!("notification {id}")))?;
    let removed = next.remove(idx);
    self.save_notifications(next)?;
    info!(notification_id = id, "Notification removed.");
    Ok(removed)
  }
}
