// storefront/src/operations/bookings.rs

use crate::error::{StoreError, StoreResult};
use crate::models::{Booking, BookingStatus};
use crate::persistence::KeyValueStore;
use crate::storefront::Storefront;
use chrono::{DateTime, Utc};
use tracing::{info, instrument};

impl<S: KeyValueStore> Storefront<S> {
  /// Requests a service appointment for the signed-in user.
  #[instrument(name = "Storefront::create_booking", skip(self))]
  pub fn create_booking(&mut self, service: &str, date: DateTime<Utc>) -> StoreResult<Booking> {
    let user = self.session.require_user("Login to create booking.")?.clone();
    let service = service.trim();
    if service.is_empty() {
      return Err(StoreError::Validation("Fill service and date.".to_string()));
    }
    let created_at = self.clock.now();
    let booking = Booking {
      id: self.ids.next(created_at)?,
      service: service.to_string(),
      date,
      customer: user.username,
      customer_name: user.name,
      status: BookingStatus::Requested,
      created_at,
    };

    let mut next = self.state.bookings.clone();
    next.insert(0, booking.clone());
    self.save_bookings(next)?;
    info!(booking_id = booking.id, customer = %booking.customer, "Booking requested.");
    Ok(booking)
  }

  #[instrument(name = "Storefront::update_booking_status", skip(self))]
  pub fn update_booking_status(&mut self, id: u64, status: BookingStatus) -> StoreResult<Booking> {
    self.session.require_admin()?;
    let mut next = self.state.bookings.clone();
    let booking = next
      .iter_mut()
      .find(|b| b.id == id)
      .ok_or_else(|| StoreError::NotFound(format!("booking {id}")))?;
    let current = booking.status;
    if !current.can_transition_to(status) {
      return Err(StoreError::InvalidTransition {
        entity: "booking",
        from: current.to_string(),
        to: status.to_string(),
      });
    }
    booking.status = status;
    let updated = booking.clone();
    self.save_bookings(next)?;
    info!(booking_id = id, from = %current, to = %status, "Booking status changed.");
    Ok(updated)
  }

  /// Bookings the signed-in user may see, newest first.
  pub fn visible_bookings(&self) -> Vec<&Booking> {
    match self.session.current_user() {
      Some(user) if user.is_admin() => self.state.bookings.iter().collect(),
      Some(user) => self.state.bookings.iter().filter(|b| b.customer == user.username).collect(),
      None => Vec::new(),
    }
  }
}
