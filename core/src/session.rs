// storefront/src/session.rs

use crate::error::{StoreError, StoreResult};
use crate::models::User;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Screen the presentation layer shows. Transient, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
  #[default]
  Shop,
  Admin,
  Cart,
  Orders,
  Dashboard,
  Bookings,
  Notifications,
  Profile,
  Login,
}

impl fmt::Display for View {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      View::Shop => "shop",
      View::Admin => "admin",
      View::Cart => "cart",
      View::Orders => "orders",
      View::Dashboard => "dashboard",
      View::Bookings => "bookings",
      View::Notifications => "notifications",
      View::Profile => "profile",
      View::Login => "login",
    };
    f.write_str(name)
  }
}

/// Who is signed in and what they are looking at.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
  user: Option<User>,
  view: View,
}

impl Session {
  pub fn current_user(&self) -> Option<&User> {
    self.user.as_ref()
  }

  pub fn view(&self) -> View {
    self.view
  }

  pub fn set_view(&mut self, view: View) {
    self.view = view;
  }

  /// Signs `user` in and lands on their home view.
  pub(crate) fn open(&mut self, user: User) {
    self.view = if user.is_admin() { View::Admin } else { View::Shop };
    self.user = Some(user);
  }

  pub(crate) fn close(&mut self) {
    self.user = None;
    self.view = View::Shop;
  }

  /// The signed-in user, or a rejection carrying `message`.
  pub fn require_user(&self, message: &str) -> StoreResult<&User> {
    self.user.as_ref().ok_or_else(|| StoreError::Forbidden(message.to_string()))
  }

  pub fn require_admin(&self) -> StoreResult<&User> {
    match &self.user {
      Some(user) if user.is_admin() => Ok(user),
      Some(_) => Err(StoreError::Forbidden("Only an admin can do that.".to_string())),
      None => Err(StoreError::Forbidden("Please login as an admin.".to_string())),
    }
  }
}
