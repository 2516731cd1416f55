// storefront/src/models/user.rs

use super::{check_non_empty, Record};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
  Admin,
  Customer,
}

/// A directory entry. `username` is the unique key; users are never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub username: String,
  pub role: UserRole,
  pub name: String,
}

impl User {
  pub fn customer(username: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      username: username.into(),
      role: UserRole::Customer,
      name: name.into(),
    }
  }

  pub fn is_admin(&self) -> bool {
    self.role == UserRole::Admin
  }
}

impl Record for User {
  fn validate(&self) -> Result<(), String> {
    check_non_empty("username", &self.username)
  }

  fn unique_key(&self) -> Option<String> {
    Some(self.username.clone())
  }
}

pub fn sample_users() -> Vec<User> {
  vec![
    User {
      username: "admin".to_string(),
      role: UserRole::Admin,
      name: "Admin User".to_string(),
    },
    User::customer("alice", "Alice Customer"),
  ]
}
