// storefront/src/models/cart_item.rs

use super::{Product, Record};
use serde::{Deserialize, Serialize};

/// A cart line: the product as it looked when added, plus the quantity.
///
/// Serialized flat, i.e. the product fields side by side with `qty`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
  #[serde(flatten)]
  pub product: Product,
  pub qty: u32,
}

impl CartItem {
  pub fn new(product: Product, qty: u32) -> Self {
    Self { product, qty }
  }

  pub fn id(&self) -> u64 {
    self.product.id
  }

  pub fn line_total(&self) -> f64 {
    self.product.price * f64::from(self.qty)
  }
}

impl Record for CartItem {
  fn validate(&self) -> Result<(), String> {
    self.product.validate()?;
    if self.qty == 0 {
      return Err(format!("cart line {} has a zero quantity", self.product.id));
    }
    Ok(())
  }

  fn unique_key(&self) -> Option<String> {
    Some(self.product.id.to_string())
  }
}
