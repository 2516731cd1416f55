// storefront/src/models/product.rs

use super::{check_non_empty, check_price, Record};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub id: u64,
  pub name: String,
  pub description: String,
  pub price: f64,
  pub stock: u32,
  pub image: String,
}

impl Record for Product {
  fn validate(&self) -> Result<(), String> {
    check_non_empty("product name", &self.name)?;
    check_price("product price", self.price)
  }

  fn unique_key(&self) -> Option<String> {
    Some(self.id.to_string())
  }
}

/// Fields an admin supplies for a new product; the id is allocated on creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
  pub name: String,
  pub description: String,
  pub price: f64,
  pub stock: u32,
  pub image: String,
}

impl ProductDraft {
  pub fn into_product(self, id: u64) -> Product {
    Product {
      id,
      name: self.name,
      description: self.description,
      price: self.price,
      stock: self.stock,
      image: self.image,
    }
  }
}

/// Partial update merged over an existing product. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
  pub name: Option<String>,
  pub description: Option<String>,
  pub price: Option<f64>,
  pub stock: Option<u32>,
  pub image: Option<String>,
}

impl ProductPatch {
  pub fn is_empty(&self) -> bool {
    self == &ProductPatch::default()
  }

  pub fn apply_to(&self, product: &Product) -> Product {
    let mut next = product.clone();
    if let Some(name) = &self.name {
      next.name = name.clone();
    }
    if let Some(description) = &self.description {
      next.description = description.clone();
    }
    if let Some(price) = self.price {
      next.price = price;
    }
    if let Some(stock) = self.stock {
      next.stock = stock;
    }
    if let Some(image) = &self.image {
      next.image = image.clone();
    }
    next
  }
}

/// The catalog written on first run and by an admin reset.
pub fn sample_products() -> Vec<Product> {
  let sample = |id, name: &str, description: &str, price, stock| Product {
    id,
    name: name.to_string(),
    description: description.to_string(),
    price,
    stock,
    image: format!("https://via.placeholder.com/300?text={name}"),
  };
  vec![
    sample(1, "Smartphone", "Modern smartphone", 250.0, 10),
    sample(2, "Headphones", "Noise-cancelling headphones", 50.0, 20),
    sample(3, "Laptop", "Lightweight laptop", 800.0, 5),
  ]
}
