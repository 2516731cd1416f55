// storefront/src/operations/catalog.rs

use crate::error::{StoreError, StoreResult};
use crate::models::product::sample_products;
use crate::models::{Product, ProductDraft, ProductPatch, Record};
use crate::persistence::KeyValueStore;
use crate::storefront::Storefront;
use tracing::{info, instrument};

impl<S: KeyValueStore> Storefront<S> {
  /// Appends a product with the next free id.
  #[instrument(name = "Storefront::create_product", skip(self, draft), fields(name = %draft.name))]
  pub fn create_product(&mut self, draft: ProductDraft) -> StoreResult<Product> {
    self.session.require_admin()?;
    let next_id = self.state.products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
    let mut product = draft.into_product(next_id);
    product.name = product.name.trim().to_string();
    product.validate().map_err(StoreError::Validation)?;

    let mut next = self.state.products.clone();
    next.push(product.clone());
    self.save_products(next)?;
    info!(product_id = product.id, "Product created.");
    Ok(product)
  }

  #[instrument(name = "Storefront::update_product", skip(self, patch))]
  pub fn update_product(&mut self, id: u64, patch: ProductPatch) -> StoreResult<Product> {
    self.session.require_admin()?;
    let idx = self.product_index(id)?;
    let updated = patch.apply_to(&self.state.products[idx]);
    updated.validate().map_err(StoreError::Validation)?;

    let mut next = self.state.products.clone();
    next[idx] = updated.clone();
    self.save_products(next)?;
    info!(product_id = id, "Product updated.");
    Ok(updated)
  }

  /// Removes a product from the catalog. Carts and orders keep their snapshots.
  #[instrument(name = "Storefront::delete_product", skip(self))]
  pub fn delete_product(&mut self, id: u64) -> StoreResult<Product> {
    self.session.require_admin()?;
    let idx = self.product_index(id)?;
    let mut next = self.state.products.clone();
    let removed = next.remove(idx);
    self.save_products(next)?;
    info!(product_id = id, "Product deleted.");
    Ok(removed)
  }

  #[instrument(name = "Storefront::reset_products", skip(self))]
  pub fn reset_products(&mut self) -> StoreResult<()> {
    self.session.require_admin()?;
    self.save_products(sample_products())?;
    info!("Catalog reset to sample products.");
    Ok(())
  }

  fn product_index(&self, id: u64) -> StoreResult<usize> {
    self
      .state
      .products
      .iter()
      .position(|p| p.id == id)
      .ok_or_else(|| StoreError::NotFound(format!("product {id}")))
  }
}
