// cart_sync/src/sync/synchronizer.rs

use super::input::AddToCartItem;
use super::write_mode::WriteMode;
use crate::error::{CartError, CartField, CartResult, FieldViolation, StoreError};
use crate::identity::IdentityContext;
use crate::model::{CartLine, CartLinePatch, CartLinePath, NewCartLine, UserId};
use crate::store::DocumentStore;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Reconciles requested items against a user's persisted cart.
///
/// Holds no state of its own beyond the store handle and write mode, so it is
/// cheap to clone into request handlers.
#[derive(Clone)]
pub struct CartSynchronizer {
  store: Arc<dyn DocumentStore>,
  write_mode: WriteMode,
}

impl CartSynchronizer {
  pub fn new(store: Arc<dyn DocumentStore>) -> Self {
    Self {
      store,
      write_mode: WriteMode::default(),
    }
  }

  pub fn with_write_mode(mut self, write_mode: WriteMode) -> Self {
    self.write_mode = write_mode;
    self
  }

  pub fn write_mode(&self) -> WriteMode {
    self.write_mode
  }

  /// Adds `item` to the caller's cart.
  ///
  /// Creates the line if the product is not in the cart yet, otherwise adds the
  /// requested quantity (default 1) to the stored one and refreshes `updated_at`.
  /// Identity and input are checked before any store access. Returns the line
  /// as written.
  #[instrument(
    name = "cart_sync::add_to_cart",
    skip(self, identity, item),
    fields(user_id = ?identity.user_id(), product_id = ?item.product_id, write_mode = %self.write_mode)
  )]
  pub async fn add_to_cart(&self, identity: &IdentityContext, item: AddToCartItem) -> CartResult<CartLine> {
    let user_id = resolve_identity(identity)?;
    let requested = validate_line_input(item)?;
    let path = CartLinePath::new(user_id.clone(), requested.product_id.clone());

    let max_attempts = self.write_mode.max_attempts();
    let guarded = self.write_mode.is_guarded();
    let mut attempt = 1;
    loop {
      match self.reconcile_line(&path, &requested, guarded).await {
        Err(CartError::Store(store_err)) if guarded && store_err.is_contention() && attempt < max_attempts => {
          warn!(
            "Add to cart: concurrent write on {} (attempt {}/{}): {}. Retrying.",
            path, attempt, max_attempts, store_err
          );
          attempt += 1;
        }
        result => return result,
      }
    }
  }

  /// Lists the caller's cart, oldest line first.
  #[instrument(name = "cart_sync::cart", skip(self, identity), fields(user_id = ?identity.user_id()))]
  pub async fn cart(&self, identity: &IdentityContext) -> CartResult<Vec<CartLine>> {
    let user_id = resolve_identity(identity)?;
    let lines = self.store.list(user_id).await.map_err(|e| {
      error!("Cart view: store error listing cart for user {}: {}", user_id, e);
      CartError::Store(e)
    })?;
    info!("Cart view: {} line(s) for user {}.", lines.len(), user_id);
    Ok(lines)
  }

  /// One read, then exactly one create or update.
  async fn reconcile_line(&self, path: &CartLinePath, requested: &NewCartLine, guarded: bool) -> CartResult<CartLine> {
    let existing = self.fetch_cart_line(path).await?;

    match existing {
      Some(current) => {
        let quantity = current
          .quantity
          .checked_add(requested.quantity)
          .ok_or_else(|| CartError::invalid(CartField::Quantity, FieldViolation::OutOfRange))?;
        let patch = CartLinePatch {
          quantity,
          expected_revision: guarded.then_some(current.revision),
        };
        let updated = self.store.update(path, patch).await.map_err(|e| store_failure(path, "updating", e))?;
        info!(
          "Add to cart: {} quantity {} -> {}.",
          path, current.quantity, updated.quantity
        );
        Ok(updated)
      }
      None => {
        let created = self
          .store
          .create(path, requested.clone())
          .await
          .map_err(|e| store_failure(path, "creating", e))?;
        info!("Add to cart: created {} with quantity {}.", path, created.quantity);
        Ok(created)
      }
    }
  }

  async fn fetch_cart_line(&self, path: &CartLinePath) -> CartResult<Option<CartLine>> {
    self.store.get(path).await.map_err(|e| store_failure(path, "reading", e))
  }
}

impl std::fmt::Debug for CartSynchronizer {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CartSynchronizer")
      .field("write_mode", &self.write_mode)
      .finish_non_exhaustive()
  }
}

fn resolve_identity(identity: &IdentityContext) -> CartResult<&UserId> {
  identity.require_user().inspect_err(|_| {
    warn!("Cart operation rejected: no authenticated user in identity context.");
  })
}

fn validate_line_input(item: AddToCartItem) -> CartResult<NewCartLine> {
  item.validate().inspect_err(|e| {
    warn!("Add to cart: rejected input: {}", e);
  })
}

fn store_failure(path: &CartLinePath, action: &str, err: StoreError) -> CartError {
  if err.is_contention() {
    warn!("Add to cart: contention {} {}: {}", action, path, err);
  } else {
    error!("Add to cart: store error {} {}: {}", action, path, err);
  }
  CartError::Store(err)
}
