// cart_sync/src/store/mod.rs

//! The document-store seam. The synchronizer only needs get, create and
//! partial update against `users/{userId}/cart/{productId}`; `list` backs the
//! read-only cart view.

pub mod memory;

use crate::error::StoreResult;
use crate::model::{CartLine, CartLinePatch, CartLinePath, NewCartLine, UserId};
use async_trait::async_trait;

pub use memory::{MemoryStore, OpCounts};

#[async_trait]
pub trait DocumentStore: Send + Sync {
  /// Fetch a single cart line by key.
  async fn get(&self, path: &CartLinePath) -> StoreResult<Option<CartLine>>;

  /// Create a line with server-assigned `created_at = updated_at` and revision 1.
  ///
  /// Fails with `StoreError::AlreadyExists` if the key is taken.
  async fn create(&self, path: &CartLinePath, line: NewCartLine) -> StoreResult<CartLine>;

  /// Set the quantity, refresh `updated_at` and bump the revision.
  ///
  /// Fails with `StoreError::NotFound` if absent, or `StoreError::Conflict`
  /// when `patch.expected_revision` no longer matches.
  async fn update(&self, path: &CartLinePath, patch: CartLinePatch) -> StoreResult<CartLine>;

  /// All lines in one user's cart, oldest first (ties broken by product id).
  async fn list(&self, user_id: &UserId) -> StoreResult<Vec<CartLine>>;
}
