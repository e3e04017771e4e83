// cart_sync/src/model/cart_line.rs

use super::ProductId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One product entry in a user's persisted cart.
///
/// `name`, `price` and `image` are snapshots taken when the line was created
/// and are not re-synced with the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
  pub product_id: ProductId,
  pub name: String,
  pub price: f64,
  pub image: String,
  pub quantity: u32,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  /// Store-maintained write counter: 1 on create, +1 per update.
  pub revision: u64,
}

/// Fields written when a line is created. Timestamps and revision are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartLine {
  pub product_id: ProductId,
  pub name: String,
  pub price: f64,
  pub image: String,
  pub quantity: u32,
}

/// Partial update of an existing line. The store refreshes `updated_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLinePatch {
  pub quantity: u32,
  /// When set, the write only applies if the stored revision still matches.
  pub expected_revision: Option<u64>,
}
