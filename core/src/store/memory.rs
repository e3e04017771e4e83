// cart_sync/src/store/memory.rs

use super::DocumentStore;
use crate::error::{StoreError, StoreResult};
use crate::model::{CartLine, CartLinePatch, CartLinePath, NewCartLine, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Source of "server time" for the in-memory store.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync + 'static>;

/// Number of read and write primitives served since construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpCounts {
  pub reads: usize,
  pub writes: usize,
}

/// Process-local `DocumentStore`.
///
/// The lock is only held inside each primitive, never across an `.await`, so
/// concurrent callers see the same interleavings a remote store would allow.
pub struct MemoryStore {
  docs: RwLock<BTreeMap<CartLinePath, CartLine>>,
  clock: Clock,
  reads: AtomicUsize,
  writes: AtomicUsize,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::with_clock(Arc::new(Utc::now))
  }

  pub fn with_clock(clock: Clock) -> Self {
    Self {
      docs: RwLock::new(BTreeMap::new()),
      clock,
      reads: AtomicUsize::new(0),
      writes: AtomicUsize::new(0),
    }
  }

  pub fn op_counts(&self) -> OpCounts {
    OpCounts {
      reads: self.reads.load(Ordering::SeqCst),
      writes: self.writes.load(Ordering::SeqCst),
    }
  }

  pub fn len(&self) -> usize {
    self.docs.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.docs.read().is_empty()
  }

  /// Reads a line without counting it as a store operation. For inspection in tests and tooling.
  pub fn peek(&self, path: &CartLinePath) -> Option<CartLine> {
    self.docs.read().get(path).cloned()
  }
}

impl Default for MemoryStore {
  fn default() -> Self {
    Self::new()
  }
}

impl std::fmt::Debug for MemoryStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("MemoryStore")
      .field("documents", &self.len())
      .field("op_counts", &self.op_counts())
      .finish()
  }
}

#[async_trait]
impl DocumentStore for MemoryStore {
  async fn get(&self, path: &CartLinePath) -> StoreResult<Option<CartLine>> {
    self.reads.fetch_add(1, Ordering::SeqCst);
    Ok(self.docs.read().get(path).cloned())
  }

  async fn create(&self, path: &CartLinePath, line: NewCartLine) -> StoreResult<CartLine> {
    self.writes.fetch_add(1, Ordering::SeqCst);
    let mut docs = self.docs.write();
    if docs.contains_key(path) {
      return Err(StoreError::AlreadyExists { path: path.to_string() });
    }
    let now = (self.clock)();
    let stored = CartLine {
      product_id: line.product_id,
      name: line.name,
      price: line.price,
      image: line.image,
      quantity: line.quantity,
      created_at: now,
      updated_at: now,
      revision: 1,
    };
    docs.insert(path.clone(), stored.clone());
    Ok(stored)
  }

  async fn update(&self, path: &CartLinePath, patch: CartLinePatch) -> StoreResult<CartLine> {
    self.writes.fetch_add(1, Ordering::SeqCst);
    let mut docs = self.docs.write();
    let existing = docs
      .get_mut(path)
      .ok_or_else(|| StoreError::NotFound { path: path.to_string() })?;

    if let Some(expected) = patch.expected_revision {
      if existing.revision != expected {
        return Err(StoreError::Conflict {
          path: path.to_string(),
          expected,
          actual: existing.revision,
        });
      }
    }

    existing.quantity = patch.quantity;
    existing.updated_at = (self.clock)();
    existing.revision += 1;
    Ok(existing.clone())
  }

  async fn list(&self, user_id: &UserId) -> StoreResult<Vec<CartLine>> {
    self.reads.fetch_add(1, Ordering::SeqCst);
    let mut lines: Vec<CartLine> = self
      .docs
      .read()
      .iter()
      .filter(|(path, _)| &path.user_id == user_id)
      .map(|(_, line)| line.clone())
      .collect();
    lines.sort_by(|a, b| {
      a.created_at
        .cmp(&b.created_at)
        .then_with(|| a.product_id.cmp(&b.product_id))
    });
    Ok(lines)
  }
}
