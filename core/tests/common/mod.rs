// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use cart_sync::{
  AddToCartItem, CartLine, CartLinePatch, CartLinePath, DocumentStore, IdentityContext, MemoryStore, NewCartLine,
  StoreError, StoreResult, UserId,
};
use chrono::{DateTime, TimeZone, Utc};
use std::sync::{
  atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;

// --- Identities and items ---
pub fn signed_in(user: &str) -> IdentityContext {
  IdentityContext::authenticated(UserId::new(user).expect("non-blank user id"))
}

pub fn gloss() -> AddToCartItem {
  AddToCartItem::new("p1", "Gloss", 20.0, "/x.png")
}

pub fn path(user: &str, product: &str) -> CartLinePath {
  CartLinePath::new(
    UserId::new(user).unwrap(),
    cart_sync::ProductId::parse(product).unwrap(),
  )
}

// --- Deterministic server time: each reading is one second after the last ---
pub fn ticking_clock() -> cart_sync::store::memory::Clock {
  let tick = Arc::new(AtomicI64::new(0));
  Arc::new(move || {
    let secs = tick.fetch_add(1, Ordering::SeqCst);
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
  })
}

pub fn ticking_store() -> Arc<MemoryStore> {
  Arc::new(MemoryStore::with_clock(ticking_clock()))
}

pub fn epoch_plus(secs: i64) -> DateTime<Utc> {
  Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

// --- Store that fails selected primitives with a backend error ---
#[derive(Default)]
pub struct FailingStore {
  pub inner: MemoryStore,
  pub fail_get: AtomicBool,
  pub fail_create: AtomicBool,
  pub fail_update: AtomicBool,
  pub fail_list: AtomicBool,
}

impl FailingStore {
  fn backend_error(op: &str) -> StoreError {
    StoreError::backend(anyhow::anyhow!("simulated {} outage", op))
  }
}

#[async_trait]
impl DocumentStore for FailingStore {
  async fn get(&self, path: &CartLinePath) -> StoreResult<Option<CartLine>> {
    if self.fail_get.load(Ordering::SeqCst) {
      return Err(Self::backend_error("get"));
    }
    self.inner.get(path).await
  }

  async fn create(&self, path: &CartLinePath, line: NewCartLine) -> StoreResult<CartLine> {
    if self.fail_create.load(Ordering::SeqCst) {
      return Err(Self::backend_error("create"));
    }
    self.inner.create(path, line).await
  }

  async fn update(&self, path: &CartLinePath, patch: CartLinePatch) -> StoreResult<CartLine> {
    if self.fail_update.load(Ordering::SeqCst) {
      return Err(Self::backend_error("update"));
    }
    self.inner.update(path, patch).await
  }

  async fn list(&self, user_id: &UserId) -> StoreResult<Vec<CartLine>> {
    if self.fail_list.load(Ordering::SeqCst) {
      return Err(Self::backend_error("list"));
    }
    self.inner.list(user_id).await
  }
}

// --- Store that lets a rival writer sneak in between the caller's read and write ---
pub struct RacingStore {
  pub inner: MemoryStore,
  /// How many of the caller's writes get a rival write injected just before them.
  pub interferences: AtomicUsize,
  /// Quantity the rival adds each time it interferes.
  pub rival_quantity: u32,
}

impl RacingStore {
  pub fn new(interferences: usize, rival_quantity: u32) -> Self {
    Self {
      inner: MemoryStore::new(),
      interferences: AtomicUsize::new(interferences),
      rival_quantity,
    }
  }

  fn take_interference(&self) -> bool {
    self
      .interferences
      .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
      .is_ok()
  }
}

#[async_trait]
impl DocumentStore for RacingStore {
  async fn get(&self, path: &CartLinePath) -> StoreResult<Option<CartLine>> {
    self.inner.get(path).await
  }

  async fn create(&self, path: &CartLinePath, line: NewCartLine) -> StoreResult<CartLine> {
    if self.take_interference() {
      let rival = NewCartLine {
        quantity: self.rival_quantity,
        ..line.clone()
      };
      self.inner.create(path, rival).await?;
    }
    self.inner.create(path, line).await
  }

  async fn update(&self, path: &CartLinePath, patch: CartLinePatch) -> StoreResult<CartLine> {
    if self.take_interference() {
      if let Some(current) = self.inner.peek(path) {
        let rival = CartLinePatch {
          quantity: current.quantity + self.rival_quantity,
          expected_revision: None,
        };
        self.inner.update(path, rival).await?;
      }
    }
    self.inner.update(path, patch).await
  }

  async fn list(&self, user_id: &UserId) -> StoreResult<Vec<CartLine>> {
    self.inner.list(user_id).await
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
