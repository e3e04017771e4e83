// tests/add_to_cart_tests.rs
mod common;

use cart_sync::{AddToCartItem, CartError, CartField, CartSynchronizer, FieldViolation, OpCounts};
use common::*;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn test_first_add_creates_line_with_default_quantity() {
  setup_tracing();
  let store = ticking_store();
  let sync = CartSynchronizer::new(store.clone());

  let line = sync.add_to_cart(&signed_in("u1"), gloss()).await.unwrap();

  assert_eq!(line.product_id.as_str(), "p1");
  assert_eq!(line.name, "Gloss");
  assert_eq!(line.price, 20.0);
  assert_eq!(line.image, "/x.png");
  assert_eq!(line.quantity, 1);
  assert_eq!(line.created_at, line.updated_at);

  assert_eq!(store.len(), 1);
  assert_eq!(store.peek(&path("u1", "p1")).unwrap(), line);
}

#[tokio::test]
#[serial]
async fn test_first_add_honours_requested_quantity() {
  setup_tracing();
  let store = ticking_store();
  let sync = CartSynchronizer::new(store.clone());

  let line = sync
    .add_to_cart(&signed_in("u1"), gloss().with_quantity(5))
    .await
    .unwrap();
  assert_eq!(line.quantity, 5);
}

#[tokio::test]
#[serial]
async fn test_second_add_increments_and_keeps_snapshot() {
  setup_tracing();
  let store = ticking_store();
  let sync = CartSynchronizer::new(store.clone());
  let user = signed_in("u1");

  let first = sync.add_to_cart(&user, gloss()).await.unwrap();

  // Catalog changed in the meantime; the stored snapshot must not follow.
  let changed = AddToCartItem::new("p1", "Gloss v2", 25.0, "/y.png").with_quantity(3);
  let second = sync.add_to_cart(&user, changed).await.unwrap();

  assert_eq!(second.quantity, 4);
  assert_eq!(second.name, "Gloss");
  assert_eq!(second.price, 20.0);
  assert_eq!(second.image, "/x.png");
  assert_eq!(second.created_at, first.created_at);
  assert!(second.updated_at > first.updated_at);
  assert_eq!(store.len(), 1);
}

#[tokio::test]
#[serial]
async fn test_repeated_single_adds_are_additive() {
  setup_tracing();
  let store = ticking_store();
  let sync = CartSynchronizer::new(store.clone());
  let user = signed_in("u1");

  sync.add_to_cart(&user, gloss().with_quantity(1)).await.unwrap();
  let line = sync.add_to_cart(&user, gloss().with_quantity(1)).await.unwrap();

  assert_eq!(line.quantity, 2);
}

#[tokio::test]
#[serial]
async fn test_each_add_is_one_read_and_one_write() {
  setup_tracing();
  let store = ticking_store();
  let sync = CartSynchronizer::new(store.clone());
  let user = signed_in("u1");

  sync.add_to_cart(&user, gloss()).await.unwrap();
  assert_eq!(store.op_counts(), OpCounts { reads: 1, writes: 1 });

  sync.add_to_cart(&user, gloss()).await.unwrap();
  assert_eq!(store.op_counts(), OpCounts { reads: 2, writes: 2 });
}

#[tokio::test]
#[serial]
async fn test_carts_are_scoped_per_user() {
  setup_tracing();
  let store = ticking_store();
  let sync = CartSynchronizer::new(store.clone());

  sync.add_to_cart(&signed_in("u1"), gloss().with_quantity(2)).await.unwrap();
  let other = sync.add_to_cart(&signed_in("u2"), gloss()).await.unwrap();

  assert_eq!(other.quantity, 1);
  assert_eq!(store.len(), 2);
  assert_eq!(store.peek(&path("u1", "p1")).unwrap().quantity, 2);
  assert_eq!(store.peek(&path("u2", "p1")).unwrap().quantity, 1);
}

#[tokio::test]
#[serial]
async fn test_example_scenario_from_empty_cart() {
  setup_tracing();
  let store = ticking_store();
  let sync = CartSynchronizer::new(store.clone());
  let user = signed_in("u1");

  let line = sync.add_to_cart(&user, gloss()).await.unwrap();
  assert_eq!(
    (line.product_id.as_str(), line.name.as_str(), line.price, line.image.as_str(), line.quantity),
    ("p1", "Gloss", 20.0, "/x.png", 1)
  );

  let line = sync.add_to_cart(&user, gloss().with_quantity(3)).await.unwrap();
  assert_eq!(line.quantity, 4);
}

#[tokio::test]
#[serial]
async fn test_quantity_overflow_is_rejected_without_write() {
  setup_tracing();
  let store = ticking_store();
  let sync = CartSynchronizer::new(store.clone());
  let user = signed_in("u1");

  sync.add_to_cart(&user, gloss().with_quantity(u32::MAX)).await.unwrap();
  let before = store.peek(&path("u1", "p1")).unwrap();

  let result = sync.add_to_cart(&user, gloss()).await;
  match result {
    Err(CartError::InvalidField { field, violation }) => {
      assert_eq!(field, CartField::Quantity);
      assert_eq!(violation, FieldViolation::OutOfRange);
    }
    other => panic!("Expected InvalidField(quantity), got {:?}", other),
  }
  assert_eq!(store.peek(&path("u1", "p1")).unwrap(), before);
  assert_eq!(store.op_counts().writes, 1);
}
