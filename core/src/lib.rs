// src/lib.rs

//! cart-sync: reconciles add-to-cart requests against a user's cart held in a
//! keyed document store (`users/{userId}/cart/{productId}`).
//!
//!  - The caller's identity is passed in explicitly as an [`IdentityContext`];
//!    anonymous callers fail closed with [`CartError::Unauthenticated`].
//!  - Input is checked against a fixed required-field set before any I/O.
//!  - Each call performs one read and one write: create the line, or add the
//!    requested quantity to the stored one.
//!  - Backends plug in through the async [`DocumentStore`] trait. A
//!    [`MemoryStore`] ships with the crate.

pub mod error;
pub mod identity;
pub mod model;
pub mod store;
pub mod sync;

// --- Re-exports for the Public API ---

pub use crate::error::{CartError, CartField, CartResult, FieldViolation, StoreError, StoreResult};
pub use crate::identity::IdentityContext;
pub use crate::model::{CartLine, CartLinePatch, CartLinePath, NewCartLine, ProductId, UserId};
pub use crate::store::{DocumentStore, MemoryStore, OpCounts};
pub use crate::sync::{AddToCartItem, CartSynchronizer, WriteMode, DEFAULT_QUANTITY, REQUIRED_FIELDS};
