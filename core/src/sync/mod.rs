// cart_sync/src/sync/mod.rs

//! The Cart Synchronizer: create-or-increment of one cart line per call.

pub mod input;
pub mod synchronizer;
pub mod write_mode;

pub use input::{AddToCartItem, DEFAULT_QUANTITY, REQUIRED_FIELDS};
pub use synchronizer::CartSynchronizer;
pub use write_mode::WriteMode;
