// cart_sync/src/model/mod.rs

//! Data carried between the synchronizer and a document store.

pub mod cart_line;
pub mod ids;

pub use cart_line::{CartLine, CartLinePatch, NewCartLine};
pub use ids::{CartLinePath, ProductId, UserId};
