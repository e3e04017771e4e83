// apps/storefront/src/web/handlers/mod.rs

// Declare handler modules
pub mod cart_handlers;
pub mod identity;

pub use identity::CallerIdentity;
