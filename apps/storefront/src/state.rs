// apps/storefront/src/state.rs
use crate::config::AppConfig;
use cart_sync::CartSynchronizer;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct AppState {
  pub cart: CartSynchronizer,
  pub config: Arc<AppConfig>, // Share loaded config
}
