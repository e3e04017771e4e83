// apps/storefront/src/main.rs

// Declare modules for the application
mod config;
mod db;
mod errors;
mod state;
mod web;

use crate::config::{AppConfig, StoreBackend};
use crate::db::PgDocumentStore;
use crate::errors::Result as AppResult; // Use the app's Result alias
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer}; // Renamed web to actix_data
use cart_sync::{CartSynchronizer, DocumentStore, MemoryStore};
use sqlx::PgPool;
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing
use tracing_subscriber::EnvFilter;

fn init_tracing() {
  // RUST_LOG overrides the default INFO level; LOG_FORMAT=json switches to structured output.
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let json_output = std::env::var("LOG_FORMAT")
    .map(|v| v.eq_ignore_ascii_case("json"))
    .unwrap_or(false);

  let builder = tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_span_events(FmtSpan::CLOSE); // Log when spans close, showing duration
  if json_output {
    builder.json().init();
  } else {
    builder.init();
  }
}

async fn connect_store(config: &AppConfig) -> AppResult<Arc<dyn DocumentStore>> {
  match &config.store_backend {
    StoreBackend::Memory => {
      tracing::warn!("Using the in-memory cart store; carts are lost on restart.");
      let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
      Ok(store)
    }
    StoreBackend::Postgres { database_url } => {
      let pool = PgPool::connect(database_url).await?;
      tracing::info!("Successfully connected to the database.");
      let store = PgDocumentStore::new(pool);
      store.ensure_schema().await?;
      let store: Arc<dyn DocumentStore> = Arc::new(store);
      Ok(store)
    }
  }
}

// Main function
#[actix_web::main]
async fn main() -> std::io::Result<()> {
  dotenvy::dotenv().ok();
  init_tracing();

  tracing::info!("Starting storefront cart server...");

  // Load application configuration
  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg), // Arc the config for sharing
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
    }
  };

  let store = match connect_store(&app_config).await {
    Ok(store) => store,
    Err(e) => {
      tracing::error!(error = %e, "Failed to initialise the cart store.");
      return Err(std::io::Error::other(e.to_string()));
    }
  };

  let cart = CartSynchronizer::new(store).with_write_mode(app_config.write_mode);
  tracing::info!(write_mode = %app_config.write_mode, "Cart synchronizer ready.");

  // Create AppState
  let app_state = AppState {
    cart,
    config: app_config.clone(), // Clone Arc for AppState
  };

  // Configure and Start Actix Web Server
  let server_address = app_config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
