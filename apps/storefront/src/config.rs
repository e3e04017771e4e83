// apps/storefront/src/config.rs

use crate::errors::{AppError, Result}; // Use AppError specific Result
use cart_sync::WriteMode;
use dotenvy::dotenv;
use std::env;

/// Where cart documents live.
#[derive(Clone, PartialEq, Eq)]
pub enum StoreBackend {
  /// Process-local store; contents are lost on restart.
  Memory,
  Postgres { database_url: String },
}

impl std::fmt::Debug for StoreBackend {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      StoreBackend::Memory => f.write_str("Memory"),
      // The URL usually carries credentials.
      StoreBackend::Postgres { .. } => f.write_str("Postgres { database_url: [REDACTED] }"),
    }
  }
}

#[derive(Debug, Clone)] // Clone is useful if parts of config are passed around
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub store_backend: StoreBackend,
  pub write_mode: WriteMode,
}

pub const DEFAULT_MAX_WRITE_ATTEMPTS: u32 = 3;

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    let config = Self::from_lookup(|var_name| env::var(var_name).ok())?;
    tracing::info!("Application configuration loaded successfully.");
    tracing::debug!(config = ?config, "Loaded config details");
    Ok(config)
  }

  /// Builds the config from any variable source; `from_env` passes the process environment.
  pub fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get_env = |var_name: &str| {
      lookup(var_name).ok_or_else(|| AppError::Config(format!("Missing environment variable '{}'", var_name)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;

    let store_backend = match get_env("CART_STORE")
      .unwrap_or_else(|_| "memory".to_string())
      .trim()
      .to_ascii_lowercase()
      .as_str()
    {
      "memory" => StoreBackend::Memory,
      "postgres" => StoreBackend::Postgres {
        database_url: get_env("DATABASE_URL")?,
      },
      other => {
        return Err(AppError::Config(format!(
          "Invalid CART_STORE '{}': expected 'memory' or 'postgres'",
          other
        )))
      }
    };

    let write_mode = get_env("CART_WRITE_MODE")
      .unwrap_or_else(|_| "last_write_wins".to_string())
      .parse::<WriteMode>()
      .map_err(|e| AppError::Config(format!("Invalid CART_WRITE_MODE: {}", e)))?;

    let max_write_attempts = get_env("CART_MAX_WRITE_ATTEMPTS")
      .unwrap_or_else(|_| DEFAULT_MAX_WRITE_ATTEMPTS.to_string())
      .parse::<u32>()
      .map_err(|e| AppError::Config(format!("Invalid CART_MAX_WRITE_ATTEMPTS: {}", e)))?;
    if max_write_attempts == 0 {
      return Err(AppError::Config("CART_MAX_WRITE_ATTEMPTS must be at least 1".to_string()));
    }

    let write_mode = match write_mode {
      WriteMode::Guarded { .. } => WriteMode::guarded(max_write_attempts),
      other => other,
    };

    Ok(Self {
      server_host,
      server_port,
      store_backend,
      write_mode,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}
