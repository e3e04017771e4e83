// apps/storefront/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use cart_sync::{CartError, StoreError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  /// Request could not be decoded (malformed JSON, wrong field types).
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Cart Error: {0}")]
  Cart(#[from] CartError),
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::Cart(CartError::Unauthenticated) => StatusCode::UNAUTHORIZED,
      AppError::Cart(CartError::InvalidField { .. }) => StatusCode::BAD_REQUEST,
      AppError::Cart(CartError::Store(store_err)) if store_err.is_contention() => StatusCode::CONFLICT,
      AppError::Cart(CartError::Store(_)) => StatusCode::INTERNAL_SERVER_ERROR,
      AppError::Config(_) | AppError::Sqlx(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response
    tracing::error!(application_error = %self, "Responding with error");
    let body = match self {
      AppError::Validation(m) => json!({"error": m}),
      AppError::Config(m) => json!({"error": "Configuration issue", "detail": m}),
      AppError::Sqlx(_) => json!({"error": "Database operation failed"}),
      AppError::Cart(CartError::Unauthenticated) => {
        json!({"error": "Sign in to use your cart."})
      }
      AppError::Cart(CartError::InvalidField { field, violation }) => {
        json!({"error": format!("Invalid '{}': {}", field, violation), "field": field.as_str()})
      }
      AppError::Cart(CartError::Store(store_err)) => match store_err {
        StoreError::AlreadyExists { .. } | StoreError::Conflict { .. } => {
          json!({"error": "The cart was modified concurrently. Please retry.", "detail": store_err.to_string()})
        }
        _ => json!({"error": "Cart store operation failed"}),
      },
    };
    HttpResponse::build(self.status_code()).json(body)
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
