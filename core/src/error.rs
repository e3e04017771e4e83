// cart_sync/src/error.rs
use anyhow::Error as AnyhowError;
use std::fmt;
use thiserror::Error;

/// Fields of an add-to-cart request that validation can reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartField {
  ProductId,
  Name,
  Price,
  Image,
  Quantity,
}

impl CartField {
  /// The wire name of the field, as callers send it.
  pub fn as_str(&self) -> &'static str {
    match self {
      CartField::ProductId => "productId",
      CartField::Name => "name",
      CartField::Price => "price",
      CartField::Image => "image",
      CartField::Quantity => "quantity",
    }
  }
}

impl fmt::Display for CartField {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldViolation {
  /// Required field absent from the request.
  Missing,
  /// Value cannot be used as a document key segment (blank or contains `/`).
  InvalidKey,
  /// Numeric value outside the accepted range.
  OutOfRange,
}

impl fmt::Display for FieldViolation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      FieldViolation::Missing => f.write_str("field is required"),
      FieldViolation::InvalidKey => f.write_str("value is not a valid document key"),
      FieldViolation::OutOfRange => f.write_str("value is out of range"),
    }
  }
}

/// Failures raised by a [`DocumentStore`](crate::store::DocumentStore) backend.
#[derive(Debug, Error)]
pub enum StoreError {
  #[error("Document already exists: {path}")]
  AlreadyExists { path: String },

  #[error("Document not found: {path}")]
  NotFound { path: String },

  #[error("Write precondition failed for {path}: expected revision {expected}, found {actual}")]
  Conflict { path: String, expected: u64, actual: u64 },

  #[error("Stored document at {path} is unreadable: {message}")]
  Corrupt { path: String, message: String },

  #[error("Store backend error. Source: {source}")]
  Backend {
    #[source]
    source: AnyhowError,
  },
}

impl StoreError {
  /// Wraps any backend error (driver, network, permission) as an opaque source.
  pub fn backend(err: impl Into<AnyhowError>) -> Self {
    StoreError::Backend { source: err.into() }
  }

  /// True for failures caused by a competing writer rather than the backend itself.
  pub fn is_contention(&self) -> bool {
    matches!(self, StoreError::AlreadyExists { .. } | StoreError::Conflict { .. })
  }
}

#[derive(Debug, Error)]
pub enum CartError {
  #[error("Unauthenticated: a signed-in user is required")]
  Unauthenticated,

  #[error("Invalid field '{field}': {violation}")]
  InvalidField { field: CartField, violation: FieldViolation },

  #[error("Store failure: {0}")]
  Store(#[from] StoreError),
}

impl CartError {
  pub(crate) fn missing(field: CartField) -> Self {
    CartError::InvalidField {
      field,
      violation: FieldViolation::Missing,
    }
  }

  pub(crate) fn invalid(field: CartField, violation: FieldViolation) -> Self {
    CartError::InvalidField { field, violation }
  }
}

pub type CartResult<T, E = CartError> = std::result::Result<T, E>;
pub type StoreResult<T, E = StoreError> = std::result::Result<T, E>;
