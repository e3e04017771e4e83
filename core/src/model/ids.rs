// cart_sync/src/model/ids.rs

use crate::error::FieldViolation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of an authenticated user, as issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
  /// Returns `None` for blank input or input containing `/`; the id is a path segment.
  pub fn new(raw: impl Into<String>) -> Option<Self> {
    let raw = raw.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.contains('/') {
      return None;
    }
    Some(UserId(trimmed.to_string()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for UserId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Key of a cart line inside one user's cart collection.
///
/// Used verbatim as a path segment, so it may not be blank or contain `/`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
  pub fn parse(raw: &str) -> Result<Self, FieldViolation> {
    if raw.trim().is_empty() || raw.contains('/') {
      return Err(FieldViolation::InvalidKey);
    }
    Ok(ProductId(raw.to_string()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for ProductId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Address of one cart line: `users/{userId}/cart/{productId}`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CartLinePath {
  pub user_id: UserId,
  pub product_id: ProductId,
}

impl CartLinePath {
  pub fn new(user_id: UserId, product_id: ProductId) -> Self {
    Self { user_id, product_id }
  }
}

impl fmt::Display for CartLinePath {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "users/{}/cart/{}", self.user_id, self.product_id)
  }
}
