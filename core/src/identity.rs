// cart_sync/src/identity.rs

//! The resolved caller identity, passed explicitly into every cart operation.

use crate::error::{CartError, CartResult};
use crate::model::UserId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityContext {
  user_id: Option<UserId>,
}

impl IdentityContext {
  /// A caller with no resolvable user. Cart operations fail closed for it.
  pub fn anonymous() -> Self {
    Self { user_id: None }
  }

  pub fn authenticated(user_id: UserId) -> Self {
    Self { user_id: Some(user_id) }
  }

  /// Builds a context from a raw identity value such as a request header.
  /// Absent, blank or otherwise unusable values (such as ones containing `/`) yield an anonymous context.
  pub fn from_header(raw: Option<&str>) -> Self {
    Self {
      user_id: raw.and_then(UserId::new),
    }
  }

  pub fn user_id(&self) -> Option<&UserId> {
    self.user_id.as_ref()
  }

  pub fn is_authenticated(&self) -> bool {
    self.user_id.is_some()
  }

  /// Get the user, returning `Unauthenticated` if none is present.
  pub fn require_user(&self) -> CartResult<&UserId> {
    self.user_id.as_ref().ok_or(CartError::Unauthenticated)
  }
}
