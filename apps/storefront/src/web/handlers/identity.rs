// apps/storefront/src/web/handlers/identity.rs

use actix_web::{dev::Payload, FromRequest, HttpRequest};
use cart_sync::IdentityContext;
use crate::errors::AppError;
use futures_util::future::{ready, Ready};
use tracing::debug;

/// Header carrying the caller's user id, set by the upstream identity provider.
pub const USER_ID_HEADER: &str = "X-User-ID";

/// The caller's identity as resolved from the request.
///
/// Extraction never fails: a missing or unreadable header yields an anonymous
/// context, and the cart operation itself rejects it as unauthenticated.
#[derive(Debug, Clone)]
pub struct CallerIdentity(pub IdentityContext);

impl FromRequest for CallerIdentity {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let raw = req.headers().get(USER_ID_HEADER).and_then(|value| value.to_str().ok());
    let identity = IdentityContext::from_header(raw);
    if !identity.is_authenticated() {
      debug!("CallerIdentity extractor: no usable {} header, caller is anonymous.", USER_ID_HEADER);
    }
    ready(Ok(CallerIdentity(identity)))
  }
}
