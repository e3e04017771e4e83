// apps/storefront/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use cart_sync::AddToCartItem;
use serde_json::json;
use tracing::{info, instrument, warn};

use super::CallerIdentity;
use crate::errors::AppError;
use crate::state::AppState;

// --- Handler Implementation ---

#[instrument(
    name = "handler::add_to_cart",
    skip(app_state, req_payload, caller),
    fields(user_id = ?caller.0.user_id(), product_id = ?req_payload.product_id, quantity = ?req_payload.quantity)
)]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  caller: CallerIdentity,
  req_payload: web::Json<AddToCartItem>,
) -> Result<HttpResponse, AppError> {
  let CallerIdentity(identity) = caller;

  match app_state.cart.add_to_cart(&identity, req_payload.into_inner()).await {
    Ok(cart_item) => {
      info!(
        "Add to cart successful. Product ID: {}, New Quantity: {}",
        cart_item.product_id, cart_item.quantity
      );
      Ok(HttpResponse::Ok().json(json!({
          "message": "Item added to cart successfully.",
          "cartItem": cart_item
      })))
    }
    Err(cart_err) => {
      warn!("Add to cart failed: {}", cart_err);
      Err(AppError::from(cart_err))
    }
  }
}

#[instrument(name = "handler::view_cart", skip(app_state, caller), fields(user_id = ?caller.0.user_id()))]
pub async fn view_cart_handler(app_state: web::Data<AppState>, caller: CallerIdentity) -> Result<HttpResponse, AppError> {
  let CallerIdentity(identity) = caller;
  let items = app_state.cart.cart(&identity).await?;
  Ok(HttpResponse::Ok().json(json!({ "items": items })))
}
