// apps/storefront/src/web/routes.rs

use actix_web::{web, HttpRequest};

use crate::config::StoreBackend;
use crate::errors::AppError;
use crate::state::AppState;

async fn health_check_handler(app_state: web::Data<AppState>) -> actix_web::HttpResponse {
  let store = match app_state.config.store_backend {
    StoreBackend::Memory => "memory",
    StoreBackend::Postgres { .. } => "postgres",
  };
  actix_web::HttpResponse::Ok().json(serde_json::json!({
    "status": "ok",
    "store": store,
    "writeMode": app_state.config.write_mode.to_string(),
  }))
}

fn json_error_handler(err: actix_web::error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
  AppError::Validation(format!("Malformed request body: {}", err)).into()
}

// This function will be called in `main.rs` to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler));
  cfg.service(
    web::scope("/api/v1") // Base path for API version 1
      .route("/health", web::get().to(health_check_handler))
      // Identity comes from the X-User-ID header set by the upstream identity provider.
      .service(
        web::scope("/cart")
          .route("", web::get().to(crate::web::handlers::cart_handlers::view_cart_handler))
          .route(
            "/add",
            web::post().to(crate::web::handlers::cart_handlers::add_to_cart_handler),
          ),
      ),
  );
}
