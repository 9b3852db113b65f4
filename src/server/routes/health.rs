//! Liveness endpoint

use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use tracing::{debug, error};

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/ping", web::get().to(ping));
}

/// Succeeds iff the backing store answers
pub async fn ping(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Ping requested");

    match state.storage.ping().await {
        Ok(()) => Ok(HttpResponse::Ok().finish()),
        Err(e) => {
            error!("Backing store ping failed: {}", e);
            Ok(HttpResponse::InternalServerError().finish())
        }
    }
}
