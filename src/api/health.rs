use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use tracing::warn;

use crate::AppServices;
use crate::store::RecordStore;

pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "HRMS Lite API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Store reachability", body = Object, example = json!({
            "status": "healthy",
            "database": "connected"
        }))
    ),
    tag = "Health"
)]
pub async fn health_check(svc: web::Data<AppServices>) -> impl Responder {
    match svc.store().ping().await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "status": "healthy",
            "database": "connected",
            "backend": svc.store().backend_name()
        })),
        Err(e) => {
            warn!(error = %e, "Health check failed");
            HttpResponse::Ok().json(json!({
                "status": "unhealthy",
                "database": "disconnected",
                "error": e.to_string()
            }))
        }
    }
}
