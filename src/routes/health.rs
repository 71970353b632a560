use actix_web::{get, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

/// Reports that the todo list API is accepting requests, with the running crate
/// version. Public and never reads PostgreSQL, so it answers even while the pool
/// is exhausted.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "API is up; body carries `status`, `version` and `timestamp`"))
)]
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now()
    }))
}
