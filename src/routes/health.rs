use actix_web::{get, http::StatusCode, web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

use crate::services::UserService;

/// Health check endpoint
///
/// Public, outside the authenticated `/api` scope. Runs a cheap query against
/// the store so a lost database shows up here.
///
/// ## Responses:
/// - `200 OK`: `{"status": "ok", "storage": "postgres" | "memory", ...}`.
/// - `503 Service Unavailable`: the store did not answer; `status` is `"unavailable"`.
#[get("/health")]
pub async fn health(users: web::Data<UserService>) -> impl Responder {
    let (code, status) = match users.count().await {
        Ok(_) => (StatusCode::OK, "ok"),
        Err(err) => {
            log::error!("Health check failed on {} store: {}", users.backend(), err);
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    HttpResponse::build(code).json(json!({
        "status": status,
        "storage": users.backend(),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now()
    }))
}
