//! Liveness and version handlers

use actix_web::{HttpResponse, Responder};
use csvdex_core::IndexReader;

use crate::models::HealthResponse;

/// GET /healthz - liveness probe
///
/// Returns 200 OK whenever the server is running. No authentication.
pub async fn healthz_handler() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse::ok_with_version(IndexReader::version()))
}

/// GET /version - plain-text version string
pub async fn version_handler() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(format!("Version: {}", IndexReader::version()))
}
