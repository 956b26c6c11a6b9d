//! API routes configuration

use crate::handlers;
use actix_web::web;

/// Configure the query routes.
///
/// Handlers expect a `web::Data<IndexReader>` in app data.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::lookup_handler))
        .route("/version", web::get().to(handlers::version_handler))
        .route("/healthz", web::get().to(handlers::healthz_handler));
}
