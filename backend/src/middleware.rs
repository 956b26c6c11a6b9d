//! Middleware for the csvdex HTTP server.

use actix_web::middleware;

/// Request log line format: client, request line, status, bytes, duration.
const LOG_FORMAT: &str = r#"%a "%r" %s %b %Dms"#;

/// Build the request logger middleware.
pub fn request_logger() -> middleware::Logger {
    middleware::Logger::new(LOG_FORMAT)
}
