//! HTTP handlers
//!
//! ## Endpoints
//! - GET / - point lookup by searchable columns
//! - GET /version - version string
//! - GET /healthz - liveness probe

mod health;
mod lookup;

pub use health::{healthz_handler, version_handler};
pub use lookup::lookup_handler;
