// csvdex API Library
//
// This crate provides the HTTP layer for csvdex,
// including handlers, routes, and response models.

pub mod handlers;
pub mod models;
pub mod routes;
