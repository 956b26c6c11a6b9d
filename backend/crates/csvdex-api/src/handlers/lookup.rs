//! Point lookup handler

use actix_web::http::header::ContentType;
use actix_web::{web, HttpResponse};
use csvdex_core::IndexReader;
use log::{debug, error};
use std::collections::HashMap;

use crate::models::ErrorResponse;

/// GET /?column=value&... - fetch the row stored under the query's key
///
/// Only searchable columns count, in configured order; anything else in the
/// query string is ignored.
///
/// - 200 with the stored JSON row
/// - 404 when no searchable column was given, or nothing is stored
/// - 500 when the store fails
pub async fn lookup_handler(
    query: web::Query<HashMap<String, String>>,
    reader: web::Data<IndexReader>,
) -> HttpResponse {
    let params = query.into_inner();

    let key = match reader.query_key(&params) {
        Ok(key) => key,
        Err(_) => {
            debug!("Ungrounded query: {:?}", params);
            return HttpResponse::NotFound()
                .json(ErrorResponse::invalid_parameters(reader.searchable_columns()));
        }
    };

    match reader.get_async(&key).await {
        Ok(Some(row)) => HttpResponse::Ok().content_type(ContentType::json()).body(row),
        Ok(None) => {
            debug!("No entry for key '{}'", key);
            HttpResponse::NotFound().json(ErrorResponse::not_found(&key))
        }
        Err(e) => {
            error!("Lookup of '{}' failed: {}", key, e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(e.to_string()))
        }
    }
}
