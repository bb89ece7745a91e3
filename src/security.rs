//! Cross-origin policy for the browser frontend.

use actix_cors::Cors;
use actix_web::http::{header, Method};

/// Allows the single configured frontend origin to call the API with
/// credentials. Preflight results may be cached for an hour.
pub fn cors(allowed_origin: &str) -> Cors {
    Cors::default()
        .allowed_origin(allowed_origin)
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
        .expose_headers(vec![header::AUTHORIZATION])
        .supports_credentials()
        .max_age(3600)
}
