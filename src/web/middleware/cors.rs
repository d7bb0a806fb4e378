//! CORS middleware configuration.

use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

fn permissive(methods: [Method; 5]) -> CorsLayer {
    CorsLayer::new()
        .allow_methods(methods)
        .allow_headers(Any)
        .allow_origin(Any)
}

/// Create a CORS layer from the configured origins.
///
/// No origins (or none that parse) allows any origin without credentials;
/// otherwise only the listed origins are allowed, with credentials.
pub fn create_cors_layer(origins: &[String]) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];

    let parsed_origins: Vec<HeaderValue> =
        origins.iter().filter_map(|o| o.parse().ok()).collect();

    if parsed_origins.is_empty() {
        if !origins.is_empty() {
            tracing::warn!("No valid CORS origins configured; allowing any origin");
        }
        return permissive(methods);
    }

    CorsLayer::new()
        .allow_methods(methods)
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT])
        .allow_credentials(true)
        .allow_origin(parsed_origins)
}
