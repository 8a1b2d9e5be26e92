//! CORS middleware configuration
//!
//! The proxy is read-only and carries no cookies, so an empty whitelist opens
//! it to any browser origin. Any method is allowed since the aircraft route
//! accepts every method.

use axum::http::{header, HeaderValue};
use tower_http::cors::{Any, CorsLayer};
use tracing::debug;

/// Create a CORS layer with the specified allowed origins
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    if allowed_origins.is_empty() {
        debug!("CORS: No origins specified, allowing any origin");
        base.allow_origin(Any)
    } else {
        debug!("CORS: Allowing origins: {:?}", allowed_origins);
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();

        base.allow_origin(origins)
    }
}
