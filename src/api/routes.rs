//! API route definitions

use axum::routing::{any, get};
use axum::Router;

use super::handlers;
use super::server::AppState;

/// Path the aircraft proxy is served on
pub const AIRCRAFT_PATH: &str = "/api/get-aircraft-data";

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        // Method, query and body are ignored by the proxy
        .route(AIRCRAFT_PATH, any(handlers::aircraft::get_aircraft_data))
        .with_state(state)
}
