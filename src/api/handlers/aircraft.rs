//! Aircraft data proxy handler

use axum::extract::State;
use axum::Json;
use serde_json::value::RawValue;
use tracing::{error, info, warn};

use crate::api::server::AppState;
use crate::error::{ProxyError, Result};

/// Relay the upstream aircraft listing to the caller.
///
/// Credentials are resolved per request; without them no outbound call is made.
pub async fn get_aircraft_data(
    State(state): State<AppState>,
) -> Result<Json<Box<RawValue>>> {
    info!("Aircraft data request started");

    let result = relay(&state).await;
    match &result {
        Ok(_) => info!("Aircraft data relayed"),
        Err(ProxyError::MissingCredentials) => {}
        Err(e) if e.is_upstream_error() => {
            error!(status = e.status_code().as_u16(), "Upstream request failed: {}", e)
        }
        Err(e) => error!("Aircraft data request failed: {}", e),
    }

    info!("Aircraft data request finished");
    result.map(Json)
}

async fn relay(state: &AppState) -> Result<Box<RawValue>> {
    let Some(credentials) = state.credentials.credentials() else {
        warn!("RAPIDAPI_KEY or RAPIDAPI_HOST is not configured");
        return Err(ProxyError::MissingCredentials);
    };
    info!(host = %credentials.host, "API credentials present");

    state.client.fetch(&credentials).await
}
