//! API server using Axum
//!
//! Serves the aircraft proxy endpoint until a shutdown signal arrives.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use crate::config::ServerConfig;
use crate::credentials::CredentialProvider;
use crate::error::{ProxyError, Result};
use crate::upstream::AircraftClient;

use super::middleware::{cors_layer, RequestLogging};
use super::routes;

/// Shared state for API handlers
#[derive(Clone)]
pub struct AppState {
    pub client: AircraftClient,
    pub credentials: Arc<dyn CredentialProvider>,
}

impl AppState {
    pub fn new(client: AircraftClient, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            client,
            credentials,
        }
    }
}

/// API server
pub struct ApiServer {
    config: ServerConfig,
    state: AppState,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Build the router
    pub fn build_router(&self) -> Router {
        let cors = cors_layer(&self.config.cors_origins);

        routes::create_router(self.state.clone())
            .layer(axum::middleware::from_fn(RequestLogging::log_request))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the API server
    #[instrument(skip(self, shutdown))]
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|e| ProxyError::InvalidConfig(format!("Invalid server address: {}", e)))?;

        let router = self.build_router();

        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("API server listening on {}", addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.changed().await;
            })
            .await?;

        info!("API server shut down");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UpstreamConfig;
    use crate::credentials::StaticCredentials;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::time::Duration;
    use tower::ServiceExt;

    fn server(host: &str, port: u16) -> ApiServer {
        let client = AircraftClient::new(&UpstreamConfig::default()).unwrap();
        let state = AppState::new(client, Arc::new(StaticCredentials::missing()));
        ApiServer::new(
            ServerConfig {
                port,
                host: host.to_string(),
                cors_origins: Vec::new(),
            },
            state,
        )
    }

    #[tokio::test]
    async fn test_router_serves_health_with_layers() {
        let router = server("127.0.0.1", 0).build_router();

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("Origin", "https://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_run_rejects_invalid_address() {
        let (_tx, rx) = watch::channel(false);
        let err = server("not a host", 3000).run(rx).await.unwrap_err();

        assert!(matches!(err, ProxyError::InvalidConfig(_)));
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown_signal() {
        let (tx, rx) = watch::channel(false);
        let api = server("127.0.0.1", 0);

        let task = tokio::spawn(async move { api.run(rx).await });
        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.send(true).unwrap();

        let result = tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .unwrap()
            .unwrap();
        assert!(result.is_ok());
    }
}
