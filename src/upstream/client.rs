//! HTTP client for the aircraft scatter API

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::value::RawValue;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::config::UpstreamConfig;
use crate::credentials::Credentials;
use crate::error::{ProxyError, Result};

/// Header carrying the API key
pub const KEY_HEADER: &str = "X-RapidAPI-Key";
/// Header carrying the API host
pub const HOST_HEADER: &str = "X-RapidAPI-Host";

/// Thin wrapper around a shared `reqwest::Client` bound to one endpoint
#[derive(Clone)]
pub struct AircraftClient {
    http: Client,
    url: Url,
}

impl AircraftClient {
    /// Create a new client
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        builder = match &config.proxy {
            Some(url) => {
                let proxy = reqwest::Proxy::all(url.as_str()).map_err(|e| {
                    ProxyError::InvalidConfig(format!("Invalid UPSTREAM_PROXY: {}", e))
                })?;
                info!("Upstream requests routed through egress proxy {}", redact(url));
                builder.proxy(proxy)
            }
            None => builder.no_proxy(),
        };

        let http = builder
            .build()
            .map_err(|e| ProxyError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            url: config.url.clone(),
        })
    }

    /// Endpoint queried by [`fetch`](Self::fetch)
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Issue the GET and return the upstream JSON document untouched.
    ///
    /// The returned value is the exact text the upstream sent, so key order and
    /// number formatting survive the relay.
    #[instrument(skip_all, fields(url = %self.url))]
    pub async fn fetch(&self, credentials: &Credentials) -> Result<Box<RawValue>> {
        info!("Requesting aircraft data from upstream");

        let response = self
            .http
            .get(self.url.clone())
            .header(KEY_HEADER, &credentials.key)
            .header(HOST_HEADER, &credentials.host)
            .send()
            .await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        info!(
            status = status.as_u16(),
            content_type = content_type.as_deref().unwrap_or("<none>"),
            "Upstream responded"
        );

        if !status.is_success() {
            let body = response.text().await?;
            error!(status = status.as_u16(), body = %body, "Upstream returned an error status");
            return Err(ProxyError::UpstreamStatus { status, body });
        }

        if !is_json(content_type.as_deref()) {
            let body = response.text().await?;
            error!(
                content_type = content_type.as_deref().unwrap_or("<none>"),
                body = %body,
                "Upstream did not return JSON"
            );
            return Err(ProxyError::NotJson { content_type, body });
        }

        let bytes = response.bytes().await?;
        let payload: Box<RawValue> = serde_json::from_slice(&bytes)?;
        debug!(bytes = bytes.len(), "Upstream JSON parsed");

        Ok(payload)
    }
}

/// Proxy URL without its password, for logs
fn redact(url: &Url) -> String {
    let mut shown = url.clone();
    if shown.password().is_some() {
        let _ = shown.set_password(Some("***"));
    }
    shown.to_string()
}

fn is_json(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
        .unwrap_or(false)
}
