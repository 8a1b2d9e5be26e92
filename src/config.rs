use crate::error::{ProxyError, Result};
use std::env;
use std::time::Duration;
use url::Url;

/// Production endpoint: aircraft around a fixed point west of Lisbon
pub const DEFAULT_UPSTREAM_URL: &str =
    "https://aircraftscatter.p.rapidapi.com/lat/38.6892887/lon/-9.311829/";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Upstream API configuration
    pub upstream: UpstreamConfig,
    /// Logging configuration
    pub log: LogConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on (default: 3000)
    pub port: u16,
    /// Host to bind to (default: 0.0.0.0)
    pub host: String,
    /// Allowed CORS origins (comma-separated, empty = any origin)
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Fully qualified endpoint queried on every invocation
    pub url: Url,
    /// Bounded wait on the outbound call, `None` waits indefinitely
    pub timeout: Option<Duration>,
    /// Egress proxy for the outbound call; `None` dials directly and ignores
    /// `HTTP(S)_PROXY` from the environment
    pub proxy: Option<Url>,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level (debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty)
    pub format: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: Url::parse(DEFAULT_UPSTREAM_URL).expect("default upstream URL is valid"),
            timeout: None,
            proxy: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            server: ServerConfig {
                port: get_env_or("SERVER_PORT", "3000").parse().map_err(|_| {
                    ProxyError::InvalidConfig("SERVER_PORT must be a valid port number".into())
                })?,
                host: get_env_or("SERVER_HOST", "0.0.0.0"),
                cors_origins: get_env_or("CORS_ORIGINS", "")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            },
            upstream: UpstreamConfig {
                url: parse_upstream_url(&get_env_or("AIRCRAFT_UPSTREAM_URL", DEFAULT_UPSTREAM_URL))?,
                timeout: parse_timeout(&get_env_or("UPSTREAM_TIMEOUT_SECS", ""))?,
                proxy: parse_egress_proxy(&get_env_or("UPSTREAM_PROXY", ""))?,
            },
            log: LogConfig {
                level: get_env_or("LOG_LEVEL", "info"),
                format: get_env_or("LOG_FORMAT", "pretty"),
            },
        })
    }

    /// Get the server bind address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_upstream_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| {
        ProxyError::InvalidConfig(format!("AIRCRAFT_UPSTREAM_URL must be a valid URL: {}", e))
    })?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ProxyError::InvalidConfig(format!(
                "AIRCRAFT_UPSTREAM_URL has unsupported scheme: {}",
                other
            )))
        }
    }

    if url.host_str().is_none() {
        return Err(ProxyError::InvalidConfig(
            "AIRCRAFT_UPSTREAM_URL must include a host".into(),
        ));
    }

    Ok(url)
}

fn parse_egress_proxy(raw: &str) -> Result<Option<Url>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let url = Url::parse(raw).map_err(|e| {
        ProxyError::InvalidConfig(format!("UPSTREAM_PROXY must be a valid URL: {}", e))
    })?;

    // Reject URLs that carry request-specific components.
    if url.fragment().is_some() || url.query().is_some() {
        return Err(ProxyError::InvalidConfig(
            "UPSTREAM_PROXY must not include query/fragment".into(),
        ));
    }

    match url.scheme() {
        "http" | "https" => Ok(Some(url)),
        other => Err(ProxyError::InvalidConfig(format!(
            "UPSTREAM_PROXY has unsupported scheme: {}",
            other
        ))),
    }
}

fn parse_timeout(raw: &str) -> Result<Option<Duration>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let secs: u64 = raw.parse().map_err(|_| {
        ProxyError::InvalidConfig("UPSTREAM_TIMEOUT_SECS must be a whole number of seconds".into())
    })?;

    Ok((secs > 0).then(|| Duration::from_secs(secs)))
}

/// Get environment variable with a default value
fn get_env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
