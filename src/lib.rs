//! Aircraft Proxy
//!
//! Relays a fixed-location aircraft tracking query to a third-party REST API,
//! injecting API credentials from the environment.
//!
//! ## Features
//!
//! - Single upstream GET per request, no retries
//! - Upstream JSON relayed byte-for-byte
//! - Structured JSON errors for missing credentials, upstream failures and
//!   non-JSON responses
//! - Optional bounded wait on the upstream call

pub mod api;
pub mod config;
pub mod credentials;
pub mod error;
pub mod upstream;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::Config;
pub use credentials::{CredentialProvider, Credentials, EnvCredentials};
pub use error::{ProxyError, Result};
pub use upstream::AircraftClient;
