//! Upstream API credentials
//!
//! The key/host pair is resolved on every invocation so rotated secrets take
//! effect without a restart.

use std::env;
use std::fmt;

/// Environment variable holding the API key
pub const KEY_ENV: &str = "RAPIDAPI_KEY";
/// Environment variable holding the API host
pub const HOST_ENV: &str = "RAPIDAPI_HOST";

/// Key/host pair sent to the upstream API
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub key: String,
    pub host: String,
}

impl Credentials {
    pub fn new(key: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            host: host.into(),
        }
    }

    /// Build credentials only if both values are non-empty
    pub fn from_parts(key: Option<String>, host: Option<String>) -> Option<Self> {
        let key = key.filter(|k| !k.trim().is_empty())?;
        let host = host.filter(|h| !h.trim().is_empty())?;
        Some(Self { key, host })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &"<redacted>")
            .field("host", &self.host)
            .finish()
    }
}

/// Source of upstream credentials
pub trait CredentialProvider: Send + Sync {
    /// Resolve the current credentials, `None` if either value is absent
    fn credentials(&self) -> Option<Credentials>;
}

/// Reads `RAPIDAPI_KEY` and `RAPIDAPI_HOST` from the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl CredentialProvider for EnvCredentials {
    fn credentials(&self) -> Option<Credentials> {
        Credentials::from_parts(env::var(KEY_ENV).ok(), env::var(HOST_ENV).ok())
    }
}

/// Fixed credentials, e.g. when embedding the router
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials(Option<Credentials>);

impl StaticCredentials {
    pub fn new(credentials: Credentials) -> Self {
        Self(Some(credentials))
    }

    pub fn missing() -> Self {
        Self(None)
    }
}

impl CredentialProvider for StaticCredentials {
    fn credentials(&self) -> Option<Credentials> {
        self.0.clone()
    }
}
