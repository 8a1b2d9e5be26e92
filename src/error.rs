use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Unified error type for the aircraft proxy
#[derive(Error, Debug)]
pub enum ProxyError {
    // Configuration errors
    #[error("API keys not configured. Please check RAPIDAPI_KEY and RAPIDAPI_HOST environment variables.")]
    MissingCredentials,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Upstream errors
    #[error("Failed to fetch data from external API: Status {}.", .status.as_u16())]
    UpstreamStatus { status: StatusCode, body: String },

    #[error("External API did not return JSON. Check API logs/status.")]
    NotJson {
        content_type: Option<String>,
        body: String,
    },

    #[error("Malformed JSON from external API: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("Upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    // I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for proxy operations
pub type Result<T> = std::result::Result<T, ProxyError>;

impl ProxyError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // Mirrors whatever the upstream answered
            ProxyError::UpstreamStatus { status, .. } => *status,

            ProxyError::MissingCredentials
            | ProxyError::InvalidConfig(_)
            | ProxyError::NotJson { .. }
            | ProxyError::MalformedBody(_)
            | ProxyError::Transport(_)
            | ProxyError::Io(_)
            | ProxyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Check if this error originated from the upstream API rather than this service
    pub fn is_upstream_error(&self) -> bool {
        matches!(
            self,
            ProxyError::UpstreamStatus { .. }
                | ProxyError::NotJson { .. }
                | ProxyError::MalformedBody(_)
                | ProxyError::Transport(_)
        )
    }

    /// JSON body sent back to the caller
    pub fn body(&self) -> ErrorBody {
        match self {
            ProxyError::MissingCredentials => ErrorBody::new(self.to_string()),
            ProxyError::UpstreamStatus { body, .. } => ErrorBody {
                details: Some(body.clone()),
                ..ErrorBody::new(self.to_string())
            },
            ProxyError::NotJson { body, .. } => ErrorBody {
                response_body: Some(body.clone()),
                ..ErrorBody::new(self.to_string())
            },
            other => ErrorBody {
                details: Some(other.to_string()),
                ..ErrorBody::new("Internal Server Error")
            },
        }
    }
}

/// Error payload returned to callers; absent fields are omitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_body: Option<String>,
}

impl ErrorBody {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            response_body: None,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.body())).into_response()
    }
}
