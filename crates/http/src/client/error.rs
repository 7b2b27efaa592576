//! Client error types

use crate::types::ErrorBody;
use std::fmt;
use thiserror::Error;

/// Error payload of a non-success response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    /// `detail` string of the `{detail: ...}` body, when the server sent one
    pub detail: Option<String>,
    /// Raw response body (or the status line when the body was unreadable)
    pub body: String,
}

impl ErrorDetail {
    /// Build from a raw response body, extracting a string `detail` if present.
    ///
    /// Validation failures carry a list under `detail`; those keep the raw
    /// body only.
    pub fn from_body(body: String) -> Self {
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|parsed| match parsed.detail {
                serde_json::Value::String(detail) => Some(detail),
                _ => None,
            });
        Self { detail, body }
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => f.write_str(detail),
            None => f.write_str(&self.body),
        }
    }
}

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("Server error {status}: {detail}")]
    ServerError { status: u16, detail: ErrorDetail },

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(ErrorDetail),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(ErrorDetail),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(ErrorDetail),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(ErrorDetail),

    /// Response body did not match the expected shape
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Create error from HTTP status code and response body
    pub fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        let detail = ErrorDetail::from_body(body);
        match status.as_u16() {
            400 => Self::BadRequest(detail),
            401 => Self::AuthenticationFailed(detail),
            403 => Self::Forbidden(detail),
            404 => Self::NotFound(detail),
            _ => Self::ServerError {
                status: status.as_u16(),
                detail,
            },
        }
    }

    /// Server-provided `detail` message, if the error carried one
    pub fn detail(&self) -> Option<&str> {
        self.error_detail().and_then(|d| d.detail.as_deref())
    }

    /// HTTP status of a non-success response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest(_) => Some(400),
            Self::AuthenticationFailed(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::ServerError { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the server rejected the bearer token
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthenticationFailed(_))
    }

    /// Whether the server refused the credential (401 or 403)
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::AuthenticationFailed(_) | Self::Forbidden(_))
    }

    /// Network/transport failure: no HTTP status was received
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Request(_))
    }

    fn error_detail(&self) -> Option<&ErrorDetail> {
        match self {
            Self::BadRequest(d)
            | Self::AuthenticationFailed(d)
            | Self::Forbidden(d)
            | Self::NotFound(d)
            | Self::ServerError { detail: d, .. } => Some(d),
            _ => None,
        }
    }
}
