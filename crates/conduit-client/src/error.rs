//! Error types for the client library.

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use thiserror::Error;
use typed_builder::TypedBuilder;

use conduit_common::{ConfigError, ErrorsEnvelope, ValidationErrors};

/// Non-success HTTP response as reported by the transport.
///
/// This is the native failure envelope: it keeps the full status, headers and
/// raw body so interceptors can inspect or reshape it.
#[derive(Debug, Clone, TypedBuilder)]
pub struct HttpErrorResponse {
    /// Absolute URL the request was sent to.
    #[builder(setter(into))]
    pub url: String,
    /// HTTP status code.
    pub status: StatusCode,
    /// Status text; the canonical reason phrase when the server sent none.
    #[builder(default = status.canonical_reason().unwrap_or_default().to_string(), setter(into))]
    pub status_text: String,
    /// Response headers.
    #[builder(default)]
    pub headers: HeaderMap,
    /// Raw response body, empty when the server sent none.
    #[builder(default, setter(into))]
    pub body: String,
}

impl HttpErrorResponse {
    /// Returns the `errors` payload if the body has the validation error shape.
    pub fn validation_errors(&self) -> Option<ValidationErrors> {
        ErrorsEnvelope::parse(&self.body).map(|envelope| envelope.errors)
    }
}

impl std::fmt::Display for HttpErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} for {}",
            self.status.as_u16(),
            self.status_text,
            self.url
        )
    }
}

/// Errors that can occur when talking to the Conduit API.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// Network or HTTP request failure.
    ///
    /// Indicates issues like DNS resolution, connection failures, or socket errors.
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Middleware layer error.
    ///
    /// Errors from reqwest middleware installed on the transport.
    #[error("Middleware error: {0}")]
    MiddlewareError(#[from] reqwest_middleware::Error),

    /// JSON serialization or deserialization error.
    ///
    /// Occurs when request/response JSON cannot be properly encoded or decoded.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Client configuration issue.
    ///
    /// Invalid base URL, a request target that is not absolute at dispatch time,
    /// or a transport that could not be built.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Configuration failed to load or validate.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The server answered with a non-success status.
    #[error("HTTP error: {0}")]
    Http(HttpErrorResponse),

    /// The server rejected the input with per-field messages.
    ///
    /// Produced by the error interceptor from a 4xx response carrying an
    /// `errors` body; status, headers and wrapper are discarded.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),
}

impl ClientError {
    /// Check if this is a normalized validation error.
    pub const fn is_validation_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Get the per-field messages if this is a validation error.
    pub const fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// Get the HTTP status if the server answered with a non-success status.
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http(response) => Some(response.status),
            _ => None,
        }
    }

    /// Check if this is an authentication error (HTTP 401).
    pub fn is_authentication_error(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}
