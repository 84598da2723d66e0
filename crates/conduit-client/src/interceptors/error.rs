//! Validation error normalization.

use async_trait::async_trait;
use log::debug;

use crate::error::ClientError;
use crate::interceptor::{Interceptor, Next, Outcome};
use crate::request::ApiRequest;

/// Reshapes client-error responses carrying an `errors` body.
///
/// A 4xx failure whose body is `{"errors": {field: [message, ...]}}` is
/// re-raised as [`ClientError::Validation`] holding only the inner mapping.
/// Successful responses and every other failure pass through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorInterceptor;

impl ErrorInterceptor {
    /// Creates the interceptor.
    pub const fn new() -> Self {
        Self
    }
}

fn normalize(error: ClientError) -> ClientError {
    let response = match error {
        ClientError::Http(response) => response,
        other => return other,
    };

    if !response.status.is_client_error() {
        return ClientError::Http(response);
    }

    match response.validation_errors() {
        Some(errors) => {
            debug!(
                "Normalized {} response from {} into {} field error(s)",
                response.status.as_u16(),
                response.url,
                errors.len()
            );
            ClientError::Validation(errors)
        }
        None => ClientError::Http(response),
    }
}

#[async_trait]
impl Interceptor for ErrorInterceptor {
    async fn intercept(&self, request: ApiRequest, next: Next<'_>) -> Outcome {
        next.run(request).await.map_err(normalize)
    }
}
