//! Authorization header injection.
//!
//! The Conduit API expects the JWT in the form `Authorization: Token <jwt>`,
//! not the more common `Bearer` scheme.

use std::sync::Arc;

use async_trait::async_trait;
use log::warn;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use conduit_common::CredentialAccessor;

use crate::interceptor::{Interceptor, Next, Outcome};
use crate::request::ApiRequest;

/// Adds `Authorization: Token <credential>` when the accessor holds a credential.
///
/// Without a credential the request is forwarded unchanged, including any
/// `Authorization` header the caller set explicitly.
#[derive(Clone)]
pub struct TokenInterceptor {
    credentials: Arc<dyn CredentialAccessor>,
}

impl TokenInterceptor {
    /// Creates an interceptor reading from a shared accessor.
    pub fn new(credentials: Arc<dyn CredentialAccessor>) -> Self {
        Self { credentials }
    }

    /// Creates an interceptor that owns its accessor.
    pub fn from_accessor(credentials: impl CredentialAccessor + 'static) -> Self {
        Self::new(Arc::new(credentials))
    }

    fn authorize(&self, request: ApiRequest) -> ApiRequest {
        let Some(token) = self.credentials.credential() else {
            return request;
        };

        match header_value(&token) {
            Some(value) => request.with_header(AUTHORIZATION, value),
            None => {
                warn!("Stored credential is not a valid header value; sending request without it");
                request
            }
        }
    }
}

fn header_value(token: &SecretString) -> Option<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Token {}", token.expose_secret())).ok()?;
    value.set_sensitive(true);
    Some(value)
}

// Custom Debug implementation to avoid touching the credential
impl std::fmt::Debug for TokenInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenInterceptor").finish_non_exhaustive()
    }
}

#[async_trait]
impl Interceptor for TokenInterceptor {
    async fn intercept(&self, request: ApiRequest, next: Next<'_>) -> Outcome {
        next.run(self.authorize(request)).await
    }
}
