//! reqwest-backed transport.
//!
//! [`HttpTransport`] is the terminal stage of the pipeline. It sends requests
//! through a [`ClientWithMiddleware`], so hosts can stack their own reqwest
//! middleware (tracing, metrics) underneath the interceptors.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error, warn};
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest_middleware::ClientWithMiddleware;

use conduit_common::Config;

use crate::error::{ClientError, HttpErrorResponse};
use crate::interceptor::{Outcome, Transport};
use crate::request::{ApiRequest, ApiResponse};

/// Transport sending requests over HTTP.
#[derive(Clone)]
pub struct HttpTransport {
    client: ClientWithMiddleware,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport").finish_non_exhaustive()
    }
}

impl HttpTransport {
    /// Creates a transport honouring the timeout in `config`.
    ///
    /// `None` means no timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        config.validate()?;

        let reqwest_client = match config.timeout_seconds {
            Some(timeout) => reqwest::Client::builder()
                .timeout(Duration::from_secs(timeout))
                .build()?,
            None => reqwest::Client::builder().build()?,
        };

        let client = reqwest_middleware::ClientBuilder::new(reqwest_client).build();
        Ok(Self { client })
    }

    /// Wraps an existing middleware client.
    pub const fn from_client(client: ClientWithMiddleware) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Outcome {
        let (method, url, headers, body) = request.into_parts();

        // Validate URL construction
        let parsed = reqwest::Url::parse(&url)
            .map_err(|e| ClientError::ConfigurationError(format!("Invalid URL '{url}': {e}")))?;

        debug!("{method} {url}");

        let mut request_builder = self.client.request(method, parsed).headers(headers);
        if let Some(body) = body {
            request_builder = request_builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(serde_json::to_string(&body)?);
        }

        let response = request_builder.send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await.map_err(|e| {
            warn!("Failed to read response body: {e}");
            ClientError::NetworkError(e)
        })?;

        let status_text = status.canonical_reason().unwrap_or_default().to_string();

        if !status.is_success() {
            error!("Request to {url} failed with status {}", status.as_u16());
            return Err(ClientError::Http(HttpErrorResponse {
                url,
                status,
                status_text,
                headers,
                body,
            }));
        }

        Ok(ApiResponse {
            status,
            status_text,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use reqwest::StatusCode;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn transport_for(server: &MockServer) -> HttpTransport {
        HttpTransport::new(&Config::new(server.uri()).with_timeout_seconds(5)).unwrap()
    }

    #[tokio::test]
    async fn test_successful_get() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "tags": ["rust", "http"] }))
                    .insert_header("x-request-id", "abc"),
            )
            .mount(&mock_server)
            .await;

        let transport = transport_for(&mock_server);
        let url = format!("{}/api/tags", mock_server.uri());
        let response = transport.send(ApiRequest::get(url)).await.unwrap();

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.status_text, "OK");
        assert_eq!(response.headers["x-request-id"], "abc");
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value, json!({ "tags": ["rust", "http"] }));
    }

    #[tokio::test]
    async fn test_json_body_is_sent() {
        let mock_server = MockServer::start().await;
        let payload = json!({ "user": { "email": "a@b.c", "password": "pw" } });

        Mock::given(method("POST"))
            .and(path("/api/users/login"))
            .and(header("content-type", "application/json"))
            .and(body_json(&payload))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user": {} })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let transport = transport_for(&mock_server);
        let request = ApiRequest::post(format!("{}/api/users/login", mock_server.uri()))
            .with_json(&payload)
            .unwrap();

        transport.send(request).await.unwrap();
    }

    #[tokio::test]
    async fn test_error_status_becomes_http_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/users"))
            .respond_with(
                ResponseTemplate::new(422)
                    .set_body_json(json!({ "errors": { "email": ["has already been taken"] } })),
            )
            .mount(&mock_server)
            .await;

        let transport = transport_for(&mock_server);
        let url = format!("{}/api/users", mock_server.uri());
        let error = transport.send(ApiRequest::post(url.clone())).await.unwrap_err();

        match error {
            ClientError::Http(response) => {
                assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
                assert_eq!(response.status_text, "Unprocessable Entity");
                assert_eq!(response.url, url);
                assert!(response.validation_errors().is_some());
            }
            other => unreachable!("expected HTTP error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_from_client() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/profiles/jake"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = reqwest_middleware::ClientBuilder::new(reqwest::Client::new()).build();
        let transport = HttpTransport::from_client(client);
        let url = format!("{}/api/profiles/jake", mock_server.uri());

        let response = transport.send(ApiRequest::get(url)).await.unwrap();
        assert_eq!(response.body, "{}");
    }

    #[tokio::test]
    async fn test_relative_url_is_rejected() {
        let transport = HttpTransport::new(&Config::default()).unwrap();
        let error = transport.send(ApiRequest::get("/articles")).await.unwrap_err();

        assert!(matches!(error, ClientError::ConfigurationError(ref m) if m.contains("/articles")));
    }

    #[tokio::test]
    async fn test_connection_failure_is_middleware_error() {
        // Nothing listens on port 9 of localhost.
        let transport = HttpTransport::new(&Config::new("http://127.0.0.1:9")).unwrap();
        let error = transport
            .send(ApiRequest::get("http://127.0.0.1:9/api/tags"))
            .await
            .unwrap_err();

        assert!(matches!(error, ClientError::MiddlewareError(_)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = HttpTransport::new(&Config::new("not a url"));
        assert!(matches!(result, Err(ClientError::Config(_))));
    }
}
