//! High-level API client.
//!
//! [`ApiClient`] owns a [`Transport`] and an ordered interceptor chain. Requests
//! are issued with paths relative to the API (`/articles`, `/user`), and the
//! chain turns them into authenticated absolute requests.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use conduit_client::ApiClient;
//! use conduit_common::{Config, TokenStore};
//! use serde_json::Value;
//!
//! # async fn example() -> Result<(), conduit_client::ClientError> {
//! let tokens = Arc::new(TokenStore::new());
//! let client = ApiClient::new(&Config::new("https://api.realworld.io/api"), tokens.clone())?;
//!
//! tokens.save_token("jwt-from-login");
//! let articles: Value = client.get("/articles?limit=10").await?;
//! println!("{articles}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom chains
//!
//! ```
//! use conduit_client::{ApiClientBuilder, ApiUrlInterceptor, ErrorInterceptor, HttpTransport};
//! use conduit_common::Config;
//!
//! # fn example() -> Result<(), conduit_client::ClientError> {
//! let config = Config::new("http://localhost:3000/api");
//! let client = ApiClientBuilder::new(HttpTransport::new(&config)?)
//!     .with(ApiUrlInterceptor::from_config(&config))
//!     .with(ErrorInterceptor::new())
//!     .build();
//! assert_eq!(client.interceptor_count(), 2);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use conduit_common::{Config, CredentialAccessor};

use crate::error::ClientError;
use crate::interceptor::{Interceptor, Next, Outcome, Transport};
use crate::interceptors::{ApiUrlInterceptor, ErrorInterceptor, TokenInterceptor};
use crate::request::{ApiRequest, ApiResponse};
use crate::transport::HttpTransport;

/// Client for the Conduit API.
///
/// Cheap to clone; clones share the transport and interceptors.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    interceptors: Arc<[Arc<dyn Interceptor>]>,
}

impl ApiClient {
    /// Creates a client with the standard chain over an [`HttpTransport`].
    ///
    /// Requests pass through [`TokenInterceptor`], then [`ApiUrlInterceptor`],
    /// then [`ErrorInterceptor`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client cannot be built.
    pub fn new(
        config: &Config,
        credentials: Arc<dyn CredentialAccessor>,
    ) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::standard(transport, config, credentials))
    }

    /// Creates a client with the standard chain over a custom transport.
    pub fn standard(
        transport: impl Transport + 'static,
        config: &Config,
        credentials: Arc<dyn CredentialAccessor>,
    ) -> Self {
        ApiClientBuilder::new(transport)
            .with(TokenInterceptor::new(credentials))
            .with(ApiUrlInterceptor::from_config(config))
            .with(ErrorInterceptor::new())
            .build()
    }

    /// Starts a builder over `transport` with an empty chain.
    pub fn builder(transport: impl Transport + 'static) -> ApiClientBuilder {
        ApiClientBuilder::new(transport)
    }

    /// Number of interceptors in the chain.
    pub fn interceptor_count(&self) -> usize {
        self.interceptors.len()
    }

    /// Runs `request` through the chain and the transport.
    ///
    /// # Errors
    ///
    /// Returns the failure produced by the chain, with validation failures
    /// already normalized when the chain contains an [`ErrorInterceptor`].
    pub async fn execute(&self, request: ApiRequest) -> Outcome {
        Next::new(self.transport.as_ref(), &self.interceptors)
            .run(request)
            .await
    }

    /// Sends a `GET` and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode into `T`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.execute(ApiRequest::get(path)).await?.json()
    }

    /// Sends a `POST` with a JSON body and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode into `T`.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        let request = ApiRequest::post(path).with_json(body)?;
        self.execute(request).await?.json()
    }

    /// Sends a `PUT` with a JSON body and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode into `T`.
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        let request = ApiRequest::put(path).with_json(body)?;
        self.execute(request).await?.json()
    }

    /// Sends a `DELETE`, returning the raw response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete(&self, path: &str) -> Result<ApiResponse, ClientError> {
        self.execute(ApiRequest::delete(path)).await
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("interceptors", &self.interceptors.len())
            .finish_non_exhaustive()
    }
}

/// Builder assembling an [`ApiClient`] from a transport and interceptors.
///
/// Interceptors run in the order they are added.
pub struct ApiClientBuilder {
    transport: Arc<dyn Transport>,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl ApiClientBuilder {
    /// Starts a builder over `transport`.
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
            interceptors: Vec::new(),
        }
    }

    /// Appends an interceptor to the chain.
    #[must_use]
    pub fn with(self, interceptor: impl Interceptor) -> Self {
        self.with_arc(Arc::new(interceptor))
    }

    /// Appends a shared interceptor to the chain.
    #[must_use]
    pub fn with_arc(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Finishes the client.
    pub fn build(self) -> ApiClient {
        ApiClient {
            transport: self.transport,
            interceptors: self.interceptors.into(),
        }
    }
}

impl std::fmt::Debug for ApiClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClientBuilder")
            .field("interceptors", &self.interceptors.len())
            .finish_non_exhaustive()
    }
}
