//! # conduit-client
//!
//! Interceptor-based HTTP client for the Conduit (RealWorld) API.
//!
//! Requests are written against API-relative paths and pass through an ordered
//! chain of [`Interceptor`]s before a [`Transport`] dispatches them:
//! - [`TokenInterceptor`] attaches `Authorization: Token <jwt>` when the user is signed in
//! - [`ApiUrlInterceptor`] prefixes the configured base address
//! - [`ErrorInterceptor`] turns `{"errors": {...}}` validation failures into
//!   [`ClientError::Validation`]
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use conduit_client::{ApiClient, ClientError};
//! use conduit_common::{Config, TokenStore};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), ClientError> {
//! let config = Config::from_env()?;
//! let tokens = Arc::new(TokenStore::new());
//! let client = ApiClient::new(&config, tokens.clone())?;
//!
//! let login = json!({ "user": { "email": "jake@jake.jake", "password": "jakejake" } });
//! match client.post::<serde_json::Value, _>("/users/login", &login).await {
//!     Ok(user) => {
//!         if let Some(token) = user["user"]["token"].as_str() {
//!             tokens.save_token(token);
//!         }
//!     }
//!     Err(ClientError::Validation(errors)) => {
//!         for message in errors.full_messages() {
//!             eprintln!("{message}");
//!         }
//!     }
//!     Err(other) => return Err(other),
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod interceptor;
pub mod interceptors;
pub mod request;
pub mod transport;

pub use client::{ApiClient, ApiClientBuilder};
pub use error::{ClientError, HttpErrorResponse};
pub use interceptor::{Interceptor, Next, Outcome, Transport};
pub use interceptors::{ApiUrlInterceptor, ErrorInterceptor, TokenInterceptor};
pub use request::{ApiRequest, ApiResponse};
pub use transport::HttpTransport;
