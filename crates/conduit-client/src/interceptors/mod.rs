//! The standard interceptors for the Conduit API.
//!
//! - [`ApiUrlInterceptor`] prefixes relative request paths with the configured base address
//! - [`TokenInterceptor`] attaches `Authorization: Token <jwt>` when a credential is available
//! - [`ErrorInterceptor`] reshapes 4xx validation failures into [`ValidationErrors`](conduit_common::ValidationErrors)

pub mod api_url;
pub mod error;
pub mod token;

pub use api_url::ApiUrlInterceptor;
pub use error::ErrorInterceptor;
pub use token::TokenInterceptor;
