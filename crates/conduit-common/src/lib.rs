//! # conduit-common
//!
//! Common types shared by the Conduit (RealWorld) API client.
//!
//! This crate provides the pieces of the client that do not depend on an HTTP stack:
//! - Client configuration (base API address, timeout) loaded from code, TOML or the environment
//! - Credential access for attaching the user's token to outgoing requests
//! - The per-field validation error payload returned by the API
//!
//! ## Example
//!
//! ```
//! use conduit_common::{Config, CredentialAccessor, TokenStore, ValidationErrors};
//!
//! let config = Config::new("https://api.example.com").with_timeout_seconds(30);
//! assert!(config.validate().is_ok());
//!
//! let store = TokenStore::new();
//! assert!(store.credential().is_none());
//! store.save_token("jwt.token.value");
//! assert!(store.credential().is_some());
//!
//! let errors: ValidationErrors =
//!     serde_json::from_str(r#"{"email": ["has already been taken"]}"#).unwrap();
//! assert_eq!(errors.messages("email"), Some(&["has already been taken".to_string()][..]));
//! ```

/// Client configuration.
///
/// Holds the base API address every relative request path is resolved against.
pub mod config;
/// Credential access.
///
/// Provides the `CredentialAccessor` capability and an in-memory token store.
pub mod credentials;
/// Error types for configuration loading and validation.
pub mod error;
/// Per-field validation error payloads.
pub mod validation;

pub use config::{Config, DEFAULT_API_URL};
pub use credentials::{CredentialAccessor, TokenStore};
pub use error::ConfigError;
pub use validation::{ErrorsEnvelope, ValidationErrors};
