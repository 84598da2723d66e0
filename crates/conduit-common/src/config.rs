//! Client configuration.
//!
//! A [`Config`] can be built in code, read from a TOML file, or taken from the
//! environment.
//!
//! ## Example Configuration
//!
//! ```toml
//! api_url = "https://api.realworld.io/api"
//! timeout_seconds = 30
//! ```
//!
//! ## Environment
//!
//! - `CONDUIT_API_URL` overrides the base API address
//! - `CONDUIT_TIMEOUT_SECONDS` sets the request timeout

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Base address used when none is configured.
pub const DEFAULT_API_URL: &str = "https://api.realworld.io/api";

const API_URL_ENV: &str = "CONDUIT_API_URL";
const TIMEOUT_ENV: &str = "CONDUIT_TIMEOUT_SECONDS";

/// Configuration for the Conduit API client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base address prepended to every relative request path.
    ///
    /// Must not end with a `/`; request paths carry their own leading slash.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout in seconds. `None` disables the timeout.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_seconds: None,
        }
    }
}

impl Config {
    /// Creates a configuration targeting the given base API address.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            timeout_seconds: None,
        }
    }

    /// Set the base API address.
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Set the request timeout in seconds.
    #[must_use]
    pub const fn with_timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = Some(timeout_seconds);
        self
    }

    /// Parses a configuration from TOML text and validates it.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or validation fails.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - Deserialization fails
    /// - Validation fails
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading client config from {}", path.display());

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&contents)
    }

    /// Builds a configuration from `CONDUIT_API_URL` and `CONDUIT_TIMEOUT_SECONDS`.
    ///
    /// Unset variables fall back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is not a number or validation fails.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(api_url) = lookup(API_URL_ENV) {
            config.api_url = api_url;
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let timeout = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidEnvVar {
                    name: TIMEOUT_ENV,
                    value: raw.clone(),
                })?;
            config.timeout_seconds = Some(timeout);
        }

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the API address does not parse as an `http`/`https`
    /// URL, ends with a `/`, or the timeout is zero.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| ConfigError::InvalidApiUrl {
            url: self.api_url.clone(),
            reason: reason.to_string(),
        };

        let parsed = url::Url::parse(&self.api_url).map_err(|e| invalid(&e.to_string()))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }

        if self.api_url.ends_with('/') {
            return Err(invalid("must not end with '/'"));
        }

        if self.timeout_seconds == Some(0) {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(())
    }
}
