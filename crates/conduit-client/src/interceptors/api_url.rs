//! Base address prefixing.

use async_trait::async_trait;
use log::debug;

use conduit_common::Config;

use crate::interceptor::{Interceptor, Next, Outcome};
use crate::request::ApiRequest;

/// Rewrites relative request paths to `api_url + path`.
///
/// Targets that already carry an `http`/`https` scheme are forwarded as-is.
#[derive(Debug, Clone)]
pub struct ApiUrlInterceptor {
    api_url: String,
}

impl ApiUrlInterceptor {
    /// Creates an interceptor prefixing paths with `api_url`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
        }
    }

    /// Creates an interceptor using [`Config::api_url`].
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_url.clone())
    }

    /// The base address prepended to relative paths.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn rewrite(&self, request: ApiRequest) -> ApiRequest {
        if request.is_absolute() {
            debug!("Leaving absolute URL {} untouched", request.url());
            return request;
        }

        let url = format!("{}{}", self.api_url, request.url());
        request.with_url(url)
    }
}

#[async_trait]
impl Interceptor for ApiUrlInterceptor {
    async fn intercept(&self, request: ApiRequest, next: Next<'_>) -> Outcome {
        next.run(self.rewrite(request)).await
    }
}
