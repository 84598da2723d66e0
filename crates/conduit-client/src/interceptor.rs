//! The interceptor pipeline.
//!
//! A request travels through an ordered list of [`Interceptor`]s before a
//! [`Transport`] sends it. Each interceptor receives the request together with
//! a [`Next`] continuation; calling [`Next::run`] hands the (possibly rewritten)
//! request to the rest of the chain and yields its single outcome, which the
//! interceptor may inspect or reshape before returning it.
//!
//! ```text
//! ApiClient::execute
//!     → TokenInterceptor   (adds Authorization)
//!     → ApiUrlInterceptor  (prefixes the base address)
//!     → ErrorInterceptor   (reshapes validation failures on the way back)
//!     → Transport::send
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ClientError;
use crate::request::{ApiRequest, ApiResponse};

/// Result of running a request through the pipeline.
pub type Outcome = Result<ApiResponse, ClientError>;

/// A unit that transforms an outgoing request or its outcome.
///
/// Interceptors are stateless with respect to a single call: anything they need
/// (base address, credential accessor) is handed to them at construction.
#[async_trait]
pub trait Interceptor: Send + Sync + 'static {
    /// Handles `request`, usually by forwarding a rewritten request to `next`.
    ///
    /// # Errors
    ///
    /// Returns whatever failure the rest of the chain produced, possibly reshaped.
    async fn intercept(&self, request: ApiRequest, next: Next<'_>) -> Outcome;
}

/// The terminal stage of the pipeline that actually dispatches a request.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and returns its outcome.
    ///
    /// Non-success statuses are reported as [`ClientError::Http`].
    ///
    /// # Errors
    ///
    /// Returns an error for network failures and non-success responses.
    async fn send(&self, request: ApiRequest) -> Outcome;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: ApiRequest) -> Outcome {
        (**self).send(request).await
    }
}

/// Continuation handed to an [`Interceptor`].
///
/// Holds the interceptors that have not run yet and the transport at the end of
/// the chain. It is consumed by [`Next::run`], so each interceptor can proceed
/// at most once per call.
#[derive(Clone, Copy)]
pub struct Next<'a> {
    transport: &'a dyn Transport,
    interceptors: &'a [Arc<dyn Interceptor>],
}

impl<'a> Next<'a> {
    /// Creates a continuation over `interceptors` ending in `transport`.
    pub const fn new(
        transport: &'a dyn Transport,
        interceptors: &'a [Arc<dyn Interceptor>],
    ) -> Self {
        Self {
            transport,
            interceptors,
        }
    }

    /// Runs the remaining chain with `request`.
    ///
    /// # Errors
    ///
    /// Returns the failure produced by a later interceptor or the transport.
    pub async fn run(mut self, request: ApiRequest) -> Outcome {
        if let Some((current, rest)) = self.interceptors.split_first() {
            self.interceptors = rest;
            current.intercept(request, self).await
        } else {
            self.transport.send(request).await
        }
    }
}

impl std::fmt::Debug for Next<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Next")
            .field("remaining", &self.interceptors.len())
            .finish_non_exhaustive()
    }
}


#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::Mutex;

    use reqwest::header::{HeaderName, HeaderValue};

    use super::test_support::RecordingTransport;
    use super::*;

    struct Tag {
        name: &'static str,
        order: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl Interceptor for Tag {
        async fn intercept(&self, request: ApiRequest, next: Next<'_>) -> Outcome {
            self.order.lock().unwrap().push(self.name);
            let request = request.with_header(
                HeaderName::from_static("x-tag"),
                HeaderValue::from_static(self.name),
            );
            next.run(request).await
        }
    }

    struct ShortCircuit;

    #[async_trait]
    impl Interceptor for ShortCircuit {
        async fn intercept(&self, _request: ApiRequest, _next: Next<'_>) -> Outcome {
            Ok(ApiResponse::new(reqwest::StatusCode::NO_CONTENT, ""))
        }
    }

    #[tokio::test]
    async fn test_empty_chain_calls_transport() {
        let transport = RecordingTransport::ok("done");
        let response = Next::new(&transport, &[])
            .run(ApiRequest::get("/articles"))
            .await
            .unwrap();

        assert_eq!(response.body, "done");
        assert_eq!(transport.calls(), 1);
        assert_eq!(transport.last_request().unwrap().url(), "/articles");
    }

    #[tokio::test]
    async fn test_interceptors_run_in_registration_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let chain: Vec<Arc<dyn Interceptor>> = vec![
            Arc::new(Tag {
                name: "first",
                order: order.clone(),
            }),
            Arc::new(Tag {
                name: "second",
                order: order.clone(),
            }),
        ];
        let transport = RecordingTransport::ok("");

        Next::new(&transport, &chain)
            .run(ApiRequest::get("/tags"))
            .await
            .unwrap();

        assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.headers()["x-tag"], "second");
    }

    #[tokio::test]
    async fn test_interceptor_can_short_circuit() {
        let chain: Vec<Arc<dyn Interceptor>> = vec![Arc::new(ShortCircuit)];
        let transport = RecordingTransport::ok("");

        let response = Next::new(&transport, &chain)
            .run(ApiRequest::get("/tags"))
            .await
            .unwrap();

        assert_eq!(response.status, reqwest::StatusCode::NO_CONTENT);
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_arc_transport() {
        let transport: Arc<dyn Transport> = Arc::new(RecordingTransport::ok("shared"));
        let response = transport.send(ApiRequest::get("/tags")).await.unwrap();
        assert_eq!(response.body, "shared");
    }
}
