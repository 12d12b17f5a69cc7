//! Tracing decorator attaching a request-scoped identifier.
//!
//! Each HTTP attempt receives a UUID `request_id` stored in task-local
//! storage and recorded on a `tracing` span. The reqwest adapter reads it
//! back to send a `request-id` header, so client and server logs can be
//! joined. Provisioning calls and retries after a 401 get identifiers of
//! their own.
//!
//! Tokio task-local variables are not inherited across spawned tasks. Use
//! [`RequestId::scope`] when moving work onto another task.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tokio::task_local;
use tracing::{Instrument, debug, debug_span, warn};
use uuid::Uuid;

use crate::domain::ports::{ApiRequest, ApiResponse, ApiTransport, TransportError};

task_local! {
    static REQUEST_ID: RequestId;
}

/// Per-request identifier exposed via task-local storage.
///
/// # Examples
/// ```
/// use pentathlon_client::middleware::trace::RequestId;
///
/// async fn header_value() -> Option<String> {
///     RequestId::current().map(|id| id.to_string())
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(Uuid);

impl RequestId {
    #[rustfmt::skip]
    fn generate() -> Self { Self(Uuid::new_v4()) }

    /// Returns the current request identifier if one is in scope.
    #[rustfmt::skip]
    #[must_use]
    pub fn current() -> Option<Self> { REQUEST_ID.try_with(|id| *id).ok() }

    /// Execute the provided future with the supplied identifier in scope.
    pub async fn scope<Fut>(request_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        REQUEST_ID.scope(request_id, fut).await
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Transport decorator logging every exchange under a fresh [`RequestId`].
///
/// Completions are logged at `debug`, transport failures at `warn`. The
/// credential is never recorded.
pub struct TracedTransport {
    inner: Arc<dyn ApiTransport>,
}

impl TracedTransport {
    /// Wrap `inner`.
    pub fn new(inner: Arc<dyn ApiTransport>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ApiTransport for TracedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let request_id = RequestId::generate();
        let span = debug_span!(
            "api_request",
            %request_id,
            method = %request.method,
            path = %request.target(),
        );
        let exchange = async move {
            let started = Instant::now();
            let outcome = self.inner.send(request).await;
            let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            match &outcome {
                Ok(response) => debug!(status = response.status, elapsed_ms, "api request completed"),
                Err(error) => warn!(%error, elapsed_ms, "api request failed"),
            }
            outcome
        };
        RequestId::scope(request_id, exchange.instrument(span)).await
    }
}
