//! Request decorator attaching the stored API key.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::CredentialCache;
use crate::domain::ports::{ApiRequest, ApiResponse, ApiTransport, TransportError};

/// Sets `Authorization` to the currently stored key on every request.
///
/// Requests pass through untouched when no key is stored. The store is read
/// per request, so a key replaced by another caller is picked up by the
/// next request.
pub struct AuthorizingTransport {
    inner: Arc<dyn ApiTransport>,
    credentials: CredentialCache,
}

impl AuthorizingTransport {
    /// Wrap `inner`, reading keys from `credentials`.
    pub fn new(inner: Arc<dyn ApiTransport>, credentials: CredentialCache) -> Self {
        Self { inner, credentials }
    }
}

#[async_trait]
impl ApiTransport for AuthorizingTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let stored = self
            .credentials
            .stored_key()
            .map_err(|error| TransportError::credentials(error.to_string()))?;
        let outbound = match stored {
            Some(key) => request.with_authorization(key),
            None => request,
        };
        self.inner.send(outbound).await
    }
}
