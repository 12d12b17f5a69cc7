//! Response decorator recovering from a rejected API key.
//!
//! On a 401 the decorator provisions a replacement key, persists it over the
//! previous one, and reissues the original request exactly once with the new
//! key attached explicitly. The retry's outcome is final: a second 401 is
//! returned to the caller as-is. Any 401 triggers re-provisioning; the
//! decorator does not try to tell an expired key from other rejections.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::CredentialCache;
use crate::domain::ports::{ApiRequest, ApiResponse, ApiTransport, TransportError};

/// Single-shot retry-on-401 decorator.
pub struct UnauthorizedRecovery {
    inner: Arc<dyn ApiTransport>,
    credentials: CredentialCache,
}

impl UnauthorizedRecovery {
    /// Wrap `inner`, replacing rejected keys through `credentials`.
    pub fn new(inner: Arc<dyn ApiTransport>, credentials: CredentialCache) -> Self {
        Self { inner, credentials }
    }
}

#[async_trait]
impl ApiTransport for UnauthorizedRecovery {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let response = self.inner.send(request.clone()).await?;
        if !response.is_unauthorized() {
            return Ok(response);
        }

        warn!(
            method = %request.method,
            path = %request.target(),
            "api key rejected; provisioning a replacement and retrying once"
        );
        let replacement = self
            .credentials
            .replace_key()
            .await
            .map_err(TransportError::recovery)?;
        self.inner
            .send(request.with_authorization(replacement))
            .await
    }
}
