//! Service-level error returned by [`crate::domain::HeroesClient`].
//!
//! Wraps the port errors unchanged so callers can tell a provisioning
//! failure from a transport failure, and turns non-success statuses into
//! [`ClientError::Status`]. A failed key replacement during 401 recovery is
//! unwrapped to the same variants as a failed first provisioning.

use crate::domain::CredentialCacheError;
use crate::domain::ports::{ApiResponse, CredentialStoreError, ProvisioningError, TransportError};

/// Failure of a hero operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The key store could not be read or written.
    #[error(transparent)]
    Credentials(#[from] CredentialStoreError),
    /// No key could be provisioned.
    #[error(transparent)]
    Provisioning(#[from] ProvisioningError),
    /// No response was obtained.
    #[error(transparent)]
    Transport(TransportError),
    /// The server answered with a non-success status.
    #[error("heroes api returned status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Preview of the response body.
        message: String,
    },
    /// A success body could not be decoded.
    #[error("heroes api response decode failed: {message}")]
    Decode {
        /// Decoder message.
        message: String,
    },
}

impl ClientError {
    /// Whether the failure is a 401 that survived the single retry.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::Status {
                status: ApiResponse::UNAUTHORIZED,
                ..
            }
        )
    }

    pub(crate) fn from_status(response: &ApiResponse) -> Self {
        Self::Status {
            status: response.status,
            message: body_preview(&response.body),
        }
    }
}

impl From<CredentialCacheError> for ClientError {
    fn from(error: CredentialCacheError) -> Self {
        match error {
            CredentialCacheError::Store(store) => Self::Credentials(store),
            CredentialCacheError::Provisioning(provisioning) => Self::Provisioning(provisioning),
        }
    }
}

impl From<TransportError> for ClientError {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Recovery { cause } => cause.into(),
            other => Self::Transport(other),
        }
    }
}

/// Whitespace-collapsed, length-capped rendering of a response body.
pub(crate) fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
