//! Driven port for obtaining a fresh API key from the server.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::ApiKey;

define_port_error! {
    /// Errors surfaced while provisioning a key.
    pub enum ProvisioningError {
        /// No response was obtained from the provisioning endpoint.
        Transport {
            /// Underlying transport message.
            message: String,
        } => "key provisioning transport failed: {message}",
        /// The endpoint answered with a non-success status.
        Rejected {
            /// HTTP status returned.
            status: u16,
            /// Preview of the response body.
            message: String,
        } => "key provisioning rejected with status {status}: {message}",
        /// The response carried no usable identifier.
        MissingIdentifier => "key provisioning response lacks an id",
        /// The response body was not valid JSON.
        Decode {
            /// Decoder message.
            message: String,
        } => "key provisioning response decode failed: {message}",
    }
}

/// Port for requesting a brand-new key.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyProvisioner: Send + Sync {
    /// Ask the server for a new key. Never consults or updates any store.
    async fn provision(&self) -> Result<ApiKey, ProvisioningError>;
}
