//! Lazily provisioned, durably cached API key.
//!
//! The cache is the only owner of key lifecycle decisions: read the stored
//! key, provision one when absent, and replace it wholesale when the server
//! rejects it. It is injected into the client and the recovery middleware
//! instead of living in global state.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::ApiKey;
use crate::domain::ports::{
    CredentialStore, CredentialStoreError, KeyProvisioner, ProvisioningError,
};

/// Failure while obtaining or persisting a key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialCacheError {
    /// The store failed.
    #[error(transparent)]
    Store(#[from] CredentialStoreError),
    /// Provisioning failed.
    #[error(transparent)]
    Provisioning(#[from] ProvisioningError),
}

/// Key cache combining a durable store with a provisioner.
#[derive(Clone)]
pub struct CredentialCache {
    store: Arc<dyn CredentialStore>,
    provisioner: Arc<dyn KeyProvisioner>,
}

impl CredentialCache {
    /// Build a cache over the given ports.
    pub fn new(store: Arc<dyn CredentialStore>, provisioner: Arc<dyn KeyProvisioner>) -> Self {
        Self { store, provisioner }
    }

    /// Stored key, if any. Never provisions.
    ///
    /// # Errors
    ///
    /// Returns the store error when the entry cannot be read.
    pub fn stored_key(&self) -> Result<Option<ApiKey>, CredentialStoreError> {
        self.store.load()
    }

    /// Request a fresh key from the server without persisting it.
    ///
    /// # Errors
    ///
    /// Returns the provisioner error unchanged.
    pub async fn provision_key(&self) -> Result<ApiKey, ProvisioningError> {
        debug!("provisioning api key");
        self.provisioner.provision().await
    }

    /// Stored key, or a newly provisioned one persisted before returning.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let first = cache.ensure_key().await?;
    /// let second = cache.ensure_key().await?;
    /// assert_eq!(first, second); // provisioned at most once
    /// ```
    ///
    /// # Errors
    ///
    /// Fails when the store cannot be read or written, or provisioning fails.
    pub async fn ensure_key(&self) -> Result<ApiKey, CredentialCacheError> {
        if let Some(key) = self.stored_key()? {
            return Ok(key);
        }
        self.replace_key().await
    }

    /// Provision a key and persist it, overwriting any stored key.
    ///
    /// # Errors
    ///
    /// Fails when provisioning fails or the new key cannot be stored; on a
    /// provisioning failure the previous entry is left untouched.
    pub async fn replace_key(&self) -> Result<ApiKey, CredentialCacheError> {
        let key = self.provision_key().await?;
        self.store.store(&key)?;
        info!(fingerprint = %key.fingerprint(), "persisted api key");
        Ok(key)
    }
}
