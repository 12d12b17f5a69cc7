//! Driven port for the durable single-entry API key store.

use std::sync::{Mutex, PoisonError};

use super::define_port_error;
use crate::domain::ApiKey;

define_port_error! {
    /// Errors surfaced while reading or writing the stored key.
    pub enum CredentialStoreError {
        /// The backing medium could not be read or written.
        Io {
            /// Underlying I/O message.
            message: String,
        } => "credential store I/O failed: {message}",
        /// The stored entry exists but is unusable.
        Corrupt {
            /// Reason the entry was rejected.
            message: String,
        } => "credential store entry is corrupt: {message}",
    }
}

/// Port holding at most one API key across sessions.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialStore: Send + Sync {
    /// Read the stored key, if any. Has no side effects.
    fn load(&self) -> Result<Option<ApiKey>, CredentialStoreError>;

    /// Persist `key`, replacing any previous entry.
    fn store(&self, key: &ApiKey) -> Result<(), CredentialStoreError>;
}

/// Process-local store; contents vanish with the process.
///
/// # Examples
/// ```
/// use pentathlon_client::ApiKey;
/// use pentathlon_client::domain::ports::{CredentialStore, InMemoryCredentialStore};
///
/// let store = InMemoryCredentialStore::default();
/// assert!(store.load()?.is_none());
/// store.store(&ApiKey::new("abc").unwrap())?;
/// assert_eq!(store.load()?.map(|key| key.expose().to_owned()), Some("abc".to_owned()));
/// # Ok::<(), pentathlon_client::domain::ports::CredentialStoreError>(())
/// ```
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    slot: Mutex<Option<ApiKey>>,
}

impl InMemoryCredentialStore {
    /// Start with `key` already stored.
    #[must_use]
    pub fn with_key(key: ApiKey) -> Self {
        Self {
            slot: Mutex::new(Some(key)),
        }
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn load(&self) -> Result<Option<ApiKey>, CredentialStoreError> {
        Ok(self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn store(&self, key: &ApiKey) -> Result<(), CredentialStoreError> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(key.clone());
        Ok(())
    }
}
