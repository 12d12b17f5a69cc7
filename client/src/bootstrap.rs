//! Wiring of the transport stack and credential cache.
//!
//! Request flow for resource calls:
//!
//! ```text
//! HeroesClient -> AuthorizingTransport -> UnauthorizedRecovery
//!              -> TracedTransport -> raw transport
//! ```
//!
//! Provisioning shares the traced raw transport, so it never receives an
//! `Authorization` header, and every attempt (retries included) gets its own
//! request span.

use std::sync::Arc;

use crate::config::{ClientSettings, SettingsError};
use crate::domain::ports::{ApiTransport, CredentialStore, CredentialStoreError};
use crate::domain::{CredentialCache, HeroesClient};
use crate::middleware::{AuthorizingTransport, TracedTransport, UnauthorizedRecovery};
use crate::outbound::credentials::FileCredentialStore;
use crate::outbound::http::{HttpKeyProvisioner, ReqwestTransport};

/// Failure while building a client from settings.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// Settings were invalid.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// The credentials path was unusable.
    #[error(transparent)]
    Credentials(#[from] CredentialStoreError),
    /// The HTTP client could not be constructed.
    #[error("http client construction failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Build a client talking to the configured origin, caching its key in the
/// configured credentials file.
///
/// # Errors
///
/// Fails on invalid settings or when the HTTP client cannot be built.
pub fn build_heroes_client(settings: &ClientSettings) -> Result<HeroesClient, BootstrapError> {
    let base_url = settings.base_url()?;
    let timeout = settings.request_timeout()?;
    let store = FileCredentialStore::new(&settings.credentials_path())?;
    let raw = ReqwestTransport::new(base_url, timeout)?;
    Ok(assemble_client(Arc::new(raw), Arc::new(store)))
}

/// Decorate `raw` with the middleware stack and bind it to `store`.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use pentathlon_client::bootstrap::assemble_client;
/// use pentathlon_client::domain::ports::InMemoryCredentialStore;
/// use pentathlon_client::outbound::http::ReqwestTransport;
///
/// let base = url::Url::parse("https://codetest-api.applivery.io").unwrap();
/// let raw = ReqwestTransport::new(base, None).unwrap();
/// let client = assemble_client(Arc::new(raw), Arc::new(InMemoryCredentialStore::default()));
/// assert!(client.credentials().stored_key().unwrap().is_none());
/// ```
pub fn assemble_client(
    raw: Arc<dyn ApiTransport>,
    store: Arc<dyn CredentialStore>,
) -> HeroesClient {
    let traced: Arc<dyn ApiTransport> = Arc::new(TracedTransport::new(raw));
    let provisioner = HttpKeyProvisioner::new(traced.clone());
    let credentials = CredentialCache::new(store, Arc::new(provisioner));

    let recovering = UnauthorizedRecovery::new(traced, credentials.clone());
    let authorizing = AuthorizingTransport::new(Arc::new(recovering), credentials.clone());

    HeroesClient::new(Arc::new(authorizing), credentials)
}
