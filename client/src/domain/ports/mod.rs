//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod api_transport;
mod credential_store;
mod key_provisioner;

#[cfg(test)]
pub use api_transport::MockApiTransport;
pub use api_transport::{ApiMethod, ApiRequest, ApiResponse, ApiTransport, TransportError};
#[cfg(test)]
pub use credential_store::MockCredentialStore;
pub use credential_store::{CredentialStore, CredentialStoreError, InMemoryCredentialStore};
#[cfg(test)]
pub use key_provisioner::MockKeyProvisioner;
pub use key_provisioner::{KeyProvisioner, ProvisioningError};
