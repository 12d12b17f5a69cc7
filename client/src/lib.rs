//! Client library for the pentathlon heroes REST API.
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] owns the hero model, the API key, the ports, the
//!   [`domain::CredentialCache`] and the [`domain::HeroesClient`] service
//! - [`middleware`] decorates an [`domain::ports::ApiTransport`] with header
//!   injection, 401 recovery and request tracing
//! - [`outbound`] provides the reqwest transport, the key provisioning
//!   adapter and the credential stores
//! - [`bootstrap`] wires the stack from [`config::ClientSettings`]

pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod middleware;
pub mod outbound;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use bootstrap::{BootstrapError, build_heroes_client};
pub use config::ClientSettings;
pub use domain::{ApiKey, ClientError, HeroDraft, HeroesClient, Superhero};
