//! Domain primitives, ports and services.
//!
//! Purpose: define the hero model, the API key credential and the services
//! that manage it, independently of the HTTP library and storage medium.
//!
//! Public surface:
//! - Superhero / HeroDraft / HeroAttributes / HeroId: hero records.
//! - ApiKey: validated, redacted credential.
//! - CredentialCache: stored-or-provisioned key lifecycle.
//! - HeroesClient: CRUD over the heroes collection.
//! - ClientError: service-level failure.

pub mod api_key;
pub mod credential_cache;
pub mod error;
pub mod hero;
pub mod heroes_client;
pub mod ports;

pub use self::api_key::{ApiKey, ApiKeyError};
pub use self::credential_cache::{CredentialCache, CredentialCacheError};
pub use self::error::ClientError;
pub use self::hero::{HeroAttributes, HeroDraft, HeroId, HeroIdError, Superhero};
pub use self::heroes_client::{HEROES_PATH, HeroesClient};
