//! Credential store adapters.
//!
//! The in-memory store lives with the port in
//! [`crate::domain::ports::InMemoryCredentialStore`]; this module adds the
//! durable file-backed store used by the command-line front end.

mod file_store;

pub use file_store::{API_KEY_ENTRY, FileCredentialStore};
