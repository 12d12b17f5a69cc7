//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **http**: reqwest-backed transport and key provisioning
//! - **credentials**: durable storage for the API key
//!
//! Adapters are thin translators between domain types and their medium.
//! They contain no retry or key lifecycle logic.

pub mod credentials;
pub mod http;
