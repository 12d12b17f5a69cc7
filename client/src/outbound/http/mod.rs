//! HTTP outbound adapters.
//!
//! This module provides the reqwest implementation of the `ApiTransport`
//! port and the `KeyProvisioner` built on top of any transport.

mod key_provisioner;
mod reqwest_transport;

pub use key_provisioner::{API_KEYS_PATH, HttpKeyProvisioner};
pub use reqwest_transport::ReqwestTransport;
