//! Transport middleware.
//!
//! Purpose: decorate an [`ApiTransport`](crate::domain::ports::ApiTransport)
//! with cross-cutting request lifecycle concerns so call sites never repeat
//! them: credential injection, recovery from rejected keys, and tracing.

pub mod authorization;
pub mod recovery;
pub mod trace;

pub use authorization::AuthorizingTransport;
pub use recovery::UnauthorizedRecovery;
pub use trace::{RequestId, TracedTransport};
