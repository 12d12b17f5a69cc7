//! Driven port for issuing HTTP requests against the heroes API.
//!
//! The domain owns the request and response shapes so call sites and
//! middleware stay independent of the HTTP library. Every HTTP status is a
//! successful [`ApiResponse`]; only failures to obtain a response are
//! [`TransportError`]s.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use super::define_port_error;
use crate::domain::{ApiKey, CredentialCacheError};

/// HTTP verbs used by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl ApiMethod {
    /// Upper-case verb name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for ApiMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request against the API, relative to the configured origin.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP verb.
    pub method: ApiMethod,
    /// Fixed route beginning with `/`, e.g. `/pentathlon/heroes/`.
    pub path: String,
    /// Member identifier appended to `path` as one percent-encoded segment.
    pub member: Option<String>,
    /// JSON body for `POST` and `PUT`.
    pub body: Option<Value>,
    /// Key sent verbatim in the `Authorization` header.
    pub authorization: Option<ApiKey>,
}

impl ApiRequest {
    /// Build a request without body or credentials.
    pub fn new(method: ApiMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            member: None,
            body: None,
            authorization: None,
        }
    }

    /// Address one member of the collection at `path`.
    #[must_use]
    pub fn with_member(mut self, member: impl Into<String>) -> Self {
        self.member = Some(member.into());
        self
    }

    /// Route and unencoded member, for logs and diagnostics only.
    #[must_use]
    pub fn target(&self) -> String {
        match &self.member {
            Some(member) => format!("{}{member}", self.path),
            None => self.path.clone(),
        }
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach or replace the credential.
    #[must_use]
    pub fn with_authorization(mut self, key: ApiKey) -> Self {
        self.authorization = Some(key);
        self
    }
}

/// Status and raw body of an HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Undecoded response body.
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Status code signalling a rejected or missing credential.
    pub const UNAUTHORIZED: u16 = 401;

    /// Build a response from its parts.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Whether the server rejected the credential.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        self.status == Self::UNAUTHORIZED
    }
}

define_port_error! {
    /// Errors surfaced while exchanging a request with the API.
    pub enum TransportError {
        /// Network transport failed before receiving a response.
        Connection {
            /// Underlying transport message.
            message: String,
        } => "api transport failed: {message}",
        /// The request exceeded the configured timeout.
        Timeout {
            /// Underlying transport message.
            message: String,
        } => "api request timed out: {message}",
        /// The request could not be built.
        InvalidRequest {
            /// Reason the request was rejected.
            message: String,
        } => "api request invalid: {message}",
        /// The stored credential could not be read.
        Credentials {
            /// Underlying store message.
            message: String,
        } => "api credentials unavailable: {message}",
        /// Replacing a rejected key failed.
        Recovery {
            /// Provisioning or store failure, kept typed.
            #[source]
            cause: CredentialCacheError,
        } => "api key recovery failed: {cause}",
    }
}

/// Port for sending one request and receiving its response.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Send `request` and return the response, whatever its status.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use pentathlon_client::domain::ports::{ApiMethod, ApiRequest, ApiTransport};
    ///
    /// let response = transport
    ///     .send(ApiRequest::new(ApiMethod::Get, "/pentathlon/heroes/"))
    ///     .await?;
    /// assert!(response.is_success() || response.is_unauthorized());
    /// ```
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}
