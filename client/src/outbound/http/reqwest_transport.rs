//! Reqwest-backed transport adapter.
//!
//! This adapter owns transport details only: URL joining, JSON headers,
//! the raw `Authorization` header, the `request-id` header and transport
//! error mapping. Status codes
//! are handed back untouched for the middleware and services to interpret.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Method, Url};

use crate::domain::ports::{ApiMethod, ApiRequest, ApiResponse, ApiTransport, TransportError};
use crate::middleware::RequestId;

const JSON_CONTENT_TYPE: &str = "application/json";
/// Header carrying the [`RequestId`] of the attempt, when one is in scope.
const REQUEST_ID_HEADER: &str = "request-id";

/// Transport that performs HTTP requests against one API origin.
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
}

impl ReqwestTransport {
    /// Build a transport for `base_url`, with an optional request timeout.
    /// Without a timeout reqwest's defaults apply.
    /// ```rust,ignore
    /// let transport = ReqwestTransport::new(base_url, None);
    /// assert!(transport.is_ok() || transport.is_err());
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let builder = Client::builder();
        let client = match timeout {
            Some(limit) => builder.timeout(limit),
            None => builder,
        }
        .build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, request: &ApiRequest) -> Result<Url, TransportError> {
        let url = join_path(&self.base_url, &request.path)?;
        match &request.member {
            Some(member) => push_member(url, member),
            None => Ok(url),
        }
    }
}

#[async_trait]
impl ApiTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.endpoint(&request)?;
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(ACCEPT, JSON_CONTENT_TYPE);
        if let Some(key) = &request.authorization {
            let mut value = HeaderValue::from_str(key.expose()).map_err(|_| {
                TransportError::invalid_request("api key is not a valid header value")
            })?;
            value.set_sensitive(true);
            builder = builder.header(AUTHORIZATION, value);
        }
        if let Some(request_id) = RequestId::current() {
            builder = builder.header(REQUEST_ID_HEADER, request_id.to_string());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_transport_error)?;
        Ok(ApiResponse::new(status, body.to_vec()))
    }
}

fn to_reqwest_method(method: ApiMethod) -> Method {
    match method {
        ApiMethod::Get => Method::GET,
        ApiMethod::Post => Method::POST,
        ApiMethod::Put => Method::PUT,
        ApiMethod::Delete => Method::DELETE,
    }
}

/// Append `path` to `base`, keeping any path prefix the base already has.
fn join_path(base: &Url, path: &str) -> Result<Url, TransportError> {
    let prefix = base.as_str().trim_end_matches('/');
    let suffix = path.trim_start_matches('/');
    Url::parse(&format!("{prefix}/{suffix}")).map_err(|error| {
        TransportError::invalid_request(format!("cannot build url for {path}: {error}"))
    })
}

/// Append `member` as a single segment. `/`, `?`, `#` and `%` are
/// percent-encoded; dot segments are refused since `Url` would drop them.
fn push_member(mut url: Url, member: &str) -> Result<Url, TransportError> {
    if member.trim().is_empty() || matches!(member, "." | "..") {
        return Err(TransportError::invalid_request(format!(
            "'{member}' cannot address a collection member"
        )));
    }
    url.path_segments_mut()
        .map_err(|()| TransportError::invalid_request("base url cannot carry a path"))?
        .pop_if_empty()
        .push(member);
    Ok(url)
}

fn map_transport_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::timeout(error.to_string())
    } else {
        TransportError::connection(error.to_string())
    }
}
