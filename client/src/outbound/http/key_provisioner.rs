//! `POST /api-keys/` provisioning adapter.
//!
//! Provisioning goes through the raw transport: it never carries an
//! `Authorization` header and is never retried.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::domain::ApiKey;
use crate::domain::error::body_preview;
use crate::domain::ports::{ApiMethod, ApiRequest, ApiTransport, KeyProvisioner, ProvisioningError};

/// Provisioning endpoint path.
pub const API_KEYS_PATH: &str = "/api-keys/";

/// Provisioning response; only `id` is consumed.
#[derive(Debug, Deserialize)]
struct ApiKeyDto {
    #[serde(default)]
    id: Option<Value>,
}

impl ApiKeyDto {
    fn into_key(self) -> Result<ApiKey, ProvisioningError> {
        let raw = match self.id {
            Some(Value::String(raw)) => raw,
            Some(Value::Number(number)) => number.to_string(),
            _ => return Err(ProvisioningError::missing_identifier()),
        };
        ApiKey::new(&raw).map_err(|_| ProvisioningError::missing_identifier())
    }
}

/// Key provisioner issuing `POST /api-keys/` with an empty JSON object.
pub struct HttpKeyProvisioner {
    transport: Arc<dyn ApiTransport>,
}

impl HttpKeyProvisioner {
    /// Provision through `transport`, which must not inject credentials.
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl KeyProvisioner for HttpKeyProvisioner {
    async fn provision(&self) -> Result<ApiKey, ProvisioningError> {
        let request = ApiRequest::new(ApiMethod::Post, API_KEYS_PATH).with_body(json!({}));
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|error| ProvisioningError::transport(error.to_string()))?;
        if !response.is_success() {
            return Err(ProvisioningError::rejected(
                response.status,
                body_preview(&response.body),
            ));
        }
        parse_key(&response.body)
    }
}

fn parse_key(body: &[u8]) -> Result<ApiKey, ProvisioningError> {
    let decoded: ApiKeyDto = serde_json::from_slice(body).map_err(|error| {
        ProvisioningError::decode(format!("invalid api key JSON payload: {error}"))
    })?;
    decoded.into_key()
}

#[cfg(test)]
mod tests {
    //! Regression coverage for provisioning response handling.

    use super::*;
    use crate::domain::ports::{ApiResponse, MockApiTransport, TransportError};
    use rstest::rstest;

    #[rstest]
    #[case::string_id(r#"{"id":"k-123","createdAt":"2024-01-01T00:00:00Z"}"#, "k-123")]
    #[case::numeric_id(r#"{"id":42}"#, "42")]
    #[case::padded_id(r#"{"id":"  k-9 "}"#, "k-9")]
    fn extracts_identifier(#[case] body: &str, #[case] expected: &str) {
        let key = parse_key(body.as_bytes()).expect("key parses");
        assert_eq!(key.expose(), expected);
    }

    #[rstest]
    #[case::missing(r#"{"name":"anonymous"}"#)]
    #[case::null(r#"{"id":null}"#)]
    #[case::blank(r#"{"id":"   "}"#)]
    #[case::object(r#"{"id":{"value":"k"}}"#)]
    fn rejects_responses_without_identifier(#[case] body: &str) {
        let error = parse_key(body.as_bytes()).expect_err("parse must fail");
        assert_eq!(error, ProvisioningError::missing_identifier());
    }

    #[rstest]
    fn rejects_non_json_bodies() {
        let error = parse_key(b"<html>oops</html>").expect_err("parse must fail");
        assert!(matches!(error, ProvisioningError::Decode { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn posts_empty_object_without_credentials() {
        let mut transport = MockApiTransport::new();
        transport
            .expect_send()
            .withf(|request| {
                request.method == ApiMethod::Post
                    && request.path == API_KEYS_PATH
                    && request.body == Some(json!({}))
                    && request.authorization.is_none()
            })
            .times(1)
            .returning(|_| Ok(ApiResponse::new(201, br#"{"id":"fresh"}"#.to_vec())));
        let provisioner = HttpKeyProvisioner::new(Arc::new(transport));

        let key = provisioner.provision().await.expect("provision succeeds");
        assert_eq!(key.expose(), "fresh");
    }

    #[rstest]
    #[case(500)]
    #[case(401)]
    #[case(429)]
    #[tokio::test]
    async fn non_success_status_is_rejected(#[case] status: u16) {
        let mut transport = MockApiTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(move |_| Ok(ApiResponse::new(status, b"{\"error\":\"nope\"}".to_vec())));
        let provisioner = HttpKeyProvisioner::new(Arc::new(transport));

        let error = provisioner.provision().await.expect_err("provision fails");
        assert_eq!(
            error,
            ProvisioningError::rejected(status, "{\"error\":\"nope\"}")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn transport_failures_are_wrapped() {
        let mut transport = MockApiTransport::new();
        transport
            .expect_send()
            .returning(|_| Err(TransportError::connection("connection refused")));
        let provisioner = HttpKeyProvisioner::new(Arc::new(transport));

        let error = provisioner.provision().await.expect_err("provision fails");
        assert!(matches!(error, ProvisioningError::Transport { .. }));
    }
}
