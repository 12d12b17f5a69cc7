//! CRUD service over the heroes collection resource.
//!
//! Every operation ensures a key exists before issuing its request. Header
//! injection and 401 recovery are the transport stack's concern; see
//! [`crate::middleware`].

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::domain::error::ClientError;
use crate::domain::ports::{ApiMethod, ApiRequest, ApiResponse, ApiTransport};
use crate::domain::{CredentialCache, HeroDraft, HeroId, Superhero};

/// Collection resource path.
pub const HEROES_PATH: &str = "/pentathlon/heroes/";

/// Authenticated client for the heroes collection.
#[derive(Clone)]
pub struct HeroesClient {
    transport: Arc<dyn ApiTransport>,
    credentials: CredentialCache,
}

impl HeroesClient {
    /// Build a client over an already decorated transport stack.
    pub fn new(transport: Arc<dyn ApiTransport>, credentials: CredentialCache) -> Self {
        Self {
            transport,
            credentials,
        }
    }

    /// Credential cache shared with the transport stack.
    #[must_use]
    pub const fn credentials(&self) -> &CredentialCache {
        &self.credentials
    }

    /// List every hero.
    ///
    /// # Errors
    ///
    /// See [`ClientError`]; nothing but a single 401 is retried.
    pub async fn list_heroes(&self) -> Result<Vec<Superhero>, ClientError> {
        let response = self
            .execute(ApiRequest::new(ApiMethod::Get, HEROES_PATH), "list heroes")
            .await?;
        decode(&response)
    }

    /// Create a hero. A full [`Superhero`] may be passed; its server-assigned
    /// fields are dropped.
    ///
    /// # Errors
    ///
    /// See [`ClientError`].
    pub async fn create_hero(&self, hero: impl Into<HeroDraft>) -> Result<Superhero, ClientError> {
        let request = ApiRequest::new(ApiMethod::Post, HEROES_PATH).with_body(draft_body(hero)?);
        let response = self.execute(request, "create hero").await?;
        decode(&response)
    }

    /// Replace the editable fields of hero `id`.
    ///
    /// # Errors
    ///
    /// See [`ClientError`].
    pub async fn update_hero(
        &self,
        id: &HeroId,
        hero: impl Into<HeroDraft>,
    ) -> Result<Superhero, ClientError> {
        let request = ApiRequest::new(ApiMethod::Put, HEROES_PATH)
            .with_member(id.as_str())
            .with_body(draft_body(hero)?);
        let response = self.execute(request, "update hero").await?;
        decode(&response)
    }

    /// Delete hero `id`, returning the server's confirmation payload.
    ///
    /// An empty confirmation body yields [`Value::Null`].
    ///
    /// # Errors
    ///
    /// See [`ClientError`].
    pub async fn delete_hero(&self, id: &HeroId) -> Result<Value, ClientError> {
        let response = self
            .execute(
                ApiRequest::new(ApiMethod::Delete, HEROES_PATH).with_member(id.as_str()),
                "delete hero",
            )
            .await?;
        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        decode(&response)
    }

    async fn execute(
        &self,
        request: ApiRequest,
        operation: &'static str,
    ) -> Result<ApiResponse, ClientError> {
        let outcome = self.exchange(request).await;
        if let Err(error) = &outcome {
            warn!(operation, error = %error, "heroes api call failed");
        }
        outcome
    }

    async fn exchange(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        self.credentials.ensure_key().await?;
        let response = self.transport.send(request).await?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(ClientError::from_status(&response))
        }
    }
}

fn draft_body(hero: impl Into<HeroDraft>) -> Result<Value, ClientError> {
    serde_json::to_value(hero.into()).map_err(|error| ClientError::Decode {
        message: format!("hero draft could not be encoded: {error}"),
    })
}

fn decode<T: DeserializeOwned>(response: &ApiResponse) -> Result<T, ClientError> {
    serde_json::from_slice(&response.body).map_err(|error| ClientError::Decode {
        message: format!("invalid heroes JSON payload: {error}"),
    })
}
