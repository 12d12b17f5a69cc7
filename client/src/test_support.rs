//! Test utilities for the client crate.
//!
//! This module provides shared doubles for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is only compiled for tests or with the
//! `test-support` feature.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ApiKey;
use crate::domain::ports::{
    ApiMethod, ApiRequest, ApiResponse, ApiTransport, CredentialStore, CredentialStoreError,
    InMemoryCredentialStore, TransportError,
};

/// Observable side effect captured by the doubles, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedEvent {
    /// A request reached the scripted transport.
    Request {
        /// HTTP verb.
        method: ApiMethod,
        /// Request path, with any member identifier appended unencoded.
        path: String,
        /// Raw `Authorization` value, if any.
        authorization: Option<String>,
        /// JSON body, if any.
        body: Option<Value>,
    },
    /// A key was written to the recording store.
    Stored {
        /// Raw key value.
        key: String,
    },
}

impl RecordedEvent {
    /// Shorthand for a request event without a body.
    pub fn request(method: ApiMethod, path: &str, authorization: Option<&str>) -> Self {
        Self::Request {
            method,
            path: path.to_owned(),
            authorization: authorization.map(str::to_owned),
            body: None,
        }
    }

    /// Shorthand for a store event.
    pub fn stored(key: &str) -> Self {
        Self::Stored {
            key: key.to_owned(),
        }
    }

    /// Same event with any request body dropped, for order-only assertions.
    #[must_use]
    pub fn without_body(self) -> Self {
        match self {
            Self::Request {
                method,
                path,
                authorization,
                ..
            } => Self::Request {
                method,
                path,
                authorization,
                body: None,
            },
            stored @ Self::Stored { .. } => stored,
        }
    }
}

/// Shared, ordered log of [`RecordedEvent`]s.
#[derive(Debug, Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<RecordedEvent>>>);

impl EventLog {
    fn entries(&self) -> MutexGuard<'_, Vec<RecordedEvent>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, event: RecordedEvent) {
        self.entries().push(event);
    }

    /// Copy of every event recorded so far.
    #[must_use]
    pub fn snapshot(&self) -> Vec<RecordedEvent> {
        self.entries().clone()
    }

    /// Recorded events with request bodies dropped.
    #[must_use]
    pub fn outline(&self) -> Vec<RecordedEvent> {
        self.snapshot()
            .into_iter()
            .map(RecordedEvent::without_body)
            .collect()
    }

    /// Number of requests sent to `path`.
    #[must_use]
    pub fn requests_to(&self, path: &str) -> usize {
        self.entries()
            .iter()
            .filter(|event| {
                matches!(event, RecordedEvent::Request { path: sent, .. } if sent == path)
            })
            .count()
    }
}

/// Transport answering from a queue of scripted outcomes.
///
/// Outcomes are consumed in call order regardless of path. An exhausted
/// script yields [`TransportError::InvalidRequest`].
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
    log: EventLog,
}

impl ScriptedTransport {
    /// Empty script writing to `log`.
    #[must_use]
    pub fn new(log: EventLog) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            log,
        }
    }

    /// Queue a response with a JSON body.
    #[must_use]
    pub fn respond(self, status: u16, body: &Value) -> Self {
        self.push(Ok(ApiResponse::new(status, body.to_string())))
    }

    /// Queue a response with a raw body.
    #[must_use]
    pub fn respond_raw(self, status: u16, body: &str) -> Self {
        self.push(Ok(ApiResponse::new(status, body)))
    }

    /// Queue a transport failure.
    #[must_use]
    pub fn fail(self, error: TransportError) -> Self {
        self.push(Err(error))
    }

    /// Outcomes not consumed yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn push(self, outcome: Result<ApiResponse, TransportError>) -> Self {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(outcome);
        self
    }
}

#[async_trait]
impl ApiTransport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.log.push(RecordedEvent::Request {
            method: request.method,
            path: request.target(),
            authorization: request.authorization.as_ref().map(|key| key.expose().to_owned()),
            body: request.body,
        });
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::invalid_request("transport script exhausted")))
    }
}

/// In-memory store that records every write into an [`EventLog`].
pub struct RecordingCredentialStore {
    inner: InMemoryCredentialStore,
    log: EventLog,
}

impl RecordingCredentialStore {
    /// Empty store.
    #[must_use]
    pub fn empty(log: EventLog) -> Self {
        Self {
            inner: InMemoryCredentialStore::default(),
            log,
        }
    }

    /// Store seeded with `raw` without recording the seed.
    ///
    /// # Panics
    ///
    /// Panics when `raw` is blank.
    #[must_use]
    pub fn seeded(raw: &str, log: EventLog) -> Self {
        let key = match ApiKey::new(raw) {
            Ok(key) => key,
            Err(error) => panic!("seed key must be valid: {error}"),
        };
        Self {
            inner: InMemoryCredentialStore::with_key(key),
            log,
        }
    }

    /// Raw value of the stored key.
    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.inner
            .load()
            .ok()
            .flatten()
            .map(|key| key.expose().to_owned())
    }
}

impl CredentialStore for RecordingCredentialStore {
    fn load(&self) -> Result<Option<ApiKey>, CredentialStoreError> {
        self.inner.load()
    }

    fn store(&self, key: &ApiKey) -> Result<(), CredentialStoreError> {
        self.inner.store(key)?;
        self.log.push(RecordedEvent::stored(key.expose()));
        Ok(())
    }
}
