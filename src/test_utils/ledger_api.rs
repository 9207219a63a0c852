use std::{collections::HashMap, sync::Mutex, time::Duration};

use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::Value;

use crate::api::{ApiError, FormBody, LedgerApi};

/// A request received by [FakeLedgerApi].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RecordedRequest {
    Get(String),
    Post {
        endpoint: String,
        fields: Vec<(String, String)>,
    },
}

impl RecordedRequest {
    pub(crate) fn endpoint(&self) -> &str {
        match self {
            RecordedRequest::Get(endpoint) | RecordedRequest::Post { endpoint, .. } => endpoint,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Method {
    Get,
    Post,
}

/// A [LedgerApi] that serves canned responses and records every request.
///
/// Endpoints without a canned response answer with 404 Not Found.
#[derive(Debug, Default)]
pub(crate) struct FakeLedgerApi {
    responses: HashMap<(Method, String), Result<Value, ApiError>>,
    requests: Mutex<Vec<RecordedRequest>>,
    delay: Option<Duration>,
}

impl FakeLedgerApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_get(mut self, endpoint: &str, body: Value) -> Self {
        self.responses
            .insert((Method::Get, endpoint.to_owned()), Ok(body));
        self
    }

    pub(crate) fn with_get_error(mut self, endpoint: &str, error: ApiError) -> Self {
        self.responses
            .insert((Method::Get, endpoint.to_owned()), Err(error));
        self
    }

    pub(crate) fn with_post(mut self, endpoint: &str, body: Value) -> Self {
        self.responses
            .insert((Method::Post, endpoint.to_owned()), Ok(body));
        self
    }

    pub(crate) fn with_post_error(mut self, endpoint: &str, error: ApiError) -> Self {
        self.responses
            .insert((Method::Post, endpoint.to_owned()), Err(error));
        self
    }

    /// Wait for `delay` before answering each request.
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    async fn respond(&self, method: Method, endpoint: &str) -> Result<Value, ApiError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.responses
            .get(&(method, endpoint.to_owned()))
            .cloned()
            .unwrap_or_else(|| Err(ApiError::status(StatusCode::NOT_FOUND, "")))
    }
}

#[async_trait]
impl LedgerApi for FakeLedgerApi {
    async fn get(&self, endpoint: &str) -> Result<Value, ApiError> {
        self.requests
            .lock()
            .unwrap()
            .push(RecordedRequest::Get(endpoint.to_owned()));

        self.respond(Method::Get, endpoint).await
    }

    async fn post_form(&self, endpoint: &str, fields: &FormBody) -> Result<Value, ApiError> {
        self.requests.lock().unwrap().push(RecordedRequest::Post {
            endpoint: endpoint.to_owned(),
            fields: fields.to_vec(),
        });

        self.respond(Method::Post, endpoint).await
    }
}
