//! The HTTP client for the ledger REST API.

use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;
use reqwest::{Client, RequestBuilder, Url, header::AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// The ways a request to the ledger API can fail.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request never got a response, e.g. the connection was refused or timed out.
    #[error("could not reach the ledger API: {0}")]
    Transport(String),

    /// The ledger API responded with a non-success status code.
    ///
    /// `body` is the raw response body, which may hold a structured error payload.
    #[error("the ledger API responded with {status}: {body}")]
    Status {
        status: StatusCode,
        status_text: String,
        body: String,
    },

    /// The response body was not the JSON that was expected.
    #[error("could not decode the ledger API response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Create a [ApiError::Status] using the canonical reason for `status` as the status text.
    pub fn status(status: StatusCode, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            status_text: status
                .canonical_reason()
                .unwrap_or("Unknown Status")
                .to_owned(),
            body: body.into(),
        }
    }

    /// The status to pass on to the browser: the ledger API's own status for
    /// client errors, otherwise [StatusCode::BAD_GATEWAY].
    pub fn response_status(&self) -> StatusCode {
        match self {
            ApiError::Status { status, .. } if status.is_client_error() => *status,
            _ => StatusCode::BAD_GATEWAY,
        }
    }

    /// A short description of the failure, e.g. "Bad Request" or "Service Unavailable".
    pub fn status_text(&self) -> &str {
        match self {
            ApiError::Status { status_text, .. } => status_text,
            ApiError::Transport(_) => "Service Unavailable",
            ApiError::Decode(_) => "Bad Gateway",
        }
    }
}

/// A form submitted to the ledger API, as a flat list of name/value pairs.
pub type FormBody = [(String, String)];

/// The requests made against the ledger API.
///
/// `endpoint` is either a path relative to the API base URL (e.g.
/// "/api/status/") or an absolute URL as returned in the `url` fields of
/// API records.
#[async_trait]
pub trait LedgerApi: Send + Sync {
    /// GET `endpoint` and return the JSON body.
    async fn get(&self, endpoint: &str) -> Result<Value, ApiError>;

    /// POST `fields` as an URL encoded form to `endpoint` and return the JSON body.
    async fn post_form(&self, endpoint: &str, fields: &FormBody) -> Result<Value, ApiError>;
}

/// GET `endpoint` and decode the body as `T`.
pub async fn fetch<T: DeserializeOwned>(
    api: &dyn LedgerApi,
    endpoint: &str,
) -> Result<T, ApiError> {
    let body = api.get(endpoint).await?;
    decode(body)
}

/// POST `fields` to `endpoint` and decode the body as `T`.
pub async fn submit<T: DeserializeOwned>(
    api: &dyn LedgerApi,
    endpoint: &str,
    fields: &FormBody,
) -> Result<T, ApiError> {
    let body = api.post_form(endpoint, fields).await?;
    decode(body)
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|error| ApiError::Decode(error.to_string()))
}

/// A [LedgerApi] that talks to a ledger server over HTTP.
#[derive(Debug, Clone)]
pub struct HttpLedgerApi {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpLedgerApi {
    /// Create a client for the ledger API at `base_url`.
    ///
    /// If `token` is set, it is sent with every request as `Authorization: Token <token>`.
    ///
    /// # Errors
    /// Returns an error if `base_url` is not a valid URL or the HTTP client cannot be built.
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|error| ApiError::Transport(format!("invalid base URL {base_url}: {error}")))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| ApiError::Transport(error.to_string()))?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// Resolve `endpoint` against the base URL, absolute URLs are kept as is.
    ///
    /// # Errors
    /// Returns an error if the endpoint is invalid or names another origin
    /// than the base URL, the API token is only ever sent to the ledger API.
    pub fn resolve(&self, endpoint: &str) -> Result<Url, ApiError> {
        let url = self
            .base_url
            .join(endpoint)
            .map_err(|error| ApiError::Transport(format!("invalid endpoint {endpoint}: {error}")))?;

        if url.origin() != self.base_url.origin() {
            return Err(ApiError::Transport(format!(
                "refusing to send a request outside the ledger API: {url}"
            )));
        }

        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header(AUTHORIZATION, format!("Token {token}")),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, ApiError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|error| ApiError::Transport(error.to_string()))?;

        let status = StatusCode::from_u16(response.status().as_u16())
            .unwrap_or(StatusCode::BAD_GATEWAY);
        let body = response
            .text()
            .await
            .map_err(|error| ApiError::Transport(error.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::status(status, body));
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|error| ApiError::Decode(error.to_string()))
    }
}

#[async_trait]
impl LedgerApi for HttpLedgerApi {
    async fn get(&self, endpoint: &str) -> Result<Value, ApiError> {
        let url = self.resolve(endpoint)?;
        tracing::debug!("GET {url}");

        self.send(self.client.get(url)).await
    }

    async fn post_form(&self, endpoint: &str, fields: &FormBody) -> Result<Value, ApiError> {
        let url = self.resolve(endpoint)?;
        tracing::debug!("POST {url}");

        self.send(self.client.post(url).form(fields)).await
    }
}
