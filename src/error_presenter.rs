//! Turns failed ledger API requests into alerts.
//!
//! Parsing a failure produces an [ErrorPayload] and rendering only ever looks
//! at that payload, never at the raw response.

use serde_json::Value;

use crate::{alert::Alert, api::ApiError};

/// The title of alerts that are not about a single field.
const ERROR_TITLE: &str = "error";

/// The error information carried by a failed ledger API request.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorPayload {
    /// A single error message, e.g. the first entry of a list of errors.
    SingleMessage(String),
    /// Errors keyed by the name of the field they concern, in document order.
    FieldErrors(Vec<(String, String)>),
    /// No structured details, only the HTTP status description.
    RawStatus(String),
}

impl ErrorPayload {
    /// Parse the body of a failed response.
    ///
    /// A JSON list yields its first entry only, any further entries are dropped.
    /// A JSON object yields one error per key. Empty or unparseable bodies
    /// fall back to `status_text`.
    pub fn parse(status_text: &str, body: &str) -> Self {
        let raw_status = || ErrorPayload::RawStatus(status_text.to_owned());

        if body.trim().is_empty() {
            return raw_status();
        }

        match serde_json::from_str::<Value>(body) {
            Ok(Value::Array(items)) => match items.first() {
                Some(first) => ErrorPayload::SingleMessage(message_text(first)),
                None => raw_status(),
            },
            Ok(Value::Object(fields)) if !fields.is_empty() => ErrorPayload::FieldErrors(
                fields
                    .iter()
                    .map(|(key, value)| (key.clone(), message_text(value)))
                    .collect(),
            ),
            Ok(Value::String(message)) => ErrorPayload::SingleMessage(message),
            Ok(_) => raw_status(),
            Err(error) => {
                tracing::debug!("error response body is not JSON ({error}): {body}");
                raw_status()
            }
        }
    }

    /// Classify any [ApiError].
    pub fn from_api_error(error: &ApiError) -> Self {
        match error {
            ApiError::Status {
                status_text, body, ..
            } => Self::parse(status_text, body),
            ApiError::Transport(description) => ErrorPayload::RawStatus(description.clone()),
            ApiError::Decode(_) => ErrorPayload::RawStatus("invalid response".to_owned()),
        }
    }

    /// Render one error alert per error item.
    pub fn into_alerts(self) -> Vec<Alert> {
        match self {
            ErrorPayload::SingleMessage(message) | ErrorPayload::RawStatus(message) => {
                vec![Alert::Error {
                    message: ERROR_TITLE.to_owned(),
                    details: message,
                }]
            }
            ErrorPayload::FieldErrors(fields) => fields
                .into_iter()
                .map(|(field, message)| Alert::Error {
                    message: field,
                    details: message,
                })
                .collect(),
        }
    }
}

/// Log a failed ledger API request and render it as alerts.
pub fn present_api_error(error: &ApiError) -> Vec<Alert> {
    tracing::error!("ledger API request failed: {error}");
    ErrorPayload::from_api_error(error).into_alerts()
}

/// Messages are usually strings, but field errors are often lists of strings.
fn message_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(message_text)
            .collect::<Vec<_>>()
            .join(" "),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
