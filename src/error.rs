//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    alert::{Alert, alerts_response},
    api::ApiError,
    error_presenter::present_api_error,
    internal_server_error::InternalServerError,
    not_found::NotFoundError,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A request to the ledger API failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The date in the URL is not a valid balance sheet date, e.g. "2019-01-31".
    #[error("\"{0}\" is not a valid balance sheet date")]
    InvalidSheetDate(String),

    /// The payments form was submitted without choosing a payment.
    #[error("no payment was selected")]
    NoPaymentSelected,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidSheetDate(_) => NotFoundError.into_response(),
            Error::Api(ApiError::Status { status, .. }) if status == StatusCode::NOT_FOUND => {
                NotFoundError.into_response()
            }
            Error::Api(ApiError::Transport(error)) => {
                tracing::error!("could not reach the ledger API: {error}");
                InternalServerError {
                    description: "The ledger is unavailable.",
                    fix: "Check that the ledger server is running and try again.",
                }
                .into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with HTML alerts.
    pub fn into_alert_response(self) -> Response {
        match self {
            Error::Api(error) => alerts_response(error.response_status(), present_api_error(&error)),
            Error::NoPaymentSelected => alerts_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                vec![Alert::Error {
                    message: "could not create payment".to_owned(),
                    details: "please select a payment first!".to_owned(),
                }],
            ),
            Error::InvalidSheetDate(date) => alerts_response(
                StatusCode::NOT_FOUND,
                vec![Alert::Error {
                    message: "Invalid balance sheet".to_owned(),
                    details: format!("There is no balance sheet for \"{date}\"."),
                }],
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use scraper::Selector;

    use crate::{
        api::ApiError,
        test_utils::{get_header, parse_html_fragment},
    };

    use super::Error;

    #[tokio::test]
    async fn missing_sheet_renders_not_found_page() {
        let response =
            Error::Api(ApiError::status(StatusCode::NOT_FOUND, "")).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn field_errors_keep_client_error_status() {
        let response = Error::Api(ApiError::status(
            StatusCode::BAD_REQUEST,
            r#"{"amount": "required"}"#,
        ))
        .into_alert_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(get_header(&response, "hx-reswap"), "beforeend");

        let html = parse_html_fragment(response).await;
        let alert_count = html
            .select(&Selector::parse("div.alert-danger").unwrap())
            .count();
        assert_eq!(alert_count, 1);
    }

    #[tokio::test]
    async fn server_errors_become_bad_gateway() {
        let response = Error::Api(ApiError::Transport("connection refused".to_owned()))
            .into_alert_response();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn missing_payment_is_a_validation_alert() {
        let response = Error::NoPaymentSelected.into_alert_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let html = parse_html_fragment(response).await;
        let text: String = html.root_element().text().collect();
        assert!(text.contains("could not create payment"));
        assert!(text.contains("please select a payment first!"));
    }
}
