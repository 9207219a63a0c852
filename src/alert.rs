//! Alert banners for displaying success and error messages to users.
//!
//! Alerts are appended to the page's alert container and remove themselves
//! after [ALERT_DISMISS_MS] milliseconds, regardless of their severity.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_htmx::{HxReswap, SwapOption};
use maud::{Markup, html};

/// How long an alert stays on screen before it dismisses itself.
pub const ALERT_DISMISS_MS: u64 = 2000;

/// The ID of the element that alerts are appended to.
pub const ALERT_CONTAINER_ID: &str = "alert-container";

/// An alert message, rendered as a banner.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    Success { message: String, details: String },
    Error { message: String, details: String },
}

impl Alert {
    /// The title of the alert.
    pub fn message(&self) -> &str {
        match self {
            Alert::Success { message, .. } | Alert::Error { message, .. } => message,
        }
    }

    /// The body of the alert, may be empty.
    pub fn details(&self) -> &str {
        match self {
            Alert::Success { details, .. } | Alert::Error { details, .. } => details,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Alert::Error { .. })
    }

    /// The severity tag of the alert, used as a class name.
    fn context(&self) -> &'static str {
        if self.is_error() {
            "alert-danger"
        } else {
            "alert-success"
        }
    }

    pub fn into_html(self) -> Markup {
        let style = if self.is_error() {
            "flex items-start gap-2 p-4 mb-2 text-sm rounded-lg text-red-800 \
            bg-red-50 dark:bg-gray-800 dark:text-red-400"
        } else {
            "flex items-start gap-2 p-4 mb-2 text-sm rounded-lg text-green-800 \
            bg-green-50 dark:bg-gray-800 dark:text-green-400"
        };
        let details = self.details();

        html!(
            div
                role="alert"
                class={ "alert " (self.context()) " " (style) }
                data-dismiss-after=(ALERT_DISMISS_MS)
            {
                div class="flex-1"
                {
                    span class="font-medium" { (self.message()) }

                    @if !details.is_empty() {
                        " " span { (details) }
                    }
                }

                button
                    type="button"
                    aria-label="Close"
                    class="ms-auto font-bold"
                    onclick="this.parentElement.remove()"
                {
                    "×"
                }
            }
        )
    }
}

/// Render `alerts` so that they are appended to the alert container
/// alongside whatever else the response swaps in.
pub fn alerts_oob(alerts: Vec<Alert>) -> Markup {
    html!(
        div hx-swap-oob={ "beforeend:#" (ALERT_CONTAINER_ID) }
        {
            @for alert in alerts {
                (alert.into_html())
            }
        }
    )
}

/// A response that only appends `alerts` to the alert container.
///
/// Forms send error responses to the alert container with `hx-target-error`,
/// the reswap header makes sure the alerts are appended rather than replacing
/// earlier alerts that have not been dismissed yet.
pub fn alerts_response(status_code: StatusCode, alerts: Vec<Alert>) -> Response {
    let body = html!(
        @for alert in alerts {
            (alert.into_html())
        }
    );

    (
        status_code,
        HxReswap(SwapOption::BeforeEnd),
        Html(body.into_string()),
    )
        .into_response()
}
