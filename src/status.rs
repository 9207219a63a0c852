//! The ledger API status light shown in the navigation bar.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    api::{LedgerApi, StatusInfo, fetch, paths},
    app_state::ApiState,
};

/// Render the status light for the outcome of the status request.
///
/// The light is green only when the API reports "ok", anything else,
/// including a failed request, turns it red.
pub fn status_light(status: Option<&StatusInfo>) -> Markup {
    let (class, title) = match status {
        Some(info) if info.is_ok() => ("text-success text-green-500", "The ledger is up"),
        Some(_) => ("text-danger text-red-500", "The ledger reports a problem"),
        None => ("text-danger text-red-500", "Could not reach the ledger"),
    };

    html!(
        span id="statusLight" class="inline-flex items-center gap-2 text-xs" title=(title)
        {
            span class=(class) { "●" }

            @if let Some(info) = status {
                span class="text-gray-500 dark:text-gray-400"
                {
                    "v" (info.version) " (" (info.revision) ")"
                }
            }
        }
    )
}

/// Fetch the ledger API status, `None` if the request fails.
pub async fn fetch_status(api: &dyn LedgerApi) -> Option<StatusInfo> {
    fetch::<StatusInfo>(api, paths::STATUS)
        .await
        .inspect_err(|error| tracing::error!("could not get the ledger status: {error}"))
        .ok()
}

/// A route handler for the status light, it always renders, even when the API is down.
pub async fn get_status_light(State(state): State<ApiState>) -> Response {
    let status = fetch_status(state.api.as_ref()).await;

    status_light(status.as_ref()).into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{extract::State, http::StatusCode};
    use scraper::Selector;
    use serde_json::json;

    use crate::{
        api::{ApiError, paths},
        app_state::ApiState,
        test_utils::{FakeLedgerApi, parse_html_fragment},
    };

    use super::get_status_light;

    async fn render_light(api: FakeLedgerApi) -> scraper::Html {
        let state = ApiState { api: Arc::new(api) };
        let response = get_status_light(State(state)).await;
        assert_eq!(response.status(), StatusCode::OK);

        parse_html_fragment(response).await
    }

    fn light_classes(html: &scraper::Html) -> Vec<String> {
        html.select(&Selector::parse("#statusLight > span").unwrap())
            .next()
            .expect("no status light found")
            .value()
            .classes()
            .map(str::to_owned)
            .collect()
    }

    #[tokio::test]
    async fn ok_status_is_green_with_version() {
        let api = FakeLedgerApi::new().with_get(
            paths::STATUS,
            json!({"status": "ok", "version": "1.2", "revision": "abc123", "timestamp": "2019-01-01T00:00:00Z"}),
        );

        let html = render_light(api).await;

        assert!(light_classes(&html).contains(&"text-success".to_owned()));
        let text: String = html.root_element().text().collect();
        assert!(text.contains("1.2"));
        assert!(text.contains("abc123"));
    }

    #[tokio::test]
    async fn other_status_is_red() {
        let api = FakeLedgerApi::new().with_get(
            paths::STATUS,
            json!({"status": "degraded", "version": "1.2", "revision": "abc123"}),
        );

        let html = render_light(api).await;

        assert!(light_classes(&html).contains(&"text-danger".to_owned()));
    }

    #[tokio::test]
    async fn failed_request_is_red() {
        let api = FakeLedgerApi::new().with_get_error(
            paths::STATUS,
            ApiError::Transport("connection refused".to_owned()),
        );

        let html = render_light(api).await;

        assert!(light_classes(&html).contains(&"text-danger".to_owned()));
    }
}
