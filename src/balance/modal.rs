//! Opens and refreshes the balance modal on the balance sheet page.
//!
//! Each table row carries a [ModalControl] that is built once when the page
//! renders. Opening the modal fetches the balance and renders it into the
//! modal body, refreshing asks the ledger API to recompute it first.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::{HxReswap, HxRetarget, SwapOption};
use maud::Markup;
use serde_json::json;

use crate::{
    Error,
    api::{ApiError, BalanceRecord, LedgerApi, SheetBalance, fetch, paths, submit},
    app_state::{ApiState, SessionState},
    balance::templates::{
        BALANCE_MODAL_ID, REFRESH_BUTTON_ID, RefreshButtonState, balance_modal_body,
        refresh_button,
    },
    endpoints::{self, format_endpoint},
    sheet::SheetDate,
    trigger::hx_trigger,
};

/// Where a balance modal gets its data and how it is shown.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalControl {
    /// The ID of the modal to show.
    pub target: String,
    /// The ledger API endpoint of the balance.
    pub endpoint: String,
    /// The modal title.
    pub title: String,
    /// The route that renders the modal body.
    pub route: String,
    /// The route that refreshes the balance.
    pub refresh_route: String,
}

impl ModalControl {
    pub fn new(date: SheetDate, balance_id: i64, title: impl Into<String>) -> Self {
        let date = date.to_string();
        let balance_id_text = balance_id.to_string();

        Self {
            target: BALANCE_MODAL_ID.to_owned(),
            endpoint: paths::sheet_balance(&date, balance_id),
            title: title.into(),
            route: format_endpoint(endpoints::BALANCE_MODAL, &[&date, &balance_id_text]),
            refresh_route: format_endpoint(endpoints::REFRESH_BALANCE, &[&date, &balance_id_text]),
        }
    }

    /// The control for a balance row on the sheet for `date`, titled by the account name.
    pub fn for_balance(date: SheetDate, balance: &SheetBalance) -> Self {
        Self::new(date, balance.id, balance.account.clone())
    }
}

/// Fetch the balance behind `control` and render the modal body.
///
/// # Errors
/// Returns the API error if the balance could not be fetched.
pub async fn open_balance_modal(
    api: &dyn LedgerApi,
    control: &ModalControl,
) -> Result<Markup, ApiError> {
    let record: BalanceRecord = fetch(api, &control.endpoint).await?;

    Ok(balance_modal_body(
        &record,
        control,
        RefreshButtonState::Ready,
    ))
}

/// Ask the ledger API to recompute the balance behind `control` and render the new modal body.
///
/// # Errors
/// Returns the API error if the refresh request failed.
pub async fn refresh_balance_modal(
    api: &dyn LedgerApi,
    control: &ModalControl,
    csrf_token: &str,
) -> Result<Markup, ApiError> {
    let fields = [("csrfmiddlewaretoken".to_owned(), csrf_token.to_owned())];
    let record: BalanceRecord = submit(api, &paths::refresh(&control.endpoint), &fields).await?;

    Ok(balance_modal_body(
        &record,
        control,
        RefreshButtonState::Refreshed,
    ))
}

/// A route handler for the balance modal body.
///
/// On success the response tells the page to show the modal. On failure
/// nothing is swapped and the modal stays as it was.
pub async fn get_balance_modal(
    State(state): State<ApiState>,
    Path((date, balance_id)): Path<(String, i64)>,
) -> Result<Response, Error> {
    let control = ModalControl::new(SheetDate::parse(&date)?, balance_id, "");

    match open_balance_modal(state.api.as_ref(), &control).await {
        Ok(body) => {
            let trigger = hx_trigger(&json!({ "show-modal": control.target }));
            Ok((trigger, body).into_response())
        }
        Err(error) => {
            tracing::error!("could not open balance modal for {}: {error}", control.endpoint);
            Ok(StatusCode::BAD_GATEWAY.into_response())
        }
    }
}

/// A route handler for refreshing a balance.
///
/// On failure only the refresh button is replaced, showing its error state.
pub async fn refresh_balance(
    State(state): State<ApiState>,
    State(session): State<SessionState>,
    Path((date, balance_id)): Path<(String, i64)>,
) -> Result<Response, Error> {
    let control = ModalControl::new(SheetDate::parse(&date)?, balance_id, "");

    match refresh_balance_modal(state.api.as_ref(), &control, &session.csrf_token).await {
        Ok(body) => Ok(body.into_response()),
        Err(error) => {
            tracing::error!("could not refresh balance {}: {error}", control.endpoint);
            Ok((
                StatusCode::BAD_GATEWAY,
                HxRetarget(format!("#{REFRESH_BUTTON_ID}")),
                HxReswap(SwapOption::OuterHtml),
                refresh_button(&control, RefreshButtonState::Failed),
            )
                .into_response())
        }
    }
}

#[cfg(test)]
mod modal_control_tests {
    use crate::{api::SheetBalance, sheet::SheetDate};

    use super::ModalControl;

    #[test]
    fn control_for_balance_row() {
        let balance = SheetBalance {
            id: 7,
            account: "Checking".to_owned(),
            beginning: None,
            ending: Some(10.0),
        };

        let control =
            ModalControl::for_balance(SheetDate::parse("2019-01-31").unwrap(), &balance);

        assert_eq!(
            control,
            ModalControl {
                target: "balanceModal".to_owned(),
                endpoint: "/api/sheets/2019-01-31/balances/7/".to_owned(),
                title: "Checking".to_owned(),
                route: "/sheets/2019-01-31/balances/7".to_owned(),
                refresh_route: "/sheets/2019-01-31/balances/7/refresh".to_owned(),
            }
        );
    }
}
