//! Displays one balance sheet: its balances, which open the balance modal, and its transactions.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    amount::format_amount,
    api::{SheetDetail, fetch, paths},
    app_state::{ApiState, SessionState},
    balance::{ModalControl, balance_modal, balance_row, table_cell},
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base,
    },
    navigation::NavBar,
    sheet::SheetDate,
};

const TABLE_STYLE: &str = "w-full text-sm text-left text-gray-500 dark:text-gray-400";

/// Renders the balance sheet for the date in the URL.
pub async fn get_sheet_page(
    State(state): State<ApiState>,
    State(session): State<SessionState>,
    Path(date): Path<String>,
) -> Result<Response, Error> {
    let date = SheetDate::parse(&date)?;

    let sheet: SheetDetail = fetch(state.api.as_ref(), &paths::sheet(&date.to_string()))
        .await
        .inspect_err(|error| tracing::error!("could not get balance sheet {date}: {error}"))?;

    let nav_bar = NavBar::new(endpoints::SHEETS_VIEW, &session);

    Ok(sheet_view(nav_bar, date, &sheet).into_response())
}

fn optional_amount(value: Option<f64>) -> String {
    value.map(format_amount).unwrap_or_default()
}

fn sheet_view(nav_bar: NavBar<'_>, date: SheetDate, sheet: &SheetDetail) -> Markup {
    let title = sheet
        .title
        .clone()
        .unwrap_or_else(|| format!("Balance Sheet {date}"));
    let edit_link = format_endpoint(endpoints::EDIT_SHEET_VIEW, &[&date.to_string()]);

    let content = html!(
        (nav_bar.into_html())

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-lg space-y-6"
            {
                div class="flex items-center justify-between"
                {
                    div
                    {
                        h1 class="text-2xl font-bold" { (title) }

                        @if let Some(memo) = &sheet.memo {
                            p class="text-gray-600 dark:text-gray-400" { (memo) }
                        }
                    }

                    a href=(edit_link) class={ (BUTTON_PRIMARY_STYLE) " max-w-48 text-center" }
                    {
                        "Edit Sheet"
                    }
                }

                section class="relative overflow-x-auto shadow-md rounded-lg"
                {
                    table id="balances" class=(TABLE_STYLE)
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Account" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Beginning" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Ending" }
                            }
                        }

                        tbody
                        {
                            @for balance in &sheet.balances {
                                (balance_row(
                                    &ModalControl::for_balance(date, balance),
                                    html!(
                                        (table_cell(html!((balance.account))))
                                        (table_cell(html!((optional_amount(balance.beginning)))))
                                        (table_cell(html!((optional_amount(balance.ending)))))
                                    ),
                                ))
                            }
                        }
                    }
                }

                section class="relative overflow-x-auto shadow-md rounded-lg"
                {
                    table id="transactions" class=(TABLE_STYLE)
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Credit" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Debit" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Memo" }
                            }
                        }

                        tbody
                        {
                            @for transaction in &sheet.transactions {
                                tr class=(TABLE_ROW_STYLE)
                                {
                                    td class=(TABLE_CELL_STYLE) { (transaction.date) }
                                    td class=(TABLE_CELL_STYLE) { (transaction.credit) }
                                    td class=(TABLE_CELL_STYLE) { (transaction.debit) }
                                    td class={ (TABLE_CELL_STYLE) " text-right tabular-nums" }
                                    {
                                        (format_amount(transaction.amount))
                                    }
                                    td class=(TABLE_CELL_STYLE)
                                    {
                                        (transaction.memo.as_deref().unwrap_or_default())
                                        @if !transaction.complete {
                                            " (pending)"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        (balance_modal())
    );

    base(&format!("Balance Sheet {date}"), &[], &content)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use scraper::Selector;
    use serde_json::json;

    use crate::{
        api::ApiError,
        app_state::{ApiState, SessionState},
        test_utils::{FakeLedgerApi, RecordedRequest, assert_valid_html, parse_html_document},
    };

    use super::get_sheet_page;

    fn get_test_session() -> SessionState {
        SessionState {
            csrf_token: "csrf-token".to_owned(),
            logout_url: "/logout/".to_owned(),
        }
    }

    #[tokio::test]
    async fn balance_rows_open_the_modal() {
        let api = Arc::new(FakeLedgerApi::new().with_get(
            "/api/sheets/2019-01-31/",
            json!({
                "date": "2019-01-31",
                "title": "January",
                "balances": [
                    {"id": 7, "account": "Checking", "beginning": "10.00", "ending": "-1234.50"},
                ],
                "transactions": [
                    {"id": 1, "date": "2019-01-15", "credit": "Checking", "debit": "Rent",
                     "amount": "1200.00", "complete": true, "memo": "rent"},
                ],
            }),
        ));

        let response = get_sheet_page(
            State(ApiState { api: api.clone() }),
            State(get_test_session()),
            Path("2019-01-31".to_owned()),
        )
        .await
        .expect("could not render sheet page");

        assert_eq!(
            api.requests(),
            vec![RecordedRequest::Get("/api/sheets/2019-01-31/".to_owned())]
        );

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let row = html
            .select(&Selector::parse("table#balances tbody tr").unwrap())
            .next()
            .expect("no balance row found");
        assert_eq!(row.value().attr("hx-get"), Some("/sheets/2019-01-31/balances/7"));
        assert_eq!(row.value().attr("data-title"), Some("Checking"));
        assert_eq!(row.value().attr("data-target"), Some("balanceModal"));
        assert!(row.text().collect::<String>().contains("(1,234.50)"));

        assert!(
            html.select(&Selector::parse("dialog#balanceModal").unwrap())
                .next()
                .is_some(),
            "no balance modal found"
        );
    }

    #[tokio::test]
    async fn missing_sheet_is_not_found() {
        let api = Arc::new(FakeLedgerApi::new().with_get_error(
            "/api/sheets/2019-01-31/",
            ApiError::status(StatusCode::NOT_FOUND, r#"{"detail": "Not found."}"#),
        ));

        let response = get_sheet_page(
            State(ApiState { api }),
            State(get_test_session()),
            Path("2019-01-31".to_owned()),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_date_is_not_found_without_request() {
        let api = Arc::new(FakeLedgerApi::new());

        let response = get_sheet_page(
            State(ApiState { api: api.clone() }),
            State(get_test_session()),
            Path("../accounts".to_owned()),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(api.request_count(), 0);
    }
}
