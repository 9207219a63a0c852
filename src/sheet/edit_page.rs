//! The page for adding transactions and balances to a balance sheet.
//!
//! The page has one tab per form. The payments form does not create
//! anything itself, it fills in the transaction form from a recurring payment.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use reqwest::Url;

use crate::{
    Error,
    alert::ALERT_CONTAINER_ID,
    api::{AccountChoice, PaymentChoice, fetch, paths},
    app_state::{ApiState, SessionState},
    endpoints::{self, format_endpoint},
    forms::{
        BALANCE_FORM, FieldKind, FormSchema, PAYMENT_FORM, SelectOption, TRANSACTION_FORM,
        field_input,
    },
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, csrf_input},
    navigation::NavBar,
    sheet::SheetDate,
};

/// The choices offered by the select fields of the forms.
struct Choices {
    accounts: Vec<SelectOption>,
    payments: Vec<SelectOption>,
}

impl Choices {
    /// Account options use the path of the account URL as their value, which is
    /// what the ledger API expects in posted forms.
    fn new(accounts: Vec<AccountChoice>, payments: Vec<PaymentChoice>) -> Self {
        let accounts = accounts
            .into_iter()
            .map(|account| SelectOption {
                value: url_path(&account.url),
                label: account.name,
            })
            .collect();

        let payments = payments
            .into_iter()
            .map(|payment| SelectOption {
                label: payment.description.unwrap_or_else(|| payment.url.clone()),
                value: payment.url,
            })
            .collect();

        Self { accounts, payments }
    }

    fn for_field(&self, name: &str) -> &[SelectOption] {
        match name {
            "payment" => &self.payments,
            _ => &self.accounts,
        }
    }
}

fn url_path(link: &str) -> String {
    match Url::parse(link) {
        Ok(url) => url.path().to_owned(),
        Err(_) => link.to_owned(),
    }
}

/// Renders the edit page for the balance sheet in the URL.
pub async fn get_edit_sheet_page(
    State(state): State<ApiState>,
    State(session): State<SessionState>,
    Path(date): Path<String>,
) -> Result<Response, Error> {
    let date = SheetDate::parse(&date)?;
    let api = state.api.as_ref();

    let (accounts, payments) = tokio::join!(
        fetch::<Vec<AccountChoice>>(api, paths::ACCOUNTS),
        fetch::<Vec<PaymentChoice>>(api, paths::PAYMENTS),
    );
    let accounts =
        accounts.inspect_err(|error| tracing::error!("could not get accounts: {error}"))?;
    let payments =
        payments.inspect_err(|error| tracing::error!("could not get payments: {error}"))?;

    let nav_bar = NavBar::new(endpoints::SHEETS_VIEW, &session);
    let choices = Choices::new(accounts, payments);

    Ok(edit_sheet_view(nav_bar, date, &choices, &session.csrf_token).into_response())
}

/// One tab of the edit page.
struct Tab<'a> {
    schema: &'a FormSchema,
    title: &'a str,
    /// The route the form posts to.
    route: &'a str,
    submit_label: &'a str,
}

fn tab_button(tab: &Tab<'_>, is_active: bool) -> Markup {
    html!(
        li
        {
            button
                type="button"
                data-tab-button=(tab.schema.tab)
                aria-selected=(if is_active { "true" } else { "false" })
                class="inline-block p-4 border-b-2 border-transparent rounded-t-lg
                    hover:text-gray-600 hover:border-gray-300
                    aria-selected:text-blue-600 aria-selected:border-blue-600"
            {
                (tab.title)
            }
        }
    )
}

fn tab_panel(tab: &Tab<'_>, is_active: bool, choices: &Choices, csrf_token: &str) -> Markup {
    let schema = tab.schema;

    html!(
        div data-tab-panel=(schema.tab) hidden[!is_active]
        {
            form
                id=(schema.id)
                hx-post=(tab.route)
                hx-swap="none"
                hx-target-error={ "#" (ALERT_CONTAINER_ID) }
                class="space-y-4"
            {
                (csrf_input(csrf_token))

                @for field in schema.fields {
                    @let options: &[SelectOption] = match field.kind {
                        FieldKind::Select => choices.for_field(field.name),
                        _ => &[],
                    };

                    (field_input(schema.id, field, options))
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) hx-disabled-elt="this"
                {
                    (tab.submit_label)
                }
            }
        }
    )
}

fn edit_sheet_view(
    nav_bar: NavBar<'_>,
    date: SheetDate,
    choices: &Choices,
    csrf_token: &str,
) -> Markup {
    let date_text = date.to_string();
    let transaction_route = format_endpoint(endpoints::POST_TRANSACTION, &[&date_text]);
    let balance_route = format_endpoint(endpoints::POST_BALANCE, &[&date_text]);
    let payment_route = format_endpoint(endpoints::POST_PAYMENT, &[&date_text]);
    let sheet_link = format_endpoint(endpoints::SHEET_VIEW, &[&date_text]);

    let tabs = [
        Tab {
            schema: &TRANSACTION_FORM,
            title: "Transaction",
            route: &transaction_route,
            submit_label: "Add Transaction",
        },
        Tab {
            schema: &BALANCE_FORM,
            title: "Balance",
            route: &balance_route,
            submit_label: "Add Balance",
        },
        Tab {
            schema: &PAYMENT_FORM,
            title: "Payment",
            route: &payment_route,
            submit_label: "Use Payment",
        },
    ];

    let content = html!(
        (nav_bar.into_html())

        div class=(FORM_CONTAINER_STYLE)
        {
            div class="w-full space-y-4"
            {
                h1 class="text-2xl font-bold"
                {
                    "Edit "
                    a href=(sheet_link) class="hover:underline" { "Balance Sheet " (date_text) }
                }

                ul
                    id="editTabs"
                    class="flex flex-wrap text-sm font-medium text-center text-gray-500
                        border-b border-gray-200 dark:text-gray-400 dark:border-gray-700"
                {
                    @for (index, tab) in tabs.iter().enumerate() {
                        (tab_button(tab, index == 0))
                    }
                }

                @for (index, tab) in tabs.iter().enumerate() {
                    (tab_panel(tab, index == 0, choices, csrf_token))
                }
            }
        }
    );

    base(&format!("Edit Balance Sheet {date_text}"), &[], &content)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use serde_json::json;

    use crate::{
        api::ApiError,
        app_state::{ApiState, SessionState},
        test_utils::{
            FakeLedgerApi, assert_form_input, assert_form_select, assert_hx_endpoint,
            assert_valid_html, must_get_form_by_id, parse_html_document,
        },
    };

    use super::get_edit_sheet_page;

    fn get_test_session() -> SessionState {
        SessionState {
            csrf_token: "csrf-token".to_owned(),
            logout_url: "/logout/".to_owned(),
        }
    }

    fn get_test_api() -> FakeLedgerApi {
        FakeLedgerApi::new()
            .with_get(
                "/api/accounts/",
                json!([
                    {"url": "http://ledger.test/api/accounts/1/", "name": "Checking"},
                    {"url": "http://ledger.test/api/accounts/2/", "name": "Rent"},
                ]),
            )
            .with_get(
                "/api/payments/",
                json!([
                    {"url": "http://ledger.test/api/payments/3/", "description": "Rent"},
                ]),
            )
    }

    async fn render(api: Arc<FakeLedgerApi>) -> axum::response::Response {
        get_edit_sheet_page(
            State(ApiState { api }),
            State(get_test_session()),
            Path("2019-01-31".to_owned()),
        )
        .await
        .into_response()
    }

    #[tokio::test]
    async fn renders_one_form_per_tab() {
        let api = Arc::new(get_test_api());

        let response = render(api.clone()).await;

        assert_eq!(response.status(), StatusCode::OK);
        let mut endpoints: Vec<String> = api
            .requests()
            .iter()
            .map(|request| request.endpoint().to_owned())
            .collect();
        endpoints.sort();
        assert_eq!(endpoints, vec!["/api/accounts/", "/api/payments/"]);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let transaction_form = must_get_form_by_id(&html, "transactionForm");
        assert_hx_endpoint(&transaction_form, "/sheets/2019-01-31/transactions", "hx-post");
        assert_eq!(transaction_form.value().attr("hx-swap"), Some("none"));
        assert_form_input(&transaction_form, "csrfmiddlewaretoken", "hidden");
        assert_form_input(&transaction_form, "date", "date");
        assert_form_input(&transaction_form, "amount", "number");
        assert_form_input(&transaction_form, "complete", "checkbox");
        assert_form_select(
            &transaction_form,
            "credit",
            &["/api/accounts/1/", "/api/accounts/2/"],
        );

        let balance_form = must_get_form_by_id(&html, "balanceForm");
        assert_hx_endpoint(&balance_form, "/sheets/2019-01-31/balances", "hx-post");
        assert_form_select(
            &balance_form,
            "account",
            &["/api/accounts/1/", "/api/accounts/2/"],
        );

        let payments_form = must_get_form_by_id(&html, "paymentsForm");
        assert_hx_endpoint(&payments_form, "/sheets/2019-01-31/payments", "hx-post");
        assert_form_select(
            &payments_form,
            "payment",
            &["http://ledger.test/api/payments/3/"],
        );
    }

    #[tokio::test]
    async fn missing_choices_render_error_page() {
        let api = Arc::new(get_test_api().with_get_error(
            "/api/payments/",
            ApiError::status(StatusCode::INTERNAL_SERVER_ERROR, ""),
        ));

        let response = render(api).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
