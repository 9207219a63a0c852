//! Creates transactions and balances on a balance sheet.
//!
//! Both kinds of resource are submitted the same way, only the noun used in
//! messages and the ledger API endpoint differ.

use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use crate::{
    Error,
    alert::{Alert, alerts_oob},
    api::{ApiError, CreatedResource, LedgerApi, paths, submit},
    app_state::ApiState,
    forms::fields::{BALANCE_FORM, FormFields, FormSchema, TRANSACTION_FORM},
    sheet::SheetDate,
    trigger::hx_trigger,
};

/// The kinds of resource that can be added to a balance sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Transaction,
    Balance,
}

impl ResourceKind {
    /// The word used for the resource in messages.
    pub fn noun(self) -> &'static str {
        match self {
            ResourceKind::Transaction => "transaction",
            ResourceKind::Balance => "balance",
        }
    }

    pub fn schema(self) -> &'static FormSchema {
        match self {
            ResourceKind::Transaction => &TRANSACTION_FORM,
            ResourceKind::Balance => &BALANCE_FORM,
        }
    }

    /// The ledger API endpoint that creates this kind of resource on the sheet for `date`.
    pub fn action(self, date: SheetDate) -> String {
        let date = date.to_string();

        match self {
            ResourceKind::Transaction => paths::sheet_transactions(&date),
            ResourceKind::Balance => paths::sheet_balances(&date),
        }
    }
}

/// The result of submitting a form to the ledger API.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Created { id: String },
    Rejected(ApiError),
}

impl SubmissionOutcome {
    /// Render the outcome for the form that submitted a `kind` resource.
    ///
    /// On success the form is told to reset and a success alert is added.
    /// On failure the form is left alone and the errors are shown as alerts.
    pub fn into_response(self, kind: ResourceKind) -> Response {
        match self {
            SubmissionOutcome::Created { id } => {
                let noun = kind.noun();
                let alert = Alert::Success {
                    message: format!("{noun} created"),
                    details: format!("{noun} id {id} successfully created"),
                };
                let trigger = hx_trigger(&json!({ "reset-form": kind.schema().id }));

                (trigger, alerts_oob(vec![alert])).into_response()
            }
            SubmissionOutcome::Rejected(error) => Error::Api(error).into_alert_response(),
        }
    }
}

/// POST `fields` to `action`, the ledger API endpoint for a `kind` resource.
pub async fn submit_resource(
    api: &dyn LedgerApi,
    kind: ResourceKind,
    action: &str,
    fields: &FormFields,
) -> SubmissionOutcome {
    match submit::<CreatedResource>(api, action, fields.as_body()).await {
        Ok(created) => {
            tracing::debug!("created {} {}", kind.noun(), created.id);
            SubmissionOutcome::Created {
                id: id_text(&created.id),
            }
        }
        Err(error) => SubmissionOutcome::Rejected(error),
    }
}

fn id_text(id: &Value) -> String {
    match id {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

async fn create_sheet_resource(
    state: ApiState,
    kind: ResourceKind,
    date: &str,
    pairs: Vec<(String, String)>,
) -> Response {
    let date = match SheetDate::parse(date) {
        Ok(date) => date,
        Err(error) => return error.into_alert_response(),
    };
    let fields = FormFields::from_pairs(pairs);

    submit_resource(state.api.as_ref(), kind, &kind.action(date), &fields)
        .await
        .into_response(kind)
}

/// A route handler for adding a transaction to a balance sheet.
pub async fn create_transaction_endpoint(
    State(state): State<ApiState>,
    Path(date): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    create_sheet_resource(state, ResourceKind::Transaction, &date, pairs).await
}

/// A route handler for adding a balance to a balance sheet.
pub async fn create_balance_endpoint(
    State(state): State<ApiState>,
    Path(date): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    create_sheet_resource(state, ResourceKind::Balance, &date, pairs).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        Form,
        extract::{Path, State},
        http::StatusCode,
        response::Response,
    };
    use scraper::Selector;
    use serde_json::json;

    use crate::{
        api::ApiError,
        app_state::ApiState,
        test_utils::{
            FakeLedgerApi, RecordedRequest, get_header, get_hx_trigger, parse_html_fragment,
        },
    };

    use super::{ResourceKind, create_balance_endpoint, create_transaction_endpoint};

    const TRANSACTIONS_ENDPOINT: &str = "/api/sheets/2019-01-31/transactions/";
    const BALANCES_ENDPOINT: &str = "/api/sheets/2019-01-31/balances/";

    fn transaction_pairs() -> Vec<(String, String)> {
        [
            ("date", "2019-01-15"),
            ("credit", "/api/accounts/1/"),
            ("debit", "/api/accounts/2/"),
            ("amount", "12.50"),
        ]
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
    }

    async fn submit(api: Arc<FakeLedgerApi>, kind: ResourceKind) -> Response {
        let state = State(ApiState { api });
        let path = Path("2019-01-31".to_owned());
        let form = Form(transaction_pairs());

        match kind {
            ResourceKind::Transaction => create_transaction_endpoint(state, path, form).await,
            ResourceKind::Balance => create_balance_endpoint(state, path, form).await,
        }
    }

    #[tokio::test]
    async fn success_resets_form_and_adds_alert() {
        let api = Arc::new(
            FakeLedgerApi::new().with_post(TRANSACTIONS_ENDPOINT, json!({"id": 42, "memo": ""})),
        );

        let response = submit(api.clone(), ResourceKind::Transaction).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            get_hx_trigger(&response),
            json!({"reset-form": "transactionForm"})
        );
        assert_eq!(
            api.requests(),
            vec![RecordedRequest::Post {
                endpoint: TRANSACTIONS_ENDPOINT.to_owned(),
                fields: transaction_pairs(),
            }]
        );

        let html = parse_html_fragment(response).await;
        let alert = html
            .select(&Selector::parse("div.alert-success").unwrap())
            .next()
            .expect("no success alert found");
        let text: String = alert.text().collect();
        assert!(text.contains("transaction created"));
        assert!(text.contains("transaction id 42 successfully created"));
    }

    #[tokio::test]
    async fn balance_uses_its_own_noun() {
        let api = Arc::new(FakeLedgerApi::new().with_post(BALANCES_ENDPOINT, json!({"id": "7"})));

        let response = submit(api, ResourceKind::Balance).await;

        assert_eq!(get_hx_trigger(&response), json!({"reset-form": "balanceForm"}));
        let html = parse_html_fragment(response).await;
        let text: String = html.root_element().text().collect();
        assert!(text.contains("balance created"));
        assert!(text.contains("balance id 7 successfully created"));
    }

    #[tokio::test]
    async fn failure_keeps_form_and_shows_field_errors() {
        let api = Arc::new(FakeLedgerApi::new().with_post_error(
            TRANSACTIONS_ENDPOINT,
            ApiError::status(
                StatusCode::BAD_REQUEST,
                r#"{"amount": ["required"], "credit": "unknown account"}"#,
            ),
        ));

        let response = submit(api.clone(), ResourceKind::Transaction).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().get("hx-trigger").is_none());
        assert_eq!(get_header(&response, "hx-reswap"), "beforeend");
        assert_eq!(api.request_count(), 1);

        let html = parse_html_fragment(response).await;
        let titles: Vec<String> = html
            .select(&Selector::parse("div.alert-danger span.font-medium").unwrap())
            .map(|title| title.text().collect())
            .collect();
        assert_eq!(titles, vec!["amount".to_owned(), "credit".to_owned()]);
    }

    #[tokio::test]
    async fn invalid_sheet_date_issues_no_request() {
        let api = Arc::new(FakeLedgerApi::new());

        let response = create_transaction_endpoint(
            State(ApiState { api: api.clone() }),
            Path("latest".to_owned()),
            Form(transaction_pairs()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(api.request_count(), 0);
    }
}
