//! Fills in the transaction form from a recurring payment.
//!
//! The payments form only picks a payment. Its linked transaction is fetched
//! from the ledger API and sent back as a `populate-form` event, which the
//! page applies to the transaction form before switching to its tab.

use std::collections::BTreeMap;

use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use reqwest::Url;
use serde::Serialize;
use serde_json::{Value, json};

use crate::{
    Error,
    api::{LedgerApi, paths},
    app_state::ApiState,
    forms::fields::{FieldKind, FormFields, FormSchema, TRANSACTION_FORM},
    sheet::SheetDate,
    trigger::hx_trigger,
};

/// The value applied to one form input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PopulatedValue {
    Text(String),
    Checked(bool),
}

/// The values to apply to a form, and the tab to show afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulatedForm {
    pub form: &'static str,
    pub tab: &'static str,
    pub fields: BTreeMap<String, PopulatedValue>,
}

/// Map `record` onto the fields of `schema`.
///
/// Select fields get the URL path of the linked record, checkboxes get the
/// truthiness of the value, and other fields get the value as text. Keys
/// that are not fields of `schema` are ignored.
pub fn populate_form(schema: &FormSchema, record: &Value) -> PopulatedForm {
    let fields = record
        .as_object()
        .into_iter()
        .flatten()
        .filter_map(|(key, value)| {
            let field = schema.field(key)?;
            let populated = match field.kind {
                FieldKind::Select => PopulatedValue::Text(link_path(value)),
                FieldKind::Checkbox => PopulatedValue::Checked(is_truthy(value)),
                FieldKind::Text | FieldKind::Number | FieldKind::Date => {
                    PopulatedValue::Text(plain_text(value))
                }
            };

            Some((key.clone(), populated))
        })
        .collect();

    PopulatedForm {
        form: schema.id,
        tab: schema.tab,
        fields,
    }
}

/// Fetch the transaction linked to the payment chosen in `fields`.
///
/// Only the path of the payment URL is used, so the request always goes to
/// the ledger API whatever host the browser sent.
///
/// # Errors
/// Returns [Error::NoPaymentSelected] without making a request if no payment
/// was chosen or the choice is not a payment link, or the API error if the
/// transaction could not be fetched.
pub async fn populate_from_payment(
    api: &dyn LedgerApi,
    fields: &FormFields,
) -> Result<PopulatedForm, Error> {
    let payment = fields
        .get("payment")
        .map(str::trim)
        .filter(|payment| !payment.is_empty())
        .and_then(url_path)
        .ok_or(Error::NoPaymentSelected)?;

    let record = api.get(&paths::payment_transaction(&payment)).await?;

    Ok(populate_form(&TRANSACTION_FORM, &record))
}

/// A route handler for the payments form.
pub async fn populate_transaction_endpoint(
    State(state): State<ApiState>,
    Path(date): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    if let Err(error) = SheetDate::parse(&date) {
        return error.into_alert_response();
    }

    let fields = FormFields::from_pairs(pairs);

    match populate_from_payment(state.api.as_ref(), &fields).await {
        Ok(populated) => hx_trigger(&json!({ "populate-form": populated })).into_response(),
        Err(error) => error.into_alert_response(),
    }
}

/// The path of a linked record, given either as `{"url": link}` or as the link itself.
fn link_path(value: &Value) -> String {
    let link = match value {
        Value::Object(object) => object.get("url").and_then(Value::as_str),
        Value::String(link) => Some(link.as_str()),
        _ => None,
    };

    link.and_then(url_path).unwrap_or_default()
}

/// The path of an absolute URL with a host, or `link` itself if it is already a path.
///
/// Paths must start with a single slash, "//host/path" would name another host.
fn url_path(link: &str) -> Option<String> {
    let path = match Url::parse(link) {
        Ok(url) if url.has_host() => url.path().to_owned(),
        Ok(_) => return None,
        Err(_) => link.to_owned(),
    };

    if path.starts_with('/') && !path.starts_with("//") {
        Some(path)
    } else {
        tracing::debug!("ignoring link {link:?}, it has no usable path");
        None
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|number| number != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod populate_form_tests {
    use serde_json::json;

    use crate::forms::fields::TRANSACTION_FORM;

    use super::{PopulatedValue, populate_form};

    #[test]
    fn maps_record_onto_transaction_fields() {
        let record = json!({
            "id": 12,
            "date": "2019-01-15",
            "credit": {"url": "http://ledger.test/api/accounts/1/", "name": "Checking"},
            "debit": {"url": "http://ledger.test/api/accounts/2/", "name": "Rent"},
            "amount": "1200.00",
            "complete": true,
            "memo": null,
        });

        let populated = populate_form(&TRANSACTION_FORM, &record);

        assert_eq!(populated.form, "transactionForm");
        assert_eq!(populated.tab, "transaction");
        let text = |value: &str| PopulatedValue::Text(value.to_owned());
        assert_eq!(populated.fields.get("date"), Some(&text("2019-01-15")));
        assert_eq!(populated.fields.get("credit"), Some(&text("/api/accounts/1/")));
        assert_eq!(populated.fields.get("debit"), Some(&text("/api/accounts/2/")));
        assert_eq!(populated.fields.get("amount"), Some(&text("1200.00")));
        assert_eq!(populated.fields.get("memo"), Some(&text("")));
        assert_eq!(
            populated.fields.get("complete"),
            Some(&PopulatedValue::Checked(true))
        );
    }

    #[test]
    fn ignores_keys_without_fields() {
        let populated = populate_form(&TRANSACTION_FORM, &json!({"id": 12, "payment": "x"}));

        assert!(populated.fields.is_empty());
    }

    #[test]
    fn numbers_keep_their_text() {
        let populated = populate_form(&TRANSACTION_FORM, &json!({"amount": 12.5}));

        assert_eq!(
            populated.fields.get("amount"),
            Some(&PopulatedValue::Text("12.5".to_owned()))
        );
    }

    #[test]
    fn falsy_values_uncheck() {
        for value in [json!(false), json!(0), json!(""), json!(null)] {
            let populated = populate_form(&TRANSACTION_FORM, &json!({"complete": value}));

            assert_eq!(
                populated.fields.get("complete"),
                Some(&PopulatedValue::Checked(false)),
                "{value} should uncheck the box"
            );
        }
    }

    #[test]
    fn plain_link_strings_are_reduced_to_paths() {
        let populated = populate_form(
            &TRANSACTION_FORM,
            &json!({"credit": "https://ledger.test/api/accounts/9/?format=json"}),
        );

        assert_eq!(
            populated.fields.get("credit"),
            Some(&PopulatedValue::Text("/api/accounts/9/".to_owned()))
        );
    }
}
