#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;
pub(crate) mod ledger_api;

pub(crate) use form::{
    assert_form_input, assert_form_select, assert_hx_endpoint, must_get_form,
    must_get_form_by_id,
};
pub(crate) use html::{assert_valid_html, parse_html_document, parse_html_fragment};
pub(crate) use http::{assert_hx_redirect, assert_status_ok, get_header, get_hx_trigger};
pub(crate) use ledger_api::{FakeLedgerApi, RecordedRequest};
