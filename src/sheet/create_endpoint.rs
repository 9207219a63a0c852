//! Creates balance sheets from the form on the overview page.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::{HxRedirect, HxReswap, SwapOption};
use maud::{Markup, html};

use crate::{
    api::{CreatedSheet, paths, submit},
    app_state::ApiState,
    endpoints,
    forms::FormFields,
    html::{
        BUTTON_DANGER_STYLE, BUTTON_SUCCESS_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        csrf_input,
    },
};

/// The ID of the submit button, which shows why the last attempt failed.
pub const CREATE_SHEET_BUTTON_ID: &str = "createSheetButton";

/// The form for creating a balance sheet.
pub fn create_sheet_form(csrf_token: &str) -> Markup {
    html!(
        form
            class="create-sheet space-y-4"
            hx-post=(endpoints::POST_SHEET)
            hx-swap="outerHTML"
            hx-target-error={ "#" (CREATE_SHEET_BUTTON_ID) }
        {
            (csrf_input(csrf_token))

            div
            {
                label for="sheet-date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    id="sheet-date"
                    type="date"
                    name="date"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="sheet-title" class=(FORM_LABEL_STYLE) { "Title" }

                input
                    id="sheet-title"
                    type="text"
                    name="title"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            (create_sheet_button(None))
        }
    )
}

/// The submit button, labelled with `error` if the last attempt failed.
fn create_sheet_button(error: Option<&str>) -> Markup {
    let (style, label) = match error {
        Some(error) => (BUTTON_DANGER_STYLE, error),
        None => (BUTTON_SUCCESS_STYLE, "Create Balance Sheet"),
    };

    html!(
        button
            id=(CREATE_SHEET_BUTTON_ID)
            type="submit"
            class=(style)
            hx-disabled-elt="this"
        {
            (label)
        }
    )
}

/// A route handler for creating a balance sheet, redirects to the new sheet on success.
pub async fn create_sheet_endpoint(
    State(state): State<ApiState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let fields = FormFields::from_pairs(pairs);

    match submit::<CreatedSheet>(state.api.as_ref(), paths::SHEETS, fields.as_body()).await {
        Ok(sheet) => (HxRedirect(sheet.href), StatusCode::OK).into_response(),
        Err(error) => {
            tracing::error!("could not create balance sheet: {error}");

            (
                error.response_status(),
                HxReswap(SwapOption::OuterHtml),
                create_sheet_button(Some(error.status_text())),
            )
                .into_response()
        }
    }
}
