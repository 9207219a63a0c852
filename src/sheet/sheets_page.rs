//! Lists the balance sheets.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    api::{SheetSummary, fetch, paths},
    app_state::{ApiState, SessionState},
    endpoints::{self, format_endpoint},
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base,
    },
    navigation::NavBar,
};

/// Renders the page listing every balance sheet, newest first as the API returns them.
pub async fn get_sheets_page(
    State(state): State<ApiState>,
    State(session): State<SessionState>,
) -> Result<Response, Error> {
    let sheets: Vec<SheetSummary> = fetch(state.api.as_ref(), paths::SHEETS)
        .await
        .inspect_err(|error| tracing::error!("could not get balance sheets: {error}"))?;

    let nav_bar = NavBar::new(endpoints::SHEETS_VIEW, &session);

    Ok(sheets_view(nav_bar, &sheets).into_response())
}

fn sheets_view(nav_bar: NavBar<'_>, sheets: &[SheetSummary]) -> Markup {
    let content = html!(
        (nav_bar.into_html())

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="relative w-full max-w-screen-lg overflow-x-auto shadow-md rounded-lg"
            {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Title" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Memo" }
                        }
                    }

                    tbody
                    {
                        @for sheet in sheets {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                th scope="row" class=(TABLE_CELL_STYLE)
                                {
                                    a
                                        href=(format_endpoint(endpoints::SHEET_VIEW, &[&sheet.date]))
                                        class=(LINK_STYLE)
                                    {
                                        (sheet.date)
                                    }
                                }
                                td class=(TABLE_CELL_STYLE) { (sheet.title.as_deref().unwrap_or_default()) }
                                td class=(TABLE_CELL_STYLE) { (sheet.memo.as_deref().unwrap_or_default()) }
                            }
                        }

                        @if sheets.is_empty() {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td colspan="3" class=(TABLE_CELL_STYLE)
                                {
                                    "No balance sheets yet, create one from the "
                                    a href=(endpoints::OVERVIEW_VIEW) class=(LINK_STYLE) { "overview" }
                                    "."
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Balance Sheets", &[], &content)
}
