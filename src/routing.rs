//! Application router configuration.

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    balance::{get_balance_modal, refresh_balance},
    dashboard::{
        get_cash_flow_widget, get_investments_widget, get_overview_page, get_sparkline_widget,
        get_taxes_page, get_taxes_widget,
    },
    endpoints,
    forms::{create_balance_endpoint, create_transaction_endpoint, populate_transaction_endpoint},
    internal_server_error::get_internal_server_error_page,
    logging::logging_middleware,
    not_found::get_404_not_found,
    sheet::{create_sheet_endpoint, get_edit_sheet_page, get_sheet_page, get_sheets_page},
    status::get_status_light,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let pages = Router::new()
        .route(endpoints::OVERVIEW_VIEW, get(get_overview_page))
        .route(endpoints::TAXES_VIEW, get(get_taxes_page))
        .route(
            endpoints::SHEETS_VIEW,
            get(get_sheets_page).post(create_sheet_endpoint),
        )
        .route(endpoints::SHEET_VIEW, get(get_sheet_page))
        .route(endpoints::EDIT_SHEET_VIEW, get(get_edit_sheet_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let fragments = Router::new()
        .route(endpoints::BALANCE_MODAL, get(get_balance_modal))
        .route(endpoints::REFRESH_BALANCE, post(refresh_balance))
        .route(endpoints::POST_BALANCE, post(create_balance_endpoint))
        .route(
            endpoints::POST_TRANSACTION,
            post(create_transaction_endpoint),
        )
        .route(endpoints::POST_PAYMENT, post(populate_transaction_endpoint))
        .route(endpoints::STATUS_LIGHT, get(get_status_light))
        .route(endpoints::CASH_FLOW_WIDGET, get(get_cash_flow_widget))
        .route(endpoints::INVESTMENTS_WIDGET, get(get_investments_widget))
        .route(endpoints::TAXES_WIDGET, get(get_taxes_widget))
        .route(endpoints::SPARKLINE_WIDGET, get(get_sparkline_widget));

    pages
        .merge(fragments)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}
