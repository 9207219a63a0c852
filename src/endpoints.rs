//! The URIs of the app's pages and htmx endpoints.
//!
//! For endpoints that take parameters, e.g., '/sheets/{date}', use [format_endpoint].

/// The overview dashboard, also the landing page.
pub const OVERVIEW_VIEW: &str = "/";
/// The tax returns dashboard.
pub const TAXES_VIEW: &str = "/taxes";
/// The list of balance sheets.
pub const SHEETS_VIEW: &str = "/sheets";
/// A single balance sheet.
pub const SHEET_VIEW: &str = "/sheets/{date}";
/// The page for adding transactions and balances to a balance sheet.
pub const EDIT_SHEET_VIEW: &str = "/sheets/{date}/edit";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for creating a balance sheet.
pub const POST_SHEET: &str = "/sheets";
/// The balance modal body for one balance on a sheet.
pub const BALANCE_MODAL: &str = "/sheets/{date}/balances/{balance_id}";
/// The route that refreshes one balance on a sheet.
pub const REFRESH_BALANCE: &str = "/sheets/{date}/balances/{balance_id}/refresh";
/// The route for adding a balance to a sheet.
pub const POST_BALANCE: &str = "/sheets/{date}/balances";
/// The route for adding a transaction to a sheet.
pub const POST_TRANSACTION: &str = "/sheets/{date}/transactions";
/// The route that fills in the transaction form from a payment.
pub const POST_PAYMENT: &str = "/sheets/{date}/payments";

/// The API status light in the navigation bar.
pub const STATUS_LIGHT: &str = "/widgets/status";
/// The cash flow bar chart.
pub const CASH_FLOW_WIDGET: &str = "/widgets/cashflow";
/// The investments line chart.
pub const INVESTMENTS_WIDGET: &str = "/widgets/investments";
/// The tax returns bar chart.
pub const TAXES_WIDGET: &str = "/widgets/taxes";
/// A sparkline tile, named e.g. "credit-score" or "savings".
pub const SPARKLINE_WIDGET: &str = "/widgets/sparklines/{name}";

/// Replace the parameters in `endpoint_path` with `values`, in order.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/sheets/{date}', '{date}' is the parameter.
///
/// Parameters without a matching value are left in place, and extra
/// values are ignored.
pub fn format_endpoint(endpoint_path: &str, values: &[&str]) -> String {
    let mut formatted = String::with_capacity(endpoint_path.len());
    let mut values = values.iter();
    let mut rest = endpoint_path;

    while let Some(param_start) = rest.find('{') {
        let Some(param_length) = rest[param_start..].find('}') else {
            break;
        };
        let param_end = param_start + param_length + 1;

        formatted.push_str(&rest[..param_start]);

        match values.next() {
            Some(value) => formatted.push_str(value),
            None => formatted.push_str(&rest[param_start..param_end]),
        }

        rest = &rest[param_end..];
    }

    formatted.push_str(rest);
    formatted
}
