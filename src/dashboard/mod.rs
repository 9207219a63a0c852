//! Dashboard module
//!
//! Provides the overview and taxes pages, and the chart widgets they load:
//! cash flow, investments, tax returns and the sparkline tiles.

mod charts;
mod handlers;
mod series;
mod sparklines;

pub use handlers::{
    get_cash_flow_widget, get_investments_widget, get_overview_page, get_sparkline_widget,
    get_taxes_page, get_taxes_widget,
};
