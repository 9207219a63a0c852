//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - Route handlers for the overview and taxes pages
//! - Route handlers for the chart widgets, which the pages load with htmx
//! - The widget card that shows a chart and its loading state

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    api::{ApiError, CashFlowPoint, InvestmentPoint, TaxReturnPoint, fetch, paths},
    app_state::{ChartState, SessionState},
    dashboard::{
        charts::{cash_flow_chart, chart_view, investments_chart, taxes_chart},
        series::chronological,
        sparklines::{SPARKLINE_HEIGHT, SPARKLINE_WIDTH, Sparkline},
    },
    endpoints::{self, format_endpoint},
    html::{CARD_STYLE, HeadElement, PAGE_CONTAINER_STYLE, base, loading_spinner},
    navigation::NavBar,
    not_found::NotFoundError,
    sheet::create_sheet_form,
};

/// The class set on a widget while its data is loading.
const LOADING_CLASS: &str = "be-loading-active";
const ECHARTS_SCRIPT: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";
const CHART_STYLE: &str = "min-h-[380px] w-full rounded dark:bg-gray-100";

/// A chart widget on a dashboard page.
struct Widget {
    /// The kebab-case ID of the widget.
    id: String,
    title: &'static str,
    /// The route that renders the widget's chart.
    route: String,
}

impl Widget {
    /// Render the card that loads the chart once the page is shown.
    ///
    /// The refresh button reloads the chart in place.
    fn into_html(self) -> Markup {
        let body_id = format!("{}-body", self.id);

        html!(
            div
                id=(&self.id)
                class=(CARD_STYLE)
                data-loading-class=(LOADING_CLASS)
            {
                div class="flex items-center justify-between mb-2"
                {
                    h3 class="text-lg font-semibold" { (self.title) }

                    button
                        type="button"
                        class="text-sm text-blue-600 dark:text-blue-500 hover:underline"
                        hx-get=(self.route)
                        hx-target={ "#" (body_id) }
                        hx-swap="innerHTML"
                    {
                        "Refresh"
                    }
                }

                div
                    id=(body_id)
                    class="widget-body"
                    hx-get=(self.route)
                    hx-trigger="load"
                    hx-swap="innerHTML"
                {
                    (loading_spinner())
                }
            }
        )
    }
}

fn sparkline_widget(sparkline: Sparkline) -> Widget {
    Widget {
        id: format!("{}-tile", sparkline.name()),
        title: sparkline.title(),
        route: format_endpoint(endpoints::SPARKLINE_WIDGET, &[sparkline.name()]),
    }
}

/// Display the overview page: the sheet form, sparklines, cash flow and investments.
pub async fn get_overview_page(State(session): State<SessionState>) -> Response {
    let nav_bar = NavBar::new(endpoints::OVERVIEW_VIEW, &session).into_html();

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-xl"
            {
                section class="grid grid-cols-2 lg:grid-cols-4 gap-4 mb-4"
                {
                    @for sparkline in Sparkline::ALL {
                        (sparkline_widget(sparkline).into_html())
                    }
                }

                section class="grid grid-cols-1 xl:grid-cols-2 gap-4 mb-4"
                {
                    (Widget {
                        id: "cash-flow".to_owned(),
                        title: "Cash Flow",
                        route: endpoints::CASH_FLOW_WIDGET.to_owned(),
                    }.into_html())

                    (Widget {
                        id: "investments".to_owned(),
                        title: "Investments",
                        route: endpoints::INVESTMENTS_WIDGET.to_owned(),
                    }.into_html())
                }

                section class="max-w-md"
                {
                    (create_sheet_form(&session.csrf_token))
                }
            }
        }
    );

    let scripts = [HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned())];

    base("Overview", &scripts, &content).into_response()
}

/// Display the tax returns page.
pub async fn get_taxes_page(State(session): State<SessionState>) -> Response {
    let nav_bar = NavBar::new(endpoints::TAXES_VIEW, &session).into_html();

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-xl"
            {
                (Widget {
                    id: "taxes".to_owned(),
                    title: "Tax Returns",
                    route: endpoints::TAXES_WIDGET.to_owned(),
                }.into_html())
            }
        }
    );

    let scripts = [HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned())];

    base("Taxes", &scripts, &content).into_response()
}

/// The response for a widget whose data could not be loaded.
///
/// The widget keeps what it was showing, so nothing is swapped.
fn widget_failed(widget: &str, error: ApiError) -> Response {
    tracing::error!("could not load the {widget} widget: {error}");
    StatusCode::BAD_GATEWAY.into_response()
}

/// A route handler for the cash flow chart.
pub async fn get_cash_flow_widget(State(state): State<ChartState>) -> Response {
    match fetch::<Vec<CashFlowPoint>>(state.api.as_ref(), paths::CASH_FLOW).await {
        Ok(points) => {
            let chart = cash_flow_chart(&chronological(points), &state.theme);
            chart_view("cash-flow-chart", CHART_STYLE, &chart).into_response()
        }
        Err(error) => widget_failed("cash flow", error),
    }
}

/// A route handler for the investments chart.
pub async fn get_investments_widget(State(state): State<ChartState>) -> Response {
    match fetch::<Vec<InvestmentPoint>>(state.api.as_ref(), paths::INVESTMENTS).await {
        Ok(points) => {
            let chart = investments_chart(&chronological(points), &state.theme);
            chart_view("investments-chart", CHART_STYLE, &chart).into_response()
        }
        Err(error) => widget_failed("investments", error),
    }
}

/// A route handler for the tax returns chart.
pub async fn get_taxes_widget(State(state): State<ChartState>) -> Response {
    match fetch::<Vec<TaxReturnPoint>>(state.api.as_ref(), paths::TAX_RETURNS).await {
        Ok(points) => {
            let chart = taxes_chart(&chronological(points), &state.theme);
            chart_view("taxes-chart", CHART_STYLE, &chart).into_response()
        }
        Err(error) => widget_failed("taxes", error),
    }
}

/// A route handler for a sparkline, see [Sparkline::name] for the names.
pub async fn get_sparkline_widget(
    State(state): State<ChartState>,
    Path(name): Path<String>,
) -> Response {
    let Some(sparkline) = Sparkline::from_name(&name) else {
        return NotFoundError.into_response();
    };

    match sparkline.fetch_values(state.api.as_ref()).await {
        Ok(values) => {
            let chart = sparkline.chart(&values, &state.theme);
            let style = format!("width: {SPARKLINE_WIDTH}px; height: {SPARKLINE_HEIGHT}px;");

            html!(
                div style=(style)
                {
                    (chart_view(&format!("{name}-sparkline"), "", &chart))
                }
            )
            .into_response()
        }
        Err(error) => widget_failed(sparkline.name(), error),
    }
}


#[cfg(test)]
mod page_tests {
    use axum::{extract::State, http::StatusCode};
    use scraper::Selector;

    use crate::{
        app_state::SessionState,
        test_utils::{assert_hx_endpoint, assert_valid_html, parse_html_document},
    };

    use super::{get_overview_page, get_taxes_page};

    fn get_test_session() -> SessionState {
        SessionState {
            csrf_token: "csrf-token".to_owned(),
            logout_url: "/logout/".to_owned(),
        }
    }

    #[tokio::test]
    async fn overview_loads_every_widget() {
        let response = get_overview_page(State(get_test_session())).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let routes: Vec<&str> = html
            .select(&Selector::parse(".widget-body").unwrap())
            .filter_map(|body| body.value().attr("hx-get"))
            .collect();
        assert_eq!(
            routes,
            vec![
                "/widgets/sparklines/credit-score",
                "/widgets/sparklines/income",
                "/widgets/sparklines/savings",
                "/widgets/sparklines/investments",
                "/widgets/cashflow",
                "/widgets/investments",
            ]
        );

        let cards = html
            .select(&Selector::parse("[data-loading-class='be-loading-active']").unwrap())
            .count();
        assert_eq!(cards, 6);
    }

    #[tokio::test]
    async fn taxes_page_loads_taxes_widget() {
        let response = get_taxes_page(State(get_test_session())).await;

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let body = html
            .select(&Selector::parse("#taxes-body").unwrap())
            .next()
            .expect("no taxes widget found");
        assert_hx_endpoint(&body, "/widgets/taxes", "hx-get");
    }
}
