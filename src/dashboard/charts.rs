//! Chart generation and rendering for the dashboard widgets.
//!
//! This module creates interactive ECharts visualizations for the ledger series:
//! - **Cash Flow Chart**: stacked cash and debt bars with a net cash line
//! - **Investments Chart**: the ending investment balance over time
//! - **Taxes Chart**: income and AGI for each tax year
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with its HTML container and an inline initialization script.

use charming::{
    Chart,
    component::{Axis, Grid, Legend},
    element::{
        AreaStyle, AxisLabel, AxisPointer, AxisPointerType, AxisType, ItemStyle, JsFunction,
        LineStyle, Tooltip, Trigger,
    },
    series::{Bar, Line},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    api::{CashFlowPoint, InvestmentPoint, TaxReturnPoint},
    dashboard::series::month_label,
    theme::{Theme, with_alpha},
};

/// The opacity of bar fills.
const BAR_ALPHA: f64 = 0.8;
/// The opacity of the area under the investments line.
const AREA_ALPHA: f64 = 0.75;

/// Renders a chart container and the script that draws `chart` into it.
///
/// The script runs when htmx swaps the markup into the page.
pub(super) fn chart_view(id: &str, class: &str, chart: &Chart) -> Markup {
    html!(
        div id=(id) class=(class) {}
        script { (chart_script(id, &chart.to_string())) }
    )
}

/// Generates JavaScript initialization code for one chart.
///
/// Creates a script that initializes an ECharts instance with dark mode support
/// and responsive resizing.
fn chart_script(id: &str, options: &str) -> PreEscaped<String> {
    // The options are embedded in a script tag, so they must not close it.
    let options = options.replace("</", "<\\/");

    PreEscaped(format!(
        r#"(function() {{
            const chartDom = document.getElementById("{id}");
            const chart = echarts.init(chartDom);
            const option = {options};
            chart.setOption(option);

            window.addEventListener('resize', chart.resize);

            const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
            const updateTheme = () => {{
                const isDarkMode = darkModeMediaQuery.matches;
                chart.setTheme(isDarkMode ? 'dark' : 'default');
            }}
            darkModeMediaQuery.addEventListener('change', updateTheme);
            updateTheme();
        }})();"#
    ))
}

/// The formatter shared by every chart's tooltips and axis labels.
///
/// Two decimals with thousands separators, e.g. "1,234.50".
pub(super) fn amount_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "value",
        "const amountFormatter = new Intl.NumberFormat('en-US', {
              minimumFractionDigits: 2,
              maximumFractionDigits: 2
            });
            return (typeof value === 'number') ? amountFormatter.format(value) : value;",
    )
}

/// Creates a tooltip configuration for amounts
pub(super) fn amount_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(amount_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

fn amount_axis() -> Axis {
    Axis::new()
        .type_(AxisType::Value)
        .axis_label(AxisLabel::new().formatter(amount_formatter()))
}

fn default_grid() -> Grid {
    Grid::new()
        .left("3%")
        .right("4%")
        .bottom("3%")
        .contain_label(true)
}

/// Cash and debt as stacked bars with net cash as a line, `points` in chronological order.
pub(super) fn cash_flow_chart(points: &[CashFlowPoint], theme: &Theme) -> Chart {
    let labels: Vec<String> = points.iter().map(|point| month_label(&point.date)).collect();
    let net: Vec<f64> = points.iter().map(|point| point.net_ending).collect();
    let cash: Vec<f64> = points.iter().map(|point| point.cash_ending).collect();
    let debt: Vec<f64> = points.iter().map(|point| point.debt_ending).collect();

    Chart::new()
        .tooltip(amount_tooltip())
        .legend(Legend::new())
        .grid(default_grid())
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(amount_axis())
        .series(
            Line::new()
                .name("Net Cash")
                .item_style(ItemStyle::new().color(theme.key.as_str()))
                .line_style(LineStyle::new().color(theme.key.as_str()))
                .data(net),
        )
        .series(
            Bar::new()
                .name("Cash (ending)")
                .stack("balance")
                .item_style(
                    ItemStyle::new()
                        .color(with_alpha(&theme.success, BAR_ALPHA).as_str())
                        .border_color(theme.success.as_str()),
                )
                .data(cash),
        )
        .series(
            Bar::new()
                .name("Debt (ending)")
                .stack("balance")
                .item_style(
                    ItemStyle::new()
                        .color(with_alpha(&theme.danger, BAR_ALPHA).as_str())
                        .border_color(theme.danger.as_str()),
                )
                .data(debt),
        )
}

/// The ending investment balance as a filled line, `points` in chronological order.
pub(super) fn investments_chart(points: &[InvestmentPoint], theme: &Theme) -> Chart {
    let labels: Vec<String> = points.iter().map(|point| point.date.clone()).collect();
    let values: Vec<f64> = points.iter().map(|point| point.investment).collect();

    Chart::new()
        .tooltip(amount_tooltip())
        .legend(Legend::new().show(false))
        .grid(default_grid())
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(amount_axis())
        .series(
            Line::new()
                .name("Ending Balance")
                .item_style(ItemStyle::new().color(theme.primary.as_str()))
                .line_style(LineStyle::new().color(theme.primary.as_str()))
                .area_style(AreaStyle::new().color(with_alpha(&theme.primary, AREA_ALPHA).as_str()))
                .data(values),
        )
}

/// Income and AGI bars for each tax year, `points` in chronological order.
pub(super) fn taxes_chart(points: &[TaxReturnPoint], theme: &Theme) -> Chart {
    let labels: Vec<String> = points.iter().map(|point| point.year.to_string()).collect();
    let income: Vec<f64> = points.iter().map(|point| point.income).collect();
    let agi: Vec<f64> = points.iter().map(|point| point.agi).collect();

    Chart::new()
        .tooltip(amount_tooltip())
        .legend(Legend::new())
        .grid(default_grid())
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(amount_axis())
        .series(
            Bar::new()
                .name("Income")
                .item_style(
                    ItemStyle::new()
                        .color(with_alpha(&theme.primary, BAR_ALPHA).as_str())
                        .border_color(theme.primary.as_str()),
                )
                .data(income),
        )
        .series(
            Bar::new()
                .name("AGI")
                .item_style(
                    ItemStyle::new()
                        .color(with_alpha(&theme.success, BAR_ALPHA).as_str())
                        .border_color(theme.success.as_str()),
                )
                .data(agi),
        )
}

#[cfg(test)]
mod tests {
    use crate::{
        api::{CashFlowPoint, InvestmentPoint, TaxReturnPoint},
        theme::Theme,
    };

    use super::{cash_flow_chart, chart_view, investments_chart, taxes_chart};

    fn chart_json(chart: &charming::Chart) -> String {
        chart.to_string()
    }

    fn cash_flow_point(date: &str, cash: f64, debt: f64) -> CashFlowPoint {
        CashFlowPoint {
            date: date.to_owned(),
            cash_ending: cash,
            debt_ending: debt,
            net_ending: cash + debt,
        }
    }

    #[test]
    fn cash_flow_chart_labels_months_and_names_series() {
        let points = vec![
            cash_flow_point("2019-01-31", 100.0, -50.0),
            cash_flow_point("2019-02-28", 200.0, -25.0),
        ];

        let json = chart_json(&cash_flow_chart(&points, &Theme::default()));

        assert!(json.contains(r#""Jan 2019""#));
        assert!(json.contains(r#""Feb 2019""#));
        assert!(json.find("Jan 2019") < json.find("Feb 2019"));
        assert!(json.contains("Net Cash"));
        assert!(json.contains("Cash (ending)"));
        assert!(json.contains("Debt (ending)"));
        assert!(json.contains("rgba(67, 172, 106, 0.8)"));
        assert!(json.contains("rgba(240, 65, 36, 0.8)"));
        assert!(json.contains("#333333"));
    }

    #[test]
    fn charts_share_the_amount_formatter() {
        let theme = Theme::default();
        let charts = [
            cash_flow_chart(&[], &theme),
            investments_chart(
                &[InvestmentPoint {
                    date: "2019-01-31".to_owned(),
                    investment: 10.0,
                }],
                &theme,
            ),
            taxes_chart(
                &[TaxReturnPoint {
                    year: 2018,
                    income: 10.0,
                    agi: 9.0,
                }],
                &theme,
            ),
        ];

        for chart in charts {
            assert!(chart_json(&chart).contains("amountFormatter"));
        }
    }

    #[test]
    fn investments_chart_hides_legend_and_fills_area() {
        let points = vec![InvestmentPoint {
            date: "2019-01-31".to_owned(),
            investment: 1000.0,
        }];

        let json = chart_json(&investments_chart(&points, &Theme::default()));

        assert!(json.contains("Ending Balance"));
        assert!(json.contains("rgba(0, 140, 186, 0.75)"));
    }

    #[test]
    fn chart_script_cannot_close_its_tag() {
        let points = vec![InvestmentPoint {
            date: "</script><script>alert(1)".to_owned(),
            investment: 1.0,
        }];
        let chart = investments_chart(&points, &Theme::default());

        let markup = chart_view("investments-chart", "h-64", &chart).into_string();

        assert_eq!(markup.matches("</script>").count(), 1);
    }
}
