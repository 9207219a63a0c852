//! The small trend charts shown as tiles on the overview page.

use charming::{
    Chart,
    component::{Axis, Grid, Legend},
    element::{AreaStyle, AxisType, ItemStyle, LineStyle, Symbol, Tooltip, Trigger},
    series::{Bar, Line},
};

use crate::{
    api::{
        ApiError, CreditScorePoint, InvestmentPoint, LedgerApi, SavingsPoint, TaxReturnPoint,
        fetch, paths,
    },
    dashboard::{charts::amount_formatter, series::most_recent},
    theme::{Theme, with_alpha},
};

/// The number of points drawn in a sparkline.
pub const SPARKLINE_POINTS: usize = 12;
/// The size of a sparkline in pixels.
pub const SPARKLINE_WIDTH: u32 = 85;
pub const SPARKLINE_HEIGHT: u32 = 35;

const FILL_ALPHA: f64 = 0.5;

/// The series that have a sparkline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sparkline {
    CreditScore,
    Income,
    Savings,
    Investments,
}

enum SparklineShape {
    Line,
    Bar,
}

impl Sparkline {
    pub const ALL: [Sparkline; 4] = [
        Sparkline::CreditScore,
        Sparkline::Income,
        Sparkline::Savings,
        Sparkline::Investments,
    ];

    /// Look up a sparkline by the name used in its route.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|sparkline| sparkline.name() == name)
    }

    /// The name used in the sparkline's route and element IDs.
    pub fn name(self) -> &'static str {
        match self {
            Sparkline::CreditScore => "credit-score",
            Sparkline::Income => "income",
            Sparkline::Savings => "savings",
            Sparkline::Investments => "investments",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Sparkline::CreditScore => "Credit Score",
            Sparkline::Income => "Income",
            Sparkline::Savings => "Savings",
            Sparkline::Investments => "Investments",
        }
    }

    /// The ledger API endpoint of the series.
    pub fn endpoint(self) -> &'static str {
        match self {
            Sparkline::CreditScore => paths::CREDIT_SCORE,
            Sparkline::Income => paths::TAX_RETURNS,
            Sparkline::Savings => paths::SAVINGS,
            Sparkline::Investments => paths::INVESTMENTS,
        }
    }

    fn shape(self) -> SparklineShape {
        match self {
            Sparkline::CreditScore | Sparkline::Investments => SparklineShape::Line,
            Sparkline::Income | Sparkline::Savings => SparklineShape::Bar,
        }
    }

    fn colour(self, theme: &Theme) -> &str {
        match self {
            Sparkline::CreditScore => &theme.warning,
            Sparkline::Income | Sparkline::Savings => &theme.success,
            Sparkline::Investments => &theme.primary,
        }
    }

    /// Fetch the most recent values of the series, in chronological order.
    ///
    /// # Errors
    /// Returns the API error if the series could not be fetched or decoded.
    pub async fn fetch_values(self, api: &dyn LedgerApi) -> Result<Vec<f64>, ApiError> {
        let endpoint = self.endpoint();

        let newest_first: Vec<f64> = match self {
            Sparkline::CreditScore => fetch::<Vec<CreditScorePoint>>(api, endpoint)
                .await?
                .into_iter()
                .map(|point| point.score)
                .collect(),
            Sparkline::Income => fetch::<Vec<TaxReturnPoint>>(api, endpoint)
                .await?
                .into_iter()
                .map(|point| point.income)
                .collect(),
            Sparkline::Savings => fetch::<Vec<SavingsPoint>>(api, endpoint)
                .await?
                .into_iter()
                .map(|point| point.savings)
                .collect(),
            Sparkline::Investments => fetch::<Vec<InvestmentPoint>>(api, endpoint)
                .await?
                .into_iter()
                .map(|point| point.investment)
                .collect(),
        };

        Ok(most_recent(newest_first, SPARKLINE_POINTS))
    }

    /// Build the chart for `values`, which are in chronological order.
    pub fn chart(self, values: &[f64], theme: &Theme) -> Chart {
        let colour = self.colour(theme);
        let fill = with_alpha(colour, FILL_ALPHA);
        let labels: Vec<String> = (1..=values.len()).map(|index| index.to_string()).collect();

        let chart = Chart::new()
            .legend(Legend::new().show(false))
            .tooltip(
                Tooltip::new()
                    .trigger(Trigger::Item)
                    .value_formatter(amount_formatter()),
            )
            .grid(Grid::new().left(0).right(0).top(0).bottom(0))
            .x_axis(
                Axis::new()
                    .type_(AxisType::Category)
                    .show(false)
                    .data(labels),
            )
            .y_axis(Axis::new().type_(AxisType::Value).show(false));

        match self.shape() {
            SparklineShape::Line => chart.series(
                Line::new()
                    .name(self.title())
                    .symbol(Symbol::None)
                    .item_style(ItemStyle::new().color(colour))
                    .line_style(LineStyle::new().color(colour).width(1))
                    .area_style(AreaStyle::new().color(fill.as_str()))
                    .data(values.to_vec()),
            ),
            SparklineShape::Bar => chart.series(
                Bar::new()
                    .name(self.title())
                    .item_style(ItemStyle::new().color(fill.as_str()).border_color(colour))
                    .data(values.to_vec()),
            ),
        }
    }
}
