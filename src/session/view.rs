//! View model handed to the display layer.

use serde::Serialize;

use crate::charts::{ChartKind, ChartOption, Figure};
use crate::map::MapMetric;

/// Text and image fields of the detail cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct DetailCards {
    pub flag_url: String,
    pub population: String,
    pub world_population_share: String,
    pub hdi_rank: String,
    pub hdi: String,
    pub capital: String,
    pub income: String,
    pub life_expectancy: String,
    pub area: String,
}

/// The selected chart and its figure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    /// `None` when no chart is selected
    pub kind: Option<ChartKind>,
    pub figure: Figure,
}

/// Everything derived from the selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// Scope button text
    pub selection_label: String,
    /// Country dropdown value
    pub selected_country: String,
    pub cards: DetailCards,
    pub chart_options: Vec<ChartOption>,
    pub chart: ChartView,
    pub map_metric: MapMetric,
}

/// Result of applying one event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "update", rename_all = "snake_case")]
pub enum ViewUpdate {
    /// Nothing changed
    Unchanged,
    /// Cards, options and chart changed
    Dashboard(DashboardView),
    /// Only the chart changed
    Chart(ChartView),
    /// Only the choropleth changed
    Map { metric: MapMetric, figure: Figure },
}

impl ViewUpdate {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, ViewUpdate::Unchanged)
    }
}
