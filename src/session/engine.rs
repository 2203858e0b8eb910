//! Dashboard engine
//!
//! Applies events to a [`SelectionState`] and derives the view from the
//! state after each transition. Lookup failures never reach the caller as
//! errors: they are logged and rendered as blank fields and the placeholder
//! figure.

use std::sync::Arc;

use serde::Serialize;

use super::events::{ClickOrigin, DashboardEvent};
use super::state::{Selection, SelectionState, WORLD};
use super::view::{ChartView, DashboardView, DetailCards, ViewUpdate};
use crate::charts::{self, ChartError, ChartKind, Figure};
use crate::data::{CountryRecord, Dataset};
use crate::format::{
    format_area, format_currency, format_hdi, format_life_expectancy, format_percentage,
    format_population, WORLD_AREA_KM2,
};
use crate::map::{self, MapMetric};

/// Country dropdown entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryOption {
    pub label: String,
    pub value: String,
}

/// Stateless event processor over the shared dataset
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Arc<Dataset>,
}

impl Dashboard {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Country dropdown: `Mundo` first, then every country in table order.
    pub fn country_options(&self) -> Vec<CountryOption> {
        std::iter::once(WORLD.to_string())
            .chain(self.dataset.store.iter().map(|r| r.name.clone()))
            .map(|name| CountryOption {
                label: name.clone(),
                value: name,
            })
            .collect()
    }

    /// View of a fresh session
    pub fn initial_view(&self) -> DashboardView {
        self.view(&SelectionState::default())
    }

    /// Derive the full view from a state.
    pub fn view(&self, state: &SelectionState) -> DashboardView {
        let cards = match &state.selection {
            Selection::World => self.world_cards(),
            Selection::Country(name) => match self.dataset.store.by_name(name) {
                Some(record) => self.country_cards(record),
                None => {
                    tracing::warn!(country = %name, "Selected country not in store");
                    DetailCards::default()
                }
            },
        };

        DashboardView {
            selection_label: state.selection.label().to_string(),
            selected_country: state.selection.label().to_string(),
            cards,
            chart_options: state.chart_options(),
            chart: self.chart_view(state),
            map_metric: state.map_metric,
        }
    }

    /// Apply one event and report what changed.
    pub fn apply(&self, state: &mut SelectionState, event: DashboardEvent) -> ViewUpdate {
        tracing::debug!(event = event.name(), "Applying dashboard event");

        match event {
            DashboardEvent::SelectCountry { value: None } => ViewUpdate::Unchanged,
            DashboardEvent::SelectCountry { value: Some(value) } => self.select(state, &value),

            DashboardEvent::MapClick {
                origin: ClickOrigin::ResetButton,
                ..
            } => {
                tracing::debug!("Ignoring click re-fired by the scope button");
                ViewUpdate::Unchanged
            }
            DashboardEvent::MapClick { iso3: None, .. } => ViewUpdate::Unchanged,
            DashboardEvent::MapClick {
                iso3: Some(iso3), ..
            } => match self.dataset.registry.name_for_iso3(&iso3) {
                Some(name) => {
                    let name = name.to_string();
                    self.select(state, &name)
                }
                None => {
                    tracing::warn!(iso3 = %iso3, "Map click on a country outside the store");
                    ViewUpdate::Dashboard(self.blank_view(state, &iso3))
                }
            },

            DashboardEvent::SelectChart { kind } => {
                let kind = kind.as_deref().unwrap_or_default();
                let parsed = if kind.is_empty() {
                    None
                } else {
                    match kind.parse::<ChartKind>() {
                        Ok(kind) => Some(kind),
                        Err(e) => {
                            tracing::error!(error = %e, "Unrecognized chart tag");
                            state.chart_kind = None;
                            return ViewUpdate::Chart(self.chart_view(state));
                        }
                    }
                };

                if let Err(mismatch) = state.select_chart(parsed) {
                    tracing::warn!(error = %mismatch, "Chart kind does not match the selection");
                }
                ViewUpdate::Chart(self.chart_view(state))
            }

            DashboardEvent::SelectMetric { metric } => {
                state.select_metric(metric);
                ViewUpdate::Map {
                    metric,
                    figure: self.map(metric),
                }
            }

            DashboardEvent::ResetScope => self.select(state, WORLD),
        }
    }

    /// Choropleth for a metric
    pub fn map(&self, metric: MapMetric) -> Figure {
        map::build_choropleth(&self.dataset.store, &self.dataset.geojson, metric)
    }

    /// Country dropdown transition
    fn select(&self, state: &mut SelectionState, value: &str) -> ViewUpdate {
        if value == WORLD {
            state.select_world();
        } else if self.dataset.store.by_name(value).is_some() {
            state.select_country(value);
        } else {
            tracing::warn!(country = %value, "Unknown country selected");
            return ViewUpdate::Dashboard(self.blank_view(state, value));
        }
        ViewUpdate::Dashboard(self.view(state))
    }

    /// Neutral view for a selection that could not be resolved. The state
    /// itself is left untouched.
    fn blank_view(&self, state: &SelectionState, label: &str) -> DashboardView {
        DashboardView {
            selection_label: label.to_string(),
            selected_country: label.to_string(),
            cards: DetailCards::default(),
            chart_options: Vec::new(),
            chart: ChartView {
                kind: None,
                figure: charts::placeholder(),
            },
            map_metric: state.map_metric,
        }
    }

    fn chart_view(&self, state: &SelectionState) -> ChartView {
        let figure = match state.chart_kind {
            None => charts::placeholder(),
            Some(kind) => self.render_chart(kind, state.selection.country()),
        };
        ChartView {
            kind: state.chart_kind,
            figure,
        }
    }

    fn render_chart(&self, kind: ChartKind, country: Option<&str>) -> Figure {
        match charts::build_chart(kind, &self.dataset.store, country) {
            Ok(figure) => figure,
            Err(e @ ChartError::Year(_)) => {
                tracing::error!(chart = %kind, error = %e, "Chart data has an invalid year column");
                charts::placeholder()
            }
            Err(e) => {
                tracing::warn!(chart = %kind, error = %e, "Chart could not be built");
                charts::placeholder()
            }
        }
    }

    fn world_cards(&self) -> DetailCards {
        let summary = self.dataset.store.world_summary();
        DetailCards {
            flag_url: self.dataset.assets.world_flag(),
            population: format_population(summary.total_population),
            world_population_share: "100%".to_string(),
            hdi_rank: String::new(),
            hdi: String::new(),
            capital: String::new(),
            income: format_currency(summary.average_income),
            life_expectancy: format_life_expectancy(summary.average_life_expectancy),
            area: format_area(WORLD_AREA_KM2),
        }
    }

    fn country_cards(&self, record: &CountryRecord) -> DetailCards {
        let flag_code = self.dataset.registry.flag_code(&record.iso3);
        DetailCards {
            flag_url: self.dataset.assets.flag_for(flag_code),
            population: record
                .latest_population()
                .map(format_population)
                .unwrap_or_default(),
            world_population_share: record
                .world_population_share
                .map(format_percentage)
                .unwrap_or_default(),
            hdi_rank: record.hdi_rank.map(|r| r.to_string()).unwrap_or_default(),
            hdi: record.hdi().map(format_hdi).unwrap_or_default(),
            capital: record.capital.clone().unwrap_or_default(),
            income: record.income().map(format_currency).unwrap_or_default(),
            life_expectancy: record
                .life_expectancy()
                .map(format_life_expectancy)
                .unwrap_or_default(),
            area: record.area_km2.map(format_area).unwrap_or_default(),
        }
    }
}
