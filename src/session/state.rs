//! Selection State Machine
//!
//! `{World, Country(c)} × {no chart, chart kind}`. The transitions here are
//! pure and know nothing about the dataset; the engine resolves names and
//! renders the outputs.
//!
//! Invariant: an active chart kind always belongs to the current scope.

use serde::{Deserialize, Serialize};

use crate::charts::{options_for, ChartKind, ChartOption, Scope};
use crate::map::MapMetric;

/// Dropdown value selecting the world scope.
pub const WORLD: &str = "Mundo";

/// Country dropdown value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "scope", content = "country", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    World,
    Country(String),
}

impl Selection {
    pub fn scope(&self) -> Scope {
        match self {
            Selection::World => Scope::World,
            Selection::Country(_) => Scope::Country,
        }
    }

    /// Text shown on the scope button and in the dropdown
    pub fn label(&self) -> &str {
        match self {
            Selection::World => WORLD,
            Selection::Country(name) => name,
        }
    }

    pub fn country(&self) -> Option<&str> {
        match self {
            Selection::World => None,
            Selection::Country(name) => Some(name),
        }
    }
}

/// A chart kind was chosen that does not belong to the current scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Chart '{kind}' is not available in {scope:?} scope")]
pub struct ScopeMismatch {
    pub kind: ChartKind,
    pub scope: Scope,
}

/// Per-session selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SelectionState {
    pub selection: Selection,
    pub chart_kind: Option<ChartKind>,
    pub map_metric: MapMetric,
}

impl SelectionState {
    pub fn scope(&self) -> Scope {
        self.selection.scope()
    }

    /// Chart-kind options for the current scope
    pub fn chart_options(&self) -> Vec<ChartOption> {
        options_for(self.scope())
    }

    /// Switch to the world scope. The chart kind is always cleared.
    pub fn select_world(&mut self) {
        self.selection = Selection::World;
        self.chart_kind = None;
    }

    /// Switch to a country.
    ///
    /// A world-scope kind is cleared; a country-scope kind stays active so
    /// the same chart follows the new country.
    pub fn select_country(&mut self, name: impl Into<String>) {
        if self.chart_kind.is_some_and(|kind| kind.scope() == Scope::World) {
            self.chart_kind = None;
        }
        self.selection = Selection::Country(name.into());
    }

    /// Set or clear the chart kind. A kind from the other scope clears it.
    pub fn select_chart(&mut self, kind: Option<ChartKind>) -> Result<(), ScopeMismatch> {
        match kind {
            Some(kind) if kind.scope() != self.scope() => {
                self.chart_kind = None;
                Err(ScopeMismatch {
                    kind,
                    scope: self.scope(),
                })
            }
            other => {
                self.chart_kind = other;
                Ok(())
            }
        }
    }

    pub fn select_metric(&mut self, metric: MapMetric) {
        self.map_metric = metric;
    }
}
