//! UI events accepted by a session.

use serde::{Deserialize, Serialize};

use crate::map::MapMetric;

/// Which control produced a map click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClickOrigin {
    #[default]
    Map,
    /// The scope button re-fires the last map click; those are ignored.
    ResetButton,
}

/// One input from the display layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardEvent {
    /// Country dropdown: `Mundo`, a country name, or cleared (`null`)
    SelectCountry {
        #[serde(default)]
        value: Option<String>,
    },

    /// Click on a map polygon
    MapClick {
        #[serde(default)]
        iso3: Option<String>,
        #[serde(default)]
        origin: ClickOrigin,
    },

    /// Chart-kind dropdown; empty or missing clears the chart
    SelectChart {
        #[serde(default)]
        kind: Option<String>,
    },

    /// Map metric radio buttons
    SelectMetric { metric: MapMetric },

    /// Scope button pressed: back to the world view
    ResetScope,
}

impl DashboardEvent {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            DashboardEvent::SelectCountry { .. } => "select_country",
            DashboardEvent::MapClick { .. } => "map_click",
            DashboardEvent::SelectChart { .. } => "select_chart",
            DashboardEvent::SelectMetric { .. } => "select_metric",
            DashboardEvent::ResetScope => "reset_scope",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_events() {
        let event: DashboardEvent =
            serde_json::from_str(r#"{"type": "select_country", "value": "Brazil"}"#).unwrap();
        assert_eq!(
            event,
            DashboardEvent::SelectCountry {
                value: Some("Brazil".to_string())
            }
        );

        let event: DashboardEvent =
            serde_json::from_str(r#"{"type": "map_click", "iso3": "BRA"}"#).unwrap();
        assert_eq!(
            event,
            DashboardEvent::MapClick {
                iso3: Some("BRA".to_string()),
                origin: ClickOrigin::Map
            }
        );

        let event: DashboardEvent =
            serde_json::from_str(r#"{"type": "select_metric", "metric": "expectativa_vida"}"#)
                .unwrap();
        assert_eq!(
            event,
            DashboardEvent::SelectMetric {
                metric: MapMetric::LifeExpectancy
            }
        );

        let event: DashboardEvent = serde_json::from_str(r#"{"type": "reset_scope"}"#).unwrap();
        assert_eq!(event.name(), "reset_scope");
    }

    #[test]
    fn test_null_and_missing_fields() {
        let event: DashboardEvent =
            serde_json::from_str(r#"{"type": "select_country", "value": null}"#).unwrap();
        assert_eq!(event, DashboardEvent::SelectCountry { value: None });

        let event: DashboardEvent = serde_json::from_str(r#"{"type": "select_chart"}"#).unwrap();
        assert_eq!(event, DashboardEvent::SelectChart { kind: None });
    }

    #[test]
    fn test_invalid_events() {
        assert!(serde_json::from_str::<DashboardEvent>(r#"{"type": "zoom"}"#).is_err());
        assert!(serde_json::from_str::<DashboardEvent>(
            r#"{"type": "select_metric", "metric": "pib"}"#
        )
        .is_err());
    }
}
