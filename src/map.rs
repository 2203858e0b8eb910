//! Map Renderer
//!
//! Builds the world choropleth colored by one metric. The figure is rebuilt
//! from the full store on every call; the GeoJSON is shared, not copied.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::charts::figure::{
    AxisTitle, ChoroplethTrace, ColorAxis, ColorBar, Figure, LatLon, Layout, Mapbox, Margin, Marker,
};
use crate::data::{Indicator, IndicatorStore, CARD_YEAR, LATEST_POPULATION_YEAR};

pub const MAP_BACKGROUND: &str = "#d4dadc";
pub const MAP_STYLE: &str = "carto-positron";
pub const MAP_CENTER: LatLon = LatLon {
    lat: 14.778986,
    lon: -15.723305,
};
pub const MAP_ZOOM: f64 = 2.0;
pub const MAP_COLORSCALE: &str = "YlGn";
pub const MAP_OPACITY: f64 = 0.4;

/// Metric shown by the choropleth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MapMetric {
    #[default]
    #[serde(rename = "idh")]
    Hdi,
    #[serde(rename = "populacao")]
    Population,
    #[serde(rename = "renda")]
    Income,
    #[serde(rename = "expectativa_vida")]
    LifeExpectancy,
}

impl MapMetric {
    pub const ALL: [MapMetric; 4] = [
        MapMetric::Hdi,
        MapMetric::Population,
        MapMetric::Income,
        MapMetric::LifeExpectancy,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            MapMetric::Hdi => "idh",
            MapMetric::Population => "populacao",
            MapMetric::Income => "renda",
            MapMetric::LifeExpectancy => "expectativa_vida",
        }
    }

    /// Radio button label
    pub fn label(&self) -> &'static str {
        match self {
            MapMetric::Hdi => "IDH",
            MapMetric::Population => "População",
            MapMetric::Income => "Renda",
            MapMetric::LifeExpectancy => "Expectativa de Vida",
        }
    }

    /// Source column the metric reads
    pub fn column(&self) -> String {
        match self {
            MapMetric::Hdi => Indicator::Hdi.column_for(CARD_YEAR),
            MapMetric::Population => format!("{} Population", LATEST_POPULATION_YEAR),
            MapMetric::Income => Indicator::Income.column_for(CARD_YEAR),
            MapMetric::LifeExpectancy => Indicator::LifeExpectancy.column_for(CARD_YEAR),
        }
    }

    pub fn from_tag(tag: &str) -> Option<MapMetric> {
        Self::ALL.iter().copied().find(|m| m.tag() == tag)
    }
}

impl fmt::Display for MapMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown map metric: {0}")]
pub struct UnknownMetric(pub String);

impl FromStr for MapMetric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| UnknownMetric(s.to_string()))
    }
}

/// Radio button entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricOption {
    pub label: String,
    pub value: String,
}

pub fn metric_options() -> Vec<MetricOption> {
    MapMetric::ALL
        .iter()
        .map(|m| MetricOption {
            label: m.label().to_string(),
            value: m.tag().to_string(),
        })
        .collect()
}

/// Build the choropleth for a metric.
pub fn build_choropleth(
    store: &IndicatorStore,
    geojson: &Arc<serde_json::Value>,
    metric: MapMetric,
) -> Figure {
    let column = metric.column();
    let mut locations = Vec::with_capacity(store.len());
    let mut values = Vec::with_capacity(store.len());
    let mut names = Vec::with_capacity(store.len());
    let mut groups = Vec::with_capacity(store.len());

    for record in store.iter() {
        let value = match metric {
            MapMetric::Hdi => record.hdi(),
            MapMetric::Population => record.latest_population().map(|p| p as f64),
            MapMetric::Income => record.income(),
            MapMetric::LifeExpectancy => record.life_expectancy(),
        };
        locations.push(record.iso3.clone());
        values.push(value);
        names.push(record.name.clone());
        groups.push(vec![record.development_group.clone().unwrap_or_default()]);
    }

    let trace = ChoroplethTrace {
        geojson: Arc::clone(geojson),
        locations,
        z: values,
        text: Some(names),
        customdata: Some(groups),
        hovertemplate: Some(format!(
            "<b>%{{text}}</b><br>ISO3=%{{location}}<br>Human Development Groups=%{{customdata[0]}}<br>{}=%{{z}}<extra></extra>",
            column
        )),
        coloraxis: "coloraxis".to_string(),
        marker: Some(Marker {
            opacity: Some(MAP_OPACITY),
            ..Default::default()
        }),
    };

    let layout = Layout {
        paper_bgcolor: Some(MAP_BACKGROUND.to_string()),
        autosize: Some(true),
        margin: Some(Margin::zero()),
        showlegend: Some(false),
        mapbox: Some(Mapbox {
            style: MAP_STYLE.to_string(),
            center: MAP_CENTER,
            zoom: MAP_ZOOM,
        }),
        coloraxis: Some(ColorAxis {
            colorscale: MAP_COLORSCALE.to_string(),
            colorbar: ColorBar {
                len: 0.5,
                x: 0.02,
                y: 0.98,
                xanchor: "left".to_string(),
                yanchor: "top".to_string(),
                title: Some(AxisTitle {
                    text: Some(column),
                    font: None,
                }),
            },
        }),
        ..Default::default()
    };

    Figure::new(layout).with_trace(trace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::figure::Trace;
    use crate::data::fixtures;

    fn choropleth(figure: &Figure) -> &ChoroplethTrace {
        match &figure.data[0] {
            Trace::Choroplethmapbox(c) => c,
            other => panic!("expected choropleth, got {:?}", other),
        }
    }

    #[test]
    fn test_metric_tags() {
        for metric in MapMetric::ALL {
            assert_eq!(metric.tag().parse::<MapMetric>(), Ok(metric));
        }
        assert!("pib".parse::<MapMetric>().is_err());
        assert_eq!(MapMetric::default(), MapMetric::Hdi);
        assert_eq!(MapMetric::Population.column(), "2022 Population");
        assert_eq!(MapMetric::Income.column(), "Gross National Income Per Capita (2021)");
    }

    #[test]
    fn test_choropleth_covers_store() {
        let dataset = fixtures::dataset();
        let figure = build_choropleth(&dataset.store, &dataset.geojson, MapMetric::Hdi);
        let trace = choropleth(&figure);

        assert_eq!(trace.locations.len(), dataset.store.len());
        assert_eq!(trace.locations[0], "BRA");
        assert_eq!(trace.z[0], Some(0.754));
        assert!(Arc::ptr_eq(&trace.geojson, &dataset.geojson));
    }

    #[test]
    fn test_population_metric() {
        let dataset = fixtures::dataset();
        let figure = build_choropleth(&dataset.store, &dataset.geojson, MapMetric::Population);
        assert_eq!(choropleth(&figure).z[0], Some(215_313_498.0));
    }

    #[test]
    fn test_map_styling() {
        let dataset = fixtures::dataset();
        let figure = build_choropleth(&dataset.store, &dataset.geojson, MapMetric::Income);
        let value = serde_json::to_value(&figure).unwrap();

        assert_eq!(value["data"][0]["type"], "choroplethmapbox");
        assert_eq!(value["data"][0]["marker"]["opacity"], 0.4);
        assert_eq!(value["layout"]["mapbox"]["style"], "carto-positron");
        assert_eq!(value["layout"]["mapbox"]["zoom"], 2.0);
        assert_eq!(value["layout"]["margin"]["l"], 0);
        assert_eq!(value["layout"]["showlegend"], false);
        assert_eq!(value["layout"]["paper_bgcolor"], "#d4dadc");
        assert_eq!(value["layout"]["coloraxis"]["colorscale"], "YlGn");
        assert_eq!(value["layout"]["coloraxis"]["colorbar"]["len"], 0.5);
        assert_eq!(value["layout"]["coloraxis"]["colorbar"]["xanchor"], "left");
    }
}
