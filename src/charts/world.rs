//! World-scope charts
//!
//! Region grouping keeps the order in which regions first appear in the
//! store, so colors are stable across requests.

use std::collections::HashMap;

use super::figure::{Figure, Marker, ScatterTrace, Series, SunburstTrace};
use super::style::{palette_color, titled_layout};
use crate::data::CountryRecord;
use crate::data::IndicatorStore;

/// Region assigned to countries the region table does not cover.
const FALLBACK_REGION: &str = "Asia";

const LIFE_EXPECTANCY_AXIS: &str = "Expectativa de Vida";

/// Population sunburst: UN region → country, sized by 2022 population.
pub fn population_sunburst(store: &IndicatorStore) -> Figure {
    let mut regions: Vec<(&str, Vec<(&CountryRecord, u64)>)> = Vec::new();

    for record in store.iter() {
        let Some(population) = record.latest_population() else {
            continue;
        };
        let region = match record.region.as_deref() {
            Some(region) => region,
            None => {
                tracing::debug!(country = %record.name, region = FALLBACK_REGION, "Repairing missing region");
                FALLBACK_REGION
            }
        };
        match regions.iter_mut().find(|(name, _)| *name == region) {
            Some((_, members)) => members.push((record, population)),
            None => regions.push((region, vec![(record, population)])),
        }
    }

    let mut trace = SunburstTrace {
        ids: Vec::new(),
        labels: Vec::new(),
        parents: Vec::new(),
        values: Vec::new(),
        branchvalues: "total".to_string(),
        textinfo: Some("label+value".to_string()),
        texttemplate: Some("%{label}: %{value:,}".to_string()),
        hovertemplate: Some("%{label}<br>2022 Population=%{value:,}<extra></extra>".to_string()),
        marker: None,
    };
    let mut colors = Vec::new();

    for (index, (region, members)) in regions.iter().enumerate() {
        let color = palette_color(index).to_string();

        trace.ids.push(region.to_string());
        trace.labels.push(region.to_string());
        trace.parents.push(String::new());
        trace.values.push(members.iter().map(|(_, p)| *p).sum());
        colors.push(color.clone());

        for (record, population) in members {
            trace.ids.push(format!("{}/{}", region, record.name));
            trace.labels.push(record.name.clone());
            trace.parents.push(region.to_string());
            trace.values.push(*population);
            colors.push(color.clone());
        }
    }
    trace.marker = Some(Marker {
        colors: Some(colors),
        ..Default::default()
    });

    let mut layout = titled_layout("População do mundo divida por região");
    layout.autosize = Some(false);
    layout.height = Some(800);

    Figure::new(layout).with_trace(trace)
}

/// X axis of a correlation scatter; the Y axis is always life expectancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correlation {
    Hdi,
    Income,
}

impl Correlation {
    fn title(self) -> &'static str {
        match self {
            Correlation::Hdi => "Correlação entre o IDH e Expectativa de Vida",
            Correlation::Income => "Correlação entre a Renda Per Capita e Expectativa de Vida",
        }
    }

    fn x_title(self) -> &'static str {
        match self {
            Correlation::Hdi => "IDH",
            Correlation::Income => "Renda Per Capita",
        }
    }

    fn x_value(self, record: &CountryRecord) -> Option<f64> {
        match self {
            Correlation::Hdi => record.hdi(),
            Correlation::Income => record.income(),
        }
    }
}

#[derive(Default)]
struct RegionPoints {
    x: Vec<Option<f64>>,
    y: Vec<Option<f64>>,
    names: Vec<String>,
}

/// Scatter of the card-year values, one trace per region.
///
/// Countries without a region or without both values are left out.
pub fn correlation(store: &IndicatorStore, correlation: Correlation) -> Figure {
    let mut order: Vec<&str> = Vec::new();
    let mut points: HashMap<&str, RegionPoints> = HashMap::new();

    for record in store.iter() {
        let (Some(region), Some(x), Some(y)) = (
            record.region.as_deref(),
            correlation.x_value(record),
            record.life_expectancy(),
        ) else {
            continue;
        };

        let entry = points.entry(region).or_insert_with(|| {
            order.push(region);
            RegionPoints::default()
        });
        entry.x.push(Some(x));
        entry.y.push(Some(y));
        entry.names.push(record.name.clone());
    }

    let mut layout = titled_layout(correlation.title());
    layout.set_x_title(correlation.x_title());
    layout.set_y_title(LIFE_EXPECTANCY_AXIS);
    let mut figure = Figure::new(layout);

    for (index, region) in order.into_iter().enumerate() {
        let Some(group) = points.remove(region) else {
            continue;
        };
        let mut trace = ScatterTrace::markers(Series::Numbers(group.x), Series::Numbers(group.y));
        trace.name = Some(region.to_string());
        trace.marker = Some(Marker::colored(palette_color(index)));
        trace.text = Some(group.names);
        trace.hovertemplate = Some(format!(
            "<b>%{{text}}</b><br>{}=%{{x}}<br>{}=%{{y}}<extra>{}</extra>",
            correlation.x_title(),
            LIFE_EXPECTANCY_AXIS,
            region
        ));
        figure.add_trace(trace);
    }

    figure
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::figure::Trace;
    use crate::data::fixtures;

    fn sunburst(figure: &Figure) -> &SunburstTrace {
        match &figure.data[0] {
            Trace::Sunburst(s) => s,
            other => panic!("expected sunburst, got {:?}", other),
        }
    }

    #[test]
    fn test_sunburst_hierarchy() {
        let store = fixtures::store();
        let figure = population_sunburst(&store);
        let trace = sunburst(&figure);

        assert_eq!(trace.ids.len(), trace.parents.len());
        assert_eq!(trace.ids.len(), trace.values.len());
        assert_eq!(trace.branchvalues, "total");

        let americas = trace.ids.iter().position(|id| id == "Americas").unwrap();
        assert_eq!(trace.parents[americas], "");
        assert_eq!(trace.values[americas], 215_313_498 + 45_510_318 + 19_603_733);

        let brazil = trace.ids.iter().position(|id| id == "Americas/Brazil").unwrap();
        assert_eq!(trace.parents[brazil], "Americas");
        assert_eq!(trace.labels[brazil], "Brazil");
        assert_eq!(figure.layout.height, Some(800));
    }

    #[test]
    fn test_sunburst_repairs_missing_region() {
        let store = fixtures::store();
        let figure = population_sunburst(&store);
        let trace = sunburst(&figure);

        assert!(trace.ids.iter().any(|id| id == "Asia/Hong Kong"));
        let total: u64 = trace
            .parents
            .iter()
            .zip(&trace.values)
            .filter(|(parent, _)| parent.is_empty())
            .map(|(_, value)| value)
            .sum();
        assert_eq!(total, store.world_summary().total_population);
    }

    #[test]
    fn test_correlation_groups_by_region() {
        let store = fixtures::store();
        let figure = correlation(&store, Correlation::Hdi);

        let names: Vec<&str> = figure
            .data
            .iter()
            .map(|trace| match trace {
                Trace::Scatter(s) => s.name.as_deref().unwrap(),
                other => panic!("expected scatter, got {:?}", other),
            })
            .collect();
        assert_eq!(names, vec!["Americas", "Europe", "Oceania"]);

        match &figure.data[0] {
            Trace::Scatter(s) => {
                assert_eq!(s.x.len(), 3);
                assert_eq!(s.text.as_ref().unwrap()[0], "Brazil");
            }
            _ => unreachable!(),
        }
        assert_eq!(figure.layout.xaxis.as_ref().unwrap().title_text(), Some("IDH"));
    }

    #[test]
    fn test_income_correlation_title() {
        let figure = correlation(&fixtures::store(), Correlation::Income);
        assert_eq!(
            figure.title(),
            Some("Correlação entre a Renda Per Capita e Expectativa de Vida")
        );
    }
}
