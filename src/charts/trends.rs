//! Country-scope charts

use super::figure::{BarTrace, Figure, Line, Marker, ScatterTrace, Series};
use super::style::{
    country_layout, top_left_legend, HIGHLIGHT_COLOR, PEER_COLOR, TREND_COLOR,
};
use super::ChartResult;
use crate::data::{extract_year, CountryRecord, Indicator, IndicatorStore, POPULATION_YEARS};

const YEAR_AXIS: &str = "Ano";

/// Line charts over one indicator family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Hdi,
    LifeExpectancy,
    Income,
}

impl Trend {
    fn indicator(self) -> Indicator {
        match self {
            Trend::Hdi => Indicator::Hdi,
            Trend::LifeExpectancy => Indicator::LifeExpectancy,
            Trend::Income => Indicator::Income,
        }
    }

    /// Metric phrase completing "Evolução ..."
    fn metric(self) -> &'static str {
        match self {
            Trend::Hdi => "do IDH",
            Trend::LifeExpectancy => "da Expectativa de Vida",
            Trend::Income => "da Renda",
        }
    }

    fn y_title(self) -> &'static str {
        match self {
            Trend::Hdi => "IDH",
            Trend::LifeExpectancy => "Expectativa de Vida",
            Trend::Income => "Renda Per Capita",
        }
    }
}

/// Years and values of one country's series, in column order.
fn yearly_values(
    store: &IndicatorStore,
    indicator: Indicator,
    record: &CountryRecord,
) -> ChartResult<(Vec<i32>, Vec<Option<f64>>)> {
    let mut years = Vec::new();
    let mut values = Vec::new();
    for (label, value) in store.series(indicator, record) {
        years.push(extract_year(label)?);
        values.push(value);
    }
    Ok((years, values))
}

pub fn indicator_trend(
    store: &IndicatorStore,
    record: &CountryRecord,
    trend: Trend,
) -> ChartResult<Figure> {
    let (years, values) = yearly_values(store, trend.indicator(), record)?;

    let mut line = ScatterTrace::lines(Series::Years(years), Series::Numbers(values));
    line.line = Some(Line::colored(TREND_COLOR));
    line.hovertemplate = Some(format!("{}=%{{x}}<br>{}=%{{y}}<extra></extra>", YEAR_AXIS, trend.y_title()));

    let layout = country_layout(trend.metric(), &record.name, YEAR_AXIS, trend.y_title());
    Ok(Figure::new(layout).with_trace(line))
}

/// Bar per population snapshot year.
pub fn population_trend(record: &CountryRecord) -> Figure {
    let years = POPULATION_YEARS.iter().map(|y| y.to_string()).collect();
    let bars = BarTrace {
        x: Series::Labels(years),
        y: Series::Counts(record.population.to_vec()),
        name: Some(record.iso3.clone()),
        marker: Some(Marker::colored(TREND_COLOR)),
        hovertemplate: Some("Ano=%{x}<br>População=%{y}<extra></extra>".to_string()),
    };

    let layout = country_layout("da População", &record.name, YEAR_AXIS, "População");
    Figure::new(layout).with_trace(bars)
}

/// HDI of every region peer as a faint line, the selected country on top.
///
/// A country without a region is drawn alone.
pub fn hdi_region_comparison(store: &IndicatorStore, record: &CountryRecord) -> ChartResult<Figure> {
    let metric = match &record.region {
        Some(region) => format!("do IDH {}", region),
        None => {
            tracing::warn!(country = %record.name, "No UN region, comparing against no peers");
            "do IDH".to_string()
        }
    };
    let mut layout = country_layout(&metric, &record.name, YEAR_AXIS, "IDH");
    layout.legend = Some(top_left_legend());

    let mut figure = Figure::new(layout);

    if let Some(region) = record.region.as_deref() {
        for peer in store.region_members(region).filter(|p| p.iso3 != record.iso3) {
            let (years, values) = yearly_values(store, Indicator::Hdi, peer)?;
            let mut line = ScatterTrace::lines(Series::Years(years), Series::Numbers(values));
            line.line = Some(Line::colored(PEER_COLOR));
            line.hovertemplate = Some(hover_for(&peer.name));
            line.showlegend = Some(false);
            figure.add_trace(line);
        }
    }

    let (years, values) = yearly_values(store, Indicator::Hdi, record)?;
    let mut highlight = ScatterTrace::lines(Series::Years(years), Series::Numbers(values));
    highlight.mode = Some("lines+markers".to_string());
    highlight.name = Some(record.name.clone());
    highlight.line = Some(Line::colored(HIGHLIGHT_COLOR).width(3.0));
    highlight.hovertemplate = Some(hover_for(&record.name));
    figure.add_trace(highlight);

    Ok(figure)
}

fn hover_for(country: &str) -> String {
    format!("{}: %{{y:.2f}}<extra></extra>", country)
}
