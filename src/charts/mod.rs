//! Chart Factory
//!
//! Pure functions from the indicator store (plus an optional country) to a
//! fully styled [`Figure`]. Dispatch is a single exhaustive `match` over
//! [`ChartKind`]; the empty selection is represented by `None` upstream and
//! renders [`placeholder`].
//!
//! ## Kinds
//!
//! | Tag | Scope | Shape |
//! |-----|-------|-------|
//! | `evolucao_populacao` | country | bar over the population snapshot years |
//! | `evolucao_idh` | country | HDI line |
//! | `comparacao_idh` | country | HDI line against the region peers |
//! | `evolucao_expectativa_vida` | country | life expectancy line |
//! | `evolucao_renda` | country | income line |
//! | `mundo-populacao` | world | population sunburst, region → country |
//! | `mundo-idh-expectativa` | world | HDI vs life expectancy scatter |
//! | `mundo-renda-expectativa` | world | income vs life expectancy scatter |

mod trends;
pub mod figure;
pub mod style;
mod world;

pub use figure::{Figure, Series, Trace};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::{CountryRecord, IndicatorStore, YearParseError};

/// Errors raised while building a chart
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    /// A yearly column label carries no usable year
    #[error("Invalid year column: {0}")]
    Year(#[from] YearParseError),

    /// A country-scope chart was requested without a country
    #[error("Chart '{0}' needs a selected country")]
    CountryRequired(ChartKind),

    /// The country is not in the store
    #[error("Country not found: {0}")]
    CountryNotFound(String),

    /// The tag names no known chart kind
    #[error("Unknown chart kind: {0}")]
    UnknownKind(String),
}

/// Result type for chart construction
pub type ChartResult<T> = Result<T, ChartError>;

/// Whether the dashboard shows the whole world or a single country
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    World,
    Country,
}

/// The eight chart kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartKind {
    #[serde(rename = "evolucao_populacao")]
    PopulationTrend,
    #[serde(rename = "evolucao_idh")]
    HdiTrend,
    #[serde(rename = "comparacao_idh")]
    HdiRegionComparison,
    #[serde(rename = "evolucao_expectativa_vida")]
    LifeExpectancyTrend,
    #[serde(rename = "evolucao_renda")]
    IncomeTrend,
    #[serde(rename = "mundo-populacao")]
    WorldPopulation,
    #[serde(rename = "mundo-idh-expectativa")]
    HdiVsLifeExpectancy,
    #[serde(rename = "mundo-renda-expectativa")]
    IncomeVsLifeExpectancy,
}

impl ChartKind {
    /// Every kind, in dropdown order (country kinds first)
    pub const ALL: [ChartKind; 8] = [
        ChartKind::PopulationTrend,
        ChartKind::HdiTrend,
        ChartKind::HdiRegionComparison,
        ChartKind::LifeExpectancyTrend,
        ChartKind::IncomeTrend,
        ChartKind::WorldPopulation,
        ChartKind::HdiVsLifeExpectancy,
        ChartKind::IncomeVsLifeExpectancy,
    ];

    /// Wire tag
    pub fn tag(&self) -> &'static str {
        match self {
            ChartKind::PopulationTrend => "evolucao_populacao",
            ChartKind::HdiTrend => "evolucao_idh",
            ChartKind::HdiRegionComparison => "comparacao_idh",
            ChartKind::LifeExpectancyTrend => "evolucao_expectativa_vida",
            ChartKind::IncomeTrend => "evolucao_renda",
            ChartKind::WorldPopulation => "mundo-populacao",
            ChartKind::HdiVsLifeExpectancy => "mundo-idh-expectativa",
            ChartKind::IncomeVsLifeExpectancy => "mundo-renda-expectativa",
        }
    }

    /// Dropdown label
    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::PopulationTrend => "Evolução da População",
            ChartKind::HdiTrend => "Evolução do IDH",
            ChartKind::HdiRegionComparison => "Comparação da evolução do IDH pela região",
            ChartKind::LifeExpectancyTrend => "Evolução da Expectativa de Vida",
            ChartKind::IncomeTrend => "Evolução da Renda",
            ChartKind::WorldPopulation => "Distribuição da População Mundial por Região",
            ChartKind::HdiVsLifeExpectancy => "Correlação entre o IDH e a expectativa de vida",
            ChartKind::IncomeVsLifeExpectancy => "Correlação entre a renda e a expectativa de vida",
        }
    }

    pub fn scope(&self) -> Scope {
        match self {
            ChartKind::PopulationTrend
            | ChartKind::HdiTrend
            | ChartKind::HdiRegionComparison
            | ChartKind::LifeExpectancyTrend
            | ChartKind::IncomeTrend => Scope::Country,
            ChartKind::WorldPopulation
            | ChartKind::HdiVsLifeExpectancy
            | ChartKind::IncomeVsLifeExpectancy => Scope::World,
        }
    }

    pub fn from_tag(tag: &str) -> Option<ChartKind> {
        Self::ALL.iter().copied().find(|kind| kind.tag() == tag)
    }

    /// Kinds valid for a scope, in dropdown order
    pub fn for_scope(scope: Scope) -> impl Iterator<Item = ChartKind> {
        Self::ALL.into_iter().filter(move |kind| kind.scope() == scope)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ChartKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| ChartError::UnknownKind(s.to_string()))
    }
}

/// One entry of the chart-kind dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartOption {
    pub label: String,
    pub value: String,
}

impl From<ChartKind> for ChartOption {
    fn from(kind: ChartKind) -> Self {
        Self {
            label: kind.label().to_string(),
            value: kind.tag().to_string(),
        }
    }
}

/// Chart-kind dropdown options for a scope.
pub fn options_for(scope: Scope) -> Vec<ChartOption> {
    ChartKind::for_scope(scope).map(ChartOption::from).collect()
}

/// Blank figure with the standard styling
pub fn placeholder() -> Figure {
    Figure::new(style::standard_layout())
}

/// Build the figure for a kind.
///
/// `country` is the display name of the selected country; world kinds ignore
/// it, country kinds require it.
pub fn build_chart(
    kind: ChartKind,
    store: &IndicatorStore,
    country: Option<&str>,
) -> ChartResult<Figure> {
    let record = move || country_record(store, kind, country);

    match kind {
        ChartKind::PopulationTrend => Ok(trends::population_trend(record()?)),
        ChartKind::HdiTrend => trends::indicator_trend(store, record()?, trends::Trend::Hdi),
        ChartKind::HdiRegionComparison => trends::hdi_region_comparison(store, record()?),
        ChartKind::LifeExpectancyTrend => {
            trends::indicator_trend(store, record()?, trends::Trend::LifeExpectancy)
        }
        ChartKind::IncomeTrend => trends::indicator_trend(store, record()?, trends::Trend::Income),
        ChartKind::WorldPopulation => Ok(world::population_sunburst(store)),
        ChartKind::HdiVsLifeExpectancy => Ok(world::correlation(store, world::Correlation::Hdi)),
        ChartKind::IncomeVsLifeExpectancy => {
            Ok(world::correlation(store, world::Correlation::Income))
        }
    }
}

fn country_record<'a>(
    store: &'a IndicatorStore,
    kind: ChartKind,
    country: Option<&str>,
) -> ChartResult<&'a CountryRecord> {
    let name = country.ok_or(ChartError::CountryRequired(kind))?;
    store
        .by_name(name)
        .ok_or_else(|| ChartError::CountryNotFound(name.to_string()))
}
