//! Indicator Store
//!
//! One record per country, joined from the indicator table, the region
//! mapping (by ISO3) and the population table (ISO3 = CCA3). Immutable after
//! construction.

use std::collections::HashMap;

use serde::Serialize;

use super::columns::{Indicator, CARD_YEAR, LATEST_POPULATION_YEAR, POPULATION_YEARS};
use super::loader::{IndicatorTable, PopulationRow, SeriesColumns};

/// Joined country record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryRecord {
    pub iso3: String,
    pub name: String,
    pub region: Option<String>,
    pub development_group: Option<String>,
    pub hdi_rank: Option<u32>,
    pub capital: Option<String>,
    pub area_km2: Option<f64>,
    /// Share of the world population, in percent
    pub world_population_share: Option<f64>,
    /// Population snapshots aligned with [`POPULATION_YEARS`]
    pub population: [Option<u64>; 8],
    #[serde(skip)]
    series: HashMap<Indicator, Vec<Option<f64>>>,
    #[serde(skip)]
    card_values: HashMap<Indicator, Option<f64>>,
}

impl CountryRecord {
    /// HDI for the card year
    pub fn hdi(&self) -> Option<f64> {
        self.card_value(Indicator::Hdi)
    }

    /// Income per capita for the card year
    pub fn income(&self) -> Option<f64> {
        self.card_value(Indicator::Income)
    }

    /// Life expectancy for the card year
    pub fn life_expectancy(&self) -> Option<f64> {
        self.card_value(Indicator::LifeExpectancy)
    }

    /// Indicator value for the card year
    pub fn card_value(&self, indicator: Indicator) -> Option<f64> {
        self.card_values.get(&indicator).copied().flatten()
    }

    /// Most recent population snapshot
    pub fn latest_population(&self) -> Option<u64> {
        self.population_in(LATEST_POPULATION_YEAR)
    }

    /// Population snapshot for a given year
    pub fn population_in(&self, year: i32) -> Option<u64> {
        POPULATION_YEARS
            .iter()
            .position(|y| *y == year)
            .and_then(|slot| self.population[slot])
    }
}

/// Aggregate figures shown on the World card
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldSummary {
    pub total_population: u64,
    pub average_income: f64,
    pub average_life_expectancy: f64,
}

/// In-memory indicator dataset
#[derive(Debug, Clone, Default)]
pub struct IndicatorStore {
    records: Vec<CountryRecord>,
    by_iso3: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
    series: HashMap<Indicator, SeriesColumns>,
}

impl IndicatorStore {
    /// Join the three source tables.
    ///
    /// Countries without a population row keep empty population fields;
    /// countries without a region mapping keep `region = None`.
    pub fn join(
        indicators: IndicatorTable,
        regions: &HashMap<String, String>,
        population: Vec<PopulationRow>,
    ) -> Self {
        let population: HashMap<String, PopulationRow> = population
            .into_iter()
            .map(|row| (row.cca3.clone(), row))
            .collect();

        let mut records = Vec::with_capacity(indicators.rows.len());
        let mut by_iso3 = HashMap::new();
        let mut by_name = HashMap::new();
        let mut unmatched = 0usize;

        for row in indicators.rows {
            if by_iso3.contains_key(&row.iso3) {
                tracing::warn!(iso3 = %row.iso3, "Duplicate ISO3 in indicator table, keeping first");
                continue;
            }

            let pop = population.get(&row.iso3);
            if pop.is_none() {
                unmatched += 1;
            }

            let card_values = Indicator::ALL
                .iter()
                .map(|indicator| {
                    let value = indicators
                        .series
                        .get(indicator)
                        .and_then(|cols| cols.position(CARD_YEAR))
                        .and_then(|pos| row.series.get(indicator).and_then(|v| v.get(pos)))
                        .copied()
                        .flatten();
                    (*indicator, value)
                })
                .collect();

            let idx = records.len();
            by_iso3.insert(row.iso3.clone(), idx);
            by_name.entry(row.name.clone()).or_insert(idx);

            records.push(CountryRecord {
                region: regions.get(&row.iso3).cloned(),
                development_group: row.development_group,
                hdi_rank: row.hdi_rank,
                capital: pop.and_then(|p| p.capital.clone()),
                area_km2: pop.and_then(|p| p.area_km2),
                world_population_share: pop.and_then(|p| p.world_share),
                population: pop.map(|p| p.snapshots).unwrap_or([None; 8]),
                iso3: row.iso3,
                name: row.name,
                series: row.series,
                card_values,
            });
        }

        if unmatched > 0 {
            tracing::info!(countries = unmatched, "Countries without population data");
        }
        let missing_region = records.iter().filter(|r| r.region.is_none()).count();
        if missing_region > 0 {
            tracing::info!(countries = missing_region, "Countries without a UN region");
        }

        Self {
            records,
            by_iso3,
            by_name,
            series: indicators.series,
        }
    }

    /// Number of countries
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in source order
    pub fn iter(&self) -> impl Iterator<Item = &CountryRecord> {
        self.records.iter()
    }

    pub fn by_iso3(&self, iso3: &str) -> Option<&CountryRecord> {
        self.by_iso3.get(iso3).map(|idx| &self.records[*idx])
    }

    pub fn by_name(&self, name: &str) -> Option<&CountryRecord> {
        self.by_name.get(name).map(|idx| &self.records[*idx])
    }

    /// Countries sharing a UN region, in source order
    pub fn region_members<'a>(&'a self, region: &'a str) -> impl Iterator<Item = &'a CountryRecord> {
        self.records
            .iter()
            .filter(move |r| r.region.as_deref() == Some(region))
    }

    /// Yearly column labels of an indicator family
    pub fn series_labels(&self, indicator: Indicator) -> &[String] {
        self.series
            .get(&indicator)
            .map(|cols| cols.labels.as_slice())
            .unwrap_or(&[])
    }

    /// `(column label, value)` pairs of one country's series, in file order
    pub fn series<'a>(
        &'a self,
        indicator: Indicator,
        record: &'a CountryRecord,
    ) -> impl Iterator<Item = (&'a str, Option<f64>)> + 'a {
        let values = record
            .series
            .get(&indicator)
            .map(|v| v.as_slice())
            .unwrap_or(&[]);
        self.series_labels(indicator)
            .iter()
            .enumerate()
            .map(move |(i, label)| (label.as_str(), values.get(i).copied().flatten()))
    }

    /// World card aggregates.
    ///
    /// Averages divide the column sum by the number of countries in the
    /// table, including countries whose value is missing.
    pub fn world_summary(&self) -> WorldSummary {
        let count = self.records.len().max(1) as f64;
        let total_population = self.records.iter().filter_map(|r| r.latest_population()).sum();
        let income: f64 = self.records.iter().filter_map(|r| r.income()).sum();
        let life: f64 = self.records.iter().filter_map(|r| r.life_expectancy()).sum();

        WorldSummary {
            total_population,
            average_income: income / count,
            average_life_expectancy: life / count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;

    #[test]
    fn test_join() {
        let store = fixtures::store();
        assert_eq!(store.len(), 6);

        let brazil = store.by_iso3("BRA").unwrap();
        assert_eq!(brazil.name, "Brazil");
        assert_eq!(brazil.region.as_deref(), Some("Americas"));
        assert_eq!(brazil.hdi(), Some(0.754));
        assert_eq!(brazil.income(), Some(14370.42));
        assert_eq!(brazil.life_expectancy(), Some(72.8));
        assert_eq!(brazil.latest_population(), Some(215_313_498));
        assert_eq!(brazil.population_in(1970), Some(96_369_875));
        assert_eq!(brazil.capital.as_deref(), Some("Brasilia"));
        assert_eq!(brazil.world_population_share, Some(2.7));

        assert!(std::ptr::eq(brazil, store.by_name("Brazil").unwrap()));
    }

    #[test]
    fn test_missing_region_is_kept() {
        let store = fixtures::store();
        let hong_kong = store.by_iso3("HKG").unwrap();
        assert_eq!(hong_kong.region, None);
    }

    #[test]
    fn test_region_members() {
        let store = fixtures::store();
        let names: Vec<&str> = store.region_members("Americas").map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Brazil", "Argentina", "Chile"]);
    }

    #[test]
    fn test_series_pairs_labels_with_values() {
        let store = fixtures::store();
        let brazil = store.by_iso3("BRA").unwrap();
        let pairs: Vec<(&str, Option<f64>)> = store.series(Indicator::Hdi, brazil).collect();

        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0], ("Human Development Index (1990)", Some(0.61)));
        assert_eq!(pairs[2], ("Human Development Index (2021)", Some(0.754)));
    }

    #[test]
    fn test_world_summary() {
        let summary = fixtures::store().world_summary();
        assert_eq!(summary.total_population, 293_362_045);
        assert!((summary.average_income - 32222.52).abs() < 1e-6);
        assert!((summary.average_life_expectancy - 76.7166).abs() < 1e-3);
    }
}
