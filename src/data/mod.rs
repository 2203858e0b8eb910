//! Dataset
//!
//! Startup-time data: the joined [`IndicatorStore`], the [`CountryRegistry`],
//! the prepared GeoJSON feature collection and the asset resolver. Everything
//! here is read once and immutable afterwards; handlers share it through an
//! `Arc<Dataset>`.
//!
//! ## Sources
//!
//! - `hdi_info.csv`: indicators per country and year
//! - `regioes.csv`: ISO3 → UN region
//! - `world_population.csv`: population snapshots, capital, area
//! - `custom.geo.json`: country polygons

mod assets;
mod columns;
mod loader;
mod registry;
mod store;

#[cfg(test)]
pub(crate) mod fixtures;

pub use assets::AssetResolver;
pub use columns::{
    extract_year, Indicator, YearParseError, CARD_YEAR, LATEST_POPULATION_YEAR, POPULATION_YEARS,
};
pub use loader::{IndicatorRow, IndicatorTable, PopulationRow, SeriesColumns};
pub use registry::{prepare_features, CountryRegistry};
pub use store::{CountryRecord, IndicatorStore, WorldSummary};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use geojson::FeatureCollection;
use thiserror::Error;

use crate::config::{AssetConfig, DataConfig};

/// Errors raised while loading the datasets
#[derive(Error, Debug)]
pub enum DataError {
    /// A source file could not be read
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV syntax error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// GeoJSON could not be parsed
    #[error("GeoJSON error: {0}")]
    GeoJson(String),

    /// A required column is absent
    #[error("Missing column '{column}' in {table} table")]
    MissingColumn { table: &'static str, column: String },

    /// A yearly column label carries no usable year
    #[error("Invalid yearly column: {0}")]
    Year(#[from] YearParseError),

    /// A row lacks its key fields
    #[error("Malformed row at line {line} of {table} table: {reason}")]
    MalformedRow {
        table: &'static str,
        line: usize,
        reason: String,
    },

    /// The indicator table has no rows
    #[error("Indicator table is empty")]
    Empty,
}

/// Result type for dataset loading
pub type DataResult<T> = Result<T, DataError>;

/// Raw source contents, used when the data does not come from disk
#[derive(Debug, Clone, Copy)]
pub struct DataSources<'a> {
    pub indicators: &'a str,
    pub regions: &'a str,
    pub population: &'a str,
    pub geojson: &'a str,
}

/// Everything the dashboard reads at startup
#[derive(Debug, Clone)]
pub struct Dataset {
    pub store: IndicatorStore,
    pub registry: CountryRegistry,
    /// Prepared feature collection as JSON, shared by every map figure
    pub geojson: Arc<serde_json::Value>,
    pub assets: AssetResolver,
}

impl Dataset {
    /// Load all sources from the configured data directory.
    pub fn load(data: &DataConfig, assets: &AssetConfig) -> DataResult<Self> {
        let dir = Path::new(&data.data_dir);
        tracing::info!(data_dir = %dir.display(), "Loading datasets");

        let indicators = read_file(&dir.join(&data.indicators_file))?;
        let regions = read_file(&dir.join(&data.regions_file))?;
        let population = read_file(&dir.join(&data.population_file))?;
        let geojson = read_file(&dir.join(&data.geojson_file))?;

        Self::from_sources(
            DataSources {
                indicators: &indicators,
                regions: &regions,
                population: &population,
                geojson: &geojson,
            },
            assets,
        )
    }

    /// Build from in-memory sources.
    pub fn from_sources(sources: DataSources<'_>, assets: &AssetConfig) -> DataResult<Self> {
        let indicators = loader::read_indicators(sources.indicators.as_bytes())?;
        let regions = loader::read_regions(sources.regions.as_bytes())?;
        let population = loader::read_population(sources.population.as_bytes())?;

        let store = IndicatorStore::join(indicators, &regions, population);
        if store.is_empty() {
            return Err(DataError::Empty);
        }

        let mut features: FeatureCollection = serde_json::from_str(sources.geojson)
            .map_err(|e| DataError::GeoJson(e.to_string()))?;
        prepare_features(&mut features);

        let registry = CountryRegistry::build(&store, &features);
        let geojson =
            serde_json::to_value(&features).map_err(|e| DataError::GeoJson(e.to_string()))?;

        tracing::info!(
            countries = store.len(),
            features = features.features.len(),
            "Datasets loaded"
        );

        Ok(Self {
            store,
            registry,
            geojson: Arc::new(geojson),
            assets: AssetResolver::new(assets.clone()),
        })
    }

    /// Store countries with no polygon in the map, in source order
    pub fn unmapped_countries(&self) -> Vec<&CountryRecord> {
        self.store
            .iter()
            .filter(|record| !self.registry.has_feature(&record.iso3))
            .collect()
    }

    /// Look a country up by display name or ISO3 code
    pub fn find_country(&self, query: &str) -> Option<&CountryRecord> {
        let query = query.trim();
        self.store
            .by_name(query)
            .or_else(|| self.store.by_iso3(&query.to_uppercase()))
    }
}

fn read_file(path: &Path) -> DataResult<String> {
    std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_from_sources() {
        let dataset = fixtures::dataset();
        assert_eq!(dataset.store.len(), 6);
        assert_eq!(dataset.registry.iso3_for_name("Chile"), Some("CHL"));
        assert!(dataset.geojson["features"].is_array());
    }

    #[test]
    fn test_unmapped_countries() {
        let dataset = fixtures::dataset();
        let unmapped: Vec<&str> = dataset
            .unmapped_countries()
            .iter()
            .map(|record| record.iso3.as_str())
            .collect();

        assert_eq!(unmapped, vec!["TUV"]);
        assert_eq!(dataset.registry.feature_count(), 7);
    }

    #[test]
    fn test_find_country_by_name_or_code() {
        let dataset = fixtures::dataset();

        assert_eq!(dataset.find_country("Norway").map(|r| r.iso3.as_str()), Some("NOR"));
        assert_eq!(dataset.find_country("nor").map(|r| r.name.as_str()), Some("Norway"));
        assert_eq!(dataset.find_country(" HKG ").map(|r| r.name.as_str()), Some("Hong Kong"));
        assert!(dataset.find_country("Atlantis").is_none());
        assert!(dataset.find_country("ATA").is_none());
    }

    #[test]
    fn test_prepared_geojson_carries_ids() {
        let dataset = fixtures::dataset();
        let ids: Vec<&str> = dataset.geojson["features"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|f| f["id"].as_str())
            .collect();
        assert!(ids.contains(&"NOR"));
        assert!(ids.contains(&"BRA"));
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempdir().unwrap();
        fixtures::write_data_dir(dir.path());

        let config = DataConfig {
            data_dir: dir.path().to_string_lossy().to_string(),
            ..DataConfig::default()
        };
        let dataset = Dataset::load(&config, &AssetConfig::default()).unwrap();
        assert_eq!(dataset.store.len(), 6);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let config = DataConfig {
            data_dir: dir.path().to_string_lossy().to_string(),
            ..DataConfig::default()
        };
        let err = Dataset::load(&config, &AssetConfig::default()).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }

    #[test]
    fn test_invalid_geojson() {
        let sources = DataSources {
            geojson: "{not geojson",
            ..fixtures::sources()
        };
        let err = Dataset::from_sources(sources, &AssetConfig::default()).unwrap_err();
        assert!(matches!(err, DataError::GeoJson(_)));
    }

    #[test]
    fn test_empty_indicator_table() {
        let header = fixtures::INDICATORS_CSV.lines().next().unwrap();
        let sources = DataSources {
            indicators: header,
            ..fixtures::sources()
        };
        let err = Dataset::from_sources(sources, &AssetConfig::default()).unwrap_err();
        assert!(matches!(err, DataError::Empty));
    }
}
