//! Table loaders
//!
//! Header-driven readers for the three flat tables. Columns are located by
//! name, so extra columns in the source files are ignored and column order
//! does not matter. A missing required column, or a yearly column whose label
//! does not carry a year, is a schema error and aborts loading.

use std::collections::HashMap;
use std::io::Read;

use super::columns::{
    extract_year, population_year, Indicator, COL_AREA, COL_CAPITAL, COL_CCA3, COL_COUNTRY,
    COL_DEVELOPMENT_GROUP, COL_HDI_RANK, COL_ISO3, COL_REGION_ISO, COL_REGION_NAME,
    COL_WORLD_SHARE, POPULATION_YEARS,
};
use super::{DataError, DataResult};

/// Yearly columns of one indicator family, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesColumns {
    /// Original column labels, e.g. `Human Development Index (1990)`
    pub labels: Vec<String>,
    /// Year carried by each label
    pub years: Vec<i32>,
}

impl SeriesColumns {
    /// Position of a given year in this family
    pub fn position(&self, year: i32) -> Option<usize> {
        self.years.iter().position(|y| *y == year)
    }
}

/// One row of the indicator table
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorRow {
    pub iso3: String,
    pub name: String,
    pub development_group: Option<String>,
    pub hdi_rank: Option<u32>,
    /// Values aligned with [`IndicatorTable::series`] labels
    pub series: HashMap<Indicator, Vec<Option<f64>>>,
}

/// Parsed indicator table
#[derive(Debug, Clone, Default)]
pub struct IndicatorTable {
    pub series: HashMap<Indicator, SeriesColumns>,
    pub rows: Vec<IndicatorRow>,
}

/// One row of the population table
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationRow {
    pub cca3: String,
    pub capital: Option<String>,
    /// Snapshots aligned with [`POPULATION_YEARS`]
    pub snapshots: [Option<u64>; 8],
    pub area_km2: Option<f64>,
    pub world_share: Option<f64>,
}

/// Read the indicator table (`hdi_info.csv`).
pub fn read_indicators<R: Read>(reader: R) -> DataResult<IndicatorTable> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = csv.headers()?.clone();

    let iso_idx = require_column(&headers, COL_ISO3, "indicators")?;
    let name_idx = require_column(&headers, COL_COUNTRY, "indicators")?;
    let group_idx = find_column(&headers, COL_DEVELOPMENT_GROUP);
    let rank_idx = find_column(&headers, COL_HDI_RANK);

    // Group yearly columns by family; the year must parse for every label.
    let mut series: HashMap<Indicator, SeriesColumns> = HashMap::new();
    let mut positions: HashMap<Indicator, Vec<usize>> = HashMap::new();
    for (idx, header) in headers.iter().enumerate() {
        for indicator in Indicator::ALL {
            if indicator.matches(header) {
                let year = extract_year(header)?;
                let family = series.entry(indicator).or_default();
                family.labels.push(header.to_string());
                family.years.push(year);
                positions.entry(indicator).or_default().push(idx);
            }
        }
    }

    for indicator in Indicator::ALL {
        if !series.contains_key(&indicator) {
            return Err(DataError::MissingColumn {
                table: "indicators",
                column: indicator.column_prefix().to_string(),
            });
        }
    }

    let mut rows = Vec::new();
    for (line, record) in csv.records().enumerate() {
        let record = record?;
        let line = line + 2;

        let iso3 = cell(&record, iso_idx).map(str::to_string);
        let name = cell(&record, name_idx).map(str::to_string);
        let (iso3, name) = match (iso3, name) {
            (Some(iso3), Some(name)) => (iso3, name),
            _ => {
                return Err(DataError::MalformedRow {
                    table: "indicators",
                    line,
                    reason: "missing ISO3 code or country name".to_string(),
                })
            }
        };

        let mut values = HashMap::new();
        for (indicator, idxs) in &positions {
            let row_values = idxs
                .iter()
                .map(|idx| parse_number(&record, *idx, "indicators", line))
                .collect();
            values.insert(*indicator, row_values);
        }

        rows.push(IndicatorRow {
            iso3,
            name,
            development_group: group_idx.and_then(|i| cell(&record, i)).map(str::to_string),
            hdi_rank: rank_idx
                .and_then(|i| parse_number(&record, i, "indicators", line))
                .map(|rank| rank as u32),
            series: values,
        });
    }

    tracing::debug!(rows = rows.len(), "Read indicator table");
    Ok(IndicatorTable { series, rows })
}

/// Read the region mapping (`regioes.csv`): ISO3 → UN region.
pub fn read_regions<R: Read>(reader: R) -> DataResult<HashMap<String, String>> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = csv.headers()?.clone();

    let iso_idx = require_column(&headers, COL_REGION_ISO, "regions")?;
    let region_idx = require_column(&headers, COL_REGION_NAME, "regions")?;

    let mut regions = HashMap::new();
    for record in csv.records() {
        let record = record?;
        if let (Some(iso), Some(region)) = (cell(&record, iso_idx), cell(&record, region_idx)) {
            regions.insert(iso.to_string(), region.to_string());
        }
    }

    tracing::debug!(entries = regions.len(), "Read region table");
    Ok(regions)
}

/// Read the population table (`world_population.csv`).
pub fn read_population<R: Read>(reader: R) -> DataResult<Vec<PopulationRow>> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = csv.headers()?.clone();

    let cca3_idx = require_column(&headers, COL_CCA3, "population")?;
    let capital_idx = require_column(&headers, COL_CAPITAL, "population")?;
    let area_idx = require_column(&headers, COL_AREA, "population")?;
    let share_idx = require_column(&headers, COL_WORLD_SHARE, "population")?;

    let year_columns: HashMap<i32, usize> = headers
        .iter()
        .enumerate()
        .filter_map(|(idx, header)| population_year(header).map(|year| (year, idx)))
        .collect();

    let mut snapshot_idx = [0usize; 8];
    for (slot, year) in POPULATION_YEARS.iter().enumerate() {
        snapshot_idx[slot] = *year_columns.get(year).ok_or_else(|| DataError::MissingColumn {
            table: "population",
            column: format!("{} Population", year),
        })?;
    }

    let mut rows = Vec::new();
    for (line, record) in csv.records().enumerate() {
        let record = record?;
        let line = line + 2;

        let cca3 = cell(&record, cca3_idx)
            .map(str::to_string)
            .ok_or_else(|| DataError::MalformedRow {
                table: "population",
                line,
                reason: "missing CCA3 code".to_string(),
            })?;

        let mut snapshots = [None; 8];
        for (slot, idx) in snapshot_idx.iter().enumerate() {
            snapshots[slot] = parse_number(&record, *idx, "population", line).map(|v| v as u64);
        }

        rows.push(PopulationRow {
            cca3,
            capital: cell(&record, capital_idx).map(str::to_string),
            snapshots,
            area_km2: parse_number(&record, area_idx, "population", line),
            world_share: parse_number(&record, share_idx, "population", line),
        });
    }

    tracing::debug!(rows = rows.len(), "Read population table");
    Ok(rows)
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

fn require_column(
    headers: &csv::StringRecord,
    name: &str,
    table: &'static str,
) -> DataResult<usize> {
    find_column(headers, name).ok_or_else(|| DataError::MissingColumn {
        table,
        column: name.to_string(),
    })
}

/// Trimmed, non-empty cell
fn cell(record: &csv::StringRecord, idx: usize) -> Option<&str> {
    record.get(idx).map(str::trim).filter(|s| !s.is_empty())
}

/// Numeric cell. Empty cells are missing values; unparsable ones are logged
/// and treated as missing.
fn parse_number(record: &csv::StringRecord, idx: usize, table: &str, line: usize) -> Option<f64> {
    let raw = cell(record, idx)?;
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            tracing::warn!(table, line, column = idx, value = %raw, "Ignoring non-numeric cell");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;

    #[test]
    fn test_read_indicators() {
        let table = read_indicators(fixtures::INDICATORS_CSV.as_bytes()).unwrap();

        assert_eq!(table.rows.len(), 6);
        let hdi = &table.series[&Indicator::Hdi];
        assert_eq!(hdi.years, vec![1990, 2000, 2021]);
        assert_eq!(hdi.labels[0], "Human Development Index (1990)");

        let brazil = &table.rows[0];
        assert_eq!(brazil.iso3, "BRA");
        assert_eq!(brazil.hdi_rank, Some(87));
        assert_eq!(brazil.series[&Indicator::Hdi], vec![Some(0.61), Some(0.685), Some(0.754)]);

        let tuvalu = table.rows.iter().find(|r| r.iso3 == "TUV").unwrap();
        assert_eq!(tuvalu.hdi_rank, None);
        assert_eq!(tuvalu.series[&Indicator::Hdi][0], None);
    }

    #[test]
    fn test_read_indicators_rejects_yearless_family_column() {
        let csv = "ISO3,Country,Human Development Index\nBRA,Brazil,0.754\n";
        let err = read_indicators(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::Year(_)));
    }

    #[test]
    fn test_read_indicators_missing_family() {
        let csv = "ISO3,Country,Human Development Index (2021)\nBRA,Brazil,0.754\n";
        let err = read_indicators(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn { table: "indicators", .. }));
    }

    #[test]
    fn test_read_regions() {
        let regions = read_regions(fixtures::REGIONS_CSV.as_bytes()).unwrap();
        assert_eq!(regions.get("BRA").map(String::as_str), Some("Americas"));
        assert!(!regions.contains_key("HKG"));
    }

    #[test]
    fn test_read_population() {
        let rows = read_population(fixtures::POPULATION_CSV.as_bytes()).unwrap();
        let brazil = rows.iter().find(|r| r.cca3 == "BRA").unwrap();

        assert_eq!(brazil.snapshots[0], Some(96_369_875));
        assert_eq!(brazil.snapshots[7], Some(215_313_498));
        assert_eq!(brazil.area_km2, Some(8_515_767.0));
        assert_eq!(brazil.capital.as_deref(), Some("Brasilia"));
    }

    #[test]
    fn test_read_population_missing_snapshot() {
        let csv = "CCA3,Capital,2022 Population,Area (km²),World Population Percentage\nBRA,Brasilia,1,2,3\n";
        let err = read_population(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn { table: "population", .. }));
    }
}
