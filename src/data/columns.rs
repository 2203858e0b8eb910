//! Column label conventions
//!
//! The source tables encode the year of record inside the column label, e.g.
//! `Human Development Index (1995)`. The label is the only year signal, so
//! extraction is strict: a label without a parenthesized year is an error.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

/// Year used for the detail cards, the map and the world charts.
pub const CARD_YEAR: i32 = 2021;

/// Population snapshot years, oldest first.
pub const POPULATION_YEARS: [i32; 8] = [1970, 1980, 1990, 2000, 2010, 2015, 2020, 2022];

/// Year of the most recent population snapshot.
pub const LATEST_POPULATION_YEAR: i32 = 2022;

pub const COL_ISO3: &str = "ISO3";
pub const COL_COUNTRY: &str = "Country";
pub const COL_DEVELOPMENT_GROUP: &str = "Human Development Groups";
pub const COL_HDI_RANK: &str = "HDI Rank (2021)";

pub const COL_REGION_ISO: &str = "ISO Code";
pub const COL_REGION_NAME: &str = "UN Region";

pub const COL_CCA3: &str = "CCA3";
pub const COL_CAPITAL: &str = "Capital";
pub const COL_AREA: &str = "Area (km²)";
pub const COL_WORLD_SHARE: &str = "World Population Percentage";

/// Failure to read a year out of a column label
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum YearParseError {
    /// No `(` in the label
    #[error("column '{0}' has no parenthesized year")]
    MissingParenthesis(String),

    /// Text between the parentheses is not an integer
    #[error("column '{label}' has an invalid year '{found}'")]
    InvalidYear { label: String, found: String },
}

/// Extract the year between the first `(` and the following `)`.
///
/// ```
/// use infomundo::data::extract_year;
///
/// assert_eq!(extract_year("Human Development Index (1995)").unwrap(), 1995);
/// assert!(extract_year("Human Development Index").is_err());
/// ```
pub fn extract_year(label: &str) -> Result<i32, YearParseError> {
    let (_, after) = label
        .split_once('(')
        .ok_or_else(|| YearParseError::MissingParenthesis(label.to_string()))?;
    let inner = after.split(')').next().unwrap_or(after).trim();

    inner.parse::<i32>().map_err(|_| YearParseError::InvalidYear {
        label: label.to_string(),
        found: inner.to_string(),
    })
}

/// Historical indicator families stored per year in the indicator table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    /// Human Development Index
    Hdi,
    /// Life expectancy at birth, in years
    LifeExpectancy,
    /// Gross national income per capita, in USD
    Income,
}

impl Indicator {
    pub const ALL: [Indicator; 3] = [Indicator::Hdi, Indicator::LifeExpectancy, Indicator::Income];

    /// Label prefix shared by every yearly column of this family
    pub fn column_prefix(&self) -> &'static str {
        match self {
            Indicator::Hdi => "Human Development Index",
            Indicator::LifeExpectancy => "Life Expectancy at Birth",
            Indicator::Income => "Gross National Income Per Capita",
        }
    }

    /// Column label for a given year
    pub fn column_for(&self, year: i32) -> String {
        format!("{} ({})", self.column_prefix(), year)
    }

    /// Whether a header belongs to this family
    pub fn matches(&self, header: &str) -> bool {
        header.starts_with(self.column_prefix())
    }
}

/// Match a population snapshot header like `2015 Population`.
pub fn population_year(header: &str) -> Option<i32> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<year>\d{4}) Population$").expect("population header pattern is valid")
    });

    pattern
        .captures(header.trim())
        .and_then(|caps| caps.name("year"))
        .and_then(|m| m.as_str().parse().ok())
}
