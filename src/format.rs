//! Display Formatting
//!
//! Text renderings used by the detail cards. These strings are shown verbatim
//! by the display layer, so every rule here is exact:
//!
//! - large integers use `.` as the thousands separator (`215.313.498`)
//! - currency is `$` + comma-grouped value with two decimals + ` USD`
//! - life expectancy is truncated, never rounded (`72 anos`)
//! - areas below 1000 km² keep the historical `0.<value> km²` rendering
//! - percentages carry two decimals and a `%` suffix

use num_format::{Locale, ToFormattedString};

/// World land + water surface, shown on the World card.
pub const WORLD_AREA_KM2: f64 = 510_100_000.0;

/// Group an integer with `.` separators: `1234567` → `1.234.567`.
pub fn group_thousands(value: u64) -> String {
    value.to_formatted_string(&Locale::en).replace(',', ".")
}

/// Population count for the cards.
pub fn format_population(value: u64) -> String {
    group_thousands(value)
}

/// Share of the world population: `2.70%`.
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Per-capita income: `$14,370.42 USD`.
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let whole = whole
        .parse::<u64>()
        .map(|w| w.to_formatted_string(&Locale::en))
        .unwrap_or_else(|_| whole.to_string());
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{} USD", sign, whole, cents)
}

/// Life expectancy in whole years: `72.8` → `72 anos`.
pub fn format_life_expectancy(value: f64) -> String {
    format!("{} anos", value.trunc() as i64)
}

/// HDI value as stored: `0.754`.
pub fn format_hdi(value: f64) -> String {
    format!("{}", value)
}

/// Country area.
///
/// Values under 1000 render as `0.<value> km²` without dividing, so `900`
/// becomes `0.900 km²` and `26` becomes `0.26 km²`. Larger values are grouped
/// with `.` separators: `510100000` → `510.100.000 km²`.
pub fn format_area(value: f64) -> String {
    if value < 1000.0 {
        return format!("0.{} km²", plain_number(value));
    }

    let whole = group_thousands(value.trunc() as u64);
    let fraction = value.fract();
    if fraction == 0.0 {
        format!("{} km²", whole)
    } else {
        // Keep the shortest decimal digits of the fractional part.
        let digits = format!("{}", value);
        let decimals = digits.split_once('.').map(|(_, d)| d).unwrap_or("");
        format!("{}.{} km²", whole, decimals)
    }
}

/// Integral values print without a decimal point, the rest as-is.
fn plain_number(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1.000");
        assert_eq!(group_thousands(215_313_498), "215.313.498");
    }

    #[test]
    fn test_area_large_value() {
        let area = format_area(WORLD_AREA_KM2);
        assert_eq!(area, "510.100.000 km²");
        assert!(area.ends_with("km²"));
    }

    #[test]
    fn test_area_small_value_keeps_quirk() {
        assert_eq!(format_area(900.0), "0.900 km²");
        assert_eq!(format_area(26.0), "0.26 km²");
        assert_eq!(format_area(0.44), "0.0.44 km²");
    }

    #[test]
    fn test_area_boundary() {
        assert_eq!(format_area(1000.0), "1.000 km²");
        assert_eq!(format_area(1234.5), "1.234.5 km²");
    }

    #[test]
    fn test_currency() {
        assert_eq!(format_currency(14370.42), "$14,370.42 USD");
        assert_eq!(format_currency(732.1), "$732.10 USD");
        assert_eq!(format_currency(0.0), "$0.00 USD");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00 USD");
    }

    #[test]
    fn test_life_expectancy_truncates() {
        assert_eq!(format_life_expectancy(72.8), "72 anos");
        assert_eq!(format_life_expectancy(72.0), "72 anos");
        assert_eq!(format_life_expectancy(76.99), "76 anos");
    }

    #[test]
    fn test_percentage() {
        assert_eq!(format_percentage(2.7), "2.70%");
        assert_eq!(format_percentage(0.0), "0.00%");
        assert_eq!(format_percentage(17.88), "17.88%");
    }

    #[test]
    fn test_hdi() {
        assert_eq!(format_hdi(0.754), "0.754");
    }
}
