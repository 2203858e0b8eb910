//! Country Registry
//!
//! Lookups between country name, ISO3 code and the two-letter flag code.
//! Names and ISO3 codes come from the indicator store; flag codes come from
//! the GeoJSON feature properties.

use std::collections::{HashMap, HashSet};

use geojson::{feature::Id, Feature, FeatureCollection, JsonValue};

use super::store::IndicatorStore;

/// Features whose `iso_a3` is unusable and must use `iso_a3_eh` instead.
const ISO3_EH_EXCEPTIONS: [&str; 5] = ["MDV", "MUS", "NOR", "FRA", "SYC"];

/// Features whose flag code comes from `postal`.
const POSTAL_FLAG_EXCEPTIONS: [&str; 3] = ["N. Cyprus", "Siachen Glacier", "Somaliland"];

/// Marker used by Natural Earth for missing codes.
const MISSING_CODE: &str = "-99";

/// Name ↔ ISO3 ↔ flag code lookups
#[derive(Debug, Clone, Default)]
pub struct CountryRegistry {
    name_to_iso3: HashMap<String, String>,
    iso3_to_name: HashMap<String, String>,
    iso3_to_flag: HashMap<String, String>,
    feature_ids: HashSet<String>,
    feature_count: usize,
}

impl CountryRegistry {
    /// Build from the store and the prepared features.
    ///
    /// The features must already carry their ISO3 `id` and `sigla` property
    /// (see [`prepare_features`]).
    pub fn build(store: &IndicatorStore, features: &FeatureCollection) -> Self {
        let mut registry = Self::default();

        for record in store.iter() {
            registry
                .name_to_iso3
                .entry(record.name.clone())
                .or_insert_with(|| record.iso3.clone());
            registry
                .iso3_to_name
                .insert(record.iso3.clone(), record.name.clone());
        }

        registry.feature_count = features.features.len();
        for feature in &features.features {
            let iso3 = match &feature.id {
                Some(Id::String(id)) => id,
                _ => continue,
            };
            registry.feature_ids.insert(iso3.clone());
            if let Some(code) = feature.property("sigla").and_then(JsonValue::as_str) {
                registry
                    .iso3_to_flag
                    .entry(iso3.clone())
                    .or_insert_with(|| code.to_string());
            }
        }

        let unmapped = registry
            .iso3_to_name
            .keys()
            .filter(|iso3| !registry.has_feature(iso3))
            .count();
        if unmapped > 0 {
            tracing::info!(countries = unmapped, "Countries without a map feature");
        }

        registry
    }

    pub fn iso3_for_name(&self, name: &str) -> Option<&str> {
        self.name_to_iso3.get(name).map(String::as_str)
    }

    pub fn name_for_iso3(&self, iso3: &str) -> Option<&str> {
        self.iso3_to_name.get(iso3).map(String::as_str)
    }

    /// Lowercase two-letter flag code, when the map has a feature for it
    pub fn flag_code(&self, iso3: &str) -> Option<&str> {
        self.iso3_to_flag.get(iso3).map(String::as_str)
    }

    /// Whether the map has a polygon feature for this ISO3
    pub fn has_feature(&self, iso3: &str) -> bool {
        self.feature_ids.contains(iso3)
    }

    /// Number of features in the map, matched or not
    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    /// Number of countries known to the store
    pub fn len(&self) -> usize {
        self.iso3_to_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.iso3_to_name.is_empty()
    }
}

/// Assign each feature its ISO3 `id` and a lowercase `sigla` flag code.
pub fn prepare_features(collection: &mut FeatureCollection) {
    for feature in collection.features.iter_mut() {
        if let Some(iso3) = feature_iso3(feature) {
            feature.id = Some(Id::String(iso3));
        }
        if let Some(code) = feature_flag_code(feature) {
            feature.set_property("sigla", code);
        }
    }
}

fn string_property<'a>(feature: &'a Feature, key: &str) -> Option<&'a str> {
    feature.property(key).and_then(JsonValue::as_str)
}

/// `iso_a3`, replaced by `iso_a3_eh` for the known exceptions.
fn feature_iso3(feature: &Feature) -> Option<String> {
    let iso_a3 = string_property(feature, "iso_a3");
    let iso_a3_eh = string_property(feature, "iso_a3_eh");

    match iso_a3_eh {
        Some(eh) if ISO3_EH_EXCEPTIONS.contains(&eh) => Some(eh.to_string()),
        _ => iso_a3.map(str::to_string),
    }
}

/// `iso_a2`; `iso_a2_eh` when missing; `postal` for the named exceptions.
fn feature_flag_code(feature: &Feature) -> Option<String> {
    let mut code = string_property(feature, "iso_a2")?;
    if code == MISSING_CODE {
        code = string_property(feature, "iso_a2_eh").unwrap_or(MISSING_CODE);
        let name = string_property(feature, "name").unwrap_or_default();
        if POSTAL_FLAG_EXCEPTIONS.contains(&name) {
            code = string_property(feature, "postal").unwrap_or(code);
        }
    }
    Some(code.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;

    fn features() -> FeatureCollection {
        let mut collection: FeatureCollection = serde_json::from_str(fixtures::GEOJSON).unwrap();
        prepare_features(&mut collection);
        collection
    }

    fn feature_named<'a>(collection: &'a FeatureCollection, name: &str) -> &'a Feature {
        collection
            .features
            .iter()
            .find(|f| string_property(f, "name") == Some(name))
            .unwrap()
    }

    #[test]
    fn test_ids_use_iso3_exceptions() {
        let collection = features();
        let norway = feature_named(&collection, "Norway");
        assert_eq!(norway.id, Some(Id::String("NOR".to_string())));

        let brazil = feature_named(&collection, "Brazil");
        assert_eq!(brazil.id, Some(Id::String("BRA".to_string())));
    }

    #[test]
    fn test_flag_code_rules() {
        let collection = features();
        let sigla = |name: &str| {
            string_property(feature_named(&collection, name), "sigla").map(str::to_string)
        };

        assert_eq!(sigla("Brazil").as_deref(), Some("br"));
        assert_eq!(sigla("Norway").as_deref(), Some("no"));
        assert_eq!(sigla("N. Cyprus").as_deref(), Some("cn"));
    }

    #[test]
    fn test_registry_lookups() {
        let store = fixtures::store();
        let registry = CountryRegistry::build(&store, &features());

        assert_eq!(registry.len(), 6);
        assert_eq!(registry.iso3_for_name("Brazil"), Some("BRA"));
        assert_eq!(registry.name_for_iso3("NOR"), Some("Norway"));
        assert_eq!(registry.flag_code("BRA"), Some("br"));
        assert_eq!(registry.flag_code("TUV"), None);
        assert_eq!(registry.name_for_iso3("ATA"), None);
    }

    #[test]
    fn test_feature_coverage() {
        let store = fixtures::store();
        let registry = CountryRegistry::build(&store, &features());

        assert_eq!(registry.feature_count(), 7);
        assert!(registry.has_feature("BRA"));
        assert!(registry.has_feature("NOR"));
        assert!(registry.has_feature("ATA"));
        // Tuvalu is in the store but has no polygon
        assert!(!registry.has_feature("TUV"));
    }

    #[test]
    fn test_every_store_row_resolves() {
        let store = fixtures::store();
        let registry = CountryRegistry::build(&store, &features());

        for record in store.iter() {
            assert_eq!(registry.iso3_for_name(&record.name), Some(record.iso3.as_str()));
        }
    }
}
