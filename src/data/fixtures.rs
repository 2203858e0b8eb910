//! Small datasets shared by the unit tests.

use std::path::Path;

use super::{DataSources, Dataset, IndicatorStore};
use crate::config::AssetConfig;

pub const INDICATORS_CSV: &str = "\
ISO3,Country,Human Development Groups,UNDP Developing Regions,HDI Rank (2021),Human Development Index (1990),Human Development Index (2000),Human Development Index (2021),Life Expectancy at Birth (1990),Life Expectancy at Birth (2000),Life Expectancy at Birth (2021),Gross National Income Per Capita (1990),Gross National Income Per Capita (2000),Gross National Income Per Capita (2021)
BRA,Brazil,High,LAC,87,0.61,0.685,0.754,66.3,70.1,72.8,10800.5,11500.2,14370.42
ARG,Argentina,Very High,LAC,47,0.723,0.77,0.842,71.8,73.9,75.4,15000,17000,20925.27
CHL,Chile,Very High,LAC,42,0.706,0.761,0.855,73.3,76.8,78.9,9000,15000,24562.7
NOR,Norway,Very High,,2,0.838,0.913,0.961,76.6,78.8,83.2,45000,60000,64660.1
HKG,Hong Kong,Very High,,4,0.781,0.837,0.952,77.4,80.9,85.5,35000,45000,62606.8
TUV,Tuvalu,Medium,EAP,,,,0.641,63,64.1,64.5,,5000,6209.83
";

pub const REGIONS_CSV: &str = "\
ISO Code,UN Region
BRA,Americas
ARG,Americas
CHL,Americas
NOR,Europe
TUV,Oceania
";

pub const POPULATION_CSV: &str = "\
Rank,CCA3,Country/Territory,Capital,Continent,2022 Population,2020 Population,2015 Population,2010 Population,2000 Population,1990 Population,1980 Population,1970 Population,Area (km²),Density (per km²),Growth Rate,World Population Percentage
7,BRA,Brazil,Brasilia,South America,215313498,213196304,205188205,196353492,175873720,150706446,122288383,96369875,8515767,25.2841,1.0046,2.7
33,ARG,Argentina,Buenos Aires,South America,45510318,45036032,43257065,41100123,37070774,32637657,28024803,23842803,2780400,16.3683,1.0052,0.57
64,CHL,Chile,Santiago,South America,19603733,19300315,17870124,17004162,15351799,13342868,11469828,9820481,756102,25.9273,1.0044,0.25
118,NOR,Norway,Oslo,Europe,5434319,5379839,5190356,4889741,4491202,4241636,4085776,3875546,323802,16.7828,1.0069,0.07
104,HKG,Hong Kong,Hong Kong,Asia,7488865,7500958,7399838,7132438,6731195,5838574,5054351,3955072,1104,6783.3922,0.9992,0.09
225,TUV,Tuvalu,Funafuti,Oceania,11312,11069,10877,10550,9638,9182,8305,6602,26,435.0769,1.0098,0
";

pub const GEOJSON: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {"type": "Feature", "properties": {"name": "Brazil", "iso_a3": "BRA", "iso_a3_eh": "BRA", "iso_a2": "BR", "iso_a2_eh": "BR", "postal": "BR"},
     "geometry": {"type": "Polygon", "coordinates": [[[-60.0, -5.0], [-40.0, -5.0], [-40.0, -20.0], [-60.0, -5.0]]]}},
    {"type": "Feature", "properties": {"name": "Argentina", "iso_a3": "ARG", "iso_a3_eh": "ARG", "iso_a2": "AR", "iso_a2_eh": "AR", "postal": "AR"}, "geometry": null},
    {"type": "Feature", "properties": {"name": "Chile", "iso_a3": "CHL", "iso_a3_eh": "CHL", "iso_a2": "CL", "iso_a2_eh": "CL", "postal": "CL"}, "geometry": null},
    {"type": "Feature", "properties": {"name": "Norway", "iso_a3": "-99", "iso_a3_eh": "NOR", "iso_a2": "-99", "iso_a2_eh": "NO", "postal": "N"}, "geometry": null},
    {"type": "Feature", "properties": {"name": "Hong Kong", "iso_a3": "HKG", "iso_a3_eh": "HKG", "iso_a2": "HK", "iso_a2_eh": "HK", "postal": "HK"}, "geometry": null},
    {"type": "Feature", "properties": {"name": "N. Cyprus", "iso_a3": "-99", "iso_a3_eh": "-99", "iso_a2": "-99", "iso_a2_eh": "-99", "postal": "CN"}, "geometry": null},
    {"type": "Feature", "properties": {"name": "Antarctica", "iso_a3": "ATA", "iso_a3_eh": "ATA", "iso_a2": "AQ", "iso_a2_eh": "AQ", "postal": "AQ"}, "geometry": null}
  ]
}"#;

pub fn sources() -> DataSources<'static> {
    DataSources {
        indicators: INDICATORS_CSV,
        regions: REGIONS_CSV,
        population: POPULATION_CSV,
        geojson: GEOJSON,
    }
}

pub fn dataset() -> Dataset {
    Dataset::from_sources(sources(), &AssetConfig::default()).unwrap()
}

pub fn store() -> IndicatorStore {
    dataset().store
}

/// Write the fixture files under their default names.
pub fn write_data_dir(dir: &Path) {
    std::fs::write(dir.join("hdi_info.csv"), INDICATORS_CSV).unwrap();
    std::fs::write(dir.join("regioes.csv"), REGIONS_CSV).unwrap();
    std::fs::write(dir.join("world_population.csv"), POPULATION_CSV).unwrap();
    std::fs::write(dir.join("custom.geo.json"), GEOJSON).unwrap();
}
