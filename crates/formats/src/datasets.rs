//! Wire shapes for the non-boundary datasets: city lists, country reference
//! metadata and country economic metrics. These mirror the JSON the data
//! pipeline produces; sanitized in-memory records live alongside them.

use foundation::math::GeoPoint;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Raw city row as shipped in `china-cities.json` / `world-cities.json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCity {
    pub name: Option<String>,
    #[serde(rename = "enName")]
    pub en_name: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CityType {
    Capital,
    Major,
    Secondary,
}

impl CityType {
    /// Anything unrecognized (or absent) counts as a capital; the world-city
    /// sanitizer then restricts to `capital`/`major`.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim).map(str::to_lowercase).as_deref() {
            Some("major") => CityType::Major,
            Some("secondary") => CityType::Secondary,
            _ => CityType::Capital,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CityType::Capital => "capital",
            CityType::Major => "major",
            CityType::Secondary => "secondary",
        }
    }
}

/// A sanitized city: finite coordinates, usable name, recognized type.
#[derive(Debug, Clone, PartialEq)]
pub struct CityRecord {
    pub name: String,
    pub en_name: String,
    pub position: GeoPoint,
    pub kind: CityType,
    pub province: String,
    pub country: String,
}

/// Country reference metadata (`world-countries-full.json` rows).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CountryMeta {
    pub name: CountryMetaName,
    pub cca2: String,
    pub latlng: Vec<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CountryMetaName {
    pub common: String,
    pub official: String,
}

/// `world-country-metrics.json`: per-country economics plus precomputed
/// composite scores, keyed three ways.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MetricsFile {
    pub countries: Vec<CountryMetrics>,
    #[serde(rename = "iso3Metrics")]
    pub iso3_metrics: BTreeMap<String, CountryMetrics>,
    #[serde(rename = "nameToIso3")]
    pub name_to_iso3: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct CountryMetrics {
    pub name: String,
    pub gdp: Option<MetricValue>,
    pub area: Option<MetricValue>,
    pub region: Option<String>,
    pub scores: Option<MetricScores>,
}

impl CountryMetrics {
    pub fn gdp_value(&self) -> Option<f64> {
        self.gdp.as_ref().and_then(|m| m.value).filter(|v| v.is_finite())
    }

    pub fn area_value(&self) -> Option<f64> {
        self.area.as_ref().and_then(|m| m.value).filter(|v| v.is_finite())
    }

    pub fn gdp_score(&self) -> Option<f64> {
        self.scores.as_ref().and_then(|s| s.gdp).filter(|v| v.is_finite())
    }

    pub fn combined_score(&self) -> Option<f64> {
        self.scores.as_ref().and_then(|s| s.combined).filter(|v| v.is_finite())
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct MetricValue {
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct MetricScores {
    pub gdp: Option<f64>,
    pub combined: Option<f64>,
}
