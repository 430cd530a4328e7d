//! Capital-position consistency checks.
//!
//! Runs once after load and only reports; nothing here mutates the data.
//! A capital plotted outside its country's boundary is critical (the quiz
//! would mark a correct click wrong), a capital sitting on the country's
//! geometric center is a warning (usually a placeholder coordinate).

use std::collections::BTreeMap;

use foundation::diag::DiagnosticsLog;
use foundation::math::{GeoPoint, haversine_km};
use foundation::normalize_geo_name;

use crate::datasets::{CityRecord, CityType, CountryMetrics};
use crate::geojson::RegionFeature;
use crate::metrics::{MetricsIndex, alias_candidates, country_center};

/// Countries above this area whose capital coincides with the country
/// center are suspicious; small countries legitimately overlap.
const LARGE_COUNTRY_AREA_KM2: f64 = 500_000.0;
const CENTER_COINCIDENCE_KM: f64 = 25.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub kind: &'static str,
    pub city: String,
    pub country: String,
    pub detail: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub checked_capitals: usize,
    pub critical: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.critical.is_empty() && self.warnings.is_empty()
    }

    /// Summarize into the diagnostics log, capped at ten entries per
    /// severity so one bad dataset cannot flood the ring.
    pub fn log_summary(&self, diag: &mut DiagnosticsLog) {
        diag.emit(
            "validation",
            format!(
                "checked {} capitals: {} critical, {} warnings",
                self.checked_capitals,
                self.critical.len(),
                self.warnings.len()
            ),
        );
        for issue in self.critical.iter().take(10) {
            diag.emit(
                "validation_critical",
                format!("{} [{} / {}]: {}", issue.kind, issue.city, issue.country, issue.detail),
            );
        }
        for issue in self.warnings.iter().take(10) {
            diag.emit(
                "validation_warning",
                format!("{} [{} / {}]: {}", issue.kind, issue.city, issue.country, issue.detail),
            );
        }
    }
}

/// Boundary feature for a country name, trying every alias candidate
/// against normalized feature names.
pub fn resolve_world_country_feature<'a>(
    name: &str,
    features: &'a [RegionFeature],
) -> Option<&'a RegionFeature> {
    let candidates = alias_candidates(name);
    features.iter().find(|feature| {
        let feature_key = normalize_geo_name(&feature.name);
        candidates.iter().any(|c| *c == feature_key)
    })
}

/// Check every world capital against its country's boundary and center.
pub fn validate_capitals(
    cities: &[CityRecord],
    features: &[RegionFeature],
    metrics: &MetricsIndex,
    centers: &BTreeMap<String, GeoPoint>,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    for city in cities.iter().filter(|c| c.kind == CityType::Capital) {
        report.checked_capitals += 1;

        let Some(feature) = resolve_world_country_feature(&city.country, features) else {
            report.warnings.push(ValidationIssue {
                kind: "country_feature_missing",
                city: city.name.clone(),
                country: city.country.clone(),
                detail: "no boundary feature matches the country name".to_string(),
            });
            continue;
        };

        if !feature.contains(city.position) {
            report.critical.push(ValidationIssue {
                kind: "capital_outside_country",
                city: city.name.clone(),
                country: city.country.clone(),
                detail: format!(
                    "capital at ({:.4}, {:.4}) falls outside the country boundary",
                    city.position.lat, city.position.lon
                ),
            });
            continue;
        }

        if is_large_country(metrics.resolve(&city.country))
            && let Some(center) = country_center(&city.country, centers)
        {
            let dist = haversine_km(city.position, center);
            if dist.is_finite() && dist < CENTER_COINCIDENCE_KM {
                report.warnings.push(ValidationIssue {
                    kind: "capital_near_country_center_large_country",
                    city: city.name.clone(),
                    country: city.country.clone(),
                    detail: format!(
                        "capital sits {:.1} km from the country center; likely a placeholder",
                        dist
                    ),
                });
            }
        }
    }

    report
}

fn is_large_country(metrics: Option<&CountryMetrics>) -> bool {
    metrics
        .and_then(CountryMetrics::area_value)
        .is_some_and(|area| area > LARGE_COUNTRY_AREA_KM2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::MetricsFile;
    use crate::geojson::RegionSet;
    use pretty_assertions::assert_eq;

    fn square_country(name: &str) -> RegionSet {
        let payload = format!(
            r#"{{
                "type": "FeatureCollection",
                "features": [{{
                    "type": "Feature",
                    "properties": {{"name": "{name}"}},
                    "geometry": {{
                        "type": "Polygon",
                        "coordinates": [[[0,0],[20,0],[20,20],[0,20],[0,0]]]
                    }}
                }}]
            }}"#
        );
        RegionSet::from_geojson_str(&payload).expect("parse")
    }

    fn capital(name: &str, country: &str, lat: f64, lon: f64) -> CityRecord {
        CityRecord {
            name: name.to_string(),
            en_name: name.to_string(),
            position: GeoPoint::new(lat, lon),
            kind: CityType::Capital,
            province: String::new(),
            country: country.to_string(),
        }
    }

    fn large_country_metrics(name: &str) -> MetricsIndex {
        let payload = format!(
            r#"{{"countries": [{{"name": "{name}", "area": {{"value": 1000000}}}}]}}"#
        );
        MetricsIndex::build(serde_json::from_str::<MetricsFile>(&payload).expect("parse"))
    }

    #[test]
    fn capital_outside_boundary_is_critical() {
        let set = square_country("Boxland");
        let cities = vec![capital("Farville", "Boxland", 40.0, 40.0)];
        let report = validate_capitals(
            &cities,
            &set.features,
            &MetricsIndex::default(),
            &BTreeMap::new(),
        );
        assert_eq!(report.checked_capitals, 1);
        assert_eq!(report.critical.len(), 1);
        assert_eq!(report.critical[0].kind, "capital_outside_country");
    }

    #[test]
    fn missing_country_feature_is_a_warning() {
        let set = square_country("Boxland");
        let cities = vec![capital("Lost", "Atlantis", 5.0, 5.0)];
        let report = validate_capitals(
            &cities,
            &set.features,
            &MetricsIndex::default(),
            &BTreeMap::new(),
        );
        assert_eq!(report.critical.len(), 0);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].kind, "country_feature_missing");
    }

    #[test]
    fn centered_capital_in_large_country_warns() {
        let set = square_country("Boxland");
        let cities = vec![capital("Midtown", "Boxland", 10.0, 10.0)];
        let metrics = large_country_metrics("Boxland");
        let mut centers = BTreeMap::new();
        centers.insert("boxland".to_string(), GeoPoint::new(10.0, 10.0));

        let report = validate_capitals(&cities, &set.features, &metrics, &centers);
        assert!(report.critical.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(
            report.warnings[0].kind,
            "capital_near_country_center_large_country"
        );
    }

    #[test]
    fn small_country_centered_capital_is_clean() {
        let set = square_country("Boxland");
        let cities = vec![capital("Midtown", "Boxland", 10.0, 10.0)];
        let mut centers = BTreeMap::new();
        centers.insert("boxland".to_string(), GeoPoint::new(10.0, 10.0));

        let report = validate_capitals(
            &cities,
            &set.features,
            &MetricsIndex::default(),
            &centers,
        );
        assert!(report.is_clean());
    }

    #[test]
    fn feature_resolution_walks_aliases() {
        let set = square_country("Russian Federation");
        let feature = resolve_world_country_feature("Russia", &set.features).expect("feature");
        assert_eq!(feature.name, "Russian Federation");
        assert!(resolve_world_country_feature("Atlantis", &set.features).is_none());
    }

    #[test]
    fn report_summary_reaches_diagnostics() {
        let mut diag = DiagnosticsLog::new();
        let report = ValidationReport {
            checked_capitals: 2,
            critical: vec![ValidationIssue {
                kind: "capital_outside_country",
                city: "Farville".into(),
                country: "Boxland".into(),
                detail: "outside".into(),
            }],
            warnings: vec![],
        };
        report.log_summary(&mut diag);
        assert_eq!(diag.events().len(), 2);
        assert_eq!(diag.events()[0].kind, "validation");
        assert_eq!(diag.events()[1].kind, "validation_critical");
    }
}
