//! Country metrics join and bilingual labels.
//!
//! The boundary, city and metrics datasets disagree about country names
//! ("Russia" vs "Russian Federation"), so every lookup walks a fixed,
//! bidirectional alias table and finally falls back to ISO3-keyed metrics.

use std::collections::BTreeMap;

use foundation::math::GeoPoint;
use foundation::normalize_geo_name;

use crate::datasets::{CountryMeta, CountryMetrics, MetricsFile};

/// Normalized-name alias pairs. Queried both directions: an entry
/// `(a, b)` makes `b` a candidate for `a` and `a` a candidate for `b`.
pub const COUNTRY_NAME_ALIASES: [(&str, &str); 21] = [
    ("unitedstatesofamerica", "unitedstates"),
    ("unitedstates", "unitedstatesofamerica"),
    ("uae", "unitedarabemirates"),
    ("russia", "russianfederation"),
    ("syria", "syrianarabrepublic"),
    ("laos", "laopeoplesdemocraticrepublic"),
    ("bolivia", "boliviaplurinationalstateof"),
    ("moldova", "moldovarepublicof"),
    ("iran", "iranislamicrepublicof"),
    ("venezuela", "venezuelabolivarianrepublicof"),
    ("tanzania", "tanzaniaunitedrepublicof"),
    ("koreademrep", "koreademocraticpeoplesrepublicof"),
    ("northkorea", "koreademocraticpeoplesrepublicof"),
    ("southkorea", "korearepublicof"),
    ("republicofkorea", "korearepublicof"),
    ("czechia", "czechrepublic"),
    ("drcongo", "congothedemocraticrepublicofthe"),
    ("democraticrepublicofthecongo", "congothedemocraticrepublicofthe"),
    ("palestine", "stateofpalestine"),
    ("thebahamas", "bahamas"),
    ("macedonia", "northmacedonia"),
];

/// All normalized keys a country name may be filed under: the name itself,
/// its alias target, and every alias that targets it.
pub fn alias_candidates(name: &str) -> Vec<String> {
    let key = normalize_geo_name(name);
    if key.is_empty() {
        return Vec::new();
    }

    let mut out = vec![key.clone()];
    let mut push = |candidate: &str| {
        if !out.iter().any(|c| c == candidate) {
            out.push(candidate.to_string());
        }
    };
    for (from, to) in COUNTRY_NAME_ALIASES {
        if from == key {
            push(to);
        }
        if to == key {
            push(from);
        }
    }
    out
}

/// The three metrics lookup tables built from one `MetricsFile`.
#[derive(Debug, Clone, Default)]
pub struct MetricsIndex {
    by_name: BTreeMap<String, CountryMetrics>,
    by_iso3: BTreeMap<String, CountryMetrics>,
    name_to_iso3: BTreeMap<String, String>,
}

impl MetricsIndex {
    pub fn build(file: MetricsFile) -> Self {
        let mut by_name = BTreeMap::new();
        for metrics in file.countries {
            let key = normalize_geo_name(&metrics.name);
            if !key.is_empty() {
                by_name.insert(key, metrics);
            }
        }

        let by_iso3 = file
            .iso3_metrics
            .into_iter()
            .filter_map(|(iso3, metrics)| {
                let key = iso3.trim().to_uppercase();
                (!key.is_empty()).then_some((key, metrics))
            })
            .collect();

        let name_to_iso3 = file
            .name_to_iso3
            .into_iter()
            .filter_map(|(name, iso3)| {
                let key = normalize_geo_name(&name);
                let iso3 = iso3.trim().to_uppercase();
                (!key.is_empty() && !iso3.is_empty()).then_some((key, iso3))
            })
            .collect();

        Self {
            by_name,
            by_iso3,
            name_to_iso3,
        }
    }

    /// Name-keyed metrics first (across all alias candidates), then the
    /// ISO3 fallback for each candidate.
    pub fn resolve(&self, name: &str) -> Option<&CountryMetrics> {
        let candidates = alias_candidates(name);

        for candidate in &candidates {
            if let Some(metrics) = self.by_name.get(candidate) {
                return Some(metrics);
            }
        }

        for candidate in &candidates {
            if let Some(iso3) = self.name_to_iso3.get(candidate)
                && let Some(metrics) = self.by_iso3.get(iso3)
            {
                return Some(metrics);
            }
        }

        None
    }
}

/// An `{en, zh}` display pair for a country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryLabel {
    pub en: String,
    pub zh: String,
}

/// Bilingual country labels keyed by normalized common and official names.
///
/// `zh_names` maps 2-letter country codes to localized region names (the
/// embedding application supplies it from its locale data); countries
/// missing from it fall back to the English common name in both fields.
#[derive(Debug, Clone, Default)]
pub struct LabelCatalog {
    map: BTreeMap<String, CountryLabel>,
}

impl LabelCatalog {
    pub fn build(meta: &[CountryMeta], zh_names: &BTreeMap<String, String>) -> Self {
        let mut map = BTreeMap::new();
        for item in meta {
            let common = item.name.common.trim();
            let cca2 = item.cca2.trim().to_uppercase();
            if common.is_empty() || cca2.is_empty() {
                continue;
            }

            let zh = zh_names
                .get(&cca2)
                .cloned()
                .unwrap_or_else(|| common.to_string());
            let label = CountryLabel {
                en: common.to_string(),
                zh,
            };

            map.insert(normalize_geo_name(common), label.clone());
            let official = item.name.official.trim();
            if !official.is_empty() {
                map.insert(normalize_geo_name(official), label);
            }
        }
        Self { map }
    }

    /// Resolved label, or the raw English name in both fields.
    pub fn label_for(&self, name: &str) -> CountryLabel {
        let en_name = name.trim();
        if en_name.is_empty() {
            return CountryLabel {
                en: String::new(),
                zh: String::new(),
            };
        }

        let norm = normalize_geo_name(en_name);
        if let Some(label) = self.map.get(&norm) {
            return label.clone();
        }
        for (from, to) in COUNTRY_NAME_ALIASES {
            if from == norm
                && let Some(label) = self.map.get(to)
            {
                return label.clone();
            }
        }

        CountryLabel {
            en: en_name.to_string(),
            zh: en_name.to_string(),
        }
    }
}

/// Country center coordinates from reference metadata `latlng`, keyed by
/// normalized common and official names. Used by the validation pass only.
pub fn build_country_centers(meta: &[CountryMeta]) -> BTreeMap<String, GeoPoint> {
    let mut map = BTreeMap::new();
    for item in meta {
        let common = item.name.common.trim();
        if common.is_empty() || item.latlng.len() < 2 {
            continue;
        }
        let center = GeoPoint::new(item.latlng[0], item.latlng[1]);
        if !center.is_finite() {
            continue;
        }

        let common_key = normalize_geo_name(common);
        if !common_key.is_empty() {
            map.insert(common_key, center);
        }
        let official_key = normalize_geo_name(&item.name.official);
        if !official_key.is_empty() {
            map.insert(official_key, center);
        }
    }
    map
}

/// Center lookup across alias candidates.
pub fn country_center(name: &str, centers: &BTreeMap<String, GeoPoint>) -> Option<GeoPoint> {
    alias_candidates(name)
        .iter()
        .find_map(|candidate| centers.get(candidate).copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::{CountryMetaName, MetricValue};
    use pretty_assertions::assert_eq;

    fn sample_index() -> MetricsIndex {
        let file: MetricsFile = serde_json::from_str(
            r#"{
                "countries": [
                    {"name": "Russian Federation", "gdp": {"value": 1.8e12},
                     "region": "Europe", "scores": {"gdp": 0.7, "combined": 0.8}},
                    {"name": "France", "gdp": {"value": 2.7e12}, "region": "Europe"}
                ],
                "iso3Metrics": {
                    "KOR": {"name": "South Korea", "gdp": {"value": 1.7e12}, "region": "Asia"}
                },
                "nameToIso3": {"Korea, Republic of": "KOR"}
            }"#,
        )
        .expect("parse");
        MetricsIndex::build(file)
    }

    #[test]
    fn aliases_resolve_both_directions() {
        let candidates = alias_candidates("Russia");
        assert!(candidates.contains(&"russianfederation".to_string()));
        let reverse = alias_candidates("Russian Federation");
        assert!(reverse.contains(&"russia".to_string()));
    }

    #[test]
    fn resolve_walks_aliases_to_name_table() {
        let index = sample_index();
        let metrics = index.resolve("Russia").expect("metrics");
        assert_eq!(metrics.gdp, Some(MetricValue { value: Some(1.8e12) }));
    }

    #[test]
    fn resolve_falls_back_to_iso3() {
        let index = sample_index();
        let metrics = index.resolve("South Korea").expect("metrics");
        assert_eq!(metrics.region.as_deref(), Some("Asia"));
        assert!(index.resolve("Atlantis").is_none());
    }

    #[test]
    fn labels_prefer_localized_names_with_english_fallback() {
        let meta = vec![CountryMeta {
            name: CountryMetaName {
                common: "France".into(),
                official: "French Republic".into(),
            },
            cca2: "fr".into(),
            latlng: vec![46.0, 2.0],
        }];
        let mut zh = BTreeMap::new();
        zh.insert("FR".to_string(), "法国".to_string());
        let catalog = LabelCatalog::build(&meta, &zh);

        let label = catalog.label_for("French Republic");
        assert_eq!(label.en, "France");
        assert_eq!(label.zh, "法国");

        let missing = catalog.label_for("Atlantis");
        assert_eq!(missing.en, "Atlantis");
        assert_eq!(missing.zh, "Atlantis");
    }

    #[test]
    fn centers_resolve_through_aliases() {
        let meta = vec![CountryMeta {
            name: CountryMetaName {
                common: "Russian Federation".into(),
                official: String::new(),
            },
            cca2: "RU".into(),
            latlng: vec![60.0, 100.0],
        }];
        let centers = build_country_centers(&meta);
        let center = country_center("Russia", &centers).expect("center");
        assert_eq!(center, GeoPoint::new(60.0, 100.0));
    }
}
