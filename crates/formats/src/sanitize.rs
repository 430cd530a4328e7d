//! Dataset sanitization: winding repair, boundary filtering, city cleanup.
//!
//! Everything here is tolerant: a bad row is dropped or repaired, never an
//! error. Load-time failures are reserved for structurally broken files
//! (see `geojson`).

use foundation::normalize_geo_name;

use crate::datasets::{CityRecord, CityType, RawCity};
use crate::geojson::RegionSet;
use foundation::math::{GeoPoint, HEMISPHERE_SR};

/// Features below this spherical area are map-rendering noise, not quiz
/// targets.
pub const WORLD_COUNTRY_MIN_AREA_SR: f64 = 0.0004;

/// Repair inverted ring winding: a feature reporting more than a hemisphere
/// was encoded clockwise-out and gets every ring reversed. Features already
/// under the threshold are untouched, so the pass is idempotent.
pub fn normalize_orientation(set: &mut RegionSet) {
    for feature in &mut set.features {
        if feature.area_sr() > HEMISPHERE_SR {
            feature.reverse_rings();
        }
    }
}

/// World boundary filter: drop unnamed features, the Taiwan variants this
/// dataset treats as non-selectable, and sub-threshold slivers.
pub fn sanitize_world_countries(set: &mut RegionSet) {
    set.features.retain(|feature| {
        let norm = normalize_geo_name(&feature.name);
        if norm.is_empty() || is_taiwan_name(&norm) {
            return false;
        }
        let area = feature.area_sr();
        area.is_finite() && area >= WORLD_COUNTRY_MIN_AREA_SR
    });
}

pub fn is_taiwan_name(norm: &str) -> bool {
    matches!(norm, "taiwan" | "taiwanprovinceofchina")
}

/// China city cleanup: finite coordinates, a usable name, `country` pinned.
pub fn sanitize_china_cities(list: Vec<RawCity>) -> Vec<CityRecord> {
    list.into_iter()
        .filter_map(|raw| {
            let position = finite_position(&raw)?;
            let name = raw
                .name
                .clone()
                .filter(|n| !n.is_empty())
                .or_else(|| raw.en_name.clone().filter(|n| !n.is_empty()))?;
            Some(CityRecord {
                name,
                en_name: raw.en_name.unwrap_or_default(),
                position,
                kind: CityType::parse(raw.kind.as_deref()),
                province: raw.province.unwrap_or_default(),
                country: "China".to_string(),
            })
        })
        .collect()
}

/// World city cleanup: finite coordinates, Taiwan-attributed rows dropped,
/// only `capital`/`major` kept.
pub fn sanitize_world_cities(list: Vec<RawCity>) -> Vec<CityRecord> {
    list.into_iter()
        .filter_map(|raw| {
            let position = finite_position(&raw)?;
            let country = raw.country.clone().filter(|c| !c.is_empty());
            let name = raw
                .name
                .clone()
                .filter(|n| !n.is_empty())
                .or_else(|| raw.en_name.clone().filter(|n| !n.is_empty()))
                .or_else(|| country.clone())
                .unwrap_or_else(|| "未知城市".to_string());
            Some(CityRecord {
                name,
                en_name: raw.en_name.unwrap_or_default(),
                position,
                kind: CityType::parse(raw.kind.as_deref()),
                province: raw.province.unwrap_or_default(),
                country: country.unwrap_or_else(|| "Unknown".to_string()),
            })
        })
        .filter(|city| !is_taiwan_name(&normalize_geo_name(&city.country)))
        .filter(|city| matches!(city.kind, CityType::Capital | CityType::Major))
        .collect()
}

fn finite_position(raw: &RawCity) -> Option<GeoPoint> {
    let lat = raw.lat.filter(|v| v.is_finite())?;
    let lon = raw.lon.filter(|v| v.is_finite())?;
    Some(GeoPoint::new(lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geojson::RegionSet;
    use pretty_assertions::assert_eq;

    fn clockwise_world() -> RegionSet {
        // Exterior wound clockwise: reads as the complement hemisphere.
        RegionSet::from_geojson_str(
            r#"{
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "properties": {"name": "Inverted"},
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[0,0],[0,10],[10,10],[10,0],[0,0]]]
                    }
                }]
            }"#,
        )
        .expect("parse")
    }

    #[test]
    fn orientation_repair_flips_inverted_features() {
        let mut set = clockwise_world();
        assert!(set.features[0].area_sr() > HEMISPHERE_SR);
        normalize_orientation(&mut set);
        assert!(set.features[0].area_sr() < HEMISPHERE_SR);
    }

    #[test]
    fn orientation_repair_is_idempotent() {
        let mut set = clockwise_world();
        normalize_orientation(&mut set);
        let once = set.clone();
        normalize_orientation(&mut set);
        assert_eq!(set, once);
    }

    #[test]
    fn world_filter_drops_unnamed_taiwan_and_slivers() {
        let mut set = RegionSet::from_geojson_str(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {"type": "Feature", "properties": {"name": "Bigland"},
                     "geometry": {"type": "Polygon",
                      "coordinates": [[[0,0],[10,0],[10,10],[0,10],[0,0]]]}},
                    {"type": "Feature", "properties": {"name": "Taiwan"},
                     "geometry": {"type": "Polygon",
                      "coordinates": [[[120,22],[122,22],[122,25],[120,25],[120,22]]]}},
                    {"type": "Feature", "properties": {},
                     "geometry": {"type": "Polygon",
                      "coordinates": [[[0,0],[10,0],[10,10],[0,10],[0,0]]]}},
                    {"type": "Feature", "properties": {"name": "Sliver"},
                     "geometry": {"type": "Polygon",
                      "coordinates": [[[0,0],[0.1,0],[0.1,0.1],[0,0.1],[0,0]]]}}
                ]
            }"#,
        )
        .expect("parse");

        sanitize_world_countries(&mut set);
        let names: Vec<&str> = set.features.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Bigland"]);
    }

    #[test]
    fn china_cities_require_finite_coords_and_a_name() {
        let rows = vec![
            RawCity {
                name: Some("石家庄市".into()),
                lat: Some(38.04),
                lon: Some(114.51),
                province: Some("河北省".into()),
                ..Default::default()
            },
            RawCity {
                name: Some("No coords".into()),
                ..Default::default()
            },
            RawCity {
                lat: Some(30.0),
                lon: Some(110.0),
                ..Default::default()
            },
        ];
        let cities = sanitize_china_cities(rows);
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].country, "China");
        assert_eq!(cities[0].kind, CityType::Capital);
    }

    #[test]
    fn world_cities_restrict_type_and_drop_taiwan_rows() {
        let rows = vec![
            RawCity {
                name: Some("Paris".into()),
                lat: Some(48.85),
                lon: Some(2.35),
                kind: Some("capital".into()),
                country: Some("France".into()),
                ..Default::default()
            },
            RawCity {
                name: Some("Lyon".into()),
                lat: Some(45.76),
                lon: Some(4.84),
                kind: Some("secondary".into()),
                country: Some("France".into()),
                ..Default::default()
            },
            RawCity {
                name: Some("Taipei".into()),
                lat: Some(25.03),
                lon: Some(121.57),
                kind: Some("capital".into()),
                country: Some("Taiwan".into()),
                ..Default::default()
            },
        ];
        let cities = sanitize_world_cities(rows);
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].name, "Paris");
    }
}
