//! GeoJSON boundary ingestion.
//!
//! Only polygonal features become quiz regions; anything else in the file
//! (label points, debug lines) is skipped rather than rejected. Display
//! names resolve from the first non-empty of several property keys because
//! the boundary datasets disagree about where the name lives.

use foundation::math::{
    GeoPoint, multipolygon_area_sr, multipolygon_centroid, multipolygon_contains,
};
use serde_json::{Map, Value};

const NAME_PROPERTY_KEYS: [&str; 6] = ["name", "NAME", "NAME_ZH", "admin", "sovereignt", "cn_name"];

/// A named polygonal region. Geometry is stored multipolygon-shaped even
/// for single polygons: polygons → rings → vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionFeature {
    pub name: String,
    pub properties: Map<String, Value>,
    pub polygons: Vec<Vec<Vec<GeoPoint>>>,
}

impl RegionFeature {
    pub fn area_sr(&self) -> f64 {
        multipolygon_area_sr(&self.polygons)
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        multipolygon_contains(&self.polygons, point)
    }

    /// Quiz-target position: the precomputed `center` property when present,
    /// else a geometric centroid.
    pub fn center(&self) -> Option<GeoPoint> {
        if let Some(center) = property_center(&self.properties)
            && center.is_finite()
        {
            return Some(center);
        }
        multipolygon_centroid(&self.polygons).filter(|c| c.is_finite())
    }

    /// Reverse the vertex order of every ring. Used to repair inverted
    /// winding; applying it twice restores the original.
    pub fn reverse_rings(&mut self) {
        for rings in &mut self.polygons {
            for ring in rings {
                ring.reverse();
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionSet {
    pub features: Vec<RegionFeature>,
}

impl RegionSet {
    pub fn from_geojson_str(payload: &str) -> Result<Self, RegionSetError> {
        let value: Value =
            serde_json::from_str(payload).map_err(|e| RegionSetError::InvalidFeature {
                index: 0,
                reason: format!("JSON parse error: {e}"),
            })?;
        Self::from_geojson_value(&value)
    }

    pub fn from_geojson_value(value: &Value) -> Result<Self, RegionSetError> {
        let obj = value
            .as_object()
            .ok_or(RegionSetError::NotAFeatureCollection)?;
        let ty = obj
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or(RegionSetError::NotAFeatureCollection)?;
        if ty != "FeatureCollection" {
            return Err(RegionSetError::NotAFeatureCollection);
        }

        let features_val = obj
            .get("features")
            .and_then(|v| v.as_array())
            .ok_or(RegionSetError::NotAFeatureCollection)?;

        let mut features = Vec::with_capacity(features_val.len());
        for (index, feat_val) in features_val.iter().enumerate() {
            let feat_obj = feat_val.as_object().ok_or(RegionSetError::InvalidFeature {
                index,
                reason: "feature must be an object".to_string(),
            })?;

            let properties = feat_obj
                .get("properties")
                .and_then(|v| v.as_object())
                .cloned()
                .unwrap_or_default();

            let Some(geometry_val) = feat_obj.get("geometry").and_then(|v| v.as_object()) else {
                continue;
            };
            let Some(polygons) = parse_polygonal(geometry_val)
                .map_err(|reason| RegionSetError::InvalidFeature { index, reason })?
            else {
                continue;
            };

            features.push(RegionFeature {
                name: resolve_feature_name(&properties),
                properties,
                polygons,
            });
        }

        Ok(Self { features })
    }
}

#[derive(Debug)]
pub enum RegionSetError {
    NotAFeatureCollection,
    InvalidFeature { index: usize, reason: String },
}

impl std::fmt::Display for RegionSetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegionSetError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            RegionSetError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for RegionSetError {}

/// First non-empty name across the known property keys; empty string when
/// nothing resolves (such features are dropped by the sanitizer).
pub fn resolve_feature_name(properties: &Map<String, Value>) -> String {
    for key in NAME_PROPERTY_KEYS {
        if let Some(name) = properties.get(key).and_then(|v| v.as_str())
            && !name.trim().is_empty()
        {
            return name.to_string();
        }
    }
    String::new()
}

/// Linear scan for the first feature spherically containing the point.
/// Malformed geometry counts as non-containment, never an error.
pub fn find_feature_by_point(lon: f64, lat: f64, features: &[RegionFeature]) -> Option<&RegionFeature> {
    let point = GeoPoint::new(lat, lon);
    features.iter().find(|f| f.contains(point))
}

fn property_center(properties: &Map<String, Value>) -> Option<GeoPoint> {
    let arr = properties.get("center")?.as_array()?;
    if arr.len() < 2 {
        return None;
    }
    let lon = arr[0].as_f64()?;
    let lat = arr[1].as_f64()?;
    Some(GeoPoint::new(lat, lon))
}

// Ok(None) for non-polygonal geometry; Err only for structurally broken
// polygon coordinates.
fn parse_polygonal(geometry: &Map<String, Value>) -> Result<Option<Vec<Vec<Vec<GeoPoint>>>>, String> {
    let ty = geometry
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or_else(|| "geometry missing type".to_string())?;
    let coords = geometry
        .get("coordinates")
        .ok_or_else(|| "geometry missing coordinates".to_string())?;

    match ty {
        "Polygon" => Ok(Some(vec![parse_rings(coords)?])),
        "MultiPolygon" => {
            let polys = coords
                .as_array()
                .ok_or_else(|| "MultiPolygon coordinates must be an array".to_string())?;
            let mut out = Vec::with_capacity(polys.len());
            for poly in polys {
                out.push(parse_rings(poly)?);
            }
            Ok(Some(out))
        }
        _ => Ok(None),
    }
}

fn parse_rings(value: &Value) -> Result<Vec<Vec<GeoPoint>>, String> {
    let rings = value
        .as_array()
        .ok_or_else(|| "Polygon coordinates must be an array of rings".to_string())?;
    let mut out = Vec::with_capacity(rings.len());
    for ring in rings {
        let points = ring
            .as_array()
            .ok_or_else(|| "ring must be an array of positions".to_string())?;
        let mut ring_out = Vec::with_capacity(points.len());
        for pos in points {
            let pair = pos
                .as_array()
                .ok_or_else(|| "position must be an array".to_string())?;
            if pair.len() < 2 {
                return Err("position needs lon and lat".to_string());
            }
            let lon = pair[0].as_f64().ok_or_else(|| "lon must be a number".to_string())?;
            let lat = pair[1].as_f64().ok_or_else(|| "lat must be a number".to_string())?;
            ring_out.push(GeoPoint::new(lat, lon));
        }
        out.push(ring_out);
    }
    Ok(out)
}
