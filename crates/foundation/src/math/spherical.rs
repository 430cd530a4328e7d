//! Spherical measures over lon/lat rings.
//!
//! Rings follow the GeoJSON convention: a closed sequence of vertices in
//! degrees, exterior rings wound counter-clockwise. Area uses the
//! Chamberlain-Duquette spherical excess sum; a ring whose signed excess is
//! negative is read as the complement hemisphere (`4π + signed`), which is
//! how inverted winding is detected upstream.

use super::GeoPoint;

/// Full sphere solid angle (steradians).
pub const SPHERE_AREA_SR: f64 = 4.0 * std::f64::consts::PI;

/// Hemisphere threshold: any region reporting more than this was wound
/// backwards and must have its rings reversed.
pub const HEMISPHERE_SR: f64 = 2.0 * std::f64::consts::PI;

/// Signed spherical excess of a ring, positive for counter-clockwise winding.
///
/// Malformed rings (fewer than 3 vertices, non-finite vertices) report `0`.
pub fn signed_ring_area_sr(ring: &[GeoPoint]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    let mut prev = ring[ring.len() - 1];
    for &cur in ring {
        if !prev.is_finite() || !cur.is_finite() {
            return 0.0;
        }
        let d_lon = wrap_degrees(cur.lon - prev.lon).to_radians();
        sum += d_lon * (2.0 + prev.lat.to_radians().sin() + cur.lat.to_radians().sin());
        prev = cur;
    }

    -sum / 2.0
}

/// Ring area under the winding convention: clockwise exterior rings report
/// the complement hemisphere, pushing the value above `2π`.
pub fn ring_area_sr(ring: &[GeoPoint]) -> f64 {
    let signed = signed_ring_area_sr(ring);
    if signed < 0.0 { signed + SPHERE_AREA_SR } else { signed }
}

/// Polygon area: signed sum over all rings (holes subtract), complemented
/// once at the polygon level when the net winding is inverted.
pub fn polygon_area_sr(rings: &[Vec<GeoPoint>]) -> f64 {
    let signed: f64 = rings.iter().map(|ring| signed_ring_area_sr(ring)).sum();
    if signed < 0.0 { signed + SPHERE_AREA_SR } else { signed }
}

/// Multipolygon area: sum of polygon areas.
pub fn multipolygon_area_sr(polygons: &[Vec<Vec<GeoPoint>>]) -> f64 {
    polygons.iter().map(|rings| polygon_area_sr(rings)).sum()
}

/// Even-odd containment test for a single ring.
///
/// The ring's longitudes are unwrapped into one continuous band (each
/// vertex shifted by a multiple of 360 to sit within 180 degrees of its
/// predecessor), the query longitude is shifted into the same band, and a
/// plain planar eastward ray cast runs in that frame. Rings crossing the
/// antimeridian resolve correctly, and a query on the far side of the
/// globe sees an even crossing count. A malformed ring never contains
/// anything.
pub fn ring_contains(ring: &[GeoPoint], point: GeoPoint) -> bool {
    if ring.len() < 3 || !point.is_finite() {
        return false;
    }
    if ring.iter().any(|p| !p.is_finite()) {
        return false;
    }

    let mut lons = Vec::with_capacity(ring.len());
    let mut unwrapped = ring[0].lon;
    lons.push(unwrapped);
    for p in &ring[1..] {
        unwrapped += wrap_degrees(p.lon - unwrapped);
        lons.push(unwrapped);
    }

    let min = lons.iter().copied().fold(f64::INFINITY, f64::min);
    let max = lons.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mid = (min + max) / 2.0;
    let query_lon = point.lon + 360.0 * ((mid - point.lon) / 360.0).round();

    let crosses = |a: GeoPoint, a_lon: f64, b: GeoPoint, b_lon: f64| -> bool {
        if (a.lat > point.lat) == (b.lat > point.lat) {
            return false;
        }
        let t = (point.lat - a.lat) / (b.lat - a.lat);
        a_lon + t * (b_lon - a_lon) > query_lon
    };

    let n = ring.len();
    let mut inside = false;
    for i in 1..n {
        if crosses(ring[i - 1], lons[i - 1], ring[i], lons[i]) {
            inside = !inside;
        }
    }
    // Closing edge; degenerate when the ring already repeats its first
    // vertex, in which case the latitude test rejects it.
    let closing_lon = lons[n - 1] + wrap_degrees(ring[0].lon - lons[n - 1]);
    if crosses(ring[n - 1], lons[n - 1], ring[0], closing_lon) {
        inside = !inside;
    }
    inside
}

/// A polygon contains a point iff its exterior ring does and no hole does.
pub fn polygon_contains(rings: &[Vec<GeoPoint>], point: GeoPoint) -> bool {
    let Some(exterior) = rings.first() else {
        return false;
    };
    if !ring_contains(exterior, point) {
        return false;
    }
    !rings[1..].iter().any(|hole| ring_contains(hole, point))
}

pub fn multipolygon_contains(polygons: &[Vec<Vec<GeoPoint>>], point: GeoPoint) -> bool {
    polygons.iter().any(|rings| polygon_contains(rings, point))
}

/// Vertex-mean centroid of the largest exterior ring.
///
/// An approximation that only serves features without a precomputed
/// `center` property; the quiz datasets carry one for every target.
pub fn multipolygon_centroid(polygons: &[Vec<Vec<GeoPoint>>]) -> Option<GeoPoint> {
    let largest = polygons
        .iter()
        .filter_map(|rings| rings.first())
        .max_by(|a, b| {
            signed_ring_area_sr(a)
                .abs()
                .total_cmp(&signed_ring_area_sr(b).abs())
        })?;
    ring_vertex_mean(largest)
}

fn ring_vertex_mean(ring: &[GeoPoint]) -> Option<GeoPoint> {
    // Ignore the closing duplicate vertex so it does not double-weight.
    let open = match ring {
        [rest @ .., last] if rest.first() == Some(last) => rest,
        other => other,
    };
    if open.is_empty() {
        return None;
    }

    let mut lat = 0.0;
    let mut lon = 0.0;
    for p in open {
        if !p.is_finite() {
            return None;
        }
        lat += p.lat;
        lon += p.lon;
    }
    let n = open.len() as f64;
    Some(GeoPoint::new(lat / n, lon / n))
}

fn wrap_degrees(d: f64) -> f64 {
    let mut d = d % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}
