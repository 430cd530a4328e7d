/// Mean Earth radius (kilometers), the quiz's distance scale.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographic position in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// Great-circle distance between two points, in kilometers.
///
/// Returns `f64::NAN` when either input has a non-finite coordinate, so the
/// caller can treat "could not measure" as a value rather than an error.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    if !a.is_finite() || !b.is_finite() {
        return f64::NAN;
    }

    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Clamp a score into `[0, 1]`; non-finite values collapse to `0`.
pub fn clamp01(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Display formatting for distances: coarser precision at larger magnitudes.
/// Ties round away from zero (`{:.n}` alone rounds them to even).
pub fn format_distance_km(distance_km: f64) -> String {
    if !distance_km.is_finite() {
        return "-".to_string();
    }
    if distance_km >= 100.0 {
        format!("{:.0} km", distance_km.round())
    } else if distance_km >= 10.0 {
        format!("{:.1} km", (distance_km * 10.0).round() / 10.0)
    } else {
        format!("{:.2} km", (distance_km * 100.0).round() / 100.0)
    }
}
