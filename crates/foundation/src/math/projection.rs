//! The two projection families the quiz renders with, plus Natural Earth
//! for the world maps. Screen convention matches the renderer: x grows
//! east, y grows down, `translate` is the projected origin in pixels.

use super::{GeoPoint, Vec2, ViewTransform};

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProjectionKind {
    Mercator,
    Equirectangular,
    NaturalEarth1,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projection {
    pub kind: ProjectionKind,
    pub scale: f64,
    pub translate: Vec2,
}

impl Projection {
    pub fn new(kind: ProjectionKind, scale: f64, translate: Vec2) -> Self {
        Self {
            kind,
            scale,
            translate,
        }
    }

    /// Forward projection to screen pixels. `None` when the point has no
    /// finite image (e.g. a pole under Mercator).
    pub fn project(&self, point: GeoPoint) -> Option<Vec2> {
        if !point.is_finite() {
            return None;
        }
        let lam = point.lon.to_radians();
        let phi = point.lat.to_radians();

        let (x, y) = match self.kind {
            ProjectionKind::Mercator => (lam, (FRAC_PI_4 + phi / 2.0).tan().ln()),
            ProjectionKind::Equirectangular => (lam, phi),
            ProjectionKind::NaturalEarth1 => natural_earth1_raw(lam, phi),
        };
        if !x.is_finite() || !y.is_finite() {
            return None;
        }

        Some(Vec2::new(
            self.translate.x + self.scale * x,
            self.translate.y - self.scale * y,
        ))
    }

    /// Inverse projection from screen pixels. `None` outside the
    /// invertible domain.
    pub fn invert(&self, screen: Vec2) -> Option<GeoPoint> {
        if !screen.x.is_finite() || !screen.y.is_finite() || self.scale == 0.0 {
            return None;
        }
        let x = (screen.x - self.translate.x) / self.scale;
        let y = (self.translate.y - screen.y) / self.scale;

        let (lam, phi) = match self.kind {
            ProjectionKind::Mercator => (x, 2.0 * y.exp().atan() - FRAC_PI_2),
            ProjectionKind::Equirectangular => (x, y),
            ProjectionKind::NaturalEarth1 => natural_earth1_invert(x, y)?,
        };

        const EPS: f64 = 1e-9;
        if lam.abs() > PI + EPS || phi.abs() > FRAC_PI_2 + EPS {
            return None;
        }

        Some(GeoPoint::new(phi.to_degrees(), lam.to_degrees()))
    }
}

/// Project a geographic point through the projection and the current
/// pan/zoom transform into final screen coordinates.
pub fn geo_to_screen(point: GeoPoint, projection: &Projection, transform: ViewTransform) -> Option<Vec2> {
    projection.project(point).map(|p| transform.apply(p))
}

/// Recover geographic coordinates from a raw screen pixel: undo the pan/zoom
/// affine first, then the projection. `None` when the pixel falls outside
/// the invertible projection domain.
pub fn screen_to_geo(
    x: f64,
    y: f64,
    projection: &Projection,
    transform: ViewTransform,
) -> Option<GeoPoint> {
    projection.invert(transform.invert(Vec2::new(x, y)))
}

// Natural Earth I polynomial (Šavrič et al.), the same coefficients the
// reference renderer ships.
fn natural_earth1_raw(lam: f64, phi: f64) -> (f64, f64) {
    let phi2 = phi * phi;
    let phi4 = phi2 * phi2;
    (
        lam * (0.8707
            - 0.131979 * phi2
            + phi4 * (-0.013791 + phi4 * (0.003971 * phi2 - 0.001529 * phi4))),
        phi * (1.007226
            + phi2 * (0.015085 + phi4 * (-0.044475 + 0.028874 * phi2 - 0.005916 * phi4))),
    )
}

fn natural_earth1_invert(x: f64, y: f64) -> Option<(f64, f64)> {
    const EPS: f64 = 1e-12;

    // Newton iteration on the y polynomial; latitude is monotone in y.
    let mut phi = y;
    for _ in 0..25 {
        let phi2 = phi * phi;
        let phi4 = phi2 * phi2;
        let fy = phi
            * (1.007226
                + phi2 * (0.015085 + phi4 * (-0.044475 + 0.028874 * phi2 - 0.005916 * phi4)))
            - y;
        let dy = 1.007226
            + phi2
                * (0.015085 * 3.0
                    + phi4
                        * (-0.044475 * 7.0 + 0.028874 * 9.0 * phi2 - 0.005916 * 11.0 * phi4));
        if dy == 0.0 {
            return None;
        }
        let delta = fy / dy;
        phi -= delta;
        if delta.abs() < EPS {
            break;
        }
    }

    if !phi.is_finite() || phi.abs() > FRAC_PI_2 + 1e-9 {
        return None;
    }

    let phi2 = phi * phi;
    let phi4 = phi2 * phi2;
    let denom = 0.8707 - 0.131979 * phi2
        + phi4 * (-0.013791 + phi4 * (0.003971 * phi2 - 0.001529 * phi4));
    if denom == 0.0 {
        return None;
    }
    Some((x / denom, phi))
}
