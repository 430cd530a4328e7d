use super::Vec2;

/// Pan/zoom affine in the zoom-behavior convention: scale about the origin,
/// then translate. `apply(p) = p * k + t`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewTransform {
    pub x: f64,
    pub y: f64,
    pub k: f64,
}

impl ViewTransform {
    pub fn new(x: f64, y: f64, k: f64) -> Self {
        Self { x, y, k }
    }

    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    pub fn apply(self, p: Vec2) -> Vec2 {
        Vec2::new(p.x * self.k + self.x, p.y * self.k + self.y)
    }

    pub fn invert(self, p: Vec2) -> Vec2 {
        Vec2::new((p.x - self.x) / self.k, (p.y - self.y) / self.k)
    }

    /// Whether the view moved enough since `prev` that a pointer-up should
    /// count as a pan/zoom rather than a tap. Thresholds: 2 px translation,
    /// 0.002 scale.
    pub fn materially_differs(self, prev: ViewTransform) -> bool {
        let dx = (self.x - prev.x).abs();
        let dy = (self.y - prev.y).abs();
        let dk = (self.k - prev.k).abs();
        dx > 2.0 || dy > 2.0 || dk > 0.002
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}
