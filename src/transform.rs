use kurbo::Point;

/// 2D affine transformation matrix [a, b, c, d, e, f]
/// Represents: | a  c  e |
///             | b  d  f |
///             | 0  0  1 |
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    pub fn translate(dx: f64, dy: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, dx, dy)
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Device space has its origin at the bottom-left, documents at the
    /// top-left: `y' = height - y`.
    pub fn vertical_flip(height: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, -1.0, 0.0, height)
    }

    /// Compose two transforms: `parent * child`.
    ///
    /// The result applies `child` first, then `parent`, which is the order
    /// needed when descending one level in the document tree.
    pub fn compose(parent: &Transform, child: &Transform) -> Transform {
        parent.then_apply(child)
    }

    /// `self * other`, see [`Transform::compose`].
    pub fn then_apply(&self, other: &Transform) -> Transform {
        Transform {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    /// Transform a point
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    /// Parse an SVG `transform` attribute (`matrix`, `translate`, `scale`,
    /// `rotate`, `skewX`, `skewY`, in any sequence).
    pub fn parse(value: &str) -> Result<Transform, String> {
        let ts: svgtypes::Transform = value
            .parse()
            .map_err(|e: svgtypes::Error| e.to_string())?;
        Ok(Transform::from(ts))
    }
}

impl From<svgtypes::Transform> for Transform {
    fn from(ts: svgtypes::Transform) -> Self {
        Self::new(ts.a, ts.b, ts.c, ts.d, ts.e, ts.f)
    }
}
