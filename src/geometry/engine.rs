use kurbo::{Point, Vec2};

use crate::foundation::error::{ChalkError, ChalkResult};

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Axis-aligned right-triangle legs spanned by `center` and `p`.
///
/// Returns `(|p.x - center.x|, |p.y - center.y|)`. Recomputed from current
/// positions on every call; the derive rules feed it fresh coordinates each
/// frame, so the legs follow a moving point.
pub fn legs(center: Point, p: Point) -> (f64, f64) {
    ((p.x - center.x).abs(), (p.y - center.y).abs())
}

/// Point at parametric angle `theta` (radians) on the circle `(center, radius)`.
pub fn point_on_circle(center: Point, radius: f64, theta: f64) -> Point {
    center + Vec2::new(radius * theta.cos(), radius * theta.sin())
}

/// A circle in scene coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Circle {
    /// Center point.
    pub center: Point,
    /// Radius; finite and strictly positive.
    pub radius: f64,
}

impl Circle {
    /// Build a circle, rejecting a non-finite or non-positive radius.
    pub fn new(center: Point, radius: f64) -> ChalkResult<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ChalkError::invalid_geometry(
                "circle radius must be finite and > 0",
            ));
        }
        if !center.x.is_finite() || !center.y.is_finite() {
            return Err(ChalkError::invalid_geometry(
                "circle center must have finite coordinates",
            ));
        }
        Ok(Self { center, radius })
    }

    /// Point on the circle path at parametric angle `theta`.
    pub fn point_at(self, theta: f64) -> Point {
        point_on_circle(self.center, self.radius, theta)
    }

    /// Whether `p` lies on the circle path within `tol`.
    pub fn contains_on_path(self, p: Point, tol: f64) -> bool {
        (distance(self.center, p) - self.radius).abs() <= tol
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/engine.rs"]
mod tests;
