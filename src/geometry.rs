//! Camera-independent geometry: points, rectangles, rotation, and the small
//! numeric rules the transform appliers share (anchor resolution, scale
//! clamping, angle snapping).

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::hit::HandlePosition;

/// A point (or vector) in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    pub const ONE: Self = Self { x: 1.0, y: 1.0 };

    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise product.
    #[must_use]
    pub fn mul_components(self, other: Self) -> Self {
        Self { x: self.x * other.x, y: self.y * other.y }
    }

    /// Euclidean length when treated as a vector.
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }

    /// Angle of the vector from the positive x axis, in radians.
    #[must_use]
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

impl Neg for Point {
    type Output = Self;

    fn neg(self) -> Self {
        Self { x: -self.x, y: -self.y }
    }
}

/// Axis-aligned rectangle. `x`/`y` is the top-left corner; width and height are
/// never negative once normalized through [`Rect::from_corners`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Normalized rectangle spanning two arbitrary corners (drag start and current point).
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        let min_x = a.x.min(b.x);
        let min_y = a.y.min(b.y);
        Self { x: min_x, y: min_y, width: (a.x - b.x).abs(), height: (a.y - b.y).abs() }
    }

    /// Square of half-size `half` centered on `center`.
    #[must_use]
    pub fn around(center: Point, half: f64) -> Self {
        Self { x: center.x - half, y: center.y - half, width: half * 2.0, height: half * 2.0 }
    }

    /// Smallest rectangle containing every point.
    #[must_use]
    pub fn bounding(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (mut min, mut max) = (*first, *first);
        for p in rest {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Self::from_corners(min, max))
    }

    #[must_use]
    pub fn min_x(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn min_y(&self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Corners in clockwise order starting top-left.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min_x(), self.min_y()),
            Point::new(self.max_x(), self.min_y()),
            Point::new(self.max_x(), self.max_y()),
            Point::new(self.min_x(), self.max_y()),
        ]
    }

    /// Inclusive point containment.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x() && p.x <= self.max_x() && p.y >= self.min_y() && p.y <= self.max_y()
    }

    /// Inclusive overlap test; touching edges count as intersecting.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x() <= other.max_x()
            && other.min_x() <= self.max_x()
            && self.min_y() <= other.max_y()
            && other.min_y() <= self.max_y()
    }

    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let min = Point::new(self.min_x().min(other.min_x()), self.min_y().min(other.min_y()));
        let max = Point::new(self.max_x().max(other.max_x()), self.max_y().max(other.max_y()));
        Self::from_corners(min, max)
    }
}

/// Rotate a vector by `angle` radians.
#[must_use]
pub fn rotate_vector(v: Point, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    Point::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Enforce a minimum magnitude on a scale component while keeping its sign,
/// so a handle dragged past its anchor mirrors the object instead of collapsing it.
///
/// Non-finite input collapses to `+min`.
#[must_use]
pub fn clamp_scale(value: f64, min: f64) -> f64 {
    if !value.is_finite() {
        return min;
    }
    if value.abs() >= min {
        return value;
    }
    if value.is_sign_negative() && value != 0.0 { -min } else { min }
}

/// `-1.0` for negative values, `1.0` otherwise (zero counts as positive).
#[must_use]
pub fn sign_or_positive(value: f64) -> f64 {
    if value < 0.0 { -1.0 } else { 1.0 }
}

/// The fixed point for a gesture started on `handle`: the opposite corner for a
/// corner, the opposite edge (at the orthogonal center) for an edge, and the
/// bounds center for the rotate control.
#[must_use]
pub fn resolve_anchor(bounds: &Rect, handle: HandlePosition) -> Point {
    let center = bounds.center();
    match handle {
        HandlePosition::Nw => Point::new(bounds.max_x(), bounds.max_y()),
        HandlePosition::N => Point::new(center.x, bounds.max_y()),
        HandlePosition::Ne => Point::new(bounds.min_x(), bounds.max_y()),
        HandlePosition::E => Point::new(bounds.min_x(), center.y),
        HandlePosition::Se => Point::new(bounds.min_x(), bounds.min_y()),
        HandlePosition::S => Point::new(center.x, bounds.min_y()),
        HandlePosition::Sw => Point::new(bounds.max_x(), bounds.min_y()),
        HandlePosition::W => Point::new(bounds.max_x(), center.y),
        HandlePosition::Rotate => center,
    }
}

/// Round `angle` (radians) to the nearest multiple of `increment_deg`.
///
/// A non-positive increment disables snapping.
#[must_use]
pub fn snap_angle(angle: f64, increment_deg: f64) -> f64 {
    if increment_deg <= 0.0 {
        return angle;
    }
    let step = increment_deg.to_radians();
    (angle / step).round() * step
}

/// Normalize an angle difference into `(-π, π]` so the rotation applied
/// follows the short way around.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    use std::f64::consts::{PI, TAU};

    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}
