#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Mapping between screen pixels and world coordinates.
///
/// The engine only ever talks to the camera through this trait, so hosts with
/// their own camera types can plug them in directly.
pub trait Viewport {
    /// Convert a screen-space point (CSS pixels) to world coordinates.
    fn to_world(&self, screen: Point) -> Point;

    /// Convert a world-space point to screen coordinates (CSS pixels).
    fn to_screen(&self, world: Point) -> Point;

    /// Convert a screen-space distance (pixels) to a world-space distance.
    fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        let origin = self.to_world(Point::ZERO);
        let along = self.to_world(Point::new(screen_dist, 0.0));
        origin.distance(along)
    }
}

/// Convert a screen point to world space through `viewport`.
#[must_use]
pub fn screen_to_world(point: Point, viewport: &impl Viewport) -> Point {
    viewport.to_world(point)
}

/// Convert a world point to screen space through `viewport`.
#[must_use]
pub fn world_to_screen(point: Point, viewport: &impl Viewport) -> Point {
    viewport.to_screen(point)
}

/// Camera state for pan/zoom on the page surface.
///
/// `pan_x` / `pan_y` are in CSS pixels.
/// `zoom` is a scale factor (1.0 = no zoom).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Viewport for Camera {
    fn to_world(&self, screen: Point) -> Point {
        Point { x: (screen.x - self.pan_x) / self.zoom, y: (screen.y - self.pan_y) / self.zoom }
    }

    fn to_screen(&self, world: Point) -> Point {
        Point { x: world.x * self.zoom + self.pan_x, y: world.y * self.zoom + self.pan_y }
    }

    fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }
}
