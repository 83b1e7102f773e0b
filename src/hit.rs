#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};
use crate::scene::{ObjectId, Scene, SceneObject};
use crate::selection::SelectionGroup;

/// Which control a transform handle is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleKind {
    Corner,
    Edge,
    Rotate,
}

/// Position of a handle around the selection bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandlePosition {
    Nw,
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Rotate,
}

impl HandlePosition {
    /// The four corners, clockwise from top-left.
    pub const CORNERS: [Self; 4] = [Self::Nw, Self::Ne, Self::Se, Self::Sw];

    /// The four edge midpoints, clockwise from top.
    pub const EDGES: [Self; 4] = [Self::N, Self::E, Self::S, Self::W];

    #[must_use]
    pub fn kind(self) -> HandleKind {
        match self {
            Self::Nw | Self::Ne | Self::Se | Self::Sw => HandleKind::Corner,
            Self::N | Self::E | Self::S | Self::W => HandleKind::Edge,
            Self::Rotate => HandleKind::Rotate,
        }
    }

    /// Whether dragging this handle scales along x.
    #[must_use]
    pub fn controls_x(self) -> bool {
        !matches!(self, Self::N | Self::S | Self::Rotate)
    }

    /// Whether dragging this handle scales along y.
    #[must_use]
    pub fn controls_y(self) -> bool {
        !matches!(self, Self::E | Self::W | Self::Rotate)
    }

    /// World-space center of this handle on `bounds`. The rotate handle sits
    /// `rotate_offset` above the top edge.
    #[must_use]
    pub fn location(self, bounds: &Rect, rotate_offset: f64) -> Point {
        let c = bounds.center();
        match self {
            Self::Nw => Point::new(bounds.min_x(), bounds.min_y()),
            Self::N => Point::new(c.x, bounds.min_y()),
            Self::Ne => Point::new(bounds.max_x(), bounds.min_y()),
            Self::E => Point::new(bounds.max_x(), c.y),
            Self::Se => Point::new(bounds.max_x(), bounds.max_y()),
            Self::S => Point::new(c.x, bounds.max_y()),
            Self::Sw => Point::new(bounds.min_x(), bounds.max_y()),
            Self::W => Point::new(bounds.min_x(), c.y),
            Self::Rotate => Point::new(c.x, bounds.min_y() - rotate_offset),
        }
    }
}

/// The handle of `group` under `world_pt`, if any.
///
/// The rotate control wins over corners, and corners win over edges, so
/// overlapping hit rects on a tiny selection still resolve predictably.
#[must_use]
pub fn hit_test_handle(world_pt: Point, group: &SelectionGroup) -> Option<HandlePosition> {
    if let Some(rotate) = &group.rotate_handle {
        if rotate.hit_rect.contains(world_pt) {
            return Some(rotate.position);
        }
    }
    let by_kind = |kind: HandleKind| {
        group
            .handles
            .iter()
            .filter(move |h| h.position.kind() == kind)
            .find(|h| h.hit_rect.contains(world_pt))
            .map(|h| h.position)
    };
    by_kind(HandleKind::Corner).or_else(|| by_kind(HandleKind::Edge))
}

/// Whether `obj` takes part in object and marquee hit-testing at all.
fn is_pickable<O: SceneObject>(obj: &O, background_threshold: f64) -> bool {
    if !obj.is_visible() || !obj.is_selectable() || obj.is_overlay() {
        return false;
    }
    let bounds = obj.bounds();
    bounds.width <= background_threshold && bounds.height <= background_threshold
}

/// Topmost pickable object whose bounds contain `world_pt`.
#[must_use]
pub fn hit_test_object<S: Scene>(world_pt: Point, scene: &S, background_threshold: f64) -> Option<ObjectId> {
    scene.children().into_iter().rev().find(|id| {
        scene
            .object(id)
            .is_some_and(|obj| is_pickable(obj, background_threshold) && obj.bounds().contains(world_pt))
    })
}

/// Every pickable object whose bounds overlap `rect`, bottom-most first.
#[must_use]
pub fn hit_test_marquee<S: Scene>(rect: &Rect, scene: &S, background_threshold: f64) -> Vec<ObjectId> {
    scene
        .children()
        .into_iter()
        .filter(|id| {
            scene
                .object(id)
                .is_some_and(|obj| is_pickable(obj, background_threshold) && obj.bounds().intersects(rect))
        })
        .collect()
}
