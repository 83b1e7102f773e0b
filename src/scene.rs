//! Capability interface between the engine and the host's scene graph.
//!
//! The engine never names a concrete node type. Anything that can report a
//! position, scale, rotation, and world bounds can be selected and transformed;
//! [`crate::doc::DocStore`] is the in-crate implementation.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::OVERLAY_NAME_PREFIX;
use crate::geometry::{Point, Rect, rotate_vector};

/// Unique identifier for a scene object.
pub type ObjectId = Uuid;

/// Transform of an object's parent container, mapping parent-local
/// coordinates into world space: scale, then rotate, then translate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParentTransform {
    /// World-space position of the parent's local origin.
    pub origin: Point,
    /// Uniform scale of the parent.
    pub scale: f64,
    /// Rotation of the parent in radians.
    pub rotation: f64,
}

impl ParentTransform {
    pub const IDENTITY: Self = Self { origin: Point::ZERO, scale: 1.0, rotation: 0.0 };

    /// Map a parent-local point into world space.
    #[must_use]
    pub fn to_world(&self, local: Point) -> Point {
        self.origin + rotate_vector(local * self.scale, self.rotation)
    }

    /// Map a world point into parent-local space.
    #[must_use]
    pub fn to_local(&self, world: Point) -> Point {
        let unrotated = rotate_vector(world - self.origin, -self.rotation);
        if self.scale == 0.0 { unrotated } else { unrotated * (1.0 / self.scale) }
    }
}

impl Default for ParentTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// What the engine needs from a placed object.
///
/// `position` is the object's origin (its center) in parent-local space, and
/// `rotation` is relative to the parent. Everything the engine computes goes
/// through world space via [`SceneObject::parent`].
pub trait SceneObject {
    fn position(&self) -> Point;
    fn set_position(&mut self, position: Point);
    fn scale(&self) -> Point;
    fn set_scale(&mut self, scale: Point);
    fn rotation(&self) -> f64;
    fn set_rotation(&mut self, rotation: f64);

    /// World-space axis-aligned bounds of the object as currently transformed.
    fn bounds(&self) -> Rect;

    /// Transform of the container this object lives in.
    fn parent(&self) -> ParentTransform {
        ParentTransform::IDENTITY
    }

    fn name(&self) -> &str {
        ""
    }

    fn is_visible(&self) -> bool {
        true
    }

    fn is_selectable(&self) -> bool {
        true
    }

    /// Text-capable objects open an editor on double-click and get no scale/rotate handles.
    fn is_text(&self) -> bool {
        false
    }

    /// Engine-owned overlay nodes carry the reserved name prefix.
    fn is_overlay(&self) -> bool {
        self.name().starts_with(OVERLAY_NAME_PREFIX)
    }

    fn world_position(&self) -> Point {
        self.parent().to_world(self.position())
    }
}

/// The host's scene graph as seen by the engine.
pub trait Scene {
    type Object: SceneObject;

    /// Ids of all children, bottom-most first.
    fn children(&self) -> Vec<ObjectId>;

    fn object(&self, id: &ObjectId) -> Option<&Self::Object>;

    fn object_mut(&mut self, id: &ObjectId) -> Option<&mut Self::Object>;
}
