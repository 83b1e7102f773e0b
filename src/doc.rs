//! Document model: placed canvas objects and the in-memory store.
//!
//! This module defines the concrete node type the browser bridge works with
//! (`CanvasObject`, `ObjectKind`), a sparse-update type for host-side edits
//! (`PartialCanvasObject`), and the store that owns all live objects
//! (`DocStore`). `DocStore` implements [`Scene`] so the engine can select and
//! transform its objects without knowing anything else about them.
//!
//! Data flows into this layer from the host (JSON snapshots and updates) and
//! from the engine (position/scale/rotation writes during gestures).

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, rotate_vector};
use crate::scene::{ObjectId, ParentTransform, Scene, SceneObject};

/// The kind of a placed object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// Freehand stroke (brush, pen, highlighter).
    Stroke,
    /// Geometric shape.
    Shape,
    /// Editable text block.
    Text,
    /// Template region from a lesson layout.
    Template,
}

fn default_scale() -> Point {
    Point::ONE
}

fn default_visible() -> bool {
    true
}

/// A placed object as stored in the document and on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasObject {
    /// Unique identifier for this object.
    pub id: ObjectId,
    pub kind: ObjectKind,
    /// Center of the object in parent-local coordinates.
    pub x: f64,
    pub y: f64,
    /// Unscaled width in parent-local units.
    pub width: f64,
    /// Unscaled height in parent-local units.
    pub height: f64,
    /// Per-axis scale; negative components mirror the object.
    #[serde(default = "default_scale")]
    pub scale: Point,
    /// Clockwise rotation in radians around the center.
    #[serde(default)]
    pub rotation: f64,
    /// Stacking order; lower values are drawn beneath higher values.
    #[serde(default)]
    pub z_index: i64,
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Locked objects stay on the canvas but cannot be selected.
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub name: String,
    /// Transform of the container the object is placed in.
    #[serde(default)]
    pub parent: ParentTransform,
}

impl CanvasObject {
    /// A visible, unlocked object of `kind` centered at `(x, y)` in world space.
    #[must_use]
    pub fn new(id: ObjectId, kind: ObjectKind, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id,
            kind,
            x,
            y,
            width,
            height,
            scale: Point::ONE,
            rotation: 0.0,
            z_index: 0,
            visible: true,
            locked: false,
            name: String::new(),
            parent: ParentTransform::IDENTITY,
        }
    }

    /// World-space corners of the rotated, scaled footprint.
    #[must_use]
    pub fn world_corners(&self) -> [Point; 4] {
        let center = self.parent.to_world(Point::new(self.x, self.y));
        let half = Point::new(self.width * self.scale.x.abs(), self.height * self.scale.y.abs())
            * (self.parent.scale.abs() / 2.0);
        let angle = self.parent.rotation + self.rotation;
        [
            Point::new(-half.x, -half.y),
            Point::new(half.x, -half.y),
            Point::new(half.x, half.y),
            Point::new(-half.x, half.y),
        ]
        .map(|corner| center + rotate_vector(corner, angle))
    }
}

impl SceneObject for CanvasObject {
    fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }

    fn scale(&self) -> Point {
        self.scale
    }

    fn set_scale(&mut self, scale: Point) {
        self.scale = scale;
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
    }

    fn bounds(&self) -> Rect {
        let corners = self.world_corners();
        Rect::bounding(&corners).unwrap_or_default()
    }

    fn parent(&self) -> ParentTransform {
        self.parent
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn is_selectable(&self) -> bool {
        !self.locked
    }

    fn is_text(&self) -> bool {
        self.kind == ObjectKind::Text
    }
}

/// Sparse update for a placed object. Only present fields are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartialCanvasObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<ParentTransform>,
}

impl PartialCanvasObject {
    /// The transform fields of `obj`, as reported back to the host after a gesture step.
    #[must_use]
    pub fn transform_of(obj: &CanvasObject) -> Self {
        Self {
            x: Some(obj.x),
            y: Some(obj.y),
            scale: Some(obj.scale),
            rotation: Some(obj.rotation),
            ..Default::default()
        }
    }
}

/// In-memory store of placed objects.
pub struct DocStore {
    objects: HashMap<ObjectId, CanvasObject>,
}

impl DocStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { objects: HashMap::new() }
    }

    /// Insert or replace an object.
    pub fn insert(&mut self, obj: CanvasObject) {
        self.objects.insert(obj.id, obj);
    }

    /// Remove an object by id, returning it if it was present.
    pub fn remove(&mut self, id: &ObjectId) -> Option<CanvasObject> {
        self.objects.remove(id)
    }

    #[must_use]
    pub fn get(&self, id: &ObjectId) -> Option<&CanvasObject> {
        self.objects.get(id)
    }

    /// Apply a partial update to an existing object. Returns false if the object doesn't exist.
    pub fn apply_partial(&mut self, id: &ObjectId, partial: &PartialCanvasObject) -> bool {
        let Some(obj) = self.objects.get_mut(id) else {
            return false;
        };
        if let Some(x) = partial.x {
            obj.x = x;
        }
        if let Some(y) = partial.y {
            obj.y = y;
        }
        if let Some(w) = partial.width {
            obj.width = w;
        }
        if let Some(h) = partial.height {
            obj.height = h;
        }
        if let Some(s) = partial.scale {
            obj.scale = s;
        }
        if let Some(r) = partial.rotation {
            obj.rotation = r;
        }
        if let Some(z) = partial.z_index {
            obj.z_index = z;
        }
        if let Some(v) = partial.visible {
            obj.visible = v;
        }
        if let Some(l) = partial.locked {
            obj.locked = l;
        }
        if let Some(p) = partial.parent {
            obj.parent = p;
        }
        true
    }

    /// Replace all objects with a full snapshot.
    pub fn load_snapshot(&mut self, objects: Vec<CanvasObject>) {
        self.objects.clear();
        for obj in objects {
            self.objects.insert(obj.id, obj);
        }
    }

    /// Return all objects sorted by `(z_index, id)` for draw order.
    #[must_use]
    pub fn sorted_objects(&self) -> Vec<&CanvasObject> {
        let mut objs: Vec<&CanvasObject> = self.objects.values().collect();
        objs.sort_by(|a, b| a.z_index.cmp(&b.z_index).then_with(|| a.id.cmp(&b.id)));
        objs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for DocStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for DocStore {
    type Object = CanvasObject;

    fn children(&self) -> Vec<ObjectId> {
        self.sorted_objects().into_iter().map(|obj| obj.id).collect()
    }

    fn object(&self, id: &ObjectId) -> Option<&CanvasObject> {
        self.objects.get(id)
    }

    fn object_mut(&mut self, id: &ObjectId) -> Option<&mut CanvasObject> {
        self.objects.get_mut(id)
    }
}
