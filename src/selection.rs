//! Selection state and its derived visuals.
//!
//! [`Selection`] is the only authoritative piece: an ordered set of
//! [`SelectionTarget`]s. Everything drawn around it (combined bounds, the eight
//! scale handles, the rotate handle, the outline) lives in [`SelectionGroup`],
//! which is recomputed from the live scene every time it is asked for and never
//! stored, so a transform step can't leave stale bounds behind.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use serde::{Deserialize, Serialize};

use crate::camera::Viewport;
use crate::config::EngineConfig;
use crate::geometry::{Point, Rect};
use crate::hit::{HandleKind, HandlePosition};
use crate::scene::{ObjectId, Scene, SceneObject};

/// Identity-stable reference to a selected object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionTarget {
    pub id: ObjectId,
}

impl SelectionTarget {
    #[must_use]
    pub fn new(id: ObjectId) -> Self {
        Self { id }
    }
}

/// The current set of selected objects, in selection order.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    targets: Vec<SelectionTarget>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection. Duplicates collapse to their first occurrence and
    /// an empty list clears. Returns whether membership changed.
    pub fn select(&mut self, targets: Vec<SelectionTarget>) -> bool {
        let mut next: Vec<SelectionTarget> = Vec::with_capacity(targets.len());
        for target in targets {
            if !next.contains(&target) {
                next.push(target);
            }
        }
        if next == self.targets {
            return false;
        }
        self.targets = next;
        true
    }

    /// Add `target` if absent, remove it if present.
    pub fn toggle(&mut self, target: SelectionTarget) -> bool {
        if let Some(pos) = self.targets.iter().position(|t| *t == target) {
            self.targets.remove(pos);
        } else {
            self.targets.push(target);
        }
        true
    }

    /// Empty the selection. Returns whether anything was selected.
    pub fn clear(&mut self) -> bool {
        if self.targets.is_empty() {
            return false;
        }
        self.targets.clear();
        true
    }

    /// Read-only view of the current targets.
    #[must_use]
    pub fn targets(&self) -> &[SelectionTarget] {
        &self.targets
    }

    #[must_use]
    pub fn ids(&self) -> Vec<ObjectId> {
        self.targets.iter().map(|t| t.id).collect()
    }

    #[must_use]
    pub fn contains(&self, id: &ObjectId) -> bool {
        self.targets.iter().any(|t| t.id == *id)
    }

    /// Whether `id` is the one and only selected object.
    #[must_use]
    pub fn is_sole(&self, id: &ObjectId) -> bool {
        self.targets.len() == 1 && self.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Drop targets whose objects are gone from `scene`. Returns whether any were dropped.
    pub fn retain_live<S: Scene>(&mut self, scene: &S) -> bool {
        let before = self.targets.len();
        self.targets.retain(|t| scene.object(&t.id).is_some());
        self.targets.len() != before
    }
}

/// Cursor the host should show for what is under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    Move,
    /// Diagonal resize for the top-left / bottom-right corners.
    NwseResize,
    /// Diagonal resize for the top-right / bottom-left corners.
    NeswResize,
    EwResize,
    NsResize,
    Rotate,
}

impl CursorHint {
    /// CSS `cursor` value.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Move => "move",
            Self::NwseResize => "nwse-resize",
            Self::NeswResize => "nesw-resize",
            Self::EwResize => "ew-resize",
            Self::NsResize => "ns-resize",
            Self::Rotate => "grab",
        }
    }
}

/// Cursor for a hovered handle, falling back to move over a selected body.
#[must_use]
pub fn cursor_for(handle: Option<HandlePosition>, over_selected_body: bool) -> CursorHint {
    match handle {
        Some(HandlePosition::Nw | HandlePosition::Se) => CursorHint::NwseResize,
        Some(HandlePosition::Ne | HandlePosition::Sw) => CursorHint::NeswResize,
        Some(HandlePosition::E | HandlePosition::W) => CursorHint::EwResize,
        Some(HandlePosition::N | HandlePosition::S) => CursorHint::NsResize,
        Some(HandlePosition::Rotate) => CursorHint::Rotate,
        None if over_selected_body => CursorHint::Move,
        None => CursorHint::Default,
    }
}

/// One interactive hit region around the selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformHandle {
    pub kind: HandleKind,
    pub position: HandlePosition,
    /// World-space center of the handle.
    pub center: Point,
    /// World-space hit rectangle.
    pub hit_rect: Rect,
    pub cursor: CursorHint,
}

impl TransformHandle {
    fn build(position: HandlePosition, bounds: &Rect, half: f64, rotate_offset: f64) -> Self {
        let center = position.location(bounds, rotate_offset);
        Self {
            kind: position.kind(),
            position,
            center,
            hit_rect: Rect::around(center, half),
            cursor: cursor_for(Some(position), false),
        }
    }
}

/// Derived visuals for a non-empty selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionGroup {
    /// Live selected objects, in selection order.
    pub objects: Vec<ObjectId>,
    /// Union of every live object's current world bounds.
    pub bounds: Rect,
    /// Four corners then four edges; empty when the selection holds text.
    pub handles: Vec<TransformHandle>,
    pub rotate_handle: Option<TransformHandle>,
    /// Rectangle the selection outline is drawn along.
    pub outline: Rect,
}

impl SelectionGroup {
    /// Build the group from the live scene. Returns `None` when no selected
    /// object is still present.
    #[must_use]
    pub fn compute<S: Scene, V: Viewport>(
        selection: &Selection,
        scene: &S,
        viewport: &V,
        config: &EngineConfig,
    ) -> Option<Self> {
        let mut objects = Vec::with_capacity(selection.len());
        let mut bounds: Option<Rect> = None;
        let mut has_text = false;
        for target in selection.targets() {
            let Some(obj) = scene.object(&target.id) else {
                continue;
            };
            let b = obj.bounds();
            bounds = Some(bounds.map_or(b, |acc| acc.union(&b)));
            has_text |= obj.is_text();
            objects.push(target.id);
        }
        let bounds = bounds?;

        let (handles, rotate_handle) = if has_text {
            (Vec::new(), None)
        } else {
            let half = viewport.screen_dist_to_world(config.handle_radius_px);
            let offset = viewport.screen_dist_to_world(config.rotate_handle_offset_px);
            let handles = HandlePosition::CORNERS
                .iter()
                .chain(HandlePosition::EDGES.iter())
                .map(|&pos| TransformHandle::build(pos, &bounds, half, offset))
                .collect();
            (handles, Some(TransformHandle::build(HandlePosition::Rotate, &bounds, half, offset)))
        };

        Some(Self { objects, bounds, handles, rotate_handle, outline: bounds })
    }

    #[must_use]
    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    #[must_use]
    pub fn handle(&self, position: HandlePosition) -> Option<&TransformHandle> {
        if position == HandlePosition::Rotate {
            return self.rotate_handle.as_ref();
        }
        self.handles.iter().find(|h| h.position == position)
    }
}
