//! Interaction snapshots and the move / scale / rotate appliers.
//!
//! A gesture captures every selected object once, relative to a pivot, in an
//! [`InteractionSnapshot`]. Each pointer move recomputes the new transforms
//! from that snapshot and the current pointer position alone (never from the
//! previous step), so rounding never accumulates and a zero delta always
//! restores the starting state exactly.
//!
//! All math happens in world space; results are mapped back into each object's
//! parent space only at assignment.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use crate::consts::NEAR_ZERO;
use crate::geometry::{
    Point, clamp_scale, normalize_angle, rotate_vector, sign_or_positive, snap_angle,
};
use crate::hit::{HandleKind, HandlePosition};
use crate::input::PointerId;
use crate::scene::{ObjectId, ParentTransform, Scene, SceneObject};

/// Which transform a gesture applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Move,
    Scale,
    Rotate,
}

/// Starting state of one selected object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotEntry {
    pub id: ObjectId,
    pub start_world_position: Point,
    /// `start_world_position - pivot`.
    pub offset_from_pivot: Point,
    pub start_scale: Point,
    pub start_rotation: f64,
    /// Parent transform at gesture start, used to map results back to local space.
    pub parent: ParentTransform,
}

/// Everything a gesture needs to recompute transforms from scratch.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionSnapshot {
    pub kind: GestureKind,
    pub pointer_id: PointerId,
    pub pivot: Point,
    /// World-space pointer position at gesture start.
    pub start_pointer: Point,
    /// `start_pointer - pivot`.
    pub start_pointer_vector: Point,
    pub active_handle: Option<HandlePosition>,
    pub entries: Vec<SnapshotEntry>,
}

impl InteractionSnapshot {
    /// Capture `ids` from `scene` relative to `pivot`. Ids missing from the
    /// scene are left out.
    #[must_use]
    pub fn capture<S: Scene>(
        scene: &S,
        ids: &[ObjectId],
        kind: GestureKind,
        pointer_id: PointerId,
        pivot: Point,
        start_pointer: Point,
        active_handle: Option<HandlePosition>,
    ) -> Self {
        let entries = ids
            .iter()
            .filter_map(|id| {
                let obj = scene.object(id)?;
                let start_world_position = obj.world_position();
                Some(SnapshotEntry {
                    id: *id,
                    start_world_position,
                    offset_from_pivot: start_world_position - pivot,
                    start_scale: obj.scale(),
                    start_rotation: obj.rotation(),
                    parent: obj.parent(),
                })
            })
            .collect();
        Self {
            kind,
            pointer_id,
            pivot,
            start_pointer,
            start_pointer_vector: start_pointer - pivot,
            active_handle,
            entries,
        }
    }

    #[must_use]
    pub fn ids(&self) -> Vec<ObjectId> {
        self.entries.iter().map(|e| e.id).collect()
    }

    /// Write `f(entry)` into each object. Entries whose object has vanished are
    /// dropped for the rest of the gesture. Returns the ids that were written.
    fn apply_each<S, F>(&mut self, scene: &mut S, mut f: F) -> Vec<ObjectId>
    where
        S: Scene,
        F: FnMut(&SnapshotEntry, &mut S::Object),
    {
        let mut touched = Vec::with_capacity(self.entries.len());
        self.entries.retain(|entry| {
            let Some(obj) = scene.object_mut(&entry.id) else {
                tracing::warn!(id = %entry.id, "snapshot entry lost its object; skipping for the rest of the gesture");
                return false;
            };
            f(entry, obj);
            touched.push(entry.id);
            true
        });
        touched
    }
}

/// Translate every entry by the pointer delta since gesture start.
pub fn apply_move<S: Scene>(scene: &mut S, snapshot: &mut InteractionSnapshot, current: Point) -> Vec<ObjectId> {
    let delta = current - snapshot.start_pointer;
    snapshot.apply_each(scene, |entry, obj| {
        let world = entry.start_world_position + delta;
        obj.set_position(entry.parent.to_local(world));
    })
}

/// Per-axis scale factors for a scale gesture with the pointer at `current`.
///
/// Axes the handle doesn't control stay at 1. A reference component too close
/// to zero to divide by yields a signed unit factor. With `uniform` on a corner
/// handle both factors take the larger magnitude, each keeping its own sign.
#[must_use]
pub fn scale_factors(snapshot: &InteractionSnapshot, current: Point, uniform: bool) -> Point {
    let handle = snapshot.active_handle.unwrap_or(HandlePosition::Se);
    let pointer_vector = current - snapshot.pivot;
    let reference = snapshot.start_pointer_vector;

    let axis_factor = |controls: bool, pointer: f64, reference: f64| {
        if !controls {
            1.0
        } else if reference.abs() < NEAR_ZERO {
            sign_or_positive(pointer)
        } else {
            pointer / reference
        }
    };
    let mut factor = Point::new(
        axis_factor(handle.controls_x(), pointer_vector.x, reference.x),
        axis_factor(handle.controls_y(), pointer_vector.y, reference.y),
    );

    if uniform && handle.kind() == HandleKind::Corner {
        let magnitude = factor.x.abs().max(factor.y.abs());
        factor = Point::new(magnitude * sign_or_positive(factor.x), magnitude * sign_or_positive(factor.y));
    }
    factor
}

/// Scale every entry about the pivot, keeping each object's offset from the
/// anchor proportional to its own size.
pub fn apply_scale<S: Scene>(
    scene: &mut S,
    snapshot: &mut InteractionSnapshot,
    current: Point,
    uniform: bool,
    min_scale: f64,
) -> Vec<ObjectId> {
    let factor = scale_factors(snapshot, current, uniform);
    let pivot = snapshot.pivot;
    snapshot.apply_each(scene, |entry, obj| {
        let scale = entry.start_scale.mul_components(factor);
        obj.set_scale(Point::new(clamp_scale(scale.x, min_scale), clamp_scale(scale.y, min_scale)));
        let world = pivot + entry.offset_from_pivot.mul_components(factor);
        obj.set_position(entry.parent.to_local(world));
    })
}

/// Angle swept since gesture start, optionally snapped. `None` while the
/// pointer sits on the pivot, where the angle is undefined.
#[must_use]
pub fn rotation_delta(snapshot: &InteractionSnapshot, current: Point, snap: bool, snap_deg: f64) -> Option<f64> {
    let pointer_vector = current - snapshot.pivot;
    if pointer_vector.length() < NEAR_ZERO || snapshot.start_pointer_vector.length() < NEAR_ZERO {
        return None;
    }
    let raw = normalize_angle(pointer_vector.angle() - snapshot.start_pointer_vector.angle());
    Some(if snap { snap_angle(raw, snap_deg) } else { raw })
}

/// Rotate every entry about the pivot as one rigid group.
pub fn apply_rotate<S: Scene>(
    scene: &mut S,
    snapshot: &mut InteractionSnapshot,
    current: Point,
    snap: bool,
    snap_deg: f64,
) -> Vec<ObjectId> {
    let Some(angle) = rotation_delta(snapshot, current, snap, snap_deg) else {
        return Vec::new();
    };
    let pivot = snapshot.pivot;
    snapshot.apply_each(scene, |entry, obj| {
        obj.set_rotation(entry.start_rotation + angle);
        let world = pivot + rotate_vector(entry.offset_from_pivot, angle);
        obj.set_position(entry.parent.to_local(world));
    })
}
