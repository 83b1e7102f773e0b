use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Camera, Viewport, screen_to_world};
use crate::config::EngineConfig;
use crate::doc::{CanvasObject, DocStore, PartialCanvasObject};
use crate::geometry::{Point, Rect, resolve_anchor};
use crate::hit::{HandlePosition, hit_test_handle, hit_test_marquee, hit_test_object};
use crate::input::{Button, InputState, Key, Modifiers, PointerId, PointerInput, PointerLease};
use crate::render;
use crate::scene::{ObjectId, Scene, SceneObject};
use crate::selection::{CursorHint, Selection, SelectionGroup, SelectionTarget, cursor_for};
use crate::transform::{GestureKind, InteractionSnapshot, apply_move, apply_rotate, apply_scale};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The selected ids changed; carries the new selection in order.
    SelectionChanged(Vec<ObjectId>),
    /// A gesture step rewrote the transforms of `ids`.
    ObjectsTransformed { kind: GestureKind, ids: Vec<ObjectId> },
    /// A text-capable object was double-clicked.
    EditTextRequested { id: ObjectId },
    /// The user asked to delete these objects. The host owns removal.
    DeleteRequested { ids: Vec<ObjectId> },
    /// CSS cursor to show over the canvas.
    SetCursor(String),
    /// Route all events of this pointer to the engine until released.
    CapturePointer(PointerId),
    /// Stop routing this pointer.
    ReleasePointer(PointerId),
    RenderNeeded,
}

/// Last primary click on an object, for double-click detection.
#[derive(Debug, Clone, Copy)]
struct ClickRecord {
    id: ObjectId,
    time_ms: f64,
}

/// Core engine state: all selection and gesture logic, independent of the
/// canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser
/// dependencies, and generic over the scene and viewport so hosts can plug in
/// their own scene graph.
pub struct EngineCore<S: Scene = DocStore, V: Viewport = Camera> {
    pub scene: S,
    pub viewport: V,
    pub config: EngineConfig,
    pub input: InputState,
    selection: Selection,
    cursor: CursorHint,
    last_click: Option<ClickRecord>,
}

impl<S: Scene + Default, V: Viewport + Default> Default for EngineCore<S, V> {
    fn default() -> Self {
        Self::with_parts(S::default(), V::default(), EngineConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: Scene, V: Viewport> EngineCore<S, V> {
    #[must_use]
    pub fn with_parts(scene: S, viewport: V, config: EngineConfig) -> Self {
        Self {
            scene,
            viewport,
            config,
            input: InputState::Idle,
            selection: Selection::new(),
            cursor: CursorHint::Default,
            last_click: None,
        }
    }

    // --- Queries ---

    /// The current selection targets, in selection order.
    #[must_use]
    pub fn selection(&self) -> &[SelectionTarget] {
        self.selection.targets()
    }

    #[must_use]
    pub fn selected_ids(&self) -> Vec<ObjectId> {
        self.selection.ids()
    }

    /// Selection visuals derived from the live scene.
    #[must_use]
    pub fn selection_group(&self) -> Option<SelectionGroup> {
        SelectionGroup::compute(&self.selection, &self.scene, &self.viewport, &self.config)
    }

    /// The marquee rectangle being dragged, in world space.
    #[must_use]
    pub fn marquee(&self) -> Option<Rect> {
        self.input.marquee()
    }

    #[must_use]
    pub fn cursor(&self) -> CursorHint {
        self.cursor
    }

    // --- Programmatic selection ---

    /// Replace the selection with the live objects among `ids`. An active gesture ends first.
    pub fn select(&mut self, ids: Vec<ObjectId>) -> Vec<Action> {
        let mut actions = Vec::new();
        self.end_gesture(&mut actions);
        let live: Vec<ObjectId> = ids.into_iter().filter(|id| self.scene.object(id).is_some()).collect();
        self.replace_selection(live, &mut actions);
        actions
    }

    /// Add or remove one object. An active gesture ends first.
    pub fn toggle(&mut self, id: ObjectId) -> Vec<Action> {
        let mut actions = Vec::new();
        self.end_gesture(&mut actions);
        if self.scene.object(&id).is_some() || self.selection.contains(&id) {
            self.toggle_target(id, &mut actions);
        }
        actions
    }

    /// Clear the selection. An active gesture ends first.
    pub fn clear_selection(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        self.end_gesture(&mut actions);
        self.replace_selection(Vec::new(), &mut actions);
        actions
    }

    /// Reconcile the selection with the scene after the host removed objects.
    /// If the selection empties mid-gesture, the gesture ends.
    pub fn sync_scene(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        self.prune_selection(&mut actions);
        actions
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, ev: PointerInput) -> Vec<Action> {
        if !self.input.is_idle() {
            tracing::trace!(pointer_id = ev.pointer_id, "pointer-down ignored; gesture in progress");
            return Vec::new();
        }
        if ev.button != Button::Primary {
            return Vec::new();
        }

        let mut actions = Vec::new();
        let world = screen_to_world(ev.screen, &self.viewport);
        self.prune_selection(&mut actions);

        // Handles of the current selection take priority over anything beneath them.
        if let Some(group) = self.selection_group() {
            if let Some(handle) = hit_test_handle(world, &group) {
                self.last_click = None;
                let (kind, pivot) = if handle == HandlePosition::Rotate {
                    (GestureKind::Rotate, group.center())
                } else {
                    (GestureKind::Scale, resolve_anchor(&group.bounds, handle))
                };
                self.begin_transform(ev.pointer_id, kind, pivot, world, Some(handle), &mut actions);
                return actions;
            }
        }

        let hit = hit_test_object(world, &self.scene, self.config.background_size_threshold);

        if let Some(id) = hit {
            if self.is_double_click(id, ev.time_ms) && self.scene.object(&id).is_some_and(|obj| obj.is_text()) {
                self.last_click = None;
                if !self.selection.is_sole(&id) {
                    self.replace_selection(vec![id], &mut actions);
                }
                tracing::debug!(%id, "text edit requested");
                actions.push(Action::EditTextRequested { id });
                return actions;
            }
            self.last_click = Some(ClickRecord { id, time_ms: ev.time_ms });
        } else {
            self.last_click = None;
        }

        match hit {
            Some(id) if ev.modifiers.shift => self.toggle_target(id, &mut actions),
            Some(id) if self.selection.contains(&id) => {
                if let Some(group) = self.selection_group() {
                    self.begin_transform(ev.pointer_id, GestureKind::Move, group.center(), world, None, &mut actions);
                }
            }
            Some(id) => self.replace_selection(vec![id], &mut actions),
            None if !ev.modifiers.any() => {
                self.replace_selection(Vec::new(), &mut actions);
                let (lease, capture) = PointerLease::acquire(ev.pointer_id);
                actions.push(capture);
                tracing::debug!(pointer_id = ev.pointer_id, "marquee started");
                self.input = InputState::Marqueeing { lease, start_world: world, current_world: world };
                actions.push(Action::RenderNeeded);
            }
            None => {}
        }
        actions
    }

    pub fn on_pointer_move(&mut self, ev: PointerInput) -> Vec<Action> {
        let world = screen_to_world(ev.screen, &self.viewport);
        if self.input.is_idle() {
            return self.update_hover(world).into_iter().collect();
        }
        if !self.input.accepts(ev.pointer_id) {
            return Vec::new();
        }
        if let InputState::Marqueeing { current_world, .. } = &mut self.input {
            *current_world = world;
            return vec![Action::RenderNeeded];
        }
        self.step_transform(world, ev.modifiers)
    }

    pub fn on_pointer_up(&mut self, ev: PointerInput) -> Vec<Action> {
        if !self.input.accepts(ev.pointer_id) {
            return Vec::new();
        }
        let world = screen_to_world(ev.screen, &self.viewport);
        let mut actions = Vec::new();
        match std::mem::take(&mut self.input) {
            InputState::Idle => {}
            InputState::Marqueeing { lease, start_world, .. } => {
                actions.push(lease.release());
                let rect = Rect::from_corners(start_world, world);
                let hits = hit_test_marquee(&rect, &self.scene, self.config.background_size_threshold);
                tracing::debug!(matched = hits.len(), "marquee released");
                self.replace_selection(hits, &mut actions);
            }
            InputState::Moving(g) | InputState::Scaling(g) | InputState::Rotating(g) => {
                tracing::debug!(kind = ?g.snapshot.kind, pointer_id = ev.pointer_id, "gesture ended");
                actions.push(g.lease.release());
            }
        }
        actions.push(Action::RenderNeeded);
        actions.extend(self.update_hover(world));
        actions
    }

    /// Abort the gesture bound to `pointer_id`. Objects keep their last
    /// transforms; an unfinished marquee selects nothing.
    pub fn on_pointer_cancel(&mut self, pointer_id: PointerId) -> Vec<Action> {
        if !self.input.accepts(pointer_id) {
            return Vec::new();
        }
        let mut actions = Vec::new();
        self.end_gesture(&mut actions);
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn on_key_down(&mut self, key: &Key, _modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        if key.is_escape() {
            self.end_gesture(&mut actions);
            self.replace_selection(Vec::new(), &mut actions);
            actions.push(Action::RenderNeeded);
        } else if key.is_delete() && !self.selection.is_empty() {
            self.end_gesture(&mut actions);
            let ids = self.selection.ids();
            tracing::debug!(count = ids.len(), "delete requested");
            actions.push(Action::DeleteRequested { ids });
            self.replace_selection(Vec::new(), &mut actions);
        }
        actions
    }

    // --- Internals ---

    fn is_double_click(&self, id: ObjectId, time_ms: f64) -> bool {
        self.last_click
            .is_some_and(|last| last.id == id && time_ms - last.time_ms <= self.config.double_click_ms)
    }

    fn begin_transform(
        &mut self,
        pointer_id: PointerId,
        kind: GestureKind,
        pivot: Point,
        start_world: Point,
        handle: Option<HandlePosition>,
        actions: &mut Vec<Action>,
    ) {
        let ids = self.selection.ids();
        let snapshot = InteractionSnapshot::capture(&self.scene, &ids, kind, pointer_id, pivot, start_world, handle);
        if snapshot.entries.is_empty() {
            return;
        }
        let (lease, capture) = PointerLease::acquire(pointer_id);
        actions.push(capture);
        tracing::debug!(?kind, pointer_id, objects = snapshot.entries.len(), "gesture started");
        self.input = InputState::transforming(lease, snapshot);

        let hint = match kind {
            GestureKind::Move => CursorHint::Move,
            GestureKind::Scale | GestureKind::Rotate => cursor_for(handle, false),
        };
        actions.extend(self.set_cursor(hint));
    }

    fn step_transform(&mut self, world: Point, modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.prune_selection(&mut actions) {
            return actions;
        }

        let min_scale = self.config.min_scale;
        let snap_deg = self.config.rotate_snap_deg;
        let (kind, touched) = match &mut self.input {
            InputState::Moving(g) => (GestureKind::Move, apply_move(&mut self.scene, &mut g.snapshot, world)),
            InputState::Scaling(g) => (
                GestureKind::Scale,
                apply_scale(&mut self.scene, &mut g.snapshot, world, modifiers.shift, min_scale),
            ),
            InputState::Rotating(g) => (
                GestureKind::Rotate,
                apply_rotate(&mut self.scene, &mut g.snapshot, world, modifiers.shift, snap_deg),
            ),
            InputState::Idle | InputState::Marqueeing { .. } => return actions,
        };

        if !touched.is_empty() {
            tracing::trace!(?kind, objects = touched.len(), x = world.x, y = world.y, "transform step");
            actions.push(Action::ObjectsTransformed { kind, ids: touched });
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Drop selected ids whose objects are gone. Returns true when that emptied
    /// the selection and ended a running gesture.
    fn prune_selection(&mut self, actions: &mut Vec<Action>) -> bool {
        if !self.selection.retain_live(&self.scene) {
            return false;
        }
        actions.push(Action::SelectionChanged(self.selection.ids()));
        actions.push(Action::RenderNeeded);
        if self.selection.is_empty() && !self.input.is_idle() {
            tracing::debug!("selection emptied mid-gesture; ending gesture");
            self.end_gesture(actions);
            return true;
        }
        false
    }

    /// Leave whatever gesture is running, releasing its pointer lease.
    fn end_gesture(&mut self, actions: &mut Vec<Action>) {
        match std::mem::take(&mut self.input) {
            InputState::Idle => {}
            InputState::Marqueeing { lease, .. } => {
                tracing::debug!(pointer_id = lease.pointer_id(), "marquee discarded");
                actions.push(lease.release());
            }
            InputState::Moving(g) | InputState::Scaling(g) | InputState::Rotating(g) => {
                tracing::debug!(kind = ?g.snapshot.kind, pointer_id = g.lease.pointer_id(), "gesture ended early");
                actions.push(g.lease.release());
            }
        }
    }

    fn replace_selection(&mut self, ids: Vec<ObjectId>, actions: &mut Vec<Action>) {
        let targets = ids.into_iter().map(SelectionTarget::new).collect();
        if self.selection.select(targets) {
            let ids = self.selection.ids();
            tracing::debug!(count = ids.len(), "selection changed");
            actions.push(Action::SelectionChanged(ids));
            actions.push(Action::RenderNeeded);
        }
    }

    fn toggle_target(&mut self, id: ObjectId, actions: &mut Vec<Action>) {
        if self.selection.toggle(SelectionTarget::new(id)) {
            let ids = self.selection.ids();
            tracing::debug!(%id, count = ids.len(), "selection toggled");
            actions.push(Action::SelectionChanged(ids));
            actions.push(Action::RenderNeeded);
        }
    }

    fn update_hover(&mut self, world: Point) -> Option<Action> {
        let handle = self.selection_group().and_then(|group| hit_test_handle(world, &group));
        let over_body = handle.is_none()
            && hit_test_object(world, &self.scene, self.config.background_size_threshold)
                .is_some_and(|id| self.selection.contains(&id));
        self.set_cursor(cursor_for(handle, over_body))
    }

    fn set_cursor(&mut self, hint: CursorHint) -> Option<Action> {
        if hint == self.cursor {
            return None;
        }
        self.cursor = hint;
        Some(Action::SetCursor(hint.as_css().to_owned()))
    }
}

impl<V: Viewport> EngineCore<DocStore, V> {
    /// Hydrate the scene from a host snapshot.
    pub fn load_snapshot(&mut self, objects: Vec<CanvasObject>) -> Vec<Action> {
        self.scene.load_snapshot(objects);
        self.sync_scene()
    }

    /// Apply a host-side object creation.
    pub fn apply_create(&mut self, object: CanvasObject) {
        self.scene.insert(object);
    }

    /// Apply a host-side partial update.
    pub fn apply_update(&mut self, id: &ObjectId, fields: &PartialCanvasObject) -> bool {
        self.scene.apply_partial(id, fields)
    }

    /// Apply a host-side deletion. Ends a running gesture if it leaves nothing selected.
    pub fn apply_delete(&mut self, id: &ObjectId) -> Vec<Action> {
        self.scene.remove(id);
        self.sync_scene()
    }

    /// Current transform fields of `ids`, for persisting after [`Action::ObjectsTransformed`].
    #[must_use]
    pub fn transform_fields(&self, ids: &[ObjectId]) -> Vec<(ObjectId, PartialCanvasObject)> {
        ids.iter()
            .filter_map(|id| self.scene.get(id).map(|obj| (*id, PartialCanvasObject::transform_of(obj))))
            .collect()
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the overlay canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
    viewport_width: f64,
    viewport_height: f64,
    dpr: f64,
}

impl Engine {
    /// Create a new engine bound to the given overlay canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, core: EngineCore::new(), viewport_width: 0.0, viewport_height: 0.0, dpr: 1.0 }
    }

    /// Replace the engine config from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns the config error message when the JSON is malformed or out of range.
    pub fn configure(&mut self, json: &str) -> Result<(), JsValue> {
        self.core.config = EngineConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(())
    }

    /// Hydrate the scene from a JSON array of objects.
    ///
    /// # Errors
    ///
    /// Returns the parse error message when the JSON doesn't describe objects.
    pub fn load_snapshot_json(&mut self, json: &str) -> Result<Vec<Action>, JsValue> {
        let objects: Vec<CanvasObject> = serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(self.core.load_snapshot(objects))
    }

    pub fn apply_create(&mut self, object: CanvasObject) {
        self.core.apply_create(object);
    }

    pub fn apply_update(&mut self, id: &ObjectId, fields: &PartialCanvasObject) -> bool {
        self.core.apply_update(id, fields)
    }

    pub fn apply_delete(&mut self, id: &ObjectId) -> Vec<Action> {
        let actions = self.core.apply_delete(id);
        self.apply_capture(&actions);
        actions
    }

    // --- Viewport ---

    pub fn set_camera(&mut self, camera: Camera) {
        self.core.viewport = camera;
    }

    /// Update viewport dimensions and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = dpr;
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, ev: PointerInput) -> Vec<Action> {
        let actions = self.core.on_pointer_down(ev);
        self.apply_capture(&actions);
        actions
    }

    pub fn on_pointer_move(&mut self, ev: PointerInput) -> Vec<Action> {
        let actions = self.core.on_pointer_move(ev);
        self.apply_capture(&actions);
        actions
    }

    pub fn on_pointer_up(&mut self, ev: PointerInput) -> Vec<Action> {
        let actions = self.core.on_pointer_up(ev);
        self.apply_capture(&actions);
        actions
    }

    pub fn on_pointer_cancel(&mut self, pointer_id: PointerId) -> Vec<Action> {
        let actions = self.core.on_pointer_cancel(pointer_id);
        self.apply_capture(&actions);
        actions
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        let actions = self.core.on_key_down(key, modifiers);
        self.apply_capture(&actions);
        actions
    }

    // --- Render ---

    /// Draw the selection overlay.
    pub fn render(&self) {
        if let Err(e) = self.try_render() {
            tracing::warn!(error = ?e, "overlay render failed");
        }
    }

    fn try_render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let group = self.core.selection_group();
        render::draw_overlay(
            &ctx,
            group.as_ref(),
            self.core.marquee(),
            &self.core.viewport,
            self.viewport_width,
            self.viewport_height,
            self.dpr,
        )
    }

    /// Mirror pointer lease changes onto DOM pointer capture.
    fn apply_capture(&self, actions: &[Action]) {
        for action in actions {
            let result = match action {
                Action::CapturePointer(id) => self.canvas.set_pointer_capture(*id),
                Action::ReleasePointer(id) => self.canvas.release_pointer_capture(*id),
                _ => continue,
            };
            if let Err(e) = result {
                tracing::warn!(error = ?e, "pointer capture change failed");
            }
        }
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selected_ids(&self) -> Vec<ObjectId> {
        self.core.selected_ids()
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.core.viewport
    }

    #[must_use]
    pub fn object(&self, id: &ObjectId) -> Option<&CanvasObject> {
        self.core.scene.get(id)
    }
}
