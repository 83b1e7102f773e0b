use uuid::Uuid;

use super::*;
use crate::camera::Camera;
use crate::doc::{CanvasObject, DocStore, ObjectKind};

// =============================================================
// Helpers
// =============================================================

fn target() -> SelectionTarget {
    SelectionTarget::new(Uuid::new_v4())
}

/// Insert an object covering `[x, y, w, h]` and return its id.
fn add(doc: &mut DocStore, kind: ObjectKind, x: f64, y: f64, w: f64, h: f64) -> ObjectId {
    let obj = CanvasObject::new(Uuid::new_v4(), kind, x + w / 2.0, y + h / 2.0, w, h);
    let id = obj.id;
    doc.insert(obj);
    id
}

fn selection_of(ids: &[ObjectId]) -> Selection {
    let mut selection = Selection::new();
    selection.select(ids.iter().copied().map(SelectionTarget::new).collect());
    selection
}

// =============================================================
// Selection
// =============================================================

#[test]
fn new_selection_is_empty() {
    let selection = Selection::new();
    assert!(selection.is_empty());
    assert_eq!(selection.len(), 0);
    assert!(selection.ids().is_empty());
}

#[test]
fn select_replaces_and_reports_change() {
    let (a, b) = (target(), target());
    let mut selection = Selection::new();
    assert!(selection.select(vec![a]));
    assert!(selection.select(vec![b]));
    assert_eq!(selection.targets(), &[b]);
    assert!(!selection.select(vec![b]));
}

#[test]
fn select_collapses_duplicates() {
    let (a, b) = (target(), target());
    let mut selection = Selection::new();
    selection.select(vec![a, b, a, b]);
    assert_eq!(selection.targets(), &[a, b]);
}

#[test]
fn select_empty_clears() {
    let mut selection = Selection::new();
    selection.select(vec![target()]);
    assert!(selection.select(Vec::new()));
    assert!(selection.is_empty());
}

#[test]
fn toggle_adds_then_removes() {
    let (a, b) = (target(), target());
    let mut selection = Selection::new();
    selection.select(vec![a]);
    assert!(selection.toggle(b));
    assert_eq!(selection.targets(), &[a, b]);
    assert!(selection.toggle(a));
    assert_eq!(selection.targets(), &[b]);
    assert!(selection.toggle(b));
    assert!(selection.is_empty());
}

#[test]
fn clear_reports_whether_anything_was_selected() {
    let mut selection = Selection::new();
    assert!(!selection.clear());
    selection.select(vec![target()]);
    assert!(selection.clear());
    assert!(selection.is_empty());
}

#[test]
fn contains_and_is_sole() {
    let (a, b) = (target(), target());
    let mut selection = Selection::new();
    selection.select(vec![a]);
    assert!(selection.contains(&a.id));
    assert!(selection.is_sole(&a.id));
    selection.toggle(b);
    assert!(!selection.is_sole(&a.id));
    assert!(!selection.contains(&Uuid::new_v4()));
}

#[test]
fn retain_live_drops_missing_objects() {
    let mut doc = DocStore::new();
    let live = add(&mut doc, ObjectKind::Shape, 0.0, 0.0, 10.0, 10.0);
    let gone = Uuid::new_v4();
    let mut selection = selection_of(&[live, gone]);

    assert!(selection.retain_live(&doc));
    assert_eq!(selection.ids(), vec![live]);
    assert!(!selection.retain_live(&doc));
}

// =============================================================
// Cursors
// =============================================================

#[test]
fn cursor_for_handles() {
    assert_eq!(cursor_for(Some(HandlePosition::Nw), false), CursorHint::NwseResize);
    assert_eq!(cursor_for(Some(HandlePosition::Se), true), CursorHint::NwseResize);
    assert_eq!(cursor_for(Some(HandlePosition::Ne), false), CursorHint::NeswResize);
    assert_eq!(cursor_for(Some(HandlePosition::Sw), false), CursorHint::NeswResize);
    assert_eq!(cursor_for(Some(HandlePosition::E), false), CursorHint::EwResize);
    assert_eq!(cursor_for(Some(HandlePosition::N), false), CursorHint::NsResize);
    assert_eq!(cursor_for(Some(HandlePosition::Rotate), false), CursorHint::Rotate);
}

#[test]
fn cursor_for_body_and_empty() {
    assert_eq!(cursor_for(None, true), CursorHint::Move);
    assert_eq!(cursor_for(None, false), CursorHint::Default);
}

#[test]
fn cursor_css_values() {
    assert_eq!(CursorHint::Default.as_css(), "default");
    assert_eq!(CursorHint::Move.as_css(), "move");
    assert_eq!(CursorHint::NeswResize.as_css(), "nesw-resize");
    assert_eq!(CursorHint::Rotate.as_css(), "grab");
}

// =============================================================
// SelectionGroup
// =============================================================

#[test]
fn group_of_empty_selection_is_none() {
    let doc = DocStore::new();
    let group = SelectionGroup::compute(&Selection::new(), &doc, &Camera::default(), &EngineConfig::default());
    assert!(group.is_none());
}

#[test]
fn group_of_only_dead_targets_is_none() {
    let doc = DocStore::new();
    let selection = selection_of(&[Uuid::new_v4()]);
    assert!(SelectionGroup::compute(&selection, &doc, &Camera::default(), &EngineConfig::default()).is_none());
}

#[test]
fn group_bounds_union_all_objects() {
    let mut doc = DocStore::new();
    let a = add(&mut doc, ObjectKind::Shape, 0.0, 0.0, 10.0, 10.0);
    let b = add(&mut doc, ObjectKind::Stroke, 40.0, 20.0, 10.0, 30.0);
    let group =
        SelectionGroup::compute(&selection_of(&[a, b]), &doc, &Camera::default(), &EngineConfig::default()).unwrap();

    assert_eq!(group.objects, vec![a, b]);
    assert_eq!(group.bounds, Rect::new(0.0, 0.0, 50.0, 50.0));
    assert_eq!(group.outline, group.bounds);
    assert_eq!(group.center(), Point::new(25.0, 25.0));
}

#[test]
fn group_has_eight_handles_and_rotate() {
    let mut doc = DocStore::new();
    let a = add(&mut doc, ObjectKind::Shape, 0.0, 0.0, 100.0, 60.0);
    let group =
        SelectionGroup::compute(&selection_of(&[a]), &doc, &Camera::default(), &EngineConfig::default()).unwrap();

    assert_eq!(group.handles.len(), 8);
    assert_eq!(group.handles.iter().filter(|h| h.kind == HandleKind::Corner).count(), 4);
    let se = group.handle(HandlePosition::Se).unwrap();
    assert_eq!(se.center, Point::new(100.0, 60.0));
    assert_eq!(se.hit_rect, Rect::new(92.0, 52.0, 16.0, 16.0));
    assert_eq!(se.cursor, CursorHint::NwseResize);

    let rotate = group.handle(HandlePosition::Rotate).unwrap();
    assert_eq!(rotate.center, Point::new(50.0, -24.0));
    assert_eq!(rotate.kind, HandleKind::Rotate);
}

#[test]
fn group_handles_shrink_in_world_space_as_zoom_grows() {
    let mut doc = DocStore::new();
    let a = add(&mut doc, ObjectKind::Shape, 0.0, 0.0, 100.0, 100.0);
    let camera = Camera { pan_x: 30.0, pan_y: -10.0, zoom: 2.0 };
    let group = SelectionGroup::compute(&selection_of(&[a]), &doc, &camera, &EngineConfig::default()).unwrap();

    let nw = group.handle(HandlePosition::Nw).unwrap();
    assert_eq!(nw.hit_rect, Rect::new(-4.0, -4.0, 8.0, 8.0));
    let rotate = group.handle(HandlePosition::Rotate).unwrap();
    assert_eq!(rotate.center, Point::new(50.0, -12.0));
}

#[test]
fn group_with_text_has_outline_only() {
    let mut doc = DocStore::new();
    let shape = add(&mut doc, ObjectKind::Shape, 0.0, 0.0, 10.0, 10.0);
    let text = add(&mut doc, ObjectKind::Text, 20.0, 0.0, 40.0, 10.0);
    let group = SelectionGroup::compute(&selection_of(&[shape, text]), &doc, &Camera::default(), &EngineConfig::default())
        .unwrap();

    assert!(group.handles.is_empty());
    assert!(group.rotate_handle.is_none());
    assert!(group.handle(HandlePosition::Se).is_none());
    assert_eq!(group.outline, Rect::new(0.0, 0.0, 60.0, 10.0));
}

#[test]
fn group_skips_dead_targets() {
    let mut doc = DocStore::new();
    let a = add(&mut doc, ObjectKind::Shape, 0.0, 0.0, 10.0, 10.0);
    let group = SelectionGroup::compute(
        &selection_of(&[Uuid::new_v4(), a]),
        &doc,
        &Camera::default(),
        &EngineConfig::default(),
    )
    .unwrap();
    assert_eq!(group.objects, vec![a]);
}

#[test]
fn group_honors_config_handle_size() {
    let mut doc = DocStore::new();
    let a = add(&mut doc, ObjectKind::Shape, 0.0, 0.0, 100.0, 100.0);
    let config = EngineConfig { handle_radius_px: 4.0, rotate_handle_offset_px: 40.0, ..EngineConfig::default() };
    let group = SelectionGroup::compute(&selection_of(&[a]), &doc, &Camera::default(), &config).unwrap();

    assert_eq!(group.handle(HandlePosition::Nw).unwrap().hit_rect, Rect::new(-4.0, -4.0, 8.0, 8.0));
    assert_eq!(group.handle(HandlePosition::Rotate).unwrap().center, Point::new(50.0, -40.0));
}
