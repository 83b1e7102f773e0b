use uuid::Uuid;

use super::*;
use crate::camera::Camera;
use crate::config::EngineConfig;
use crate::doc::{CanvasObject, DocStore, ObjectKind};
use crate::selection::{Selection, SelectionTarget};

// =============================================================
// Helpers
// =============================================================

/// Object covering `[x, y, w, h]` in world space.
fn object_at(x: f64, y: f64, w: f64, h: f64) -> CanvasObject {
    CanvasObject::new(Uuid::new_v4(), ObjectKind::Shape, x + w / 2.0, y + h / 2.0, w, h)
}

fn insert(doc: &mut DocStore, mut obj: CanvasObject, z: i64) -> ObjectId {
    obj.z_index = z;
    let id = obj.id;
    doc.insert(obj);
    id
}

fn group_for(doc: &DocStore, ids: &[ObjectId], camera: &Camera) -> SelectionGroup {
    let mut selection = Selection::new();
    selection.select(ids.iter().copied().map(SelectionTarget::new).collect());
    SelectionGroup::compute(&selection, doc, camera, &EngineConfig::default()).unwrap()
}

const THRESHOLD: f64 = 10_000.0;

// =============================================================
// HandlePosition
// =============================================================

#[test]
fn handle_kinds() {
    for pos in HandlePosition::CORNERS {
        assert_eq!(pos.kind(), HandleKind::Corner);
        assert!(pos.controls_x() && pos.controls_y());
    }
    for pos in HandlePosition::EDGES {
        assert_eq!(pos.kind(), HandleKind::Edge);
    }
    assert_eq!(HandlePosition::Rotate.kind(), HandleKind::Rotate);
}

#[test]
fn edge_handles_control_one_axis() {
    assert!(HandlePosition::E.controls_x() && !HandlePosition::E.controls_y());
    assert!(HandlePosition::W.controls_x() && !HandlePosition::W.controls_y());
    assert!(!HandlePosition::N.controls_x() && HandlePosition::N.controls_y());
    assert!(!HandlePosition::S.controls_x() && HandlePosition::S.controls_y());
    assert!(!HandlePosition::Rotate.controls_x() && !HandlePosition::Rotate.controls_y());
}

#[test]
fn handle_locations_on_bounds() {
    let b = Rect::new(0.0, 0.0, 100.0, 50.0);
    assert_eq!(HandlePosition::Nw.location(&b, 24.0), Point::new(0.0, 0.0));
    assert_eq!(HandlePosition::E.location(&b, 24.0), Point::new(100.0, 25.0));
    assert_eq!(HandlePosition::S.location(&b, 24.0), Point::new(50.0, 50.0));
    assert_eq!(HandlePosition::Rotate.location(&b, 24.0), Point::new(50.0, -24.0));
}

// =============================================================
// hit_test_handle
// =============================================================

#[test]
fn handle_hit_at_each_corner() {
    let mut doc = DocStore::new();
    let id = insert(&mut doc, object_at(0.0, 0.0, 100.0, 100.0), 0);
    let group = group_for(&doc, &[id], &Camera::default());

    assert_eq!(hit_test_handle(Point::new(0.0, 0.0), &group), Some(HandlePosition::Nw));
    assert_eq!(hit_test_handle(Point::new(102.0, -3.0), &group), Some(HandlePosition::Ne));
    assert_eq!(hit_test_handle(Point::new(100.0, 100.0), &group), Some(HandlePosition::Se));
    assert_eq!(hit_test_handle(Point::new(-5.0, 105.0), &group), Some(HandlePosition::Sw));
}

#[test]
fn handle_hit_on_edges_and_rotate() {
    let mut doc = DocStore::new();
    let id = insert(&mut doc, object_at(0.0, 0.0, 100.0, 100.0), 0);
    let group = group_for(&doc, &[id], &Camera::default());

    assert_eq!(hit_test_handle(Point::new(50.0, 0.0), &group), Some(HandlePosition::N));
    assert_eq!(hit_test_handle(Point::new(100.0, 50.0), &group), Some(HandlePosition::E));
    assert_eq!(hit_test_handle(Point::new(50.0, -24.0), &group), Some(HandlePosition::Rotate));
}

#[test]
fn handle_miss_inside_body() {
    let mut doc = DocStore::new();
    let id = insert(&mut doc, object_at(0.0, 0.0, 100.0, 100.0), 0);
    let group = group_for(&doc, &[id], &Camera::default());
    assert_eq!(hit_test_handle(Point::new(50.0, 50.0), &group), None);
}

#[test]
fn handle_size_is_constant_in_screen_pixels() {
    let mut doc = DocStore::new();
    let id = insert(&mut doc, object_at(0.0, 0.0, 100.0, 100.0), 0);
    let zoomed = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 4.0 };
    let group = group_for(&doc, &[id], &zoomed);

    // 8px at zoom 4 is 2 world units.
    assert_eq!(hit_test_handle(Point::new(101.5, 101.5), &group), Some(HandlePosition::Se));
    assert_eq!(hit_test_handle(Point::new(103.0, 103.0), &group), None);
}

#[test]
fn corner_wins_over_edge_on_tiny_selection() {
    let mut doc = DocStore::new();
    let id = insert(&mut doc, object_at(0.0, 0.0, 4.0, 4.0), 0);
    let group = group_for(&doc, &[id], &Camera::default());
    // (4, 1) is inside the Nw, Ne and E rects; corners are tested first.
    assert_eq!(hit_test_handle(Point::new(4.0, 1.0), &group).map(HandlePosition::kind), Some(HandleKind::Corner));
}

#[test]
fn text_selection_has_no_handles_to_hit() {
    let mut doc = DocStore::new();
    let mut text = object_at(0.0, 0.0, 100.0, 40.0);
    text.kind = ObjectKind::Text;
    let id = insert(&mut doc, text, 0);
    let group = group_for(&doc, &[id], &Camera::default());
    assert_eq!(hit_test_handle(Point::new(0.0, 0.0), &group), None);
    assert_eq!(hit_test_handle(Point::new(50.0, -24.0), &group), None);
}

// =============================================================
// hit_test_object
// =============================================================

#[test]
fn object_hit_prefers_topmost() {
    let mut doc = DocStore::new();
    let bottom = insert(&mut doc, object_at(0.0, 0.0, 100.0, 100.0), 0);
    let top = insert(&mut doc, object_at(50.0, 50.0, 100.0, 100.0), 1);

    assert_eq!(hit_test_object(Point::new(75.0, 75.0), &doc, THRESHOLD), Some(top));
    assert_eq!(hit_test_object(Point::new(10.0, 10.0), &doc, THRESHOLD), Some(bottom));
    assert_eq!(hit_test_object(Point::new(500.0, 500.0), &doc, THRESHOLD), None);
}

#[test]
fn object_hit_skips_hidden_locked_and_overlay() {
    let mut doc = DocStore::new();
    let under = insert(&mut doc, object_at(0.0, 0.0, 100.0, 100.0), 0);

    let mut hidden = object_at(0.0, 0.0, 100.0, 100.0);
    hidden.visible = false;
    insert(&mut doc, hidden, 1);

    let mut locked = object_at(0.0, 0.0, 100.0, 100.0);
    locked.locked = true;
    insert(&mut doc, locked, 2);

    let mut overlay = object_at(0.0, 0.0, 100.0, 100.0);
    overlay.name = "__selection_outline".into();
    insert(&mut doc, overlay, 3);

    assert_eq!(hit_test_object(Point::new(50.0, 50.0), &doc, THRESHOLD), Some(under));
}

#[test]
fn object_hit_skips_backgrounds() {
    let mut doc = DocStore::new();
    insert(&mut doc, object_at(-10_000.0, -50.0, 20_001.0, 100.0), 5);
    assert_eq!(hit_test_object(Point::new(0.0, 0.0), &doc, THRESHOLD), None);
}

// =============================================================
// hit_test_marquee
// =============================================================

#[test]
fn marquee_selects_intersecting_objects() {
    let mut doc = DocStore::new();
    let a = insert(&mut doc, object_at(0.0, 0.0, 10.0, 10.0), 0);
    let b = insert(&mut doc, object_at(20.0, 20.0, 10.0, 10.0), 1);
    insert(&mut doc, object_at(100.0, 100.0, 10.0, 10.0), 2);

    let hits = hit_test_marquee(&Rect::new(0.0, 0.0, 35.0, 35.0), &doc, THRESHOLD);
    assert_eq!(hits, vec![a, b]);
}

#[test]
fn marquee_counts_partial_overlap() {
    let mut doc = DocStore::new();
    let a = insert(&mut doc, object_at(30.0, 30.0, 50.0, 50.0), 0);
    let hits = hit_test_marquee(&Rect::new(0.0, 0.0, 31.0, 31.0), &doc, THRESHOLD);
    assert_eq!(hits, vec![a]);
}

#[test]
fn marquee_empty_when_nothing_overlaps() {
    let mut doc = DocStore::new();
    insert(&mut doc, object_at(100.0, 100.0, 10.0, 10.0), 0);
    assert!(hit_test_marquee(&Rect::new(0.0, 0.0, 50.0, 50.0), &doc, THRESHOLD).is_empty());
}

#[test]
fn marquee_skips_unpickable() {
    let mut doc = DocStore::new();
    let mut locked = object_at(0.0, 0.0, 10.0, 10.0);
    locked.locked = true;
    insert(&mut doc, locked, 0);
    assert!(hit_test_marquee(&Rect::new(0.0, 0.0, 50.0, 50.0), &doc, THRESHOLD).is_empty());
}
