//! Selection and transform engine for the authoring canvas.
//!
//! This crate runs inside the canvas host (natively for tests, as WebAssembly in
//! the browser). It owns the lifecycle of a selection: resolving raw pointer
//! events against handles and scene objects, binding a gesture to one pointer,
//! snapshotting the selected objects, and applying move/scale/rotate transforms
//! that stay correct under any pan/zoom camera. The host owns the scene and
//! persists whatever the returned [`engine::Action`]s describe.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Browser-facing [`engine::Engine`] and testable [`engine::EngineCore`] |
//! | [`input`] | Pointer event types, pointer leases, and the gesture state enum |
//! | [`transform`] | Interaction snapshots and the move/scale/rotate appliers |
//! | [`selection`] | Selection set, derived selection group, handles, cursor hints |
//! | [`hit`] | Hit-testing against handles, objects, and marquee rectangles |
//! | [`scene`] | Capability traits the engine is written against |
//! | [`doc`] | In-memory scene store used by the browser bridge and tests |
//! | [`camera`] | Viewport trait and the pan/zoom camera |
//! | [`geometry`] | Points, rectangles, rotation, anchors, scale clamping, snapping |
//! | [`render`] | Selection overlay drawing |
//! | [`config`] | Engine tuning loaded from JSON |
//! | [`consts`] | Shared numeric constants (handle sizes, thresholds, etc.) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod render;
pub mod scene;
pub mod selection;
pub mod transform;
