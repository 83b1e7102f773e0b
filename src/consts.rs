//! Shared numeric constants for the selection engine.

// ── Handles ─────────────────────────────────────────────────────

/// Half-size of a square transform handle, in screen pixels.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

/// Distance from the top edge of the selection bounds to the rotate handle, in screen pixels.
pub const ROTATE_HANDLE_OFFSET_PX: f64 = 24.0;

/// Name prefix reserved for the engine's own overlay nodes. Hit-testing skips them.
pub const OVERLAY_NAME_PREFIX: &str = "__selection";

// ── Transforms ──────────────────────────────────────────────────

/// Smallest absolute scale an object may reach during a scale gesture.
pub const MIN_SCALE: f64 = 0.01;

/// Rotation snap increment in degrees when the snap modifier is held.
pub const ROTATE_SNAP_DEG: f64 = 15.0;

/// Reference-vector components below this magnitude fall back to a unit factor.
pub const NEAR_ZERO: f64 = 1e-9;

// ── Selection ───────────────────────────────────────────────────

/// Two clicks on the same object within this window count as a double-click.
pub const DOUBLE_CLICK_MS: f64 = 400.0;

/// Objects wider or taller than this (world units) are backgrounds, not selectable.
pub const BACKGROUND_SIZE_THRESHOLD: f64 = 10_000.0;
