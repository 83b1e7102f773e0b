//! Input model: pointer events, modifier keys, pointer leases, and the gesture state machine.
//!
//! `PointerInput` and `Modifiers` capture the user's intent at the time of a
//! pointer event. `InputState` is the single source of truth for what gesture
//! is in progress; every non-idle variant owns the [`PointerLease`] of the
//! pointer that started it, so a gesture can't exist without its binding and
//! the binding can't outlive the gesture.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::engine::Action;
use crate::geometry::{Point, Rect};
use crate::transform::{GestureKind, InteractionSnapshot};

/// Host pointer identifier (the DOM `pointerId`).
pub type PointerId = i32;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held. Toggles selection on click, locks uniform scale on
    /// corner handles, and snaps rotation.
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    #[must_use]
    pub fn any(self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Button {
    /// Left mouse button, pen contact, or single-finger touch.
    #[default]
    Primary,
    Middle,
    Secondary,
}

impl Button {
    /// Map a DOM `PointerEvent.button` value.
    #[must_use]
    pub fn from_dom(button: i16) -> Self {
        match button {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// A keyboard key as reported by the browser (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn is_delete(&self) -> bool {
        matches!(self.0.as_str(), "Delete" | "Backspace")
    }

    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape"
    }
}

/// One pointer event forwarded by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub pointer_id: PointerId,
    /// Position in screen space (CSS pixels relative to the canvas).
    pub screen: Point,
    pub button: Button,
    pub modifiers: Modifiers,
    /// Event timestamp in milliseconds, used for double-click detection.
    pub time_ms: f64,
}

impl PointerInput {
    /// Primary-button event with no modifiers at time zero.
    #[must_use]
    pub fn primary(pointer_id: PointerId, screen: Point) -> Self {
        Self { pointer_id, screen, button: Button::Primary, modifiers: Modifiers::default(), time_ms: 0.0 }
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn at_time(mut self, time_ms: f64) -> Self {
        self.time_ms = time_ms;
        self
    }
}

/// Exclusive binding of a gesture to one pointer.
///
/// Acquiring emits [`Action::CapturePointer`] so the host routes the pointer's
/// events to the engine even outside the canvas; [`PointerLease::release`]
/// consumes the lease and yields the matching [`Action::ReleasePointer`].
#[derive(Debug, PartialEq, Eq)]
#[must_use]
pub struct PointerLease {
    pointer_id: PointerId,
}

impl PointerLease {
    /// Take the lease for `pointer_id`, along with the action telling the host to capture it.
    pub fn acquire(pointer_id: PointerId) -> (Self, Action) {
        (Self { pointer_id }, Action::CapturePointer(pointer_id))
    }

    #[must_use]
    pub fn pointer_id(&self) -> PointerId {
        self.pointer_id
    }

    /// Whether `pointer_id` is the pointer this lease is bound to.
    #[must_use]
    pub fn owns(&self, pointer_id: PointerId) -> bool {
        self.pointer_id == pointer_id
    }

    /// End the binding.
    #[must_use]
    pub fn release(self) -> Action {
        Action::ReleasePointer(self.pointer_id)
    }
}

/// An in-progress transform gesture.
#[derive(Debug)]
pub struct Gesture {
    pub lease: PointerLease,
    pub snapshot: InteractionSnapshot,
}

/// The gesture state machine. Exactly one state is current.
#[derive(Debug, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Dragging a selection rectangle over empty canvas.
    Marqueeing {
        lease: PointerLease,
        /// World-space drag origin.
        start_world: Point,
        /// World-space current pointer position.
        current_world: Point,
    },
    /// Translating the selection.
    Moving(Gesture),
    /// Scaling the selection from a corner or edge handle.
    Scaling(Gesture),
    /// Rotating the selection about its center.
    Rotating(Gesture),
}

impl InputState {
    /// Wrap a captured snapshot in the state matching its kind.
    #[must_use]
    pub fn transforming(lease: PointerLease, snapshot: InteractionSnapshot) -> Self {
        let kind = snapshot.kind;
        let gesture = Gesture { lease, snapshot };
        match kind {
            GestureKind::Move => Self::Moving(gesture),
            GestureKind::Scale => Self::Scaling(gesture),
            GestureKind::Rotate => Self::Rotating(gesture),
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The lease held by the current gesture, if any.
    #[must_use]
    pub fn lease(&self) -> Option<&PointerLease> {
        match self {
            Self::Idle => None,
            Self::Marqueeing { lease, .. } => Some(lease),
            Self::Moving(g) | Self::Scaling(g) | Self::Rotating(g) => Some(&g.lease),
        }
    }

    /// Whether events from `pointer_id` belong to the current gesture.
    #[must_use]
    pub fn accepts(&self, pointer_id: PointerId) -> bool {
        self.lease().is_some_and(|lease| lease.owns(pointer_id))
    }

    /// The live marquee rectangle in world space.
    #[must_use]
    pub fn marquee(&self) -> Option<Rect> {
        match self {
            Self::Marqueeing { start_world, current_world, .. } => Some(Rect::from_corners(*start_world, *current_world)),
            _ => None,
        }
    }

    /// The live snapshot, if a transform gesture is running.
    #[must_use]
    pub fn snapshot(&self) -> Option<&InteractionSnapshot> {
        match self {
            Self::Moving(g) | Self::Scaling(g) | Self::Rotating(g) => Some(&g.snapshot),
            _ => None,
        }
    }
}
