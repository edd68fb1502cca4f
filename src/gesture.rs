//! Gesture model: the payloads the manipulation library reports, the
//! per-target context a resize carries from start to end, and the lifecycle
//! phase tracked between render-start and render-end.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use serde::{Deserialize, Serialize};

use crate::doc::CloudId;
use crate::geom::{Direction, Scale};
use crate::surface::NodeId;

/// Keyboard modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
}

impl Modifiers {
    /// Whether the event asks for additive/toggle selection.
    #[must_use]
    pub fn additive(self) -> bool {
        self.ctrl || self.shift
    }
}

/// A raw pointer-down/click event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// The literal node under the pointer.
    pub target: NodeId,
    #[serde(flatten)]
    pub modifiers: Modifiers,
}

impl PointerEvent {
    #[must_use]
    pub fn new(target: impl Into<NodeId>) -> Self {
        Self { target: target.into(), modifiers: Modifiers::default() }
    }

    #[must_use]
    pub fn with_ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }
}

/// One drag frame for one target.
#[derive(Debug, Clone, PartialEq)]
pub struct DragEvent {
    pub target: NodeId,
    pub top: f64,
    pub left: f64,
}

/// Start of a resize on one target.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeStartEvent {
    pub target: NodeId,
    /// Handle vector, `[-1..=1, -1..=1]`.
    pub direction: [i8; 2],
}

/// One resize frame for one target. `drag` carries the top/left the handle
/// moved the box to.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeEvent {
    pub target: NodeId,
    pub width: f64,
    pub height: f64,
    pub drag: DragEvent,
}

/// One rotate frame for one target.
#[derive(Debug, Clone, PartialEq)]
pub struct RotateEvent {
    pub target: NodeId,
    /// Presentation transform string reported by the manipulator.
    pub transform: String,
    /// Absolute rotation in degrees.
    pub absolute_rotate: f64,
}

/// End of a render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderEndEvent {
    /// The pointer actually moved during the gesture. Clicking the drag area
    /// opens and closes a render cycle without moving anything.
    pub is_drag: bool,
}

/// A click on the manipulation surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickEvent {
    pub input: PointerEvent,
}

/// Per-target working data of one resize gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeContext {
    /// Cloud being resized; its hooks are looked up through this id.
    pub cloud_id: CloudId,
    pub start_width: f64,
    pub start_height: f64,
    /// The target is a group whose children scale with it.
    pub is_group: bool,
    pub direction: Option<Direction>,
    /// Latest `(new / start)` factors.
    pub scale: Scale,
}

/// Lifecycle phase of the manipulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Between render-start and render-end; per-frame mutations must not
    /// reach history.
    Active,
}
