//! Per-object lifecycle hooks.
//!
//! Object authors bind a [`MoveableHooks`] record to a cloud id. Every field
//! is optional and an unbound cloud simply has [`ObjectHooks::None`]; the core
//! only ever reaches hooks through [`HookRegistry::moveable`] or
//! [`HookRegistry::fire`], which treat absence as a no-op.

#[cfg(test)]
#[path = "hooks_test.rs"]
mod hooks_test;

use std::collections::HashMap;
use std::fmt;

use crate::doc::CloudId;
use crate::geom::{Direction, Scale};
use crate::gesture::PointerEvent;

/// Payload handed to a hook.
#[derive(Debug, Clone, PartialEq)]
pub enum HookEvent<'a> {
    EnterTarget,
    LeaveTarget,
    ChangeTarget,
    Click(&'a PointerEvent),
    ResizeStart { direction: Option<Direction> },
    Resize { width: f64, height: f64 },
    ResizeEnd { scale: Scale, direction: Option<Direction> },
    ResizeEndInGroup { scale: Scale },
}

pub type Hook = Box<dyn FnMut(&HookEvent<'_>)>;

/// Manipulation hooks and declarative options for one cloud.
#[derive(Default)]
pub struct MoveableHooks {
    /// Resize handles to show when this cloud is the only target.
    pub render_directions: Option<Vec<Direction>>,
    /// Handles on which resizing keeps the aspect ratio.
    pub keep_ratio: Vec<Direction>,
    pub on_enter_target: Option<Hook>,
    pub on_leave_target: Option<Hook>,
    pub on_change_target: Option<Hook>,
    pub on_click: Option<Hook>,
    pub on_resize_start: Option<Hook>,
    pub on_resize: Option<Hook>,
    pub on_resize_end: Option<Hook>,
    pub on_resize_end_in_group: Option<Hook>,
}

impl fmt::Debug for MoveableHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoveableHooks")
            .field("render_directions", &self.render_directions)
            .field("keep_ratio", &self.keep_ratio)
            .finish_non_exhaustive()
    }
}

impl MoveableHooks {
    fn slot(&mut self, event: &HookEvent<'_>) -> Option<&mut Hook> {
        match event {
            HookEvent::EnterTarget => self.on_enter_target.as_mut(),
            HookEvent::LeaveTarget => self.on_leave_target.as_mut(),
            HookEvent::ChangeTarget => self.on_change_target.as_mut(),
            HookEvent::Click(_) => self.on_click.as_mut(),
            HookEvent::ResizeStart { .. } => self.on_resize_start.as_mut(),
            HookEvent::Resize { .. } => self.on_resize.as_mut(),
            HookEvent::ResizeEnd { .. } => self.on_resize_end.as_mut(),
            HookEvent::ResizeEndInGroup { .. } => self.on_resize_end_in_group.as_mut(),
        }
    }
}

/// Hook capability of one cloud.
#[derive(Debug, Default)]
pub enum ObjectHooks {
    Moveable(MoveableHooks),
    #[default]
    None,
}

/// Hook bindings keyed by cloud id.
#[derive(Debug, Default)]
pub struct HookRegistry {
    bindings: HashMap<CloudId, ObjectHooks>,
}

impl HookRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `hooks` to cloud `id`, replacing any previous binding.
    pub fn bind(&mut self, id: impl Into<CloudId>, hooks: MoveableHooks) {
        self.bindings.insert(id.into(), ObjectHooks::Moveable(hooks));
    }

    /// Detach the hooks of `id`. The cloud stays registered as hook-less.
    pub fn unbind(&mut self, id: &str) {
        if let Some(binding) = self.bindings.get_mut(id) {
            *binding = ObjectHooks::None;
        }
    }

    /// The moveable hooks bound to `id`, if any.
    #[must_use]
    pub fn moveable(&self, id: &str) -> Option<&MoveableHooks> {
        match self.bindings.get(id) {
            Some(ObjectHooks::Moveable(hooks)) => Some(hooks),
            Some(ObjectHooks::None) | None => None,
        }
    }

    fn moveable_mut(&mut self, id: &str) -> Option<&mut MoveableHooks> {
        match self.bindings.get_mut(id) {
            Some(ObjectHooks::Moveable(hooks)) => Some(hooks),
            Some(ObjectHooks::None) | None => None,
        }
    }

    /// Invoke the hook of `id` matching `event`. Returns whether one ran.
    pub fn fire(&mut self, id: &str, event: &HookEvent<'_>) -> bool {
        let Some(hook) = self.moveable_mut(id).and_then(|hooks| hooks.slot(event)) else {
            return false;
        };
        hook(event);
        true
    }

    /// Whether resizing `id` from `direction` keeps the aspect ratio.
    #[must_use]
    pub fn keeps_ratio(&self, id: &str, direction: Option<Direction>) -> bool {
        let Some(direction) = direction else {
            return false;
        };
        self.moveable(id).is_some_and(|hooks| hooks.keep_ratio.contains(&direction))
    }
}
