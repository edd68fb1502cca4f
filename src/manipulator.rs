//! Options the core writes into the external manipulation library.
//!
//! The library itself (gesture detection, handle drawing, snapping) lives
//! outside this crate. [`Manipulator`] holds the state the core controls:
//! the active target, which gestures are enabled, handle layout, snap
//! guidelines and the cached bounding rect of the target.

#[cfg(test)]
#[path = "manipulator_test.rs"]
mod manipulator_test;

use crate::consts::{DEFAULT_RENDER_DIRECTIONS, GROUP_RENDER_DIRECTIONS, LOCK_CLASS};
use crate::doc::{Cloud, EditorState};
use crate::geom::{Direction, Quad};
use crate::hooks::HookRegistry;
use crate::surface::{NodeId, Surface};

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq)]
pub struct Manipulator {
    /// Active target nodes, in selection order.
    pub target: Vec<NodeId>,
    pub draggable: bool,
    pub resizable: bool,
    pub rotatable: bool,
    pub origin: bool,
    pub render_directions: Vec<Direction>,
    /// Let pointer events fall through the drag area to whatever is below.
    pub pass_drag_area: bool,
    pub class_name: String,
    pub keep_ratio: bool,
    /// Nodes offered as snap references.
    pub element_guidelines: Vec<NodeId>,
    rect: Quad,
}

impl Default for Manipulator {
    fn default() -> Self {
        Self {
            target: Vec::new(),
            draggable: false,
            resizable: false,
            rotatable: false,
            origin: false,
            render_directions: DEFAULT_RENDER_DIRECTIONS.to_vec(),
            pass_drag_area: true,
            class_name: String::new(),
            keep_ratio: false,
            element_guidelines: Vec::new(),
            rect: Quad::empty(),
        }
    }
}

impl Manipulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached bounding rect of the target, as of the last [`Self::update_rect`].
    #[must_use]
    pub fn rect(&self) -> Quad {
        self.rect
    }

    /// Recompute the bounding rect of the target clouds.
    pub fn update_rect<S: Surface>(&mut self, state: &EditorState, surface: &S) {
        self.rect = self
            .target_clouds(state, surface)
            .iter()
            .map(|cloud| cloud.quad())
            .reduce(|acc, q| acc.union(&q))
            .unwrap_or_else(Quad::empty);
    }

    /// The clouds behind the target nodes; background and unknown nodes are skipped.
    #[must_use]
    pub fn target_clouds<'a, S: Surface>(&self, state: &'a EditorState, surface: &S) -> Vec<&'a Cloud> {
        self.target
            .iter()
            .filter_map(|node| surface.cloud_id(node))
            .filter_map(|id| state.find_cloud(&id))
            .collect()
    }

    /// Derive gesture availability and handle layout from the first target.
    pub fn refresh_options<S: Surface>(&mut self, state: &EditorState, surface: &S, hooks: &HookRegistry) {
        let Some(first) = self.target.first() else {
            return;
        };
        let first_cloud = surface.cloud_id(first).and_then(|id| state.find_cloud(&id));
        // Background and unknown nodes are not moveable.
        let moveable = first_cloud.is_some_and(|cloud| !cloud.lock);

        self.draggable = moveable;
        self.resizable = moveable;
        self.rotatable = moveable;
        self.origin = moveable;

        if let Some(cloud) = first_cloud {
            self.render_directions = if self.target.len() > 1 {
                GROUP_RENDER_DIRECTIONS.to_vec()
            } else {
                hooks
                    .moveable(&cloud.id)
                    .and_then(|h| h.render_directions.clone())
                    .unwrap_or_else(|| DEFAULT_RENDER_DIRECTIONS.to_vec())
            };
            self.pass_drag_area = !moveable;
        } else {
            self.pass_drag_area = true;
        }

        self.class_name = if first_cloud.is_some_and(|cloud| cloud.lock) {
            LOCK_CLASS.to_owned()
        } else {
            String::new()
        };
    }
}
