//! Selection resolution: turning a pointer event into the next target set.
//!
//! Resolution is pure; applying the result (hooks, derived manipulator state,
//! history) is done by [`crate::engine::Editor::set_target`].

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use std::collections::HashSet;

use crate::doc::EditorState;
use crate::gesture::PointerEvent;
use crate::surface::{NodeId, Surface};

/// Compute the selection that `event` produces from `current`.
///
/// `None` means "leave the selection as it is": the pointer hit a node that
/// belongs to no cloud, or an additive click was refused.
#[must_use]
pub fn resolve_target<S: Surface>(
    state: &EditorState,
    surface: &S,
    current: &[NodeId],
    event: &PointerEvent,
) -> Option<Vec<NodeId>> {
    let on_background = surface.is_background(&event.target);
    let target = if on_background {
        event.target.clone()
    } else {
        let Some(node) = surface.top_cloud_node(&event.target) else {
            tracing::debug!(node = %event.target, "pointer target belongs to no cloud");
            return None;
        };
        node
    };

    if !event.modifiers.additive() {
        return Some(vec![target]);
    }

    if on_background {
        return None;
    }
    if current.first().is_some_and(|first| surface.is_background(first)) {
        return Some(vec![target]);
    }

    let is_locked = |node: &str| {
        surface
            .cloud_id(node)
            .and_then(|id| state.find_cloud(&id))
            .map(|cloud| cloud.lock)
    };

    // Locked clouds never join a multi-selection.
    match is_locked(target.as_str()) {
        None | Some(true) => return None,
        Some(false) => {}
    }
    if current.first().is_some_and(|first| is_locked(first.as_str()) == Some(true)) {
        return None;
    }

    let mut next = current.to_vec();
    if let Some(index) = next.iter().position(|node| *node == target) {
        next.remove(index);
    } else {
        next.push(target);
    }
    Some(next)
}

/// Order-insensitive equality of two target sets.
#[must_use]
pub fn same_members(a: &[NodeId], b: &[NodeId]) -> bool {
    let a: HashSet<&NodeId> = a.iter().collect();
    let b: HashSet<&NodeId> = b.iter().collect();
    a == b
}

/// Members of `a` that are not in `b`, in `a` order.
#[must_use]
pub fn difference(a: &[NodeId], b: &[NodeId]) -> Vec<NodeId> {
    a.iter().filter(|node| !b.contains(node)).cloned().collect()
}
