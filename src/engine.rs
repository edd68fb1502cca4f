//! The editor: owns the state, the history and the scheduler, and answers the
//! manipulation library's gesture callbacks.
//!
//! Every handler runs to completion. Mutations of the state request a history
//! capture the way a state watcher would; render-start latches those requests
//! off for the live gesture and render-end asks for exactly one capture once
//! the gesture is over. Undo/redo restores a snapshot synchronously and
//! finishes re-targeting on the next tick, keeping capture latched off until
//! then.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::collections::HashMap;

use crate::config::EditorConfig;
use crate::consts::GUIDELINE_LIMIT;
use crate::doc::{Cloud, CloudId, EditorState};
use crate::geom::{Direction, Scale};
use crate::gesture::{
    ClickEvent, DragEvent, GesturePhase, RenderEndEvent, ResizeContext, ResizeEvent, ResizeStartEvent, RotateEvent,
};
use crate::guideline::nearest_clouds;
use crate::history::HistoryStack;
use crate::hooks::{HookEvent, HookRegistry};
use crate::manipulator::Manipulator;
use crate::scheduler::Scheduler;
use crate::selection::{difference, resolve_target, same_members};
use crate::surface::{NodeId, StylePatch, Surface};

/// Work the editor defers onto its scheduler.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    /// The history debounce window elapsed.
    CaptureHistory,
    /// Second half of an undo/redo: re-target the restored selection.
    FinishRestore { target_clouds: Vec<CloudId> },
}

pub struct Editor<S: Surface> {
    state: EditorState,
    /// Render tree the editor writes presentation to.
    pub surface: S,
    /// Per-object hook bindings.
    pub hooks: HookRegistry,
    manipulator: Manipulator,
    history: HistoryStack,
    scheduler: Scheduler<Task>,
    phase: GesturePhase,
    resizing: HashMap<NodeId, ResizeContext>,
    detail_select: Option<CloudId>,
}

impl<S: Surface> Editor<S> {
    /// Create an editor over `state`, targeting its current selection.
    ///
    /// Nothing is captured into history until the first [`Self::commit`].
    #[must_use]
    pub fn new(state: EditorState, surface: S, config: EditorConfig) -> Self {
        let mut editor = Self {
            state,
            surface,
            hooks: HookRegistry::new(),
            manipulator: Manipulator::new(),
            history: HistoryStack::new(config.max_history_stack, config.history_delay_ms),
            scheduler: Scheduler::new(),
            phase: GesturePhase::Idle,
            resizing: HashMap::new(),
            detail_select: None,
        };
        editor.manipulator.target = editor
            .state
            .target_clouds
            .iter()
            .filter_map(|id| editor.surface.node_for_cloud(id))
            .collect();
        let live: Vec<CloudId> =
            editor.manipulator.target.iter().filter_map(|node| editor.surface.cloud_id(node)).collect();
        editor.state.select_ids(&live);
        editor.refresh_options();
        editor
    }

    // --- Queries ---

    #[must_use]
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    #[must_use]
    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    #[must_use]
    pub fn manipulator(&self) -> &Manipulator {
        &self.manipulator
    }

    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Current virtual time of the editor's scheduler, in milliseconds.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    /// Cloud picked for detail editing inside the selection, if any.
    #[must_use]
    pub fn detail_select(&self) -> Option<&str> {
        self.detail_select.as_deref()
    }

    pub fn set_detail_select(&mut self, id: Option<CloudId>) {
        self.detail_select = id;
    }

    // --- Scheduling ---

    /// Let `ms` milliseconds pass, running every task that falls due.
    pub fn advance(&mut self, ms: u64) {
        let until = self.scheduler.now().saturating_add(ms);
        while let Some(task) = self.scheduler.pop_due(until) {
            self.run(task);
        }
        self.scheduler.settle(until);
    }

    /// Run the tasks deferred to the next tick.
    pub fn tick(&mut self) {
        self.advance(0);
    }

    fn run(&mut self, task: Task) {
        match task {
            Task::CaptureHistory => {
                if let Err(err) = self.history.capture(&self.state) {
                    tracing::warn!(error = %err, "history capture failed");
                }
            }
            Task::FinishRestore { target_clouds } => self.finish_restore(&target_clouds),
        }
    }

    // --- History ---

    /// Record that the state changed. Requests a debounced capture unless
    /// capture is latched off; returns whether the request was accepted.
    pub fn commit(&mut self) -> bool {
        self.history.push(&mut self.scheduler, Task::CaptureHistory)
    }

    /// Apply a host-side edit to the state, re-render and record it.
    pub fn edit(&mut self, f: impl FnOnce(&mut EditorState)) {
        f(&mut self.state);
        let selected = self.state.target_clouds.clone();
        self.state.select_ids(&selected);
        self.surface.sync_clouds(&self.state.clouds);
        self.surface.set_background(&self.state.background);

        let live: Vec<NodeId> = self
            .manipulator
            .target
            .iter()
            .filter(|node| self.surface.is_background(node) || self.surface.cloud_id(node).is_some())
            .cloned()
            .collect();
        if live.len() != self.manipulator.target.len() {
            self.set_target(live);
        }
        self.manipulator.update_rect(&self.state, &self.surface);
        self.commit();
    }

    /// Step one snapshot back. Returns false at the oldest snapshot.
    ///
    /// A capture still waiting out its debounce window is taken first, so the
    /// step lands on the snapshot before the latest edit.
    pub fn undo(&mut self) -> bool {
        self.tick();
        self.flush_pending_capture();
        match self.history.undo_index() {
            Some(index) => self.jump_to(index),
            None => false,
        }
    }

    /// Step one snapshot forward. Returns false at the present.
    pub fn redo(&mut self) -> bool {
        self.tick();
        self.flush_pending_capture();
        match self.history.redo_index() {
            Some(index) => self.jump_to(index),
            None => false,
        }
    }

    fn flush_pending_capture(&mut self) {
        if self.history.cancel_pending(&mut self.scheduler) {
            self.run(Task::CaptureHistory);
        }
    }

    /// Restore the snapshot at `index`. The state is replaced immediately; the
    /// selection is re-resolved on the next tick.
    ///
    /// Next-tick work still queued from an earlier restore runs first, so two
    /// restores never overlap.
    pub fn jump_to(&mut self, index: usize) -> bool {
        self.tick();
        let restored = match self.history.begin_restore(index) {
            Ok(state) => state,
            Err(err) => {
                tracing::warn!(error = %err, index, "history restore abandoned");
                return false;
            }
        };
        tracing::debug!(index, "history restore");

        let EditorState { scale, clouds, target_clouds, background } = restored;
        self.state.scale = scale;
        self.state.clouds = clouds;
        self.state.background = background;
        self.state.select_ids(&target_clouds);
        self.surface.sync_clouds(&self.state.clouds);
        self.surface.set_background(&self.state.background);
        self.commit();

        self.scheduler.defer(Task::FinishRestore { target_clouds });
        true
    }

    fn finish_restore(&mut self, target_clouds: &[CloudId]) {
        let target: Vec<NodeId> = target_clouds.iter().filter_map(|id| self.surface.node_for_cloud(id)).collect();
        if target.len() < target_clouds.len() {
            tracing::debug!(dropped = target_clouds.len() - target.len(), "restored selection had stale ids");
        }
        self.set_target(target);

        let live: Vec<CloudId> = self.manipulator.target.iter().filter_map(|node| self.surface.cloud_id(node)).collect();
        self.state.select_ids(&live);

        self.surface.refresh_rects(&self.state.clouds);
        self.manipulator.update_rect(&self.state, &self.surface);
        self.history.finish_restore();
    }

    // --- Selection ---

    /// Make `target` the active selection. An identical set (in any order) is
    /// a no-op.
    pub fn set_target(&mut self, target: Vec<NodeId>) {
        if same_members(&target, &self.manipulator.target) {
            return;
        }
        let old = std::mem::replace(&mut self.manipulator.target, target);

        let ids: Vec<CloudId> = self.manipulator.target.iter().filter_map(|node| self.surface.cloud_id(node)).collect();
        self.state.select_ids(&ids);
        self.detail_select = None;

        for node in difference(&old, &self.manipulator.target) {
            self.fire_node(&node, &HookEvent::LeaveTarget);
        }
        for node in difference(&self.manipulator.target, &old) {
            self.fire_node(&node, &HookEvent::EnterTarget);
        }
        let everyone: Vec<CloudId> = self.state.clouds.iter().map(|cloud| cloud.id.clone()).collect();
        for id in everyone {
            self.hooks.fire(&id, &HookEvent::ChangeTarget);
        }

        tracing::debug!(targets = self.manipulator.target.len(), "selection changed");
        self.refresh_options();
        self.commit();
    }

    /// Drop the selection entirely.
    pub fn clear_target(&mut self) {
        let old = std::mem::take(&mut self.manipulator.target);
        self.state.target_clouds.clear();
        for node in &old {
            self.fire_node(node, &HookEvent::LeaveTarget);
        }
        self.refresh_options();
        if !old.is_empty() {
            self.commit();
        }
    }

    /// Recompute the manipulator options that depend on the selection.
    pub fn refresh_options(&mut self) {
        self.manipulator.refresh_options(&self.state, &self.surface, &self.hooks);
        self.manipulator.update_rect(&self.state, &self.surface);
    }

    fn fire_node(&mut self, node: &str, event: &HookEvent<'_>) {
        if let Some(id) = self.surface.cloud_id(node) {
            self.hooks.fire(&id, event);
        }
    }

    fn update_guidelines(&mut self) {
        self.manipulator.update_rect(&self.state, &self.surface);
        let selected: Vec<CloudId> = self.manipulator.target.iter().filter_map(|node| self.surface.cloud_id(node)).collect();
        let rect = self.manipulator.rect();
        self.manipulator.element_guidelines = nearest_clouds(&rect, &self.state.clouds, &selected, GUIDELINE_LIMIT)
            .iter()
            .filter_map(|cloud| self.surface.node_for_cloud(&cloud.id))
            .collect();
    }

    // --- Gesture lifecycle ---

    pub fn on_render_start(&mut self) {
        self.tick();
        self.history.set_disabled(true);
        self.phase = GesturePhase::Active;
    }

    pub fn on_render_end(&mut self, event: RenderEndEvent) {
        self.history.set_disabled(false);
        if event.is_drag {
            self.commit();
        }
        self.phase = GesturePhase::Idle;
    }

    pub fn on_render_group_start(&mut self) {
        self.on_render_start();
    }

    pub fn on_render_group_end(&mut self, event: RenderEndEvent) {
        self.on_render_end(event);
    }

    // --- Drag ---

    pub fn on_drag(&mut self, event: &DragEvent) {
        self.surface.apply_style(&event.target, &StylePatch::position(event.top, event.left));

        let Some(id) = self.surface.cloud_id(&event.target) else {
            return;
        };
        let Some(cloud) = self.state.top_cloud_mut(&id) else {
            return;
        };
        cloud.top = event.top;
        cloud.left = event.left;

        self.update_guidelines();
        self.commit();
    }

    pub fn on_drag_group(&mut self, events: &[DragEvent]) {
        for event in events {
            self.on_drag(event);
        }
    }

    // --- Resize ---

    pub fn on_resize_start(&mut self, event: &ResizeStartEvent) {
        let Some(id) = self.surface.cloud_id(&event.target) else {
            tracing::debug!(node = %event.target, "resize start on unknown node");
            return;
        };
        let Some(cloud) = self.state.find_cloud(&id) else {
            return;
        };
        let direction = Direction::from_vector(event.direction);
        let context = ResizeContext {
            cloud_id: id.clone(),
            start_width: cloud.width,
            start_height: cloud.height,
            is_group: cloud.is_group(),
            direction,
            scale: Scale::IDENTITY,
        };

        self.manipulator.keep_ratio = self.hooks.keeps_ratio(&id, direction);
        self.resizing.insert(event.target.clone(), context);
        self.hooks.fire(&id, &HookEvent::ResizeStart { direction });
    }

    pub fn on_resize_group_start(&mut self, events: &[ResizeStartEvent]) {
        for event in events {
            self.on_resize_start(event);
        }
        self.manipulator.keep_ratio = true;
    }

    pub fn on_resize(&mut self, event: &ResizeEvent) {
        let Some(context) = self.resizing.get_mut(&event.target) else {
            tracing::debug!(node = %event.target, "resize without start");
            return;
        };
        context.scale = Scale::between(context.start_width, context.start_height, event.width, event.height);
        let id = context.cloud_id.clone();
        let is_group = context.is_group;
        let scale = context.scale;

        self.surface.apply_style(&event.target, &StylePatch::size(event.width, event.height));
        if let Some(cloud) = self.state.find_cloud_mut(&id) {
            cloud.width = event.width;
            cloud.height = event.height;
        }
        // Children are only scaled visually until the gesture ends.
        if is_group {
            self.surface.set_content_scale(&event.target, Some(scale));
        }

        self.hooks.fire(&id, &HookEvent::Resize { width: event.width, height: event.height });
        self.on_drag(&event.drag);
    }

    pub fn on_resize_group(&mut self, events: &[ResizeEvent]) {
        for event in events {
            self.on_resize(event);
        }
    }

    /// Finish the resize of `target`: bake a group's visual scale into its
    /// children's geometry and drop the gesture context.
    pub fn on_resize_end(&mut self, target: &str) {
        let Some(context) = self.resizing.remove(target) else {
            return;
        };

        if context.is_group {
            self.surface.set_content_scale(target, None);
            let mut leaves = Vec::new();
            if let Some(children) = self
                .state
                .find_cloud_mut(&context.cloud_id)
                .and_then(|cloud| cloud.clouds.as_deref_mut())
            {
                scale_children(children, context.scale, &mut self.surface, &mut leaves);
            }
            for id in leaves {
                self.hooks.fire(&id, &HookEvent::ResizeEndInGroup { scale: context.scale });
            }
        }

        let end = HookEvent::ResizeEnd { scale: context.scale, direction: context.direction };
        self.hooks.fire(&context.cloud_id, &end);
        self.commit();
    }

    pub fn on_resize_group_end(&mut self, targets: &[NodeId]) {
        for target in targets {
            self.on_resize_end(target);
        }
    }

    // --- Rotate ---

    pub fn on_rotate(&mut self, event: &RotateEvent) {
        self.surface.apply_style(&event.target, &StylePatch::transform(event.transform.clone()));

        let Some(id) = self.surface.cloud_id(&event.target) else {
            return;
        };
        let Some(cloud) = self.state.top_cloud_mut(&id) else {
            return;
        };
        cloud.transform.clone_from(&event.transform);
        cloud.rotate = event.absolute_rotate;
        self.commit();
    }

    pub fn on_rotate_group(&mut self, events: &[RotateEvent]) {
        for event in events {
            self.on_rotate(event);
        }
    }

    // --- Click ---

    pub fn on_click(&mut self, event: &ClickEvent) {
        if let Some(target) = resolve_target(&self.state, &self.surface, &self.manipulator.target, &event.input) {
            self.set_target(target);
        }
        self.detail_select = None;

        let clicked = self
            .surface
            .top_cloud_node(&event.input.target)
            .and_then(|node| self.surface.cloud_id(&node));
        if let Some(id) = clicked {
            self.hooks.fire(&id, &HookEvent::Click(&event.input));
        }
    }

    pub fn on_click_group(&mut self, event: &ClickEvent) {
        self.on_click(event);
    }
}

/// Multiply the geometry of `clouds` and all their descendants by `scale`,
/// writing presentation as it goes. Leaf ids are collected in walk order.
fn scale_children<S: Surface>(clouds: &mut [Cloud], scale: Scale, surface: &mut S, leaves: &mut Vec<CloudId>) {
    for cloud in clouds {
        cloud.scale_by(scale);
        if let Some(node) = surface.node_for_cloud(&cloud.id) {
            surface.apply_style(&node, &StylePatch::rect(cloud));
        }
        match cloud.clouds.as_deref_mut() {
            Some(children) => scale_children(children, scale, surface, leaves),
            None => leaves.push(cloud.id.clone()),
        }
    }
}
