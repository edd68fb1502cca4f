//! Undo/redo history over serialized editor snapshots.
//!
//! DESIGN
//! ======
//! `stacks[0]` is the most recent snapshot; `pointer` counts how many steps
//! back from the present the editor is showing. Captures are debounced on the
//! editor's scheduler: every `push` cancels the pending capture and schedules a
//! new one, so a burst of edits materializes as one snapshot of the settled
//! state.
//!
//! Restoring a snapshot mutates the state, which would normally request a
//! capture. `disable` latches capture off for the duration of a restore (and of
//! a live gesture); requests made while it is set are dropped, not queued.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;

use crate::consts::DEFAULT_HISTORY_DELAY_MS;
use crate::doc::EditorState;
use crate::scheduler::{Scheduler, TimerId};

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("no snapshot at history index {0}")]
    Missing(usize),
    #[error("snapshot encode failed: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("snapshot decode failed: {0}")]
    Decode(#[source] serde_json::Error),
}

/// An immutable serialized [`EditorState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistorySnapshot(String);

impl HistorySnapshot {
    /// Serialize `state`.
    pub fn encode(state: &EditorState) -> Result<Self, HistoryError> {
        serde_json::to_string(state).map(Self).map_err(HistoryError::Encode)
    }

    /// Wrap already-serialized text.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Rebuild the state this snapshot was taken from.
    pub fn decode(&self) -> Result<EditorState, HistoryError> {
        serde_json::from_str(&self.0).map_err(HistoryError::Decode)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug)]
pub struct HistoryStack {
    stacks: VecDeque<HistorySnapshot>,
    pointer: usize,
    disable: bool,
    delay_ms: u64,
    capacity: Option<usize>,
    timer: Option<TimerId>,
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new(None, DEFAULT_HISTORY_DELAY_MS)
    }
}

impl HistoryStack {
    /// `capacity` of `None` keeps every snapshot.
    #[must_use]
    pub fn new(capacity: Option<usize>, delay_ms: u64) -> Self {
        Self { stacks: VecDeque::new(), pointer: 0, disable: false, delay_ms, capacity, timer: None }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    #[must_use]
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disable
    }

    /// Latch capture off (`true`) or back on (`false`).
    pub fn set_disabled(&mut self, disable: bool) {
        self.disable = disable;
    }

    #[must_use]
    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// The snapshot at `index` (0 = most recent).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&HistorySnapshot> {
        self.stacks.get(index)
    }

    /// Whether a debounced capture is waiting on `scheduler`.
    #[must_use]
    pub fn has_pending<T>(&self, scheduler: &Scheduler<T>) -> bool {
        self.timer.is_some_and(|id| scheduler.is_pending(id))
    }

    /// Request a debounced capture. `task` is what the scheduler hands back
    /// when the window elapses; the owner answers it with [`Self::capture`].
    ///
    /// Returns false when capture is latched off.
    pub fn push<T>(&mut self, scheduler: &mut Scheduler<T>, task: T) -> bool {
        if self.disable {
            tracing::trace!("history push suppressed");
            return false;
        }
        if let Some(pending) = self.timer.take() {
            scheduler.clear_timeout(pending);
        }
        self.timer = Some(scheduler.set_timeout(self.delay_ms, task));
        true
    }

    /// Cancel a waiting debounced capture. Returns whether one was waiting.
    pub fn cancel_pending<T>(&mut self, scheduler: &mut Scheduler<T>) -> bool {
        self.timer.take().is_some_and(|id| scheduler.clear_timeout(id))
    }

    /// Store `state` as the newest snapshot, dropping any abandoned redo
    /// branch and evicting the oldest entry past capacity.
    pub fn capture(&mut self, state: &EditorState) -> Result<(), HistoryError> {
        self.timer = None;
        let snapshot = HistorySnapshot::encode(state)?;

        if self.pointer > 0 {
            self.stacks.drain(..self.pointer);
        }
        self.stacks.push_front(snapshot);
        self.pointer = 0;

        if let Some(capacity) = self.capacity {
            while self.stacks.len() > capacity {
                self.stacks.pop_back();
            }
        }
        tracing::debug!(depth = self.stacks.len(), "history captured");
        Ok(())
    }

    /// Index one step further into the past, if there is one.
    #[must_use]
    pub fn undo_index(&self) -> Option<usize> {
        let next = self.pointer + 1;
        (next < self.stacks.len()).then_some(next)
    }

    /// Index one step toward the present, if there is one.
    #[must_use]
    pub fn redo_index(&self) -> Option<usize> {
        self.pointer.checked_sub(1).filter(|next| *next < self.stacks.len())
    }

    /// Decode the snapshot at `index`, move the cursor there and latch capture
    /// off. A missing or corrupt snapshot leaves the stack untouched.
    ///
    /// The caller applies the returned state and calls [`Self::finish_restore`]
    /// once its deferred re-sync has run.
    pub fn begin_restore(&mut self, index: usize) -> Result<EditorState, HistoryError> {
        let snapshot = self.stacks.get(index).ok_or(HistoryError::Missing(index))?;
        let state = snapshot.decode()?;
        self.pointer = index;
        self.disable = true;
        Ok(state)
    }

    /// Re-enable capture after a restore.
    pub fn finish_restore(&mut self) {
        self.disable = false;
    }
}
