//! Single-threaded cooperative task queue with a virtual millisecond clock.
//!
//! The editor runs every handler to completion. The only deferred work is
//! queued here: debounced history captures (`set_timeout`) and post-restore
//! continuations (`defer`). Tasks run in `(due, enqueue order)` order, so a
//! deferred continuation always runs after the synchronous effects of the
//! call that queued it and before anything queued later.

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod scheduler_test;

/// Handle to a scheduled task, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Scheduled<T> {
    id: TimerId,
    due: u64,
    task: T,
}

#[derive(Debug)]
pub struct Scheduler<T> {
    now: u64,
    next_id: u64,
    queue: Vec<Scheduled<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self { now: 0, next_id: 0, queue: Vec::new() }
    }
}

impl<T> Scheduler<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Number of tasks waiting to run.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Whether `id` is still waiting to run.
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.queue.iter().any(|s| s.id == id)
    }

    /// Schedule `task` to run `delay_ms` from now.
    pub fn set_timeout(&mut self, delay_ms: u64, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.queue.push(Scheduled { id, due: self.now.saturating_add(delay_ms), task });
        id
    }

    /// Schedule `task` for the next tick.
    pub fn defer(&mut self, task: T) -> TimerId {
        self.set_timeout(0, task)
    }

    /// Cancel a pending task. Returns false if it already ran or was cancelled.
    pub fn clear_timeout(&mut self, id: TimerId) -> bool {
        let before = self.queue.len();
        self.queue.retain(|s| s.id != id);
        self.queue.len() != before
    }

    /// Remove and return the earliest task due at or before `until`, moving
    /// the clock forward to its due time.
    pub fn pop_due(&mut self, until: u64) -> Option<T> {
        let index = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due <= until)
            .min_by_key(|(_, s)| (s.due, s.id.0))
            .map(|(i, _)| i)?;
        let scheduled = self.queue.remove(index);
        self.now = self.now.max(scheduled.due);
        Some(scheduled.task)
    }

    /// Move the clock to `until` once every due task has been drained.
    pub fn settle(&mut self, until: u64) {
        self.now = self.now.max(until);
    }
}
