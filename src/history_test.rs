#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::Cloud;

fn state_with_top(top: f64) -> EditorState {
    EditorState::new(vec![Cloud::with_id("obj1", top, 0.0, 10.0, 10.0)])
}

fn top_of(state: &EditorState) -> f64 {
    state.clouds[0].top
}

/// Request a push and let the debounce window elapse.
fn push_settled(history: &mut HistoryStack, scheduler: &mut Scheduler<()>, state: &EditorState) {
    history.push(scheduler, ());
    let until = scheduler.now() + history.delay_ms();
    while scheduler.pop_due(until).is_some() {
        history.capture(state).unwrap();
    }
    scheduler.settle(until);
}

fn decoded_top(history: &HistoryStack, index: usize) -> f64 {
    top_of(&history.get(index).unwrap().decode().unwrap())
}

#[test]
fn default_stack_is_empty_and_unbounded() {
    let history = HistoryStack::default();
    assert!(history.is_empty());
    assert_eq!(history.pointer(), 0);
    assert_eq!(history.delay_ms(), 500);
    assert_eq!(history.capacity(), None);
    assert!(!history.is_disabled());
}

#[test]
fn empty_stack_has_no_undo_or_redo() {
    let history = HistoryStack::default();
    assert_eq!(history.undo_index(), None);
    assert_eq!(history.redo_index(), None);
}

#[test]
fn pushes_within_window_coalesce() {
    let mut history = HistoryStack::default();
    let mut scheduler = Scheduler::new();
    for _ in 0..5 {
        history.push(&mut scheduler, ());
        let until = scheduler.now() + 100;
        assert!(scheduler.pop_due(until).is_none());
        scheduler.settle(until);
    }
    assert_eq!(scheduler.pending(), 1);
    assert!(history.has_pending(&scheduler));
    // The surviving timer was armed by the last call at t=400.
    assert!(scheduler.pop_due(899).is_none());
    assert!(scheduler.pop_due(900).is_some());
}

#[test]
fn cancel_pending_disarms_the_timer() {
    let mut history = HistoryStack::default();
    let mut scheduler = Scheduler::new();
    assert!(!history.cancel_pending(&mut scheduler));
    history.push(&mut scheduler, ());
    assert!(history.cancel_pending(&mut scheduler));
    assert!(!history.has_pending(&scheduler));
    assert!(scheduler.pop_due(10_000).is_none());
}

#[test]
fn push_is_dropped_while_disabled() {
    let mut history = HistoryStack::default();
    let mut scheduler = Scheduler::new();
    history.set_disabled(true);
    assert!(!history.push(&mut scheduler, ()));
    assert_eq!(scheduler.pending(), 0);
    history.set_disabled(false);
    assert!(scheduler.pop_due(10_000).is_none());
}

#[test]
fn length_is_bounded_by_capacity() {
    let mut history = HistoryStack::new(Some(3), 500);
    let mut scheduler = Scheduler::new();
    for n in 0..7u32 {
        push_settled(&mut history, &mut scheduler, &state_with_top(f64::from(n)));
        assert_eq!(history.len(), usize::try_from(n + 1).unwrap().min(3));
    }
    assert_eq!(decoded_top(&history, 0), 6.0);
    assert_eq!(decoded_top(&history, 2), 4.0);
}

#[test]
fn unbounded_stack_keeps_every_push() {
    let mut history = HistoryStack::default();
    let mut scheduler = Scheduler::new();
    for n in 0..20u32 {
        push_settled(&mut history, &mut scheduler, &state_with_top(f64::from(n)));
    }
    assert_eq!(history.len(), 20);
    assert_eq!(decoded_top(&history, 0), 19.0);
}

#[test]
fn undo_and_redo_indices_follow_pointer() {
    let mut history = HistoryStack::default();
    let mut scheduler = Scheduler::new();
    push_settled(&mut history, &mut scheduler, &state_with_top(0.0));
    push_settled(&mut history, &mut scheduler, &state_with_top(10.0));

    assert_eq!(history.undo_index(), Some(1));
    assert_eq!(history.redo_index(), None);

    let restored = history.begin_restore(1).unwrap();
    assert_eq!(top_of(&restored), 0.0);
    assert_eq!(history.pointer(), 1);
    assert!(history.is_disabled());
    history.finish_restore();

    assert_eq!(history.undo_index(), None);
    assert_eq!(history.redo_index(), Some(0));
}

#[test]
fn capture_after_undo_discards_redo_branch() {
    let mut history = HistoryStack::default();
    let mut scheduler = Scheduler::new();
    push_settled(&mut history, &mut scheduler, &state_with_top(0.0));
    push_settled(&mut history, &mut scheduler, &state_with_top(10.0));
    push_settled(&mut history, &mut scheduler, &state_with_top(20.0));

    history.begin_restore(1).unwrap();
    history.finish_restore();
    push_settled(&mut history, &mut scheduler, &state_with_top(99.0));

    assert_eq!(history.pointer(), 0);
    assert_eq!(history.len(), 3);
    assert_eq!(decoded_top(&history, 0), 99.0);
    assert_eq!(decoded_top(&history, 1), 10.0);
    assert_eq!(decoded_top(&history, 2), 0.0);
    assert_eq!(history.redo_index(), None);
}

#[test]
fn corrupt_snapshot_abandons_restore() {
    let mut history = HistoryStack::default();
    history.stacks.push_front(HistorySnapshot::from_text("{not json"));
    history.stacks.push_front(HistorySnapshot::encode(&state_with_top(1.0)).unwrap());

    let err = history.begin_restore(1).unwrap_err();
    assert!(matches!(err, HistoryError::Decode(_)));
    assert_eq!(history.pointer(), 0);
    assert!(!history.is_disabled());
}

#[test]
fn missing_snapshot_is_reported() {
    let mut history = HistoryStack::default();
    assert!(matches!(history.begin_restore(3), Err(HistoryError::Missing(3))));
}

#[test]
fn snapshot_text_round_trips() {
    let state = state_with_top(7.0);
    let snapshot = HistorySnapshot::encode(&state).unwrap();
    assert!(snapshot.as_str().contains("\"targetClouds\""));
    assert_eq!(snapshot.decode().unwrap(), state);
}
