use super::*;

fn drain(s: &mut Scheduler<&'static str>, until: u64) -> Vec<&'static str> {
    let mut out = Vec::new();
    while let Some(task) = s.pop_due(until) {
        out.push(task);
    }
    s.settle(until);
    out
}

#[test]
fn tasks_run_in_due_order() {
    let mut s = Scheduler::new();
    s.set_timeout(30, "late");
    s.set_timeout(10, "early");
    assert_eq!(drain(&mut s, 100), vec!["early", "late"]);
    assert_eq!(s.now(), 100);
}

#[test]
fn same_due_runs_in_enqueue_order() {
    let mut s = Scheduler::new();
    s.defer("first");
    s.defer("second");
    s.set_timeout(0, "third");
    assert_eq!(drain(&mut s, 0), vec!["first", "second", "third"]);
}

#[test]
fn tasks_after_horizon_stay_queued() {
    let mut s = Scheduler::new();
    s.set_timeout(500, "capture");
    assert!(drain(&mut s, 499).is_empty());
    assert_eq!(s.pending(), 1);
    assert_eq!(drain(&mut s, 500), vec!["capture"]);
}

#[test]
fn delays_are_relative_to_current_time() {
    let mut s = Scheduler::new();
    drain(&mut s, 1000);
    s.set_timeout(10, "x");
    assert!(drain(&mut s, 1009).is_empty());
    assert_eq!(drain(&mut s, 1010), vec!["x"]);
}

#[test]
fn clear_timeout_cancels_only_once() {
    let mut s = Scheduler::new();
    let id = s.set_timeout(5, "x");
    assert!(s.is_pending(id));
    assert!(s.clear_timeout(id));
    assert!(!s.clear_timeout(id));
    assert!(!s.is_pending(id));
    assert!(drain(&mut s, 10).is_empty());
}

#[test]
fn pop_due_advances_clock_to_task() {
    let mut s = Scheduler::new();
    s.set_timeout(7, "x");
    assert_eq!(s.pop_due(100), Some("x"));
    assert_eq!(s.now(), 7);
}
