use std::cell::RefCell;
use std::rc::Rc;

use super::*;

fn recorder() -> (Rc<RefCell<Vec<String>>>, impl Fn(&'static str) -> Hook) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let make = move |name: &'static str| -> Hook {
        let sink = Rc::clone(&sink);
        Box::new(move |_event: &HookEvent<'_>| sink.borrow_mut().push(name.to_owned()))
    };
    (log, make)
}

#[test]
fn fire_dispatches_to_matching_slot() {
    let (log, hook) = recorder();
    let mut registry = HookRegistry::new();
    registry.bind(
        "a",
        MoveableHooks {
            on_enter_target: Some(hook("enter")),
            on_resize: Some(hook("resize")),
            ..Default::default()
        },
    );

    assert!(registry.fire("a", &HookEvent::EnterTarget));
    assert!(registry.fire("a", &HookEvent::Resize { width: 1.0, height: 2.0 }));
    assert!(!registry.fire("a", &HookEvent::LeaveTarget));
    assert_eq!(*log.borrow(), vec!["enter".to_owned(), "resize".to_owned()]);
}

#[test]
fn unbound_cloud_is_a_silent_no_op() {
    let mut registry = HookRegistry::new();
    assert!(!registry.fire("ghost", &HookEvent::ChangeTarget));
    assert!(registry.moveable("ghost").is_none());
}

#[test]
fn unbind_removes_hooks() {
    let (log, hook) = recorder();
    let mut registry = HookRegistry::new();
    registry.bind("a", MoveableHooks { on_change_target: Some(hook("change")), ..Default::default() });
    registry.unbind("a");
    assert!(!registry.fire("a", &HookEvent::ChangeTarget));
    assert!(log.borrow().is_empty());
}

#[test]
fn hooks_receive_the_event_payload() {
    let seen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);
    let mut registry = HookRegistry::new();
    registry.bind(
        "a",
        MoveableHooks {
            on_resize_end_in_group: Some(Box::new(move |event: &HookEvent<'_>| {
                if let HookEvent::ResizeEndInGroup { scale } = event {
                    *sink.borrow_mut() = Some(*scale);
                }
            })),
            ..Default::default()
        },
    );
    registry.fire("a", &HookEvent::ResizeEndInGroup { scale: Scale { x: 2.0, y: 0.5 } });
    assert_eq!(*seen.borrow(), Some(Scale { x: 2.0, y: 0.5 }));
}

#[test]
fn keeps_ratio_matches_declared_directions() {
    let mut registry = HookRegistry::new();
    registry.bind("a", MoveableHooks { keep_ratio: vec![Direction::Se, Direction::Nw], ..Default::default() });
    assert!(registry.keeps_ratio("a", Some(Direction::Se)));
    assert!(!registry.keeps_ratio("a", Some(Direction::E)));
    assert!(!registry.keeps_ratio("a", None));
    assert!(!registry.keeps_ratio("b", Some(Direction::Se)));
}
