use super::*;

#[test]
fn modifiers_additive_with_ctrl_or_shift() {
    assert!(!Modifiers::default().additive());
    assert!(Modifiers { ctrl: true, shift: false }.additive());
    assert!(Modifiers { ctrl: false, shift: true }.additive());
}

#[test]
fn pointer_event_builders_set_modifiers() {
    let ev = PointerEvent::new("cloud:a").with_shift();
    assert_eq!(ev.target, "cloud:a");
    assert!(ev.modifiers.shift);
    assert!(!ev.modifiers.ctrl);
    assert!(PointerEvent::new("x").with_ctrl().modifiers.additive());
}

#[test]
fn pointer_event_deserializes_flat_modifiers() {
    let ev: PointerEvent = serde_json::from_str(r#"{"target":"cloud:a","ctrl":true}"#).unwrap();
    assert_eq!(ev, PointerEvent::new("cloud:a").with_ctrl());
    let plain: PointerEvent = serde_json::from_str(r#"{"target":"background"}"#).unwrap();
    assert!(!plain.modifiers.additive());
}

#[test]
fn default_phase_is_idle() {
    assert_eq!(GesturePhase::default(), GesturePhase::Idle);
}
