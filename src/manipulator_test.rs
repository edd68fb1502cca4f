#![allow(clippy::float_cmp)]

use super::*;
use crate::geom::Point;
use crate::hooks::MoveableHooks;
use crate::surface::MemorySurface;

fn fixture() -> (EditorState, MemorySurface) {
    let state = EditorState::new(vec![
        Cloud::with_id("a", 0.0, 0.0, 10.0, 10.0),
        Cloud::with_id("b", 20.0, 30.0, 10.0, 10.0),
        Cloud::with_id("locked", 50.0, 50.0, 5.0, 5.0).locked(),
    ]);
    let surface = MemorySurface::from_clouds(&state.clouds);
    (state, surface)
}

fn targeting(nodes: &[&str]) -> Manipulator {
    Manipulator { target: nodes.iter().map(|n| (*n).to_owned()).collect(), ..Manipulator::new() }
}

#[test]
fn update_rect_unions_target_clouds() {
    let (state, surface) = fixture();
    let mut m = targeting(&["cloud:a", "cloud:b"]);
    m.update_rect(&state, &surface);
    assert_eq!(m.rect().pos1, Point::new(0.0, 0.0));
    assert_eq!(m.rect().pos4, Point::new(40.0, 30.0));
}

#[test]
fn update_rect_of_background_is_empty() {
    let (state, surface) = fixture();
    let mut m = targeting(&["background"]);
    m.update_rect(&state, &surface);
    assert_eq!(m.rect(), Quad::empty());
}

#[test]
fn unlocked_single_target_enables_everything() {
    let (state, surface) = fixture();
    let mut m = targeting(&["cloud:a"]);
    m.refresh_options(&state, &surface, &HookRegistry::new());
    assert!(m.draggable && m.resizable && m.rotatable && m.origin);
    assert!(!m.pass_drag_area);
    assert_eq!(m.render_directions, DEFAULT_RENDER_DIRECTIONS.to_vec());
    assert_eq!(m.class_name, "");
}

#[test]
fn single_target_uses_declared_render_directions() {
    let (state, surface) = fixture();
    let mut hooks = HookRegistry::new();
    hooks.bind("a", MoveableHooks { render_directions: Some(vec![Direction::E, Direction::W]), ..Default::default() });
    let mut m = targeting(&["cloud:a"]);
    m.refresh_options(&state, &surface, &hooks);
    assert_eq!(m.render_directions, vec![Direction::E, Direction::W]);
}

#[test]
fn multi_target_uses_group_directions() {
    let (state, surface) = fixture();
    let mut m = targeting(&["cloud:a", "cloud:b"]);
    m.refresh_options(&state, &surface, &HookRegistry::new());
    assert_eq!(m.render_directions, GROUP_RENDER_DIRECTIONS.to_vec());
}

#[test]
fn locked_first_target_disables_gestures_and_marks_class() {
    let (state, surface) = fixture();
    let mut m = targeting(&["cloud:locked"]);
    m.refresh_options(&state, &surface, &HookRegistry::new());
    assert!(!m.draggable && !m.resizable && !m.rotatable);
    assert!(m.pass_drag_area);
    assert_eq!(m.class_name, LOCK_CLASS);
}

#[test]
fn background_target_passes_drag_area() {
    let (state, surface) = fixture();
    let mut m = targeting(&["background"]);
    m.refresh_options(&state, &surface, &HookRegistry::new());
    assert!(!m.draggable);
    assert!(m.pass_drag_area);
    assert_eq!(m.class_name, "");
}

#[test]
fn empty_target_leaves_options_alone() {
    let (state, surface) = fixture();
    let mut m = Manipulator { draggable: true, ..Manipulator::new() };
    m.refresh_options(&state, &surface, &HookRegistry::new());
    assert!(m.draggable);
}
