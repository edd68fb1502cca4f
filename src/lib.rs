//! Interaction core of the sky canvas editor.
//!
//! The core sits between an external manipulation library (which detects
//! drag, resize, rotate and click gestures on rendered nodes) and the editor
//! state. It turns gesture callbacks into state mutations, decides what is
//! selected, offers snap guidelines, and keeps a debounced undo/redo history
//! of the whole state. Rendering is behind the [`surface::Surface`] trait.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::Editor`]: gesture handlers, selection, undo/redo |
//! | [`history`] | Snapshot stack with debounced capture and the restore latch |
//! | [`scheduler`] | Virtual-clock task queue backing debounce and next-tick work |
//! | [`selection`] | Pointer event to target set resolution |
//! | [`guideline`] | Nearest-cloud snap references |
//! | [`manipulator`] | Options the core writes into the manipulation library |
//! | [`hooks`] | Per-cloud manipulation hooks |
//! | [`gesture`] | Gesture event payloads and lifecycle phase |
//! | [`surface`] | Render-tree boundary and the in-memory surface |
//! | [`doc`] | Editor state and cloud types |
//! | [`geom`] | Points, quads, scale factors and handle directions |
//! | [`config`] | Environment-driven editor configuration |
//! | [`replay`] | Headless scripted sessions |
//! | [`consts`] | Shared constants (debounce window, handle sets, etc.) |

pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod geom;
pub mod gesture;
pub mod guideline;
pub mod history;
pub mod hooks;
pub mod manipulator;
pub mod replay;
pub mod scheduler;
pub mod selection;
pub mod surface;
