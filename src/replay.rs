//! Headless replay of a scripted editing session against [`MemorySurface`].
//!
//! A script is a JSON document `{ "state": EditorState, "steps": [Step] }`.
//! Every gesture step runs through the full render-start / render-end
//! lifecycle, so the history records exactly what an interactive session
//! would.

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::EditorConfig;
use crate::consts::BACKGROUND_NODE;
use crate::doc::{Cloud, CloudId, EditorState};
use crate::engine::Editor;
use crate::gesture::{ClickEvent, DragEvent, PointerEvent, RenderEndEvent, ResizeEvent, ResizeStartEvent, RotateEvent};
use crate::surface::{MemorySurface, NodeId, Surface};

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to read script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid script: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("step {step}: unknown cloud `{id}`")]
    UnknownCloud { step: usize, id: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    pub state: EditorState,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(text: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ReplayError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ReplayError::Io { path: path.to_path_buf(), source })?;
        Self::from_json(&text)
    }
}

/// One scripted interaction. Clouds are named by id; `"background"` names the
/// canvas background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Click {
        target: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        shift: bool,
    },
    /// Drag through `frames` of `[top, left]`.
    Drag { id: CloudId, frames: Vec<[f64; 2]> },
    /// Resize from the handle at `direction` to the given size. Handles on the
    /// north or west edge move the opposite corner's anchor.
    Resize { id: CloudId, direction: [i8; 2], width: f64, height: f64 },
    Rotate { id: CloudId, angle: f64 },
    /// Host-side replacement of parts of the state.
    Edit {
        #[serde(default)]
        scale: Option<f64>,
        #[serde(default)]
        clouds: Option<Vec<Cloud>>,
        #[serde(default)]
        background: Option<Value>,
    },
    Undo,
    Redo,
    Advance { ms: u64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    pub state: EditorState,
    pub history_depth: usize,
    pub history_pointer: usize,
}

/// Replay `script` and report the settled result. Pending history work is
/// flushed before reporting.
pub fn run(script: Script, config: EditorConfig) -> Result<ReplayReport, ReplayError> {
    let surface = MemorySurface::from_clouds(&script.state.clouds);
    let mut editor = Editor::new(script.state, surface, config);
    editor.commit();
    editor.advance(config.history_delay_ms);

    for (index, step) in script.steps.iter().enumerate() {
        apply(&mut editor, index, step)?;
    }
    editor.advance(config.history_delay_ms);

    tracing::info!(
        steps = script.steps.len(),
        depth = editor.history().len(),
        pointer = editor.history().pointer(),
        "replay finished"
    );
    Ok(ReplayReport {
        state: editor.state().clone(),
        history_depth: editor.history().len(),
        history_pointer: editor.history().pointer(),
    })
}

fn apply(editor: &mut Editor<MemorySurface>, step_index: usize, step: &Step) -> Result<(), ReplayError> {
    match step {
        Step::Click { target, ctrl, shift } => {
            let mut input = PointerEvent::new(node_of(editor, step_index, target)?);
            input.modifiers.ctrl = *ctrl;
            input.modifiers.shift = *shift;
            editor.on_click(&ClickEvent { input });
        }
        Step::Drag { id, frames } => {
            let target = node_of(editor, step_index, id)?;
            editor.on_render_start();
            for [top, left] in frames {
                editor.on_drag(&DragEvent { target: target.clone(), top: *top, left: *left });
            }
            editor.on_render_end(RenderEndEvent { is_drag: !frames.is_empty() });
        }
        Step::Resize { id, direction, width, height } => {
            let target = node_of(editor, step_index, id)?;
            let Some(cloud) = editor.state().find_cloud(id) else {
                return Err(ReplayError::UnknownCloud { step: step_index, id: id.clone() });
            };
            let top = if direction[1] < 0 { cloud.top + cloud.height - height } else { cloud.top };
            let left = if direction[0] < 0 { cloud.left + cloud.width - width } else { cloud.left };

            editor.on_render_start();
            editor.on_resize_start(&ResizeStartEvent { target: target.clone(), direction: *direction });
            editor.on_resize(&ResizeEvent {
                target: target.clone(),
                width: *width,
                height: *height,
                drag: DragEvent { target: target.clone(), top, left },
            });
            editor.on_resize_end(&target);
            editor.on_render_end(RenderEndEvent { is_drag: true });
        }
        Step::Rotate { id, angle } => {
            let target = node_of(editor, step_index, id)?;
            editor.on_render_start();
            editor.on_rotate(&RotateEvent { target, transform: format!("rotate({angle}deg)"), absolute_rotate: *angle });
            editor.on_render_end(RenderEndEvent { is_drag: true });
        }
        Step::Edit { scale, clouds, background } => editor.edit(|state| {
            if let Some(scale) = scale {
                state.scale = *scale;
            }
            if let Some(clouds) = clouds {
                state.clouds.clone_from(clouds);
            }
            if let Some(background) = background {
                state.background = background.clone();
            }
        }),
        Step::Undo => {
            if !editor.undo() {
                tracing::debug!(step = step_index, "nothing to undo");
            }
            editor.tick();
        }
        Step::Redo => {
            if !editor.redo() {
                tracing::debug!(step = step_index, "nothing to redo");
            }
            editor.tick();
        }
        Step::Advance { ms } => editor.advance(*ms),
    }
    Ok(())
}

fn node_of(editor: &Editor<MemorySurface>, step: usize, id: &str) -> Result<NodeId, ReplayError> {
    if id == BACKGROUND_NODE {
        return Ok(BACKGROUND_NODE.to_owned());
    }
    editor
        .surface
        .node_for_cloud(id)
        .ok_or_else(|| ReplayError::UnknownCloud { step, id: id.to_owned() })
}
