//! Shared constants for the editor core.

use crate::geom::Direction;

// ── History ─────────────────────────────────────────────────────

/// Trailing debounce window for history captures, in milliseconds.
pub const DEFAULT_HISTORY_DELAY_MS: u64 = 500;

// ── Guidelines ──────────────────────────────────────────────────

/// Number of nearest clouds offered to the manipulator as snap references.
pub const GUIDELINE_LIMIT: usize = 5;

// ── Resize handles ──────────────────────────────────────────────

/// Handles shown for a single cloud that declares no preference.
pub const DEFAULT_RENDER_DIRECTIONS: [Direction; 8] = [
    Direction::N,
    Direction::Nw,
    Direction::Ne,
    Direction::S,
    Direction::Se,
    Direction::Sw,
    Direction::E,
    Direction::W,
];

/// Handles shown while several clouds are selected together.
pub const GROUP_RENDER_DIRECTIONS: [Direction; 4] = [Direction::Nw, Direction::Ne, Direction::Sw, Direction::Se];

// ── Presentation ────────────────────────────────────────────────

/// Class applied to the manipulator frame when the first target is locked.
pub const LOCK_CLASS: &str = "lock";

/// Render node id used by [`crate::surface::MemorySurface`] for the canvas background.
pub const BACKGROUND_NODE: &str = "background";
