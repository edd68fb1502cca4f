//! Canvas-space geometry: points, corner quads, resize handles and scale pairs.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// The four corners of an axis-aligned box, in the order the manipulator
/// reports them: top-left, top-right, bottom-left, bottom-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub pos1: Point,
    pub pos2: Point,
    pub pos3: Point,
    pub pos4: Point,
}

impl Quad {
    /// Build the quad of a box from its top/left corner and size.
    #[must_use]
    pub fn from_rect(top: f64, left: f64, width: f64, height: f64) -> Self {
        let right = left + width;
        let bottom = top + height;
        Self {
            pos1: Point::new(left, top),
            pos2: Point::new(right, top),
            pos3: Point::new(left, bottom),
            pos4: Point::new(right, bottom),
        }
    }

    /// A degenerate quad collapsed onto the origin.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_rect(0.0, 0.0, 0.0, 0.0)
    }

    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        [self.pos1, self.pos2, self.pos3, self.pos4]
    }

    /// Smallest distance between any corner of `self` and any corner of `other`.
    #[must_use]
    pub fn min_corner_distance(&self, other: &Quad) -> f64 {
        self.corners()
            .iter()
            .flat_map(|a| other.corners().map(|b| a.distance(b)))
            .fold(f64::INFINITY, f64::min)
    }

    /// Axis-aligned union of two quads.
    #[must_use]
    pub fn union(&self, other: &Quad) -> Quad {
        let left = self.pos1.x.min(other.pos1.x);
        let top = self.pos1.y.min(other.pos1.y);
        let right = self.pos4.x.max(other.pos4.x);
        let bottom = self.pos4.y.max(other.pos4.y);
        Quad::from_rect(top, left, right - left, bottom - top)
    }
}

/// Per-axis scale factors `(new / old)` produced by a resize gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub x: f64,
    pub y: f64,
}

impl Scale {
    pub const IDENTITY: Scale = Scale { x: 1.0, y: 1.0 };

    /// Ratio of the live size to the start size. A zero start size on an axis
    /// yields 1.0 on that axis.
    #[must_use]
    pub fn between(start_width: f64, start_height: f64, width: f64, height: f64) -> Self {
        Self { x: ratio(width, start_width), y: ratio(height, start_height) }
    }
}

fn ratio(value: f64, start: f64) -> f64 {
    if start.abs() < f64::EPSILON { 1.0 } else { value / start }
}

/// Resize handle position around the manipulator frame.
///
/// ```text
/// nw      n      ne
/// [-1,-1] [0,-1] [1,-1]
/// w              e
/// [-1, 0]        [1, 0]
/// sw      s      se
/// [-1, 1] [0, 1] [1, 1]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl Direction {
    /// Map the manipulator's `[x, y]` handle vector to a named handle.
    #[must_use]
    pub fn from_vector(vector: [i8; 2]) -> Option<Self> {
        match vector {
            [-1, -1] => Some(Self::Nw),
            [0, -1] => Some(Self::N),
            [1, -1] => Some(Self::Ne),
            [1, 0] => Some(Self::E),
            [1, 1] => Some(Self::Se),
            [0, 1] => Some(Self::S),
            [-1, 1] => Some(Self::Sw),
            [-1, 0] => Some(Self::W),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::Ne => "ne",
            Self::E => "e",
            Self::Se => "se",
            Self::S => "s",
            Self::Sw => "sw",
            Self::W => "w",
            Self::Nw => "nw",
        }
    }
}
