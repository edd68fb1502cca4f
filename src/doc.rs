//! Document model: clouds, the editor state that history snapshots capture,
//! and the lookups the interaction core needs over the cloud tree.
//!
//! A cloud is either a leaf or a group holding nested clouds. The selection
//! (`targetClouds`) is kept as ids rather than copies so a restored snapshot
//! can never leave it pointing at objects that are no longer in `clouds`.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::geom::{Quad, Scale};

/// Stable identifier of a cloud.
pub type CloudId = String;

/// A selectable, positionable visual object on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cloud {
    pub id: CloudId,
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    /// Absolute rotation in degrees.
    #[serde(default)]
    pub rotate: f64,
    /// Presentation transform string as produced by the manipulator.
    #[serde(default)]
    pub transform: String,
    /// Locked clouds are neither draggable, resizable nor rotatable.
    #[serde(default)]
    pub lock: bool,
    /// Nested clouds; present only on group objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clouds: Option<Vec<Cloud>>,
    /// Author-defined fields carried through snapshots untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Cloud {
    /// Create a leaf cloud with a fresh id.
    #[must_use]
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), top, left, width, height)
    }

    /// Create a leaf cloud with a caller-chosen id.
    #[must_use]
    pub fn with_id(id: impl Into<CloudId>, top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            left,
            width,
            height,
            rotate: 0.0,
            transform: String::new(),
            lock: false,
            clouds: None,
            extra: Map::new(),
        }
    }

    /// Turn this cloud into a group containing `children`.
    #[must_use]
    pub fn grouping(mut self, children: Vec<Cloud>) -> Self {
        self.clouds = Some(children);
        self
    }

    #[must_use]
    pub fn locked(mut self) -> Self {
        self.lock = true;
        self
    }

    /// Whether this cloud is a group object.
    #[must_use]
    pub fn is_group(&self) -> bool {
        self.clouds.is_some()
    }

    /// Corner quad of the unrotated bounding box.
    #[must_use]
    pub fn quad(&self) -> Quad {
        Quad::from_rect(self.top, self.left, self.width, self.height)
    }

    /// Multiply position and size by `scale`.
    pub fn scale_by(&mut self, scale: Scale) {
        self.top *= scale.y;
        self.left *= scale.x;
        self.width *= scale.x;
        self.height *= scale.y;
    }
}

/// The editor state captured by history snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorState {
    /// Zoom factor of the canvas.
    pub scale: f64,
    /// All top-level clouds, in paint order.
    #[serde(default)]
    pub clouds: Vec<Cloud>,
    /// Ids of the selected clouds, in `clouds` order.
    #[serde(default)]
    pub target_clouds: Vec<CloudId>,
    /// Opaque background configuration handed to the surface.
    #[serde(default)]
    pub background: Value,
}

impl Default for EditorState {
    fn default() -> Self {
        Self { scale: 1.0, clouds: Vec::new(), target_clouds: Vec::new(), background: Value::Null }
    }
}

impl EditorState {
    #[must_use]
    pub fn new(clouds: Vec<Cloud>) -> Self {
        Self { clouds, ..Self::default() }
    }

    /// Find a top-level cloud by id.
    #[must_use]
    pub fn top_cloud(&self, id: &str) -> Option<&Cloud> {
        self.clouds.iter().find(|c| c.id == id)
    }

    /// Mutable access to a top-level cloud by id.
    pub fn top_cloud_mut(&mut self, id: &str) -> Option<&mut Cloud> {
        self.clouds.iter_mut().find(|c| c.id == id)
    }

    /// Find a cloud anywhere in the tree by id.
    #[must_use]
    pub fn find_cloud(&self, id: &str) -> Option<&Cloud> {
        find_in(&self.clouds, id)
    }

    /// Mutable access to a cloud anywhere in the tree by id.
    pub fn find_cloud_mut(&mut self, id: &str) -> Option<&mut Cloud> {
        find_in_mut(&mut self.clouds, id)
    }

    /// The selected clouds, resolved against the live tree.
    #[must_use]
    pub fn target_clouds(&self) -> Vec<&Cloud> {
        self.target_clouds.iter().filter_map(|id| self.find_cloud(id)).collect()
    }

    /// Replace the selection with those of `ids` that name top-level clouds,
    /// keeping `clouds` order.
    pub fn select_ids(&mut self, ids: &[CloudId]) {
        self.target_clouds = self
            .clouds
            .iter()
            .filter(|c| ids.contains(&c.id))
            .map(|c| c.id.clone())
            .collect();
    }
}

fn find_in<'a>(clouds: &'a [Cloud], id: &str) -> Option<&'a Cloud> {
    for cloud in clouds {
        if cloud.id == id {
            return Some(cloud);
        }
        if let Some(found) = cloud.clouds.as_deref().and_then(|children| find_in(children, id)) {
            return Some(found);
        }
    }
    None
}

fn find_in_mut<'a>(clouds: &'a mut [Cloud], id: &str) -> Option<&'a mut Cloud> {
    for cloud in clouds {
        if cloud.id == id {
            return Some(cloud);
        }
        if let Some(children) = cloud.clouds.as_deref_mut() {
            if let Some(found) = find_in_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}
