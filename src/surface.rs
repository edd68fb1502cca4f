//! Render-tree boundary: how the core reads and writes the presentation of
//! clouds without owning it.
//!
//! The host implements [`Surface`] over its real render tree. [`MemorySurface`]
//! is a self-contained implementation used by the replay binary and tests.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use std::collections::HashMap;

use serde_json::Value;

use crate::consts::BACKGROUND_NODE;
use crate::doc::{Cloud, CloudId};
use crate::geom::Scale;

/// Identifier of a node in the render tree.
pub type NodeId = String;

/// Sparse presentation update. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StylePatch {
    pub top: Option<f64>,
    pub left: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub transform: Option<String>,
}

impl StylePatch {
    #[must_use]
    pub fn position(top: f64, left: f64) -> Self {
        Self { top: Some(top), left: Some(left), ..Default::default() }
    }

    #[must_use]
    pub fn size(width: f64, height: f64) -> Self {
        Self { width: Some(width), height: Some(height), ..Default::default() }
    }

    #[must_use]
    pub fn transform(transform: impl Into<String>) -> Self {
        Self { transform: Some(transform.into()), ..Default::default() }
    }

    /// Position and size of `cloud`.
    #[must_use]
    pub fn rect(cloud: &Cloud) -> Self {
        Self {
            top: Some(cloud.top),
            left: Some(cloud.left),
            width: Some(cloud.width),
            height: Some(cloud.height),
            transform: None,
        }
    }

    /// Overlay the present fields of `other` onto `self`.
    pub fn merge(&mut self, other: &StylePatch) {
        if let Some(v) = other.top {
            self.top = Some(v);
        }
        if let Some(v) = other.left {
            self.left = Some(v);
        }
        if let Some(v) = other.width {
            self.width = Some(v);
        }
        if let Some(v) = other.height {
            self.height = Some(v);
        }
        if let Some(ref v) = other.transform {
            self.transform = Some(v.clone());
        }
    }
}

/// The render tree as seen by the interaction core.
pub trait Surface {
    /// Whether `node` is the canvas background.
    fn is_background(&self, node: &str) -> bool;

    /// The outermost cloud node enclosing `node` (itself included).
    fn top_cloud_node(&self, node: &str) -> Option<NodeId>;

    /// The cloud rendered by `node`, if it renders one.
    fn cloud_id(&self, node: &str) -> Option<CloudId>;

    /// The node rendering cloud `id`.
    fn node_for_cloud(&self, id: &str) -> Option<NodeId>;

    fn apply_style(&mut self, node: &str, patch: &StylePatch);

    /// Apply (`Some`) or clear (`None`) a presentation-only scale on the
    /// content container of a group node, anchored at its top-left.
    fn set_content_scale(&mut self, node: &str, scale: Option<Scale>);

    fn set_background(&mut self, background: &Value);

    /// Re-render after the cloud set was replaced wholesale.
    fn sync_clouds(&mut self, clouds: &[Cloud]);

    /// Write the geometry attributes of `clouds` (recursively) to their nodes.
    fn refresh_rects(&mut self, clouds: &[Cloud]);
}

/// A node of [`MemorySurface`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryNode {
    pub parent: Option<NodeId>,
    pub cloud_id: Option<CloudId>,
    pub style: StylePatch,
    pub content_scale: Option<Scale>,
}

/// In-memory render tree: one node per cloud, nested like the cloud tree,
/// plus the background node and any decoration nodes added by the caller.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    nodes: HashMap<NodeId, MemoryNode>,
    background: Value,
}

impl Default for MemorySurface {
    fn default() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(BACKGROUND_NODE.to_owned(), MemoryNode::default());
        Self { nodes, background: Value::Null }
    }
}

impl MemorySurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a surface rendering `clouds`.
    #[must_use]
    pub fn from_clouds(clouds: &[Cloud]) -> Self {
        let mut surface = Self::new();
        surface.sync_clouds(clouds);
        surface
    }

    /// Node id used for cloud `id`.
    #[must_use]
    pub fn node_id(id: &str) -> NodeId {
        format!("cloud:{id}")
    }

    /// Add a non-selectable decoration node under `parent`.
    pub fn add_inner(&mut self, parent: &str, node: impl Into<NodeId>) {
        self.nodes.insert(node.into(), MemoryNode { parent: Some(parent.to_owned()), ..Default::default() });
    }

    #[must_use]
    pub fn node(&self, node: &str) -> Option<&MemoryNode> {
        self.nodes.get(node)
    }

    #[must_use]
    pub fn style(&self, node: &str) -> Option<&StylePatch> {
        self.nodes.get(node).map(|n| &n.style)
    }

    #[must_use]
    pub fn background(&self) -> &Value {
        &self.background
    }

    fn render(&mut self, clouds: &[Cloud], parent: Option<&str>) {
        for cloud in clouds {
            let id = Self::node_id(&cloud.id);
            let node = self.nodes.entry(id.clone()).or_default();
            node.parent = parent.map(str::to_owned);
            node.cloud_id = Some(cloud.id.clone());
            node.style.merge(&StylePatch::rect(cloud));
            node.style.transform = Some(cloud.transform.clone());
            if let Some(children) = cloud.clouds.as_deref() {
                self.render(children, Some(&id));
            }
        }
    }

    fn write_rects(&mut self, clouds: &[Cloud]) {
        for cloud in clouds {
            if let Some(node) = self.nodes.get_mut(&Self::node_id(&cloud.id)) {
                node.style.merge(&StylePatch::rect(cloud));
            }
            if let Some(children) = cloud.clouds.as_deref() {
                self.write_rects(children);
            }
        }
    }
}

fn collect_ids(clouds: &[Cloud], out: &mut Vec<CloudId>) {
    for cloud in clouds {
        out.push(cloud.id.clone());
        if let Some(children) = cloud.clouds.as_deref() {
            collect_ids(children, out);
        }
    }
}

impl Surface for MemorySurface {
    fn is_background(&self, node: &str) -> bool {
        node == BACKGROUND_NODE
    }

    fn top_cloud_node(&self, node: &str) -> Option<NodeId> {
        let mut top = None;
        let mut cursor = Some(node.to_owned());
        while let Some(current) = cursor {
            let entry = self.nodes.get(&current)?;
            cursor = entry.parent.clone();
            if entry.cloud_id.is_some() {
                top = Some(current);
            }
        }
        top
    }

    fn cloud_id(&self, node: &str) -> Option<CloudId> {
        self.nodes.get(node).and_then(|n| n.cloud_id.clone())
    }

    fn node_for_cloud(&self, id: &str) -> Option<NodeId> {
        let node = Self::node_id(id);
        self.nodes.contains_key(&node).then_some(node)
    }

    fn apply_style(&mut self, node: &str, patch: &StylePatch) {
        if let Some(entry) = self.nodes.get_mut(node) {
            entry.style.merge(patch);
        }
    }

    fn set_content_scale(&mut self, node: &str, scale: Option<Scale>) {
        if let Some(entry) = self.nodes.get_mut(node) {
            entry.content_scale = scale;
        }
    }

    fn set_background(&mut self, background: &Value) {
        self.background = background.clone();
    }

    fn sync_clouds(&mut self, clouds: &[Cloud]) {
        let mut live = Vec::new();
        collect_ids(clouds, &mut live);
        self.nodes
            .retain(|_, node| node.cloud_id.as_ref().is_none_or(|id| live.contains(id)));
        self.render(clouds, None);
        // Decoration nodes whose owner vanished go with it.
        loop {
            let orphans: Vec<NodeId> = self
                .nodes
                .iter()
                .filter(|(_, n)| n.parent.as_ref().is_some_and(|p| !self.nodes.contains_key(p)))
                .map(|(id, _)| id.clone())
                .collect();
            if orphans.is_empty() {
                break;
            }
            for id in orphans {
                self.nodes.remove(&id);
            }
        }
    }

    fn refresh_rects(&mut self, clouds: &[Cloud]) {
        self.write_rects(clouds);
    }
}
