//! In-memory scene graph implementing the host traits.
//!
//! Used by headless tools (the reader can build into it) and by tests. Nodes live in
//! a flat arena indexed by [`NodeId`]; children keep insertion order, which is the
//! order path lookups search in.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::binding::{PropertySink, TargetResolver};
use crate::ids::NodeId;
use crate::value::{Color3, Vec2};

/// Path segment that matches any single child name.
pub const WILDCARD: &str = "*";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneNode {
    pub name: String,
    /// Host-side kind label, e.g. "Sprite".
    pub kind: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Nodes owned by this one but not part of the child list (a button's title).
    pub attachments: Vec<NodeId>,
    pub tag: i32,
    pub position: Vec2,
    pub color: Color3,
    pub scale_x: f32,
    pub scale_y: f32,
    pub rotation: f32,
    pub skew_x: f32,
    pub skew_y: f32,
    pub opacity: f32,
    pub anchor: Vec2,
    pub content_size: Vec2,
    /// Number of property writes received through [`PropertySink`].
    pub writes: u32,
}

impl SceneNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: "Node".to_string(),
            parent: None,
            children: Vec::new(),
            attachments: Vec::new(),
            tag: -1,
            position: Vec2::default(),
            color: Color3::WHITE,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            skew_x: 0.0,
            skew_y: 0.0,
            opacity: 255.0,
            anchor: Vec2::new(0.5, 0.5),
            content_size: Vec2::default(),
            writes: 0,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MemoryScene {
    nodes: Vec<SceneNode>,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node named `name` under `parent` (or as a new root).
    pub fn add_node(&mut self, parent: Option<NodeId>, name: impl Into<String>) -> NodeId {
        self.insert(parent, SceneNode::new(name))
    }

    /// Add a fully described node. Its `parent` and `children` are overwritten.
    pub fn insert(&mut self, parent: Option<NodeId>, mut node: SceneNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        node.parent = parent.filter(|p| self.contains(*p));
        node.children.clear();
        if let Some(p) = node.parent {
            self.nodes[p.0 as usize].children.push(id);
        }
        self.nodes.push(node);
        id
    }

    /// Move `child` under `parent`, appending it to the parent's child list.
    /// Ignored when either node is unknown or when it would create a cycle.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.contains(parent) || !self.contains(child) || self.is_ancestor(child, parent) {
            trace!("add_child({:?}, {:?}) ignored", parent, child);
            return;
        }
        if let Some(old) = self.nodes[child.0 as usize].parent {
            self.nodes[old.0 as usize].children.retain(|c| *c != child);
        }
        self.nodes[child.0 as usize].parent = Some(parent);
        self.nodes[parent.0 as usize].children.push(child);
    }

    /// True when `ancestor` is `node` or one of its parents.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = self.node(id).and_then(|n| n.parent);
        }
        false
    }

    /// Record `node` as owned by `owner` without making it a child.
    pub fn attach(&mut self, owner: NodeId, node: NodeId) {
        if self.contains(node) {
            if let Some(o) = self.node_mut(owner) {
                o.attachments.push(node);
            }
        }
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        (id.0 as usize) < self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0 as usize)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.0 as usize)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(&[], |n| n.children.as_slice())
    }

    /// First direct child of `parent` called `name`.
    pub fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|c| self.nodes[c.0 as usize].name == name)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total property writes across all nodes.
    pub fn total_writes(&self) -> u64 {
        self.nodes.iter().map(|n| u64::from(n.writes)).sum()
    }

    pub fn reset_write_counts(&mut self) {
        for n in &mut self.nodes {
            n.writes = 0;
        }
    }

    fn find_path(&self, from: NodeId, segments: &[&str]) -> Option<NodeId> {
        let Some((head, rest)) = segments.split_first() else {
            return Some(from);
        };
        // Depth-first in child order; the first complete match wins.
        self.children(from)
            .iter()
            .copied()
            .filter(|c| *head == WILDCARD || self.nodes[c.0 as usize].name == *head)
            .find_map(|c| self.find_path(c, rest))
    }

    fn write(&mut self, id: NodeId, f: impl FnOnce(&mut SceneNode)) {
        match self.nodes.get_mut(id.0 as usize) {
            Some(node) => {
                f(node);
                node.writes += 1;
            }
            None => trace!("write to unknown node {:?}", id),
        }
    }
}

impl TargetResolver for MemoryScene {
    fn resolve(&self, root: NodeId, path: &str) -> Option<NodeId> {
        if !self.contains(root) {
            return None;
        }
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            return None;
        }
        self.find_path(root, &segments)
    }
}

impl PropertySink for MemoryScene {
    fn set_position(&mut self, node: NodeId, position: Vec2) {
        self.write(node, |n| n.position = position);
    }

    fn set_color(&mut self, node: NodeId, color: Color3) {
        self.write(node, |n| n.color = color);
    }

    fn set_scale_x(&mut self, node: NodeId, scale: f32) {
        self.write(node, |n| n.scale_x = scale);
    }

    fn set_scale_y(&mut self, node: NodeId, scale: f32) {
        self.write(node, |n| n.scale_y = scale);
    }

    fn set_rotation(&mut self, node: NodeId, degrees: f32) {
        self.write(node, |n| n.rotation = degrees);
    }

    fn set_skew_x(&mut self, node: NodeId, skew: f32) {
        self.write(node, |n| n.skew_x = skew);
    }

    fn set_skew_y(&mut self, node: NodeId, skew: f32) {
        self.write(node, |n| n.skew_y = skew);
    }

    fn set_opacity(&mut self, node: NodeId, opacity: f32) {
        self.write(node, |n| n.opacity = opacity);
    }

    fn set_anchor_point(&mut self, node: NodeId, anchor: Vec2) {
        self.write(node, |n| n.anchor = anchor);
    }

    fn set_anchor_x(&mut self, node: NodeId, x: f32) {
        self.write(node, |n| n.anchor.x = x);
    }

    fn set_anchor_y(&mut self, node: NodeId, y: f32) {
        self.write(node, |n| n.anchor.y = y);
    }

    fn set_position_x(&mut self, node: NodeId, x: f32) {
        self.write(node, |n| n.position.x = x);
    }

    fn set_position_y(&mut self, node: NodeId, y: f32) {
        self.write(node, |n| n.position.y = y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_first_match_and_wildcard() {
        let mut scene = MemoryScene::new();
        let root = scene.add_node(None, "root");
        let a1 = scene.add_node(Some(root), "a");
        let a2 = scene.add_node(Some(root), "a");
        let b2 = scene.add_node(Some(a2), "b");

        assert_eq!(scene.resolve(root, "a"), Some(a1));
        // first `a` has no `b`, so the search continues to the second
        assert_eq!(scene.resolve(root, "a/b"), Some(b2));
        assert_eq!(scene.resolve(root, "*/b"), Some(b2));
        assert_eq!(scene.resolve(root, "/a/"), Some(a1));
        assert_eq!(scene.resolve(root, "missing"), None);
        assert_eq!(scene.resolve(NodeId(42), "a"), None);
    }

    #[test]
    fn writes_are_counted() {
        let mut scene = MemoryScene::new();
        let n = scene.add_node(None, "n");
        scene.set_anchor_x(n, 0.0);
        scene.set_position_y(n, 3.0);
        let node = scene.node(n).unwrap();
        assert_eq!(node.anchor, Vec2::new(0.0, 0.5));
        assert_eq!(node.position.y, 3.0);
        assert_eq!(node.writes, 2);
        scene.set_opacity(NodeId(9), 1.0);
        assert_eq!(scene.total_writes(), 2);
    }

    #[test]
    fn add_child_reparents_and_rejects_cycles() {
        let mut scene = MemoryScene::new();
        let a = scene.add_node(None, "a");
        let b = scene.add_node(Some(a), "b");
        let c = scene.add_node(None, "c");
        scene.add_child(c, b);
        assert!(scene.children(a).is_empty());
        assert_eq!(scene.children(c), &[b]);
        assert_eq!(scene.resolve(c, "b"), Some(b));
        scene.add_child(b, c);
        assert_eq!(scene.node(c).unwrap().parent, None);
    }
}
