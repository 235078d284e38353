//! [`NodeFactory`] for the core's in-memory scene, so exports can be built and
//! animated headless.

use creator_animation_core::scene::{MemoryScene, SceneNode};
use creator_animation_core::{NodeId, Vec2};

use crate::node::{NodeFactory, NodeKind};

impl NodeFactory for MemoryScene {
    fn create(&mut self, kind: &NodeKind) -> Option<NodeId> {
        let def = kind.node();
        let mut node = SceneNode::new(def.name.clone());
        node.kind = kind.kind_name().to_string();
        node.tag = def.tag;
        node.position = def.position;
        node.color = def.color;
        node.opacity = def.opacity;
        node.scale_x = def.scale_x;
        node.scale_y = def.scale_y;
        node.rotation = def.rotation_skew_x;
        node.skew_x = def.skew_x;
        node.skew_y = def.skew_y;
        node.anchor = def.anchor_point;
        node.content_size = Vec2::new(def.content_size.w, def.content_size.h);
        Some(self.insert(None, node))
    }

    fn add_child(&mut self, parent: NodeId, child: NodeId) {
        MemoryScene::add_child(self, parent, child);
    }

    fn set_title_label(&mut self, button: NodeId, label: NodeId) {
        self.attach(button, label);
    }
}
