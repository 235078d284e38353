//! Host-facing traits: target resolution and property writes.
//!
//! The animation core never owns host nodes. Players hold a root [`NodeId`] and ask
//! the host to resolve descendants by path each tick; sampled values are pushed
//! through [`PropertySink`] and never read back.

use crate::ids::NodeId;
use crate::value::{Color3, Vec2};

/// Resolves a property set's path relative to a player's root node.
/// Adapters implement this against their own scene graph.
pub trait TargetResolver {
    /// Return the first descendant of `root` matching `path`, if any.
    /// An empty path is handled by the caller and never reaches the resolver.
    fn resolve(&self, root: NodeId, path: &str) -> Option<NodeId>;
}

/// Write-only node mutation interface.
pub trait PropertySink {
    fn set_position(&mut self, node: NodeId, position: Vec2);
    fn set_color(&mut self, node: NodeId, color: Color3);
    fn set_scale_x(&mut self, node: NodeId, scale: f32);
    fn set_scale_y(&mut self, node: NodeId, scale: f32);
    fn set_rotation(&mut self, node: NodeId, degrees: f32);
    fn set_skew_x(&mut self, node: NodeId, skew: f32);
    fn set_skew_y(&mut self, node: NodeId, skew: f32);
    fn set_opacity(&mut self, node: NodeId, opacity: f32);
    fn set_anchor_point(&mut self, node: NodeId, anchor: Vec2);
    /// Anchor update when only the x track is animated.
    fn set_anchor_x(&mut self, node: NodeId, x: f32);
    /// Anchor update when only the y track is animated.
    fn set_anchor_y(&mut self, node: NodeId, y: f32);
    fn set_position_x(&mut self, node: NodeId, x: f32);
    fn set_position_y(&mut self, node: NodeId, y: f32);
}

/// Everything a player needs from the host.
pub trait SceneHost: TargetResolver + PropertySink {}

impl<T: TargetResolver + PropertySink + ?Sized> SceneHost for T {}

/// Resolve a property set's path against `root`; the empty path is the root itself.
pub(crate) fn resolve_target<R: TargetResolver + ?Sized>(
    resolver: &R,
    root: NodeId,
    path: &str,
) -> Option<NodeId> {
    if path.is_empty() {
        Some(root)
    } else {
        resolver.resolve(root, path)
    }
}
